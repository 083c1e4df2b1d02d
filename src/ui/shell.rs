use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::{ClientScope, SessionState};
use crate::ui::pages::LoginPage;
use crate::util::version;

/// Sidebar layout wrapping every page. When connection settings are missing
/// the login form is shown instead, so no page ever renders unconfigured.
#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<SessionState>>();

    if !state.with(|s| s.is_configured()) {
        return rsx! { LoginPage {} };
    }

    let current_route = use_route::<Route>();
    let scope: Option<ClientScope> = current_route
        .client_id()
        .and_then(|id| state.with(|s| s.scope_for(id)));
    let operator = state.with(|s| s.operator.clone());

    rsx! {
        div { class: "flex h-screen bg-gray-100",
            aside { class: "w-64 bg-white h-full shadow-lg flex flex-col",
                div { class: "p-4 border-b",
                    h1 { class: "text-xl font-bold text-gray-800", "{version::APP_NAME}" }
                    p { class: "text-xs text-gray-400", "{version::version_label()}" }
                }
                nav { class: "flex-1 overflow-y-auto",
                    ul { class: "p-2 space-y-2",
                        SideLink {
                            active: matches!(current_route, Route::Dashboard {}),
                            to: Route::Dashboard {},
                            icon: "📊",
                            label: "Dashboard",
                        }
                        SideLink {
                            active: matches!(current_route, Route::Clients {}),
                            to: Route::Clients {},
                            icon: "👥",
                            label: "Clients",
                        }
                        SideLink {
                            active: matches!(current_route, Route::Inbound {}),
                            to: Route::Inbound {},
                            icon: "📦",
                            label: "Inbound Packages",
                        }
                        if let Some(scope) = scope {
                            li { class: "ml-4 mt-2",
                                p { class: "block text-sm font-semibold mb-2 text-gray-500",
                                    {scope_heading(&scope)}
                                }
                                ul { class: "space-y-1",
                                    SideSubLink {
                                        active: matches!(current_route, Route::ClientOverview { .. }),
                                        to: Route::ClientOverview { client_id: scope.id.to_string() },
                                        icon: "🏢",
                                        label: "Overview",
                                    }
                                    SideSubLink {
                                        active: matches!(current_route, Route::NetworkDocs { .. }),
                                        to: Route::NetworkDocs { client_id: scope.id.to_string() },
                                        icon: "🌐",
                                        label: "Network",
                                    }
                                    SideSubLink {
                                        active: matches!(current_route, Route::Printers { .. }),
                                        to: Route::Printers { client_id: scope.id.to_string() },
                                        icon: "🖨️",
                                        label: "Printers",
                                    }
                                    SideSubLink {
                                        active: matches!(current_route, Route::Assets { .. }),
                                        to: Route::Assets { client_id: scope.id.to_string() },
                                        icon: "🗄️",
                                        label: "Assets",
                                    }
                                    SideSubLink {
                                        active: matches!(current_route, Route::Applications { .. }),
                                        to: Route::Applications { client_id: scope.id.to_string() },
                                        icon: "🪟",
                                        label: "Applications",
                                    }
                                    SideSubLink {
                                        active: matches!(current_route, Route::ClientInbound { .. }),
                                        to: Route::ClientInbound { client_id: scope.id.to_string() },
                                        icon: "📦",
                                        label: "Inbound",
                                    }
                                }
                            }
                        }
                        SideLink {
                            active: matches!(current_route, Route::Integration {}),
                            to: Route::Integration {},
                            icon: "⚙️",
                            label: "Integration",
                        }
                    }
                }
                div { class: "p-4 border-t",
                    p { class: "text-sm text-gray-700", "{operator.name}" }
                    p { class: "text-xs text-gray-400", "{operator.email}" }
                }
            }
            main { class: "flex-1 overflow-y-auto p-8",
                {children}
            }
        }
    }
}

fn scope_heading(scope: &ClientScope) -> String {
    if scope.name.is_empty() {
        "Client Documentation".to_string()
    } else {
        format!("{} - Documentation", scope.name)
    }
}

#[component]
fn SideLink(active: bool, to: Route, icon: &'static str, label: &'static str) -> Element {
    let nav = use_navigator();
    let class = if active {
        "w-full flex items-center p-2 rounded-lg bg-blue-100 text-blue-600"
    } else {
        "w-full flex items-center p-2 rounded-lg text-gray-700 hover:bg-gray-100"
    };
    rsx! {
        li {
            button {
                class: "{class}",
                onclick: move |_| { nav.push(to.clone()); },
                span { class: "mr-3", "{icon}" }
                "{label}"
            }
        }
    }
}

#[component]
fn SideSubLink(active: bool, to: Route, icon: &'static str, label: &'static str) -> Element {
    let nav = use_navigator();
    let class = if active {
        "w-full flex items-center p-2 text-sm rounded-lg bg-blue-100 text-blue-600"
    } else {
        "w-full flex items-center p-2 text-sm rounded-lg text-gray-700 hover:bg-gray-100"
    };
    rsx! {
        li {
            button {
                class: "{class}",
                onclick: move |_| { nav.push(to.clone()); },
                span { class: "mr-2", "{icon}" }
                "{label}"
            }
        }
    }
}
