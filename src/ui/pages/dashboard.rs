use dioxus::prelude::*;

use crate::domain::{today, ActivityEntry, InboundPackage, SessionState};
use crate::infra::queries::DashboardCounts;
use crate::infra::store::StoreClient;
use crate::ui::components::stat_card::StatCard;
use crate::ui::components::toast::ToastMessage;
use crate::ui::pages::{display_date, display_datetime, report_store_error, Loading};
use crate::ui::theme;

struct DashboardData {
    counts: DashboardCounts,
    recent_activity: Vec<ActivityEntry>,
    recent_inbound: Vec<InboundPackage>,
}

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let data = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            let store = state.with(StoreClient::from_session).ok()?;
            let now = today();

            let counts = match store.dashboard_counts(now).await {
                Ok(counts) => counts,
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load dashboard", &err);
                    return None;
                }
            };
            let recent_activity = match store.recent_activity(5).await {
                Ok(entries) => entries,
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load recent activity", &err);
                    Vec::new()
                }
            };
            let recent_inbound = match store.recent_packages(5, now).await {
                Ok(packages) => packages,
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load recent packages", &err);
                    Vec::new()
                }
            };

            Some(DashboardData {
                counts,
                recent_activity,
                recent_inbound,
            })
        }
    });

    let content = match &*data.read() {
        None => return rsx! { Loading {} },
        Some(None) => None,
        Some(Some(loaded)) => Some((
            loaded.counts,
            loaded.recent_activity.clone(),
            loaded.recent_inbound.clone(),
        )),
    };

    let Some((counts, recent_activity, recent_inbound)) = content else {
        return rsx! {
            div { class: "space-y-6",
                h1 { class: "{theme::PAGE_TITLE}", "Dashboard" }
                p { class: "text-sm text-gray-500", "Dashboard data is unavailable." }
            }
        };
    };

    rsx! {
        div { class: "space-y-6",
            h1 { class: "{theme::PAGE_TITLE}", "Dashboard" }

            div { class: "grid grid-cols-1 md:grid-cols-3 gap-6",
                StatCard {
                    title: "Total Clients".to_string(),
                    value: counts.total_clients.to_string(),
                    value_class: "text-2xl font-bold text-gray-800",
                    icon: "👥",
                }
                StatCard {
                    title: "Pending Inbound".to_string(),
                    value: counts.pending_inbound.to_string(),
                    value_class: "text-2xl font-bold text-gray-800",
                    icon: "📦",
                }
                StatCard {
                    title: "Overdue Packages".to_string(),
                    value: counts.overdue.to_string(),
                    value_class: "text-2xl font-bold text-gray-800",
                    icon: "🚨",
                }
            }

            div { class: "grid grid-cols-1 lg:grid-cols-2 gap-6",
                div { class: "{theme::PANEL_PADDED}",
                    h2 { class: "text-lg font-semibold text-gray-800 mb-4", "Recent Activity" }
                    if recent_activity.is_empty() {
                        p { class: "text-sm text-gray-500", "No recent activity" }
                    } else {
                        div { class: "space-y-4",
                            for entry in recent_activity {
                                div { class: "flex items-center space-x-4", key: "{entry.id}",
                                    div { class: "{theme::action_dot(&entry.action)}" }
                                    div {
                                        p { class: "text-sm text-gray-800", "{entry.details}" }
                                        p { class: "text-xs text-gray-500",
                                            {display_datetime(entry.created_at)}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div { class: "{theme::PANEL_PADDED}",
                    h2 { class: "text-lg font-semibold text-gray-800 mb-4", "Recent Inbound" }
                    if recent_inbound.is_empty() {
                        p { class: "text-sm text-gray-500", "No recent inbound packages" }
                    } else {
                        div { class: "space-y-4",
                            for pkg in recent_inbound {
                                div { class: "flex items-center space-x-4", key: "{pkg.id}",
                                    span { class: "text-xl", "📦" }
                                    div {
                                        p { class: "text-sm text-gray-800",
                                            "{pkg.package_type} for {pkg.client_name}"
                                        }
                                        p { class: "text-xs text-gray-500",
                                            "Received {display_date(pkg.received_date.date())}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
