use dioxus::prelude::*;

use crate::app::{persist_session, DirectoryRefresh, Route};
use crate::domain::{session::default_relay_url, Operator, SessionState};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::theme;
use crate::util::version;

/// Connection settings and operator identity. Shown on first run and after a
/// permission-denied redirect; there is no session handshake here, just the
/// credentials every store call carries.
#[component]
pub fn LoginPage() -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let refresh = use_context::<DirectoryRefresh>();
    let nav = use_navigator();

    let mut store_url = use_signal(|| state.with(|s| s.store_url.clone()));
    let mut store_key = use_signal(|| state.with(|s| s.store_key.clone()));
    let mut relay_url = use_signal(|| {
        state.with(|s| {
            if s.relay_url.is_empty() {
                default_relay_url()
            } else {
                s.relay_url.clone()
            }
        })
    });
    let mut operator_name = use_signal(|| state.with(|s| s.operator.name.clone()));
    let mut operator_email = use_signal(|| state.with(|s| s.operator.email.clone()));
    let mut form_error = use_signal(String::new);

    let on_submit = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let mut refresh = refresh;
        move |evt: FormEvent| {
            evt.prevent_default();

            if store_url().trim().is_empty() || store_key().trim().is_empty() {
                form_error.set("Store URL and service key are required".to_string());
                return;
            }
            if operator_name().trim().is_empty() {
                form_error.set("Your name is required".to_string());
                return;
            }

            state.with_mut(|s| {
                s.store_url = store_url().trim().to_string();
                s.store_key = store_key().trim().to_string();
                s.relay_url = relay_url().trim().to_string();
                s.operator = Operator {
                    name: operator_name().trim().to_string(),
                    email: operator_email().trim().to_string(),
                };
            });
            persist_session(&state);
            refresh.bump();
            push_toast(toasts.clone(), ToastKind::Success, "Connection settings saved.");
            nav.push(Route::Dashboard {});
        }
    };

    rsx! {
        div { class: "min-h-screen w-full flex items-center justify-center bg-gray-100",
            div { class: "{theme::PANEL_PADDED} max-w-md w-full m-4",
                div { class: "mb-6 text-center",
                    h1 { class: "text-2xl font-bold text-gray-800", "{version::APP_NAME}" }
                    p { class: "text-sm text-gray-500 mt-1", "Sign in to the back office" }
                }
                if !form_error().is_empty() {
                    div { class: "mb-4 rounded-md bg-red-50 border border-red-200 px-3 py-2",
                        p { class: "text-sm text-red-700", "{form_error}" }
                    }
                }
                form { class: "space-y-4", onsubmit: on_submit,
                    div {
                        label { class: "{theme::LABEL}", "Store URL" }
                        input {
                            r#type: "url",
                            class: "{theme::INPUT}",
                            value: store_url(),
                            placeholder: "https://project.example.supabase.co",
                            oninput: move |evt| store_url.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Service Key" }
                        input {
                            r#type: "password",
                            class: "{theme::INPUT}",
                            value: store_key(),
                            oninput: move |evt| store_key.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Relay URL" }
                        input {
                            r#type: "url",
                            class: "{theme::INPUT}",
                            value: relay_url(),
                            oninput: move |evt| relay_url.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Your Name" }
                        input {
                            r#type: "text",
                            class: "{theme::INPUT}",
                            value: operator_name(),
                            oninput: move |evt| operator_name.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Email" }
                        input {
                            r#type: "email",
                            class: "{theme::INPUT}",
                            value: operator_email(),
                            placeholder: "Optional",
                            oninput: move |evt| operator_email.set(evt.value().to_string()),
                        }
                    }
                    button {
                        class: "{theme::BTN_PRIMARY} w-full justify-center",
                        r#type: "submit",
                        "Save and Continue"
                    }
                }
            }
        }
    }
}
