use dioxus::prelude::*;
use uuid::Uuid;

use crate::domain::{CustomerMapping, SessionState, TicketingCustomer, TicketingSettings};
use crate::infra::store::StoreClient;
use crate::infra::ticketing::RelayClient;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{report_store_error, Loading};
use crate::ui::theme;
use crate::util::version;

const DEFAULT_API_URL: &str = "https://app.atera.com/api/v3";

/// Ticketing system connection, customer-to-client mapping and the update
/// check. The customer list is always fetched through the relay endpoint.
#[component]
pub fn IntegrationPage() -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let mut reload = use_signal(|| 0u32);
    let mut settings = use_signal(TicketingSettings::default);
    let mut mappings = use_signal(Vec::<CustomerMapping>::new);
    let mut customers = use_signal(Vec::<TicketingCustomer>::new);
    let mut loading_customers = use_signal(|| false);
    let mut saving = use_signal(|| false);
    let mut form_key = use_signal(String::new);
    let mut form_url = use_signal(|| DEFAULT_API_URL.to_string());
    let mut update_status = use_signal(String::new);

    let loaded = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let store = state.with(StoreClient::from_session).ok()?;

            match store.ticketing_settings().await {
                Ok(Some(stored)) => {
                    form_key.set(stored.api_key.clone());
                    form_url.set(stored.api_url.clone());
                    settings.set(stored);
                }
                Ok(None) => {}
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load settings", &err);
                    return None;
                }
            }
            match store.customer_mappings().await {
                Ok(stored) => mappings.set(stored),
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load mappings", &err);
                }
            }
            Some(())
        }
    });

    let fetch_customers = {
        let state = state.clone();
        let toasts = toasts.clone();
        move || {
            let current = settings();
            if current.api_key.is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Configure and save the API key first.",
                );
                return;
            }
            let relay_url = state.with(|s| s.relay_url.clone());
            let relay = match RelayClient::new(&relay_url) {
                Ok(relay) => relay,
                Err(err) => {
                    push_toast(
                        toasts.clone(),
                        ToastKind::Error,
                        format!("Relay unavailable: {err}"),
                    );
                    return;
                }
            };
            let toasts = toasts.clone();

            loading_customers.set(true);
            spawn(async move {
                match relay.ticketing_customers(&current).await {
                    Ok(fetched) => {
                        if fetched.is_empty() {
                            push_toast(
                                toasts,
                                ToastKind::Info,
                                "The ticketing system returned no customers.",
                            );
                        }
                        customers.set(fetched);
                    }
                    Err(err) => {
                        push_toast(
                            toasts,
                            ToastKind::Error,
                            format!("Failed to fetch ticketing customers: {err}"),
                        );
                    }
                }
                loading_customers.set(false);
            });
        }
    };

    let on_save = {
        let state = state.clone();
        let toasts = toasts.clone();
        let mut fetch_customers = fetch_customers.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            if form_key().trim().is_empty() || form_url().trim().is_empty() {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "API key and URL are required.",
                );
                return;
            }
            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let toasts = toasts.clone();
            let pending = TicketingSettings {
                id: settings().id,
                api_key: form_key().trim().to_string(),
                api_url: form_url().trim().trim_end_matches('/').to_string(),
            };

            saving.set(true);
            spawn(async move {
                match store.save_ticketing_settings(&pending).await {
                    Ok(stored) => {
                        settings.set(stored);
                        push_toast(toasts, ToastKind::Success, "Settings saved.");
                        fetch_customers();
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to save settings", &err);
                    }
                }
                saving.set(false);
            });
        }
    };

    let on_map = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |(client_id, customer_id): (Uuid, String)| {
            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let toasts = toasts.clone();
            spawn(async move {
                match store.set_customer_mapping(client_id, &customer_id).await {
                    Ok(()) => {
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to save mapping", &err);
                    }
                }
            });
        }
    };

    let on_check_update = move |_| {
        update_status.set("Checking...".to_string());
        spawn(async move {
            match version::check_for_update().await {
                Ok(info) => update_status.set(info.to_string()),
                Err(err) => update_status.set(format!("Update check failed: {err}")),
            }
        });
    };

    if loaded.read().is_none() {
        return rsx! { Loading {} };
    }

    let clients = state.with(|s| s.clients.clone());
    let current_settings = settings();
    let current_mappings = mappings();
    let current_customers = customers();

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center",
                h1 { class: "{theme::PAGE_TITLE}", "Integration Settings" }
            }

            div { class: "{theme::PANEL_PADDED}",
                div { class: "flex items-center gap-3 mb-6",
                    span { class: "text-2xl", "🔗" }
                    div {
                        h2 { class: "text-lg font-semibold text-gray-800", "Ticketing Integration" }
                        p { class: "text-sm text-gray-600 mt-1",
                            "Configure the ticketing API and map its customers to clients"
                        }
                    }
                }

                form { class: "space-y-6", onsubmit: on_save,
                    div {
                        label { class: "{theme::LABEL}", "API Key" }
                        input {
                            r#type: "password",
                            class: "{theme::INPUT}",
                            value: form_key(),
                            oninput: move |evt| form_key.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "API URL" }
                        input {
                            r#type: "url",
                            class: "{theme::INPUT}",
                            value: form_url(),
                            oninput: move |evt| form_url.set(evt.value().to_string()),
                        }
                    }
                    div { class: "flex justify-end",
                        button {
                            r#type: "submit",
                            class: "{theme::BTN_PRIMARY}",
                            disabled: saving(),
                            {if saving() { "Saving..." } else { "Save Settings" }}
                        }
                    }
                }
            }

            if !current_settings.api_key.is_empty() {
                div { class: "{theme::PANEL}",
                    div { class: "p-6 border-b",
                        div { class: "flex justify-between items-center",
                            div { class: "flex items-center gap-3",
                                span { class: "text-2xl", "🏢" }
                                div {
                                    h2 { class: "text-lg font-semibold text-gray-800", "Customer Mappings" }
                                    p { class: "text-sm text-gray-600",
                                        "Map ticketing customers to local clients"
                                    }
                                }
                            }
                            button {
                                class: "flex items-center gap-2 text-blue-600 hover:text-blue-700",
                                disabled: loading_customers(),
                                onclick: {
                                    let mut fetch_customers = fetch_customers.clone();
                                    move |_| fetch_customers()
                                },
                                {if loading_customers() { "Refreshing..." } else { "Refresh Customers" }}
                            }
                        }
                    }

                    div { class: "overflow-x-auto",
                        table { class: "{theme::TABLE}",
                            thead { class: "{theme::THEAD}",
                                tr {
                                    th { class: "{theme::TH}", "Client" }
                                    th { class: "{theme::TH}", "Ticketing Customer" }
                                }
                            }
                            tbody { class: "{theme::TBODY}",
                                for client in clients.iter().cloned() {
                                    {
                                        let mapped = current_mappings
                                            .iter()
                                            .find(|m| m.client_id == client.id)
                                            .map(|m| m.customer_id.clone())
                                            .unwrap_or_default();
                                        let map_client_id = client.id;
                                        let on_map = on_map.clone();
                                        rsx! {
                                            tr { key: "{client.id}",
                                                td { class: "{theme::TD_STRONG}",
                                                    div { class: "text-sm font-medium text-gray-900", "{client.name}" }
                                                }
                                                td { class: "{theme::TD}",
                                                    select {
                                                        class: "block w-full rounded-md border-gray-300 shadow-sm focus:border-blue-500 focus:ring-blue-500 text-sm",
                                                        value: mapped,
                                                        onchange: move |evt| {
                                                            on_map((map_client_id, evt.value().to_string()));
                                                        },
                                                        option { value: "", "Select Ticketing Customer" }
                                                        for customer in current_customers.iter() {
                                                            option { value: "{customer.id}", "{customer.name}" }
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
            }

            div { class: "{theme::PANEL_PADDED}",
                div { class: "flex justify-between items-center",
                    div {
                        h2 { class: "text-lg font-semibold text-gray-800", "About" }
                        p { class: "text-sm text-gray-600 mt-1",
                            "{version::APP_NAME} {version::version_label()}"
                        }
                        if !update_status().is_empty() {
                            p { class: "text-sm text-gray-500 mt-1", "{update_status}" }
                        }
                    }
                    button {
                        class: "{theme::BTN_SECONDARY}",
                        onclick: on_check_update,
                        "Check for Updates"
                    }
                }
            }
        }
    }
}
