use dioxus::prelude::*;
use uuid::Uuid;

use crate::app::DirectoryRefresh;
use crate::domain::{ActionKind, ResourceKind, SessionState};
use crate::infra::activity::ActivityLog;
use crate::infra::records::ClientDetailsPatch;
use crate::infra::store::StoreClient;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{report_store_error, Loading};
use crate::ui::theme;

/// Contact details and free-form notes for one client, with an explicit save.
#[component]
pub fn ClientOverviewPage(client_id: String) -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let directory = use_context::<DirectoryRefresh>();
    let nav = use_navigator();

    let client_uuid = Uuid::parse_str(&client_id).ok();

    let mut reload = use_signal(|| 0u32);
    let mut form_name = use_signal(String::new);
    let mut form_contact = use_signal(String::new);
    let mut form_email = use_signal(String::new);
    let mut form_phone = use_signal(String::new);
    let mut form_address = use_signal(String::new);
    let mut form_notes = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let client = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let id = client_uuid?;
            let store = state.with(StoreClient::from_session).ok()?;
            match store.client(id).await {
                Ok(client) => {
                    form_name.set(client.name.clone());
                    form_contact.set(client.contact_person.clone());
                    form_email.set(client.email.clone());
                    form_phone.set(client.phone.clone());
                    form_address.set(client.address.clone());
                    form_notes.set(client.notes.clone());
                    Some(client)
                }
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load client", &err);
                    None
                }
            }
        }
    });

    let on_save = {
        let state = state.clone();
        let toasts = toasts.clone();
        let mut directory = directory;
        move |_| {
            let Some(id) = client_uuid else { return };
            if form_name().trim().is_empty() {
                push_toast(toasts.clone(), ToastKind::Warning, "Client name is required.");
                return;
            }
            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let log = ActivityLog::new(
                store.clone(),
                state.with(|s| s.operator.identity().to_string()),
            );
            let toasts = toasts.clone();
            let patch = ClientDetailsPatch {
                name: form_name().trim().to_string(),
                contact_person: form_contact().trim().to_string(),
                email: form_email().trim().to_string(),
                phone: form_phone().trim().to_string(),
                address: form_address().trim().to_string(),
                notes: form_notes(),
            };

            saving.set(true);
            spawn(async move {
                match store.update_client(id, &patch).await {
                    Ok(updated) => {
                        log.record(
                            ActionKind::Update,
                            ResourceKind::Client,
                            updated.id,
                            format!("Updated client details: {}", updated.name),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Success, "Client saved.");
                        reload.with_mut(|gen| *gen += 1);
                        directory.bump();
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to update client", &err);
                    }
                }
                saving.set(false);
            });
        }
    };

    let loaded = match &*client.read() {
        None => return rsx! { Loading {} },
        Some(None) => None,
        Some(Some(client)) => Some(client.clone()),
    };

    let Some(_client) = loaded else {
        return rsx! {
            div { class: "text-center py-12",
                span { class: "text-5xl", "🏢" }
                h3 { class: "mt-2 text-sm font-medium text-gray-900", "Client not found" }
            }
        };
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center",
                h1 { class: "{theme::PAGE_TITLE}", "{form_name}" }
                button {
                    class: "{theme::BTN_PRIMARY}",
                    disabled: saving(),
                    onclick: on_save,
                    {if saving() { "Saving..." } else { "Save Changes" }}
                }
            }

            div { class: "{theme::PANEL_PADDED}",
                div { class: "grid grid-cols-1 md:grid-cols-2 gap-6",
                    div {
                        label { class: "{theme::LABEL}", "Company Name" }
                        input {
                            r#type: "text",
                            class: "{theme::INPUT}",
                            value: form_name(),
                            oninput: move |evt| form_name.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Contact Person" }
                        input {
                            r#type: "text",
                            class: "{theme::INPUT}",
                            value: form_contact(),
                            oninput: move |evt| form_contact.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Email" }
                        input {
                            r#type: "email",
                            class: "{theme::INPUT}",
                            value: form_email(),
                            oninput: move |evt| form_email.set(evt.value().to_string()),
                        }
                    }
                    div {
                        label { class: "{theme::LABEL}", "Phone" }
                        input {
                            r#type: "text",
                            class: "{theme::INPUT}",
                            value: form_phone(),
                            oninput: move |evt| form_phone.set(evt.value().to_string()),
                        }
                    }
                    div { class: "md:col-span-2",
                        label { class: "{theme::LABEL}", "Address" }
                        input {
                            r#type: "text",
                            class: "{theme::INPUT}",
                            value: form_address(),
                            oninput: move |evt| form_address.set(evt.value().to_string()),
                        }
                    }
                }
            }

            div { class: "{theme::PANEL_PADDED}",
                h2 { class: "text-lg font-semibold text-gray-800 mb-4", "Notes" }
                textarea {
                    class: "{theme::INPUT} min-h-[12rem]",
                    value: form_notes(),
                    oninput: move |evt| form_notes.set(evt.value().to_string()),
                }
            }
        }
    }
}
