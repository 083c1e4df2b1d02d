use dioxus::prelude::*;

use crate::app::{DirectoryRefresh, Route};
use crate::domain::{ActionKind, Client, ResourceKind, SessionState};
use crate::infra::activity::ActivityLog;
use crate::infra::records::{ClientDetailsPatch, ClientPayload};
use crate::infra::store::StoreClient;
use crate::ui::components::modal::{ConfirmDialog, Modal};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{report_store_error, Loading};
use crate::ui::theme;

#[component]
pub fn ClientsPage() -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let directory = use_context::<DirectoryRefresh>();
    let nav = use_navigator();

    let mut reload = use_signal(|| 0u32);
    let mut show_add = use_signal(|| false);
    let mut editing = use_signal(|| None::<Client>);
    let mut deleting = use_signal(|| None::<Client>);
    let mut form_name = use_signal(String::new);
    let mut form_contact = use_signal(String::new);
    let mut form_email = use_signal(String::new);
    let mut form_phone = use_signal(String::new);
    let mut form_error = use_signal(String::new);

    let clients = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let store = state.with(StoreClient::from_session).ok()?;
            match store.clients().await {
                Ok(clients) => Some(clients),
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load clients", &err);
                    None
                }
            }
        }
    });

    let mut reset_form = move || {
        form_name.set(String::new());
        form_contact.set(String::new());
        form_email.set(String::new());
        form_phone.set(String::new());
        form_error.set(String::new());
    };

    let mut close_modals = move || {
        show_add.set(false);
        editing.set(None);
    };

    let on_submit = {
        let state = state.clone();
        let toasts = toasts.clone();
        let mut directory = directory;
        move |evt: FormEvent| {
            evt.prevent_default();

            if form_name().trim().is_empty() {
                form_error.set("Client name is required".to_string());
                return;
            }

            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let log = ActivityLog::new(store.clone(), state.with(|s| s.operator.identity().to_string()));
            let target = editing();
            let toasts = toasts.clone();

            let name = form_name().trim().to_string();
            let contact = form_contact().trim().to_string();
            let email = form_email().trim().to_string();
            let phone = form_phone().trim().to_string();

            spawn(async move {
                match target {
                    Some(existing) => {
                        let patch = ClientDetailsPatch {
                            name,
                            contact_person: contact,
                            email,
                            phone,
                            address: existing.address.clone(),
                            notes: existing.notes.clone(),
                        };
                        match store.update_client(existing.id, &patch).await {
                            Ok(updated) => {
                                log.record(
                                    ActionKind::Update,
                                    ResourceKind::Client,
                                    updated.id,
                                    format!("Updated client: {}", updated.name),
                                )
                                .await;
                                push_toast(toasts, ToastKind::Success, "Client updated.");
                            }
                            Err(err) => {
                                report_store_error(&nav, toasts, "Failed to update client", &err);
                                return;
                            }
                        }
                    }
                    None => {
                        let payload = ClientPayload {
                            name,
                            contact_person: contact,
                            email,
                            phone,
                        };
                        match store.create_client(&payload).await {
                            Ok(created) => {
                                log.record(
                                    ActionKind::Create,
                                    ResourceKind::Client,
                                    created.id,
                                    format!("Created new client: {}", created.name),
                                )
                                .await;
                                push_toast(toasts, ToastKind::Success, "Client created.");
                            }
                            Err(err) => {
                                report_store_error(&nav, toasts, "Failed to create client", &err);
                                return;
                            }
                        }
                    }
                }
                close_modals();
                reset_form();
                reload.with_mut(|gen| *gen += 1);
                directory.bump();
            });
        }
    };

    let on_confirm_delete = {
        let state = state.clone();
        let toasts = toasts.clone();
        let mut directory = directory;
        move |_| {
            let Some(client) = deleting() else { return };
            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let log = ActivityLog::new(store.clone(), state.with(|s| s.operator.identity().to_string()));
            let toasts = toasts.clone();

            spawn(async move {
                match store.delete_client(client.id).await {
                    Ok(deleted) => {
                        log.record(
                            ActionKind::Delete,
                            ResourceKind::Client,
                            deleted.id,
                            format!("Deleted client: {}", deleted.name),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Info, "Client deleted.");
                        deleting.set(None);
                        reload.with_mut(|gen| *gen += 1);
                        directory.bump();
                    }
                    Err(err) => {
                        deleting.set(None);
                        report_store_error(&nav, toasts, "Failed to delete client", &err);
                    }
                }
            });
        }
    };

    let rows = match &*clients.read() {
        None => return rsx! { Loading {} },
        Some(None) => Vec::new(),
        Some(Some(rows)) => rows.clone(),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center",
                h1 { class: "{theme::PAGE_TITLE}", "Clients" }
                button {
                    class: "{theme::BTN_PRIMARY}",
                    onclick: move |_| {
                        reset_form();
                        editing.set(None);
                        show_add.set(true);
                    },
                    "+ Add New Client"
                }
            }

            div { class: "{theme::PANEL} overflow-hidden",
                div { class: "overflow-x-auto",
                    table { class: "{theme::TABLE}",
                        thead { class: "{theme::THEAD}",
                            tr {
                                th { class: "{theme::TH}", "Name" }
                                th { class: "{theme::TH}", "Contact Person" }
                                th { class: "{theme::TH}", "Email" }
                                th { class: "{theme::TH}", "Phone" }
                                th { class: "{theme::TH}", "Actions" }
                            }
                        }
                        tbody { class: "{theme::TBODY}",
                            for client in rows.iter().cloned() {
                                {
                                    let open_id = client.id;
                                    let edit_client = client.clone();
                                    let delete_client = client.clone();
                                    rsx! {
                                        tr { key: "{client.id}",
                                            td { class: "{theme::TD_STRONG}",
                                                button {
                                                    class: "font-medium text-blue-600 hover:text-blue-700",
                                                    onclick: move |_| {
                                                        nav.push(Route::ClientOverview {
                                                            client_id: open_id.to_string(),
                                                        });
                                                    },
                                                    "{client.name}"
                                                }
                                            }
                                            td { class: "{theme::TD}", "{client.contact_person}" }
                                            td { class: "{theme::TD}", "{client.email}" }
                                            td { class: "{theme::TD}", "{client.phone}" }
                                            td { class: "{theme::TD}",
                                                div { class: "flex items-center gap-3",
                                                    button {
                                                        class: "{theme::LINK_ACTION}",
                                                        onclick: move |_| {
                                                            form_name.set(edit_client.name.clone());
                                                            form_contact.set(edit_client.contact_person.clone());
                                                            form_email.set(edit_client.email.clone());
                                                            form_phone.set(edit_client.phone.clone());
                                                            form_error.set(String::new());
                                                            editing.set(Some(edit_client.clone()));
                                                            show_add.set(false);
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "{theme::LINK_DANGER}",
                                                        onclick: move |_| deleting.set(Some(delete_client.clone())),
                                                        "Delete"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                            if rows.is_empty() {
                                tr {
                                    td {
                                        class: "px-6 py-8 text-center text-sm text-gray-500",
                                        colspan: "5",
                                        "No clients yet. Add the first one to get started."
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if show_add() || editing().is_some() {
                Modal {
                    title: if editing().is_some() {
                        "Edit Client".to_string()
                    } else {
                        "Add New Client".to_string()
                    },
                    on_close: move |_| {
                        close_modals();
                        reset_form();
                    },
                    if !form_error().is_empty() {
                        div { class: "mb-4 flex items-center gap-2 rounded-md bg-red-50 border border-red-200 px-3 py-2",
                            span { "⚠️" }
                            p { class: "text-sm text-red-700", "{form_error}" }
                        }
                    }
                    form { class: "space-y-4", onsubmit: on_submit,
                        div {
                            label { class: "{theme::LABEL}", "Name" }
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
                        div { class: "flex justify-end gap-3 pt-4",
                            button {
                                r#type: "button",
                                class: "{theme::BTN_SECONDARY}",
                                onclick: move |_| {
                                    close_modals();
                                    reset_form();
                                },
                                "Cancel"
                            }
                            button {
                                r#type: "submit",
                                class: "px-4 py-2 bg-blue-500 text-white rounded-lg hover:bg-blue-600",
                                {if editing().is_some() { "Save Changes" } else { "Add Client" }}
                            }
                        }
                    }
                }
            }

            if let Some(client) = deleting() {
                ConfirmDialog {
                    title: "Confirm Delete".to_string(),
                    message: format!(
                        "Are you sure you want to delete {}? This action cannot be undone.",
                        client.name
                    ),
                    confirm_label: "Delete".to_string(),
                    on_confirm: on_confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}
