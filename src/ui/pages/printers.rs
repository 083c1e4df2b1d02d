use dioxus::prelude::*;
use uuid::Uuid;

use crate::domain::{ActionKind, Printer, ResourceKind, SessionState};
use crate::infra::activity::ActivityLog;
use crate::infra::records::PrinterPayload;
use crate::infra::store::StoreClient;
use crate::ui::components::modal::{ConfirmDialog, Modal};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{report_store_error, Loading};
use crate::ui::theme;

#[component]
pub fn PrintersPage(client_id: String) -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let client_uuid = Uuid::parse_str(&client_id).ok();

    let mut reload = use_signal(|| 0u32);
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| None::<Printer>);
    let mut deleting = use_signal(|| None::<Printer>);
    let mut form_location = use_signal(String::new);
    let mut form_ip = use_signal(String::new);
    let mut form_vendor = use_signal(String::new);
    let mut form_model = use_signal(String::new);
    let mut form_deploy = use_signal(String::new);
    let mut form_error = use_signal(String::new);

    let printers = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let id = client_uuid?;
            let store = state.with(StoreClient::from_session).ok()?;
            match store.printers(id).await {
                Ok(printers) => Some(printers),
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load printers", &err);
                    None
                }
            }
        }
    });

    let mut reset_form = move || {
        form_location.set(String::new());
        form_ip.set(String::new());
        form_vendor.set(String::new());
        form_model.set(String::new());
        form_deploy.set(String::new());
        form_error.set(String::new());
    };

    let on_submit = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            if form_location().trim().is_empty() {
                form_error.set("Location is required".to_string());
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
            let target = editing();
            let payload = PrinterPayload {
                client_id: if target.is_some() { None } else { client_uuid },
                location: form_location().trim().to_string(),
                ip_address: form_ip().trim().to_string(),
                vendor: form_vendor().trim().to_string(),
                model: form_model().trim().to_string(),
                print_deploy_info: form_deploy().trim().to_string(),
            };

            spawn(async move {
                let result = match &target {
                    Some(printer) => store.update_printer(printer.id, &payload).await,
                    None => store.create_printer(&payload).await,
                };
                match result {
                    Ok(saved) => {
                        let (action, verb) = match target {
                            Some(_) => (ActionKind::Update, "Updated"),
                            None => (ActionKind::Create, "Added"),
                        };
                        log.record(
                            action,
                            ResourceKind::Printer,
                            saved.id,
                            format!("{verb} printer at {}", saved.location),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Success, "Printer saved.");
                        show_form.set(false);
                        editing.set(None);
                        reset_form();
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to save printer", &err);
                    }
                }
            });
        }
    };

    let on_confirm_delete = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let Some(printer) = deleting() else { return };
            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let log = ActivityLog::new(
                store.clone(),
                state.with(|s| s.operator.identity().to_string()),
            );
            let toasts = toasts.clone();

            spawn(async move {
                match store.delete_printer(printer.id).await {
                    Ok(deleted) => {
                        log.record(
                            ActionKind::Delete,
                            ResourceKind::Printer,
                            deleted.id,
                            format!("Deleted printer at {}", deleted.location),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Info, "Printer deleted.");
                        deleting.set(None);
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        deleting.set(None);
                        report_store_error(&nav, toasts, "Failed to delete printer", &err);
                    }
                }
            });
        }
    };

    let rows = match &*printers.read() {
        None => return rsx! { Loading {} },
        Some(None) => Vec::new(),
        Some(Some(rows)) => rows.clone(),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center",
                h1 { class: "{theme::PAGE_TITLE}", "Printers" }
                button {
                    class: "{theme::BTN_PRIMARY}",
                    onclick: move |_| {
                        reset_form();
                        editing.set(None);
                        show_form.set(true);
                    },
                    "+ Add New Printer"
                }
            }

            div { class: "{theme::PANEL} overflow-hidden",
                div { class: "overflow-x-auto",
                    table { class: "{theme::TABLE}",
                        thead { class: "{theme::THEAD}",
                            tr {
                                th { class: "{theme::TH}", "Location" }
                                th { class: "{theme::TH}", "IP Address" }
                                th { class: "{theme::TH}", "Vendor" }
                                th { class: "{theme::TH}", "Model" }
                                th { class: "{theme::TH}", "Print Deploy" }
                                th { class: "{theme::TH}", "Actions" }
                            }
                        }
                        tbody { class: "{theme::TBODY}",
                            for printer in rows.iter().cloned() {
                                {
                                    let edit_printer = printer.clone();
                                    let delete_printer = printer.clone();
                                    rsx! {
                                        tr { key: "{printer.id}",
                                            td { class: "{theme::TD_STRONG}", "{printer.location}" }
                                            td { class: "{theme::TD}", "{printer.ip_address}" }
                                            td { class: "{theme::TD}", "{printer.vendor}" }
                                            td { class: "{theme::TD}", "{printer.model}" }
                                            td { class: "{theme::TD}", "{printer.print_deploy_info}" }
                                            td { class: "{theme::TD}",
                                                div { class: "flex items-center gap-3",
                                                    button {
                                                        class: "{theme::LINK_ACTION}",
                                                        onclick: move |_| {
                                                            form_location.set(edit_printer.location.clone());
                                                            form_ip.set(edit_printer.ip_address.clone());
                                                            form_vendor.set(edit_printer.vendor.clone());
                                                            form_model.set(edit_printer.model.clone());
                                                            form_deploy.set(edit_printer.print_deploy_info.clone());
                                                            form_error.set(String::new());
                                                            editing.set(Some(edit_printer.clone()));
                                                            show_form.set(true);
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "{theme::LINK_DANGER}",
                                                        onclick: move |_| deleting.set(Some(delete_printer.clone())),
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
                                        colspan: "6",
                                        "No printers documented for this client."
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if show_form() {
                Modal {
                    title: if editing().is_some() {
                        "Edit Printer".to_string()
                    } else {
                        "Add New Printer".to_string()
                    },
                    on_close: move |_| {
                        show_form.set(false);
                        editing.set(None);
                        reset_form();
                    },
                    if !form_error().is_empty() {
                        div { class: "mb-4 rounded-md bg-red-50 border border-red-200 px-3 py-2",
                            p { class: "text-sm text-red-700", "{form_error}" }
                        }
                    }
                    form { class: "space-y-4", onsubmit: on_submit,
                        div {
                            label { class: "{theme::LABEL}", "Location" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_location(),
                                oninput: move |evt| form_location.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "IP Address" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_ip(),
                                oninput: move |evt| form_ip.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Vendor" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_vendor(),
                                oninput: move |evt| form_vendor.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Model" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_model(),
                                oninput: move |evt| form_model.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Print Deploy Info" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_deploy(),
                                oninput: move |evt| form_deploy.set(evt.value().to_string()),
                            }
                        }
                        div { class: "flex justify-end gap-3 pt-4",
                            button {
                                r#type: "button",
                                class: "{theme::BTN_SECONDARY}",
                                onclick: move |_| {
                                    show_form.set(false);
                                    editing.set(None);
                                    reset_form();
                                },
                                "Cancel"
                            }
                            button {
                                r#type: "submit",
                                class: "px-4 py-2 bg-blue-500 text-white rounded-lg hover:bg-blue-600",
                                {if editing().is_some() { "Save Changes" } else { "Add Printer" }}
                            }
                        }
                    }
                }
            }

            if let Some(printer) = deleting() {
                ConfirmDialog {
                    title: "Confirm Delete".to_string(),
                    message: format!(
                        "Are you sure you want to delete the printer at {}? This action cannot be undone.",
                        printer.location
                    ),
                    confirm_label: "Delete".to_string(),
                    on_confirm: on_confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}
