use dioxus::prelude::*;
use uuid::Uuid;

use crate::domain::{ActionKind, Application, ResourceKind, SessionState};
use crate::infra::activity::ActivityLog;
use crate::infra::records::{parse_date, ApplicationPayload};
use crate::infra::store::StoreClient;
use crate::ui::components::modal::{ConfirmDialog, Modal};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{display_date, report_store_error, Loading};
use crate::ui::theme;

#[component]
pub fn ApplicationsPage(client_id: String) -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let client_uuid = Uuid::parse_str(&client_id).ok();

    let mut reload = use_signal(|| 0u32);
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| None::<Application>);
    let mut deleting = use_signal(|| None::<Application>);
    let mut form_name = use_signal(String::new);
    let mut form_vendor = use_signal(String::new);
    let mut form_version = use_signal(String::new);
    let mut form_license = use_signal(String::new);
    let mut form_expiry = use_signal(String::new);
    let mut form_path = use_signal(String::new);
    let mut form_support = use_signal(String::new);
    let mut form_notes = use_signal(String::new);
    let mut form_critical = use_signal(|| false);
    let mut form_error = use_signal(String::new);

    let applications = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let id = client_uuid?;
            let store = state.with(StoreClient::from_session).ok()?;
            match store.applications(id).await {
                Ok(applications) => Some(applications),
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load applications", &err);
                    None
                }
            }
        }
    });

    let mut reset_form = move || {
        form_name.set(String::new());
        form_vendor.set(String::new());
        form_version.set(String::new());
        form_license.set(String::new());
        form_expiry.set(String::new());
        form_path.set(String::new());
        form_support.set(String::new());
        form_notes.set(String::new());
        form_critical.set(false);
        form_error.set(String::new());
    };

    let on_submit = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            if form_name().trim().is_empty() {
                form_error.set("Application name is required".to_string());
                return;
            }
            let expiry_date = if form_expiry().trim().is_empty() {
                None
            } else {
                match parse_date(&form_expiry()) {
                    Some(date) => Some(date),
                    None => {
                        form_error.set("Enter a valid expiry date".to_string());
                        return;
                    }
                }
            };

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
            let payload = ApplicationPayload {
                client_id: if target.is_some() { None } else { client_uuid },
                name: form_name().trim().to_string(),
                vendor: form_vendor().trim().to_string(),
                version: form_version().trim().to_string(),
                license_type: form_license().trim().to_string(),
                expiry_date,
                installation_path: form_path().trim().to_string(),
                support_url: form_support().trim().to_string(),
                notes: form_notes(),
                critical: form_critical(),
            };

            spawn(async move {
                let result = match &target {
                    Some(application) => store.update_application(application.id, &payload).await,
                    None => store.create_application(&payload).await,
                };
                match result {
                    Ok(saved) => {
                        let (action, verb) = match target {
                            Some(_) => (ActionKind::Update, "Updated"),
                            None => (ActionKind::Create, "Added"),
                        };
                        log.record(
                            action,
                            ResourceKind::Application,
                            saved.id,
                            format!("{verb} application: {}", saved.name),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Success, "Application saved.");
                        show_form.set(false);
                        editing.set(None);
                        reset_form();
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to save application", &err);
                    }
                }
            });
        }
    };

    let on_confirm_delete = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let Some(application) = deleting() else { return };
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
                match store.delete_application(application.id).await {
                    Ok(deleted) => {
                        log.record(
                            ActionKind::Delete,
                            ResourceKind::Application,
                            deleted.id,
                            format!("Deleted application: {}", deleted.name),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Info, "Application deleted.");
                        deleting.set(None);
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        deleting.set(None);
                        report_store_error(&nav, toasts, "Failed to delete application", &err);
                    }
                }
            });
        }
    };

    let rows = match &*applications.read() {
        None => return rsx! { Loading {} },
        Some(None) => Vec::new(),
        Some(Some(rows)) => rows.clone(),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center",
                h1 { class: "{theme::PAGE_TITLE}", "Applications" }
                button {
                    class: "{theme::BTN_PRIMARY}",
                    onclick: move |_| {
                        reset_form();
                        editing.set(None);
                        show_form.set(true);
                    },
                    "+ Add New Application"
                }
            }

            div { class: "{theme::PANEL} overflow-hidden",
                div { class: "overflow-x-auto",
                    table { class: "{theme::TABLE}",
                        thead { class: "{theme::THEAD}",
                            tr {
                                th { class: "{theme::TH}", "Name" }
                                th { class: "{theme::TH}", "Vendor" }
                                th { class: "{theme::TH}", "Version" }
                                th { class: "{theme::TH}", "License" }
                                th { class: "{theme::TH}", "Expiry" }
                                th { class: "{theme::TH}", "Critical" }
                                th { class: "{theme::TH}", "Actions" }
                            }
                        }
                        tbody { class: "{theme::TBODY}",
                            for application in rows.iter().cloned() {
                                {
                                    let edit_application = application.clone();
                                    let delete_application = application.clone();
                                    rsx! {
                                        tr { key: "{application.id}",
                                            td { class: "{theme::TD_STRONG}", "{application.name}" }
                                            td { class: "{theme::TD}", "{application.vendor}" }
                                            td { class: "{theme::TD}", "{application.version}" }
                                            td { class: "{theme::TD}", "{application.license_type}" }
                                            td { class: "{theme::TD}",
                                                {application.expiry_date.map(display_date).unwrap_or_else(|| "N/A".to_string())}
                                            }
                                            td { class: "{theme::TD}",
                                                if application.critical {
                                                    span {
                                                        class: "px-2 inline-flex text-xs leading-5 font-semibold rounded-full bg-red-100 text-red-800",
                                                        "CRITICAL"
                                                    }
                                                } else {
                                                    "—"
                                                }
                                            }
                                            td { class: "{theme::TD}",
                                                div { class: "flex items-center gap-3",
                                                    button {
                                                        class: "{theme::LINK_ACTION}",
                                                        onclick: move |_| {
                                                            form_name.set(edit_application.name.clone());
                                                            form_vendor.set(edit_application.vendor.clone());
                                                            form_version.set(edit_application.version.clone());
                                                            form_license.set(edit_application.license_type.clone());
                                                            form_expiry.set(
                                                                edit_application.expiry_date.map(display_date).unwrap_or_default()
                                                            );
                                                            form_path.set(edit_application.installation_path.clone());
                                                            form_support.set(edit_application.support_url.clone());
                                                            form_notes.set(edit_application.notes.clone());
                                                            form_critical.set(edit_application.critical);
                                                            form_error.set(String::new());
                                                            editing.set(Some(edit_application.clone()));
                                                            show_form.set(true);
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "{theme::LINK_DANGER}",
                                                        onclick: move |_| deleting.set(Some(delete_application.clone())),
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
                                        colspan: "7",
                                        "No applications documented for this client."
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
                        "Edit Application".to_string()
                    } else {
                        "Add New Application".to_string()
                    },
                    wide: true,
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
                        div { class: "grid grid-cols-2 gap-4",
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
                                label { class: "{theme::LABEL}", "Vendor" }
                                input {
                                    r#type: "text",
                                    class: "{theme::INPUT}",
                                    value: form_vendor(),
                                    oninput: move |evt| form_vendor.set(evt.value().to_string()),
                                }
                            }
                            div {
                                label { class: "{theme::LABEL}", "Version" }
                                input {
                                    r#type: "text",
                                    class: "{theme::INPUT}",
                                    value: form_version(),
                                    oninput: move |evt| form_version.set(evt.value().to_string()),
                                }
                            }
                            div {
                                label { class: "{theme::LABEL}", "License Type" }
                                input {
                                    r#type: "text",
                                    class: "{theme::INPUT}",
                                    value: form_license(),
                                    placeholder: "e.g. Per-seat, Subscription",
                                    oninput: move |evt| form_license.set(evt.value().to_string()),
                                }
                            }
                            div {
                                label { class: "{theme::LABEL}", "License Expiry" }
                                input {
                                    r#type: "date",
                                    class: "{theme::INPUT}",
                                    value: form_expiry(),
                                    oninput: move |evt| form_expiry.set(evt.value().to_string()),
                                }
                            }
                            div {
                                label { class: "{theme::LABEL}", "Installation Path" }
                                input {
                                    r#type: "text",
                                    class: "{theme::INPUT}",
                                    value: form_path(),
                                    oninput: move |evt| form_path.set(evt.value().to_string()),
                                }
                            }
                            div { class: "col-span-2",
                                label { class: "{theme::LABEL}", "Support URL" }
                                input {
                                    r#type: "url",
                                    class: "{theme::INPUT}",
                                    value: form_support(),
                                    oninput: move |evt| form_support.set(evt.value().to_string()),
                                }
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Notes" }
                            textarea {
                                class: "{theme::INPUT}",
                                rows: "3",
                                value: form_notes(),
                                oninput: move |evt| form_notes.set(evt.value().to_string()),
                            }
                        }
                        label { class: "flex items-center gap-2",
                            input {
                                r#type: "checkbox",
                                checked: form_critical(),
                                onchange: move |evt| form_critical.set(evt.checked()),
                                class: "rounded border-gray-300 text-blue-600 focus:ring-blue-500",
                            }
                            span { class: "text-sm text-gray-600", "Business critical" }
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
                                {if editing().is_some() { "Save Changes" } else { "Add Application" }}
                            }
                        }
                    }
                }
            }

            if let Some(application) = deleting() {
                ConfirmDialog {
                    title: "Confirm Delete".to_string(),
                    message: format!(
                        "Are you sure you want to delete {}? This action cannot be undone.",
                        application.name
                    ),
                    confirm_label: "Delete".to_string(),
                    on_confirm: on_confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}
