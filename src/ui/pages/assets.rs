use dioxus::prelude::*;
use uuid::Uuid;

use crate::domain::{ActionKind, Asset, AssetStatus, ResourceKind, SessionState};
use crate::infra::activity::ActivityLog;
use crate::infra::records::{parse_date, AssetPayload};
use crate::infra::store::StoreClient;
use crate::ui::components::modal::{ConfirmDialog, Modal};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{display_date, report_store_error, Loading};
use crate::ui::theme;

fn status_badge(status: AssetStatus) -> &'static str {
    match status {
        AssetStatus::Active => "bg-green-100 text-green-800",
        AssetStatus::Inactive => "bg-gray-100 text-gray-800",
        AssetStatus::Maintenance => "bg-yellow-100 text-yellow-800",
        AssetStatus::Retired => "bg-red-100 text-red-800",
    }
}

#[component]
pub fn AssetsPage(client_id: String) -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let client_uuid = Uuid::parse_str(&client_id).ok();

    let mut reload = use_signal(|| 0u32);
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| None::<Asset>);
    let mut deleting = use_signal(|| None::<Asset>);
    let mut form_name = use_signal(String::new);
    let mut form_type = use_signal(String::new);
    let mut form_model = use_signal(String::new);
    let mut form_serial = use_signal(String::new);
    let mut form_purchase = use_signal(String::new);
    let mut form_warranty = use_signal(String::new);
    let mut form_location = use_signal(String::new);
    let mut form_status = use_signal(|| AssetStatus::Active);
    let mut form_assigned = use_signal(String::new);
    let mut form_notes = use_signal(String::new);
    let mut form_error = use_signal(String::new);

    let assets = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let id = client_uuid?;
            let store = state.with(StoreClient::from_session).ok()?;
            match store.assets(id).await {
                Ok(assets) => Some(assets),
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load assets", &err);
                    None
                }
            }
        }
    });

    let mut reset_form = move || {
        form_name.set(String::new());
        form_type.set(String::new());
        form_model.set(String::new());
        form_serial.set(String::new());
        form_purchase.set(String::new());
        form_warranty.set(String::new());
        form_location.set(String::new());
        form_status.set(AssetStatus::Active);
        form_assigned.set(String::new());
        form_notes.set(String::new());
        form_error.set(String::new());
    };

    let on_submit = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            if form_name().trim().is_empty() {
                form_error.set("Asset name is required".to_string());
                return;
            }
            let purchase_date = if form_purchase().trim().is_empty() {
                None
            } else {
                match parse_date(&form_purchase()) {
                    Some(date) => Some(date),
                    None => {
                        form_error.set("Enter a valid purchase date".to_string());
                        return;
                    }
                }
            };
            let warranty_expiry = if form_warranty().trim().is_empty() {
                None
            } else {
                match parse_date(&form_warranty()) {
                    Some(date) => Some(date),
                    None => {
                        form_error.set("Enter a valid warranty expiry date".to_string());
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
            let payload = AssetPayload {
                client_id: if target.is_some() { None } else { client_uuid },
                name: form_name().trim().to_string(),
                asset_type: form_type().trim().to_string(),
                model: form_model().trim().to_string(),
                serial_number: form_serial().trim().to_string(),
                purchase_date,
                warranty_expiry,
                location: form_location().trim().to_string(),
                status: form_status().label().to_string(),
                assigned_to: form_assigned().trim().to_string(),
                notes: form_notes(),
            };

            spawn(async move {
                let result = match &target {
                    Some(asset) => store.update_asset(asset.id, &payload).await,
                    None => store.create_asset(&payload).await,
                };
                match result {
                    Ok(saved) => {
                        let (action, verb) = match target {
                            Some(_) => (ActionKind::Update, "Updated"),
                            None => (ActionKind::Create, "Added"),
                        };
                        log.record(
                            action,
                            ResourceKind::Asset,
                            saved.id,
                            format!("{verb} asset: {}", saved.name),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Success, "Asset saved.");
                        show_form.set(false);
                        editing.set(None);
                        reset_form();
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to save asset", &err);
                    }
                }
            });
        }
    };

    let on_confirm_delete = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let Some(asset) = deleting() else { return };
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
                match store.delete_asset(asset.id).await {
                    Ok(deleted) => {
                        log.record(
                            ActionKind::Delete,
                            ResourceKind::Asset,
                            deleted.id,
                            format!("Deleted asset: {}", deleted.name),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Info, "Asset deleted.");
                        deleting.set(None);
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        deleting.set(None);
                        report_store_error(&nav, toasts, "Failed to delete asset", &err);
                    }
                }
            });
        }
    };

    let rows = match &*assets.read() {
        None => return rsx! { Loading {} },
        Some(None) => Vec::new(),
        Some(Some(rows)) => rows.clone(),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center",
                h1 { class: "{theme::PAGE_TITLE}", "Assets" }
                button {
                    class: "{theme::BTN_PRIMARY}",
                    onclick: move |_| {
                        reset_form();
                        editing.set(None);
                        show_form.set(true);
                    },
                    "+ Add New Asset"
                }
            }

            div { class: "{theme::PANEL} overflow-hidden",
                div { class: "overflow-x-auto",
                    table { class: "{theme::TABLE}",
                        thead { class: "{theme::THEAD}",
                            tr {
                                th { class: "{theme::TH}", "Name" }
                                th { class: "{theme::TH}", "Type" }
                                th { class: "{theme::TH}", "Model" }
                                th { class: "{theme::TH}", "Serial Number" }
                                th { class: "{theme::TH}", "Status" }
                                th { class: "{theme::TH}", "Warranty" }
                                th { class: "{theme::TH}", "Assigned To" }
                                th { class: "{theme::TH}", "Actions" }
                            }
                        }
                        tbody { class: "{theme::TBODY}",
                            for asset in rows.iter().cloned() {
                                {
                                    let edit_asset = asset.clone();
                                    let delete_asset = asset.clone();
                                    rsx! {
                                        tr { key: "{asset.id}",
                                            td { class: "{theme::TD_STRONG}", "{asset.name}" }
                                            td { class: "{theme::TD}", "{asset.asset_type}" }
                                            td { class: "{theme::TD}", "{asset.model}" }
                                            td { class: "{theme::TD}", "{asset.serial_number}" }
                                            td { class: "{theme::TD}",
                                                span {
                                                    class: "px-2 inline-flex text-xs leading-5 font-semibold rounded-full {status_badge(asset.status)}",
                                                    "{asset.status.label()}"
                                                }
                                            }
                                            td { class: "{theme::TD}",
                                                {asset.warranty_expiry.map(display_date).unwrap_or_else(|| "N/A".to_string())}
                                            }
                                            td { class: "{theme::TD}", "{asset.assigned_to}" }
                                            td { class: "{theme::TD}",
                                                div { class: "flex items-center gap-3",
                                                    button {
                                                        class: "{theme::LINK_ACTION}",
                                                        onclick: move |_| {
                                                            form_name.set(edit_asset.name.clone());
                                                            form_type.set(edit_asset.asset_type.clone());
                                                            form_model.set(edit_asset.model.clone());
                                                            form_serial.set(edit_asset.serial_number.clone());
                                                            form_purchase.set(
                                                                edit_asset.purchase_date.map(display_date).unwrap_or_default()
                                                            );
                                                            form_warranty.set(
                                                                edit_asset.warranty_expiry.map(display_date).unwrap_or_default()
                                                            );
                                                            form_location.set(edit_asset.location.clone());
                                                            form_status.set(edit_asset.status);
                                                            form_assigned.set(edit_asset.assigned_to.clone());
                                                            form_notes.set(edit_asset.notes.clone());
                                                            form_error.set(String::new());
                                                            editing.set(Some(edit_asset.clone()));
                                                            show_form.set(true);
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "{theme::LINK_DANGER}",
                                                        onclick: move |_| deleting.set(Some(delete_asset.clone())),
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
                                        colspan: "8",
                                        "No assets documented for this client."
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
                        "Edit Asset".to_string()
                    } else {
                        "Add New Asset".to_string()
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
                                label { class: "{theme::LABEL}", "Type" }
                                input {
                                    r#type: "text",
                                    class: "{theme::INPUT}",
                                    value: form_type(),
                                    placeholder: "e.g. Server, Switch, UPS",
                                    oninput: move |evt| form_type.set(evt.value().to_string()),
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
                                label { class: "{theme::LABEL}", "Serial Number" }
                                input {
                                    r#type: "text",
                                    class: "{theme::INPUT}",
                                    value: form_serial(),
                                    oninput: move |evt| form_serial.set(evt.value().to_string()),
                                }
                            }
                            div {
                                label { class: "{theme::LABEL}", "Purchase Date" }
                                input {
                                    r#type: "date",
                                    class: "{theme::INPUT}",
                                    value: form_purchase(),
                                    oninput: move |evt| form_purchase.set(evt.value().to_string()),
                                }
                            }
                            div {
                                label { class: "{theme::LABEL}", "Warranty Expiry" }
                                input {
                                    r#type: "date",
                                    class: "{theme::INPUT}",
                                    value: form_warranty(),
                                    oninput: move |evt| form_warranty.set(evt.value().to_string()),
                                }
                            }
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
                                label { class: "{theme::LABEL}", "Status" }
                                select {
                                    class: "{theme::INPUT}",
                                    value: form_status().label(),
                                    onchange: move |evt| {
                                        if let Some(status) = AssetStatus::parse(&evt.value()) {
                                            form_status.set(status);
                                        }
                                    },
                                    for status in AssetStatus::ALL {
                                        option { value: "{status.label()}", "{status.label()}" }
                                    }
                                }
                            }
                            div {
                                label { class: "{theme::LABEL}", "Assigned To" }
                                input {
                                    r#type: "text",
                                    class: "{theme::INPUT}",
                                    value: form_assigned(),
                                    oninput: move |evt| form_assigned.set(evt.value().to_string()),
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
                                {if editing().is_some() { "Save Changes" } else { "Add Asset" }}
                            }
                        }
                    }
                }
            }

            if let Some(asset) = deleting() {
                ConfirmDialog {
                    title: "Confirm Delete".to_string(),
                    message: format!(
                        "Are you sure you want to delete {}? This action cannot be undone.",
                        asset.name
                    ),
                    confirm_label: "Delete".to_string(),
                    on_confirm: on_confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}
