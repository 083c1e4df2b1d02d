use dioxus::prelude::*;
use uuid::Uuid;

use crate::domain::{
    tier_counts, today, visible_packages, ActionKind, PackageEdit, PackageFilter, ResourceKind,
    SessionState, StatusTier,
};
use crate::infra::activity::ActivityLog;
use crate::infra::records::{parse_date, NewPackage, PackagePatch};
use crate::infra::store::StoreClient;
use crate::ui::components::modal::Modal;
use crate::ui::components::package_table::PackageTable;
use crate::ui::components::stat_card::StatCard;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{report_store_error, Loading};
use crate::ui::theme;

const PACKAGE_TYPES: [&str; 6] = [
    "Desktop Computer",
    "Laptop",
    "Server",
    "Network Equipment",
    "Printer",
    "Other",
];

/// Inbound package tracking. With `client_id` set the view is pinned to one
/// client: the client column, client filter and client select disappear.
#[component]
pub fn InboundPage(client_id: Option<String>) -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let scope: Option<Uuid> = client_id.as_deref().and_then(|id| Uuid::parse_str(id).ok());
    let scoped = scope.is_some();

    let mut reload = use_signal(|| 0u32);
    let filter = use_signal(|| PackageFilter {
        scoped_to_client: scoped,
        ..PackageFilter::default()
    });
    let mut show_add = use_signal(|| false);
    let mut form_client = use_signal(String::new);
    let mut form_type = use_signal(String::new);
    let mut form_received_by = use_signal(String::new);
    let mut form_expected = use_signal(|| super::display_date(today()));
    let mut form_ticket = use_signal(String::new);
    let mut form_serial = use_signal(String::new);
    let mut form_error = use_signal(String::new);

    let packages = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let store = state.with(StoreClient::from_session).ok()?;
            match store.packages(scope, today()).await {
                Ok(packages) => Some(packages),
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load packages", &err);
                    None
                }
            }
        }
    });

    let mut reset_form = move || {
        form_client.set(String::new());
        form_type.set(String::new());
        form_received_by.set(String::new());
        form_expected.set(super::display_date(today()));
        form_ticket.set(String::new());
        form_serial.set(String::new());
        form_error.set(String::new());
    };

    let on_submit = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            let client_id = match scope {
                Some(id) => Some(id),
                None => Uuid::parse_str(form_client().trim()).ok(),
            };
            let Some(client_id) = client_id else {
                form_error.set("Select a client".to_string());
                return;
            };
            if form_type().trim().is_empty() {
                form_error.set("Select a package type".to_string());
                return;
            }
            if form_received_by().trim().is_empty() {
                form_error.set("Received by is required".to_string());
                return;
            }
            let Some(expected_date) = parse_date(&form_expected()) else {
                form_error.set("Enter a valid expected date".to_string());
                return;
            };

            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let log = ActivityLog::new(
                store.clone(),
                state.with(|s| s.operator.identity().to_string()),
            );
            let client_name = state
                .with(|s| s.client_name(client_id).map(str::to_string))
                .unwrap_or_default();
            let toasts = toasts.clone();

            let payload = NewPackage {
                client_id,
                package_type: form_type().trim().to_string(),
                received_by: form_received_by().trim().to_string(),
                ticket_id: Some(form_ticket().trim().to_string()).filter(|v| !v.is_empty()),
                serial_number: Some(form_serial().trim().to_string()).filter(|v| !v.is_empty()),
                received_date: time::OffsetDateTime::now_utc(),
                expected_date,
            };

            spawn(async move {
                match store.create_package(&payload, today()).await {
                    Ok(created) => {
                        log.record(
                            ActionKind::Create,
                            ResourceKind::InboundPackage,
                            created.id,
                            format!(
                                "Created new inbound package: {} for {}",
                                created.package_type, client_name
                            ),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Success, "Package logged.");
                        show_add.set(false);
                        reset_form();
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to create package", &err);
                    }
                }
            });
        }
    };

    let on_save = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |(id, edit): (Uuid, PackageEdit)| {
            // Nothing touched: behave like a cancel, no remote call.
            if edit.is_empty() {
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
            let patch = PackagePatch {
                package_type: edit.package_type,
                received_by: edit.received_by,
                ticket_id: edit.ticket_id,
                serial_number: edit.serial_number,
            };

            spawn(async move {
                match store.update_package(id, &patch).await {
                    Ok(()) => {
                        log.record(
                            ActionKind::Update,
                            ResourceKind::InboundPackage,
                            id,
                            "Updated inbound package details",
                        )
                        .await;
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to update package", &err);
                    }
                }
            });
        }
    };

    let on_complete = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |id: Uuid| {
            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let operator = state.with(|s| s.operator.identity().to_string());
            let log = ActivityLog::new(store.clone(), operator.clone());
            let toasts = toasts.clone();

            spawn(async move {
                match store.complete_package(id, &operator, today()).await {
                    Ok(completed) => {
                        log.record(
                            ActionKind::Update,
                            ResourceKind::InboundPackage,
                            completed.id,
                            format!(
                                "Completed inbound package: {} for {}",
                                completed.package_type, completed.client_name
                            ),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Success, "Package marked complete.");
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        report_store_error(&nav, toasts, "Failed to complete package", &err);
                    }
                }
            });
        }
    };

    let all_packages = match &*packages.read() {
        None => return rsx! { Loading {} },
        Some(None) => Vec::new(),
        Some(Some(packages)) => packages.clone(),
    };

    let current_filter = filter();
    let visible: Vec<_> = visible_packages(&all_packages, &current_filter)
        .into_iter()
        .cloned()
        .collect();
    let counts = {
        let refs: Vec<_> = visible.iter().collect();
        tier_counts(&refs)
    };

    let clients = state.with(|s| s.clients.clone());
    let mut filter = filter;

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center gap-4",
                div {
                    h1 { class: "{theme::PAGE_TITLE}",
                        {if scoped { "Client Inbound Packages" } else { "Inbound Packages" }}
                    }
                    p { class: "text-sm text-gray-500", "{counts.total()} shown" }
                }
                div { class: "flex items-center gap-4",
                    label { class: "flex items-center gap-2",
                        input {
                            r#type: "checkbox",
                            checked: current_filter.show_completed,
                            onchange: move |evt| {
                                filter.with_mut(|f| f.show_completed = evt.checked());
                            },
                            class: "rounded border-gray-300 text-blue-600 focus:ring-blue-500",
                        }
                        span { class: "text-sm text-gray-600", "Show Completed" }
                    }
                    button {
                        class: "{theme::BTN_PRIMARY}",
                        onclick: move |_| {
                            reset_form();
                            show_add.set(true);
                        },
                        "+ Add New Package"
                    }
                }
            }

            div { class: "grid grid-cols-1 md:grid-cols-3 gap-6",
                StatCard {
                    title: "OK".to_string(),
                    value: counts.ok.to_string(),
                    value_class: theme::tier_stat_value(StatusTier::Ok),
                    icon: "✅",
                }
                StatCard {
                    title: "Warning".to_string(),
                    value: counts.warning.to_string(),
                    value_class: theme::tier_stat_value(StatusTier::Warning),
                    icon: "⏱️",
                }
                StatCard {
                    title: "Critical".to_string(),
                    value: counts.critical.to_string(),
                    value_class: theme::tier_stat_value(StatusTier::Critical),
                    icon: "🚨",
                }
            }

            PackageTable {
                packages: visible,
                filter: filter,
                scoped: scoped,
                on_save: on_save,
                on_complete: on_complete,
            }

            if show_add() {
                Modal {
                    title: "Add New Package".to_string(),
                    on_close: move |_| {
                        show_add.set(false);
                        reset_form();
                    },
                    if !form_error().is_empty() {
                        div { class: "mb-4 rounded-md bg-red-50 border border-red-200 px-3 py-2",
                            p { class: "text-sm text-red-700", "{form_error}" }
                        }
                    }
                    form { class: "space-y-4", onsubmit: on_submit,
                        if !scoped {
                            div {
                                label { class: "{theme::LABEL}", "Client" }
                                select {
                                    class: "{theme::INPUT}",
                                    value: form_client(),
                                    onchange: move |evt| form_client.set(evt.value().to_string()),
                                    option { value: "", "Select a client" }
                                    for client in clients.iter() {
                                        option { value: "{client.id}", "{client.name}" }
                                    }
                                }
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Package Type" }
                            select {
                                class: "{theme::INPUT}",
                                value: form_type(),
                                onchange: move |evt| form_type.set(evt.value().to_string()),
                                option { value: "", "Select a type" }
                                for package_type in PACKAGE_TYPES {
                                    option { value: "{package_type}", "{package_type}" }
                                }
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Received By" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_received_by(),
                                oninput: move |evt| form_received_by.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Expected Date" }
                            input {
                                r#type: "date",
                                class: "{theme::INPUT}",
                                value: form_expected(),
                                oninput: move |evt| form_expected.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Ticket ID" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_ticket(),
                                placeholder: "Optional",
                                oninput: move |evt| form_ticket.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Serial Number" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_serial(),
                                placeholder: "Optional",
                                oninput: move |evt| form_serial.set(evt.value().to_string()),
                            }
                        }
                        div { class: "flex justify-end gap-3 pt-4",
                            button {
                                r#type: "button",
                                class: "{theme::BTN_SECONDARY}",
                                onclick: move |_| {
                                    show_add.set(false);
                                    reset_form();
                                },
                                "Cancel"
                            }
                            button {
                                r#type: "submit",
                                class: "px-4 py-2 bg-blue-500 text-white rounded-lg hover:bg-blue-600",
                                "Add Package"
                            }
                        }
                    }
                }
            }
        }
    }
}
