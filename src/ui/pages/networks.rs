use dioxus::prelude::*;
use uuid::Uuid;

use crate::domain::{ActionKind, Network, NetworkKind, ResourceKind, SessionState, SubnetDraft};
use crate::infra::activity::ActivityLog;
use crate::infra::queries::SubnetReplaceError;
use crate::infra::store::StoreClient;
use crate::ui::components::modal::{ConfirmDialog, Modal};
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};
use crate::ui::pages::{report_store_error, Loading};
use crate::ui::theme;

/// LAN/WAN documentation per client: networks with their subnet sets.
#[component]
pub fn NetworkDocsPage(client_id: String) -> Element {
    let state = use_context::<Signal<SessionState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let client_uuid = Uuid::parse_str(&client_id).ok();

    let mut reload = use_signal(|| 0u32);
    let mut active_tab = use_signal(|| NetworkKind::Lan);
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| None::<Network>);
    let mut deleting = use_signal(|| None::<Network>);
    let mut form_name = use_signal(String::new);
    let mut form_description = use_signal(String::new);
    let mut form_subnets = use_signal(|| vec![SubnetDraft::default()]);
    let mut form_error = use_signal(String::new);

    let networks = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move {
            reload();
            let tab = active_tab();
            let id = client_uuid?;
            let store = state.with(StoreClient::from_session).ok()?;
            match store.networks(id, tab).await {
                Ok(networks) => Some(networks),
                Err(err) => {
                    report_store_error(&nav, toasts.clone(), "Failed to load networks", &err);
                    None
                }
            }
        }
    });

    let mut reset_form = move || {
        form_name.set(String::new());
        form_description.set(String::new());
        form_subnets.set(vec![SubnetDraft::default()]);
        form_error.set(String::new());
    };

    let on_submit = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            if form_name().trim().is_empty() {
                form_error.set("Network name is required".to_string());
                return;
            }
            if form_subnets().iter().any(|s| s.subnet_address.trim().is_empty()) {
                form_error.set("Every subnet needs an address".to_string());
                return;
            }
            let Some(client_id) = client_uuid else { return };
            let Ok(store) = state.with(StoreClient::from_session) else {
                push_toast(toasts.clone(), ToastKind::Error, "Store client unavailable.");
                return;
            };
            let log = ActivityLog::new(
                store.clone(),
                state.with(|s| s.operator.identity().to_string()),
            );
            let toasts = toasts.clone();
            let name = form_name().trim().to_string();
            let description = form_description().trim().to_string();
            let subnets = form_subnets();
            let target = editing();
            let tab = active_tab();

            spawn(async move {
                match target {
                    Some(network) => {
                        match store
                            .update_network(&network, &name, &description, &subnets)
                            .await
                        {
                            Ok(()) => {
                                log.record(
                                    ActionKind::Update,
                                    ResourceKind::Network,
                                    network.id,
                                    format!("Updated network: {name}"),
                                )
                                .await;
                                push_toast(toasts, ToastKind::Success, "Network updated.");
                            }
                            Err(SubnetReplaceError::Update(err))
                            | Err(SubnetReplaceError::Delete(err)) => {
                                report_store_error(&nav, toasts, "Failed to update network", &err);
                                return;
                            }
                            Err(SubnetReplaceError::RolledBack(err)) => {
                                push_toast(
                                    toasts,
                                    ToastKind::Warning,
                                    format!(
                                        "Subnet changes failed and were rolled back: {err}"
                                    ),
                                );
                                return;
                            }
                            Err(err @ SubnetReplaceError::RestoreFailed { .. }) => {
                                push_toast(toasts, ToastKind::Error, format!("{err}"));
                                return;
                            }
                        }
                    }
                    None => {
                        match store
                            .create_network(client_id, tab, &name, &description, &subnets)
                            .await
                        {
                            Ok(created) => {
                                log.record(
                                    ActionKind::Create,
                                    ResourceKind::Network,
                                    created.id,
                                    format!("Created new network: {}", created.name),
                                )
                                .await;
                                push_toast(toasts, ToastKind::Success, "Network created.");
                            }
                            Err(err) => {
                                report_store_error(&nav, toasts, "Failed to create network", &err);
                                return;
                            }
                        }
                    }
                }
                show_form.set(false);
                editing.set(None);
                reset_form();
                reload.with_mut(|gen| *gen += 1);
            });
        }
    };

    let on_confirm_delete = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let Some(network) = deleting() else { return };
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
                match store.delete_network(network.id).await {
                    Ok(deleted) => {
                        log.record(
                            ActionKind::Delete,
                            ResourceKind::Network,
                            deleted.id,
                            format!("Deleted network: {}", deleted.name),
                        )
                        .await;
                        push_toast(toasts, ToastKind::Info, "Network deleted.");
                        deleting.set(None);
                        reload.with_mut(|gen| *gen += 1);
                    }
                    Err(err) => {
                        deleting.set(None);
                        report_store_error(&nav, toasts, "Failed to delete network", &err);
                    }
                }
            });
        }
    };

    let rows = match &*networks.read() {
        None => return rsx! { Loading {} },
        Some(None) => Vec::new(),
        Some(Some(rows)) => rows.clone(),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex justify-between items-center",
                h1 { class: "{theme::PAGE_TITLE}", "Network Documentation" }
                button {
                    class: "{theme::BTN_PRIMARY}",
                    onclick: move |_| {
                        reset_form();
                        editing.set(None);
                        show_form.set(true);
                    },
                    "+ Add New Network"
                }
            }

            div { class: "{theme::PANEL}",
                div { class: "border-b",
                    nav { class: "flex space-x-4 px-6",
                        for kind in [NetworkKind::Lan, NetworkKind::Wan] {
                            button {
                                class: if active_tab() == kind {
                                    "py-4 px-2 text-sm font-medium border-b-2 border-blue-500 text-blue-600"
                                } else {
                                    "py-4 px-2 text-sm font-medium border-b-2 border-transparent text-gray-500 hover:text-gray-700 hover:border-gray-300"
                                },
                                onclick: move |_| active_tab.set(kind),
                                "{kind.as_str()}"
                            }
                        }
                    }
                }

                div { class: "p-6",
                    if rows.is_empty() {
                        div { class: "text-center py-12",
                            span { class: "text-5xl", "🌐" }
                            h3 { class: "mt-2 text-sm font-medium text-gray-900", "No networks" }
                            p { class: "mt-1 text-sm text-gray-500",
                                "Get started by creating a new network."
                            }
                        }
                    } else {
                        div { class: "space-y-6",
                            for network in rows.iter().cloned() {
                                {
                                    let edit_network = network.clone();
                                    let delete_network = network.clone();
                                    rsx! {
                                        div { class: "border rounded-lg p-6", key: "{network.id}",
                                            div { class: "flex justify-between items-center mb-4",
                                                h3 { class: "text-lg font-semibold text-gray-800", "{network.name}" }
                                                div { class: "flex gap-2",
                                                    button {
                                                        class: "{theme::LINK_ACTION}",
                                                        onclick: move |_| {
                                                            form_name.set(edit_network.name.clone());
                                                            form_description.set(edit_network.description.clone());
                                                            form_subnets.set(
                                                                if edit_network.subnets.is_empty() {
                                                                    vec![SubnetDraft::default()]
                                                                } else {
                                                                    edit_network.subnets.iter().map(SubnetDraft::from).collect()
                                                                }
                                                            );
                                                            form_error.set(String::new());
                                                            editing.set(Some(edit_network.clone()));
                                                            show_form.set(true);
                                                        },
                                                        "Edit"
                                                    }
                                                    button {
                                                        class: "{theme::LINK_DANGER}",
                                                        onclick: move |_| deleting.set(Some(delete_network.clone())),
                                                        "Delete"
                                                    }
                                                }
                                            }
                                            if !network.description.is_empty() {
                                                p { class: "text-gray-600 mb-4", "{network.description}" }
                                            }
                                            div { class: "space-y-4",
                                                h4 { class: "text-sm font-medium text-gray-500", "Subnets" }
                                                for subnet in network.subnets.iter() {
                                                    div { class: "bg-gray-50 p-4 rounded-lg", key: "{subnet.id}",
                                                        div { class: "grid grid-cols-2 gap-4",
                                                            div {
                                                                p { class: "text-sm text-gray-500", "Subnet Address" }
                                                                p { class: "font-medium", "{subnet.subnet_address}" }
                                                            }
                                                            div {
                                                                p { class: "text-sm text-gray-500", "Gateway" }
                                                                p { class: "font-medium", "{subnet.gateway}" }
                                                            }
                                                            div {
                                                                p { class: "text-sm text-gray-500", "DNS Servers" }
                                                                p { class: "font-medium", {subnet.dns.join(", ")} }
                                                            }
                                                            div {
                                                                p { class: "text-sm text-gray-500", "DHCP Range" }
                                                                p { class: "font-medium", "{subnet.dhcp_range}" }
                                                            }
                                                            div {
                                                                p { class: "text-sm text-gray-500", "VLAN" }
                                                                p { class: "font-medium", "{subnet.vlan}" }
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
            }

            if show_form() {
                Modal {
                    title: if editing().is_some() {
                        "Edit Network".to_string()
                    } else {
                        "Add New Network".to_string()
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
                    form { class: "space-y-6", onsubmit: on_submit,
                        div {
                            label { class: "{theme::LABEL}", "Network Name" }
                            input {
                                r#type: "text",
                                class: "{theme::INPUT}",
                                value: form_name(),
                                oninput: move |evt| form_name.set(evt.value().to_string()),
                            }
                        }
                        div {
                            label { class: "{theme::LABEL}", "Description" }
                            textarea {
                                class: "{theme::INPUT}",
                                rows: "3",
                                value: form_description(),
                                oninput: move |evt| form_description.set(evt.value().to_string()),
                            }
                        }

                        div { class: "space-y-4",
                            h4 { class: "font-medium text-gray-900", "Subnets" }
                            for (index, subnet) in form_subnets().into_iter().enumerate() {
                                div { class: "bg-gray-50 p-4 rounded-lg space-y-4", key: "{index}",
                                    div { class: "grid grid-cols-2 gap-4",
                                        div {
                                            label { class: "{theme::LABEL}", "Subnet Address" }
                                            input {
                                                r#type: "text",
                                                class: "{theme::INPUT}",
                                                value: subnet.subnet_address.clone(),
                                                oninput: move |evt| {
                                                    form_subnets.with_mut(|subnets| {
                                                        subnets[index].subnet_address = evt.value().to_string();
                                                    });
                                                },
                                            }
                                        }
                                        div {
                                            label { class: "{theme::LABEL}", "Gateway" }
                                            input {
                                                r#type: "text",
                                                class: "{theme::INPUT}",
                                                value: subnet.gateway.clone(),
                                                oninput: move |evt| {
                                                    form_subnets.with_mut(|subnets| {
                                                        subnets[index].gateway = evt.value().to_string();
                                                    });
                                                },
                                            }
                                        }
                                        div {
                                            label { class: "{theme::LABEL}", "DNS Servers" }
                                            input {
                                                r#type: "text",
                                                class: "{theme::INPUT}",
                                                value: subnet.dns.join(", "),
                                                placeholder: "8.8.8.8, 8.8.4.4",
                                                oninput: move |evt| {
                                                    form_subnets.with_mut(|subnets| {
                                                        subnets[index].dns = evt
                                                            .value()
                                                            .split(',')
                                                            .map(|s| s.trim().to_string())
                                                            .collect();
                                                    });
                                                },
                                            }
                                        }
                                        div {
                                            label { class: "{theme::LABEL}", "DHCP Range" }
                                            input {
                                                r#type: "text",
                                                class: "{theme::INPUT}",
                                                value: subnet.dhcp_range.clone(),
                                                oninput: move |evt| {
                                                    form_subnets.with_mut(|subnets| {
                                                        subnets[index].dhcp_range = evt.value().to_string();
                                                    });
                                                },
                                            }
                                        }
                                        div {
                                            label { class: "{theme::LABEL}", "VLAN" }
                                            input {
                                                r#type: "number",
                                                class: "{theme::INPUT}",
                                                min: "1",
                                                max: "4094",
                                                value: "{subnet.vlan}",
                                                oninput: move |evt| {
                                                    if let Ok(vlan) = evt.value().parse::<u16>() {
                                                        form_subnets.with_mut(|subnets| {
                                                            subnets[index].vlan = vlan.clamp(1, 4094);
                                                        });
                                                    }
                                                },
                                            }
                                        }
                                    }
                                    if form_subnets().len() > 1 {
                                        button {
                                            r#type: "button",
                                            class: "text-red-600 hover:text-red-700 text-sm",
                                            onclick: move |_| {
                                                form_subnets.with_mut(|subnets| {
                                                    subnets.remove(index);
                                                });
                                            },
                                            "Remove Subnet"
                                        }
                                    }
                                }
                            }
                            button {
                                r#type: "button",
                                class: "text-blue-600 hover:text-blue-700 text-sm",
                                onclick: move |_| {
                                    form_subnets.with_mut(|subnets| subnets.push(SubnetDraft::default()));
                                },
                                "Add Another Subnet"
                            }
                        }

                        div { class: "flex justify-end gap-3",
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
                                {if editing().is_some() { "Save Changes" } else { "Add Network" }}
                            }
                        }
                    }
                }
            }

            if let Some(network) = deleting() {
                ConfirmDialog {
                    title: "Confirm Delete".to_string(),
                    message: format!(
                        "Are you sure you want to delete {}? This action cannot be undone.",
                        network.name
                    ),
                    confirm_label: "Delete".to_string(),
                    on_confirm: on_confirm_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}
