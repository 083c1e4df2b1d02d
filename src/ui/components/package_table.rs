use dioxus::prelude::*;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::domain::{InboundPackage, PackageEdit, PackageFilter, StatusTier};
use crate::ui::components::tier_badge::TierBadge;
use crate::ui::theme;

/// The inbound package table: per-column filter controls in the header,
/// inline editing and the one-way complete action in the rows.
///
/// `packages` is the already-filtered visible subset; the filter signal is
/// only rendered here, the narrowing itself happens in the page via
/// [`crate::domain::visible_packages`].
#[component]
pub fn PackageTable(
    packages: Vec<InboundPackage>,
    filter: Signal<PackageFilter>,
    scoped: bool,
    on_save: EventHandler<(Uuid, PackageEdit)>,
    on_complete: EventHandler<Uuid>,
) -> Element {
    let mut editing = use_signal(|| None::<Uuid>);
    let mut draft = use_signal(PackageEdit::default);
    let mut filter = filter;

    let is_empty = packages.is_empty();
    let colspan = if scoped { "7" } else { "8" };

    rsx! {
        div {
            class: "{theme::PANEL} overflow-hidden",
            div { class: "overflow-x-auto",
                table {
                    class: "{theme::TABLE}",
                    thead {
                        class: "{theme::THEAD}",
                        tr {
                            th { class: "{theme::TH}",
                                div { class: "flex flex-col gap-2",
                                    "Status"
                                    select {
                                        class: "{theme::FILTER_INPUT}",
                                        value: filter.with(|f| f.tier.map(|t| t.label()).unwrap_or("")),
                                        onchange: move |evt| {
                                            filter.with_mut(|f| f.tier = StatusTier::parse(&evt.value()));
                                        },
                                        option { value: "", "All" }
                                        option { value: "OK", "OK" }
                                        option { value: "WARNING", "Warning" }
                                        option { value: "CRITICAL", "Critical" }
                                    }
                                }
                            }
                            if !scoped {
                                th { class: "{theme::TH}",
                                    div { class: "flex flex-col gap-2",
                                        "Client"
                                        input {
                                            r#type: "text",
                                            class: "{theme::FILTER_INPUT}",
                                            value: filter.with(|f| f.client.clone()),
                                            placeholder: "Filter clients...",
                                            oninput: move |evt| {
                                                filter.with_mut(|f| f.client = evt.value().to_string());
                                            },
                                        }
                                    }
                                }
                            }
                            th { class: "{theme::TH}",
                                div { class: "flex flex-col gap-2",
                                    "Package Type"
                                    input {
                                        r#type: "text",
                                        class: "{theme::FILTER_INPUT}",
                                        value: filter.with(|f| f.package_type.clone()),
                                        placeholder: "Filter types...",
                                        oninput: move |evt| {
                                            filter.with_mut(|f| f.package_type = evt.value().to_string());
                                        },
                                    }
                                }
                            }
                            th { class: "{theme::TH}",
                                div { class: "flex flex-col gap-2",
                                    "Serial Number"
                                    input {
                                        r#type: "text",
                                        class: "{theme::FILTER_INPUT}",
                                        value: filter.with(|f| f.serial_number.clone()),
                                        placeholder: "Filter serial numbers...",
                                        oninput: move |evt| {
                                            filter.with_mut(|f| f.serial_number = evt.value().to_string());
                                        },
                                    }
                                }
                            }
                            th { class: "{theme::TH}",
                                div { class: "flex flex-col gap-2",
                                    "Received By"
                                    input {
                                        r#type: "text",
                                        class: "{theme::FILTER_INPUT}",
                                        value: filter.with(|f| f.received_by.clone()),
                                        placeholder: "Filter receivers...",
                                        oninput: move |evt| {
                                            filter.with_mut(|f| f.received_by = evt.value().to_string());
                                        },
                                    }
                                }
                            }
                            th { class: "{theme::TH}", "Expected Date" }
                            th { class: "{theme::TH} whitespace-nowrap", "Ticket" }
                            th { class: "{theme::TH}", "Actions" }
                        }
                    }
                    tbody {
                        class: "{theme::TBODY}",
                        for pkg in packages {
                            {
                                let row_editing = editing() == Some(pkg.id);
                                let pkg_id = pkg.id;
                                rsx! {
                                    tr {
                                        key: "{pkg.id}",
                                        class: "{theme::tier_row(pkg.tier)}",
                                        td { class: "{theme::TD} whitespace-nowrap",
                                            TierBadge { tier: pkg.tier }
                                        }
                                        if !scoped {
                                            td { class: "{theme::TD_STRONG}",
                                                span { class: "font-medium", "{pkg.client_name}" }
                                            }
                                        }
                                        td { class: "{theme::TD}",
                                            if row_editing {
                                                input {
                                                    r#type: "text",
                                                    class: "{theme::INPUT_INLINE}",
                                                    value: draft.with(|d| d.package_type.clone())
                                                        .unwrap_or_else(|| pkg.package_type.clone()),
                                                    oninput: move |evt| {
                                                        draft.with_mut(|d| d.package_type = Some(evt.value().to_string()));
                                                    },
                                                }
                                            } else {
                                                "{pkg.package_type}"
                                            }
                                        }
                                        td { class: "{theme::TD}",
                                            if row_editing {
                                                input {
                                                    r#type: "text",
                                                    class: "{theme::INPUT_INLINE}",
                                                    value: draft.with(|d| d.serial_number.clone())
                                                        .or_else(|| pkg.serial_number.clone())
                                                        .unwrap_or_default(),
                                                    placeholder: "Enter serial number",
                                                    oninput: move |evt| {
                                                        draft.with_mut(|d| d.serial_number = Some(evt.value().to_string()));
                                                    },
                                                }
                                            } else {
                                                {pkg.serial_number.clone().unwrap_or_else(|| "N/A".to_string())}
                                            }
                                        }
                                        td { class: "{theme::TD}",
                                            if row_editing {
                                                input {
                                                    r#type: "text",
                                                    class: "{theme::INPUT_INLINE}",
                                                    value: draft.with(|d| d.received_by.clone())
                                                        .unwrap_or_else(|| pkg.received_by.clone()),
                                                    oninput: move |evt| {
                                                        draft.with_mut(|d| d.received_by = Some(evt.value().to_string()));
                                                    },
                                                }
                                            } else {
                                                "{pkg.received_by}"
                                            }
                                        }
                                        td { class: "{theme::TD}", {display_date(pkg.expected_date)} }
                                        td { class: "{theme::TD}",
                                            if row_editing {
                                                input {
                                                    r#type: "text",
                                                    class: "{theme::INPUT_INLINE}",
                                                    value: draft.with(|d| d.ticket_id.clone())
                                                        .or_else(|| pkg.ticket_id.clone())
                                                        .unwrap_or_default(),
                                                    placeholder: "Enter ticket ID",
                                                    oninput: move |evt| {
                                                        draft.with_mut(|d| d.ticket_id = Some(evt.value().to_string()));
                                                    },
                                                }
                                            } else {
                                                {pkg.ticket_id.clone().unwrap_or_else(|| "N/A".to_string())}
                                            }
                                        }
                                        td { class: "{theme::TD}",
                                            div { class: "flex items-center gap-2",
                                                if pkg.completed {
                                                    div { class: "text-green-600 flex items-center gap-1",
                                                        span { class: "text-xs",
                                                            {completed_label(pkg.completed_at)}
                                                        }
                                                        span { class: "text-xs text-gray-500",
                                                            {pkg.completed_by.clone().map(|by| format!("by {by}")).unwrap_or_default()}
                                                        }
                                                    }
                                                } else {
                                                    if row_editing {
                                                        button {
                                                            class: "{theme::LINK_ACTION}",
                                                            onclick: move |_| {
                                                                on_save.call((pkg_id, draft()));
                                                                editing.set(None);
                                                                draft.set(PackageEdit::default());
                                                            },
                                                            "Save"
                                                        }
                                                    } else {
                                                        button {
                                                            class: "{theme::LINK_CONFIRM}",
                                                            onclick: move |_| on_complete.call(pkg_id),
                                                            "Mark Complete"
                                                        }
                                                    }
                                                    button {
                                                        class: "{theme::LINK_ACTION}",
                                                        onclick: move |_| {
                                                            if editing() == Some(pkg_id) {
                                                                editing.set(None);
                                                                draft.set(PackageEdit::default());
                                                            } else {
                                                                editing.set(Some(pkg_id));
                                                                draft.set(PackageEdit::default());
                                                            }
                                                        },
                                                        {if row_editing { "Cancel" } else { "Edit" }}
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        if is_empty {
                            tr {
                                td {
                                    class: "px-6 py-8 text-center text-sm text-gray-500",
                                    colspan: colspan,
                                    "No packages match the current filters."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn display_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn completed_label(completed_at: Option<OffsetDateTime>) -> String {
    match completed_at {
        Some(at) => format!("Completed {}", display_date(at.date())),
        None => "Completed".to_string(),
    }
}
