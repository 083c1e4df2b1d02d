use dioxus::prelude::*;

use crate::ui::theme;

/// Centered overlay dialog; the caller supplies the body (usually a form).
#[component]
pub fn Modal(title: String, wide: Option<bool>, on_close: EventHandler<()>, children: Element) -> Element {
    let width = if wide.unwrap_or(false) {
        "max-w-2xl"
    } else {
        "max-w-md"
    };
    rsx! {
        div {
            class: "fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center overflow-y-auto",
            div {
                class: "bg-white p-6 rounded-lg {width} w-full m-4",
                div { class: "flex justify-between items-center mb-4",
                    h3 { class: "text-lg font-semibold text-gray-900", "{title}" }
                    button {
                        class: "text-gray-400 hover:text-gray-500",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                {children}
            }
        }
    }
}

/// Delete-style confirmation dialog.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center",
            div {
                class: "bg-white p-6 rounded-lg max-w-md w-full",
                h3 { class: "text-lg font-semibold text-gray-900 mb-4", "{title}" }
                p { class: "text-gray-600 mb-6", "{message}" }
                div { class: "flex justify-end gap-3",
                    button {
                        class: "{theme::BTN_SECONDARY}",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "{theme::BTN_DANGER}",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
