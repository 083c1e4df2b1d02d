use dioxus::prelude::*;

use crate::ui::theme;

/// Summary tile: a label, a large number, an icon on the right.
#[component]
pub fn StatCard(title: String, value: String, value_class: &'static str, icon: &'static str) -> Element {
    rsx! {
        div {
            class: "{theme::PANEL_PADDED}",
            div { class: "flex items-center justify-between",
                div {
                    p { class: "text-sm text-gray-600", "{title}" }
                    p { class: "{value_class}", "{value}" }
                }
                span { class: "text-3xl", "{icon}" }
            }
        }
    }
}
