use dioxus::prelude::*;

use crate::domain::StatusTier;
use crate::ui::theme;

#[component]
pub fn TierBadge(tier: StatusTier) -> Element {
    rsx! {
        span {
            class: "px-2 inline-flex text-xs leading-5 font-semibold rounded-full {theme::tier_badge(tier)}",
            "{tier.label()}"
        }
    }
}
