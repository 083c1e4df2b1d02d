//! Shared styling helpers so pages and tables stay visually consistent.

use crate::domain::{ActionKind, StatusTier};

// ============================================
// STATUS TIER STYLES
// ============================================

pub fn tier_badge(tier: StatusTier) -> &'static str {
    match tier {
        StatusTier::Ok => "bg-green-100 text-green-800",
        StatusTier::Warning => "bg-yellow-100 text-yellow-800",
        StatusTier::Critical => "bg-red-100 text-red-800",
    }
}

pub fn tier_row(tier: StatusTier) -> &'static str {
    match tier {
        StatusTier::Ok => "",
        StatusTier::Warning => "bg-yellow-50",
        StatusTier::Critical => "bg-red-50",
    }
}

pub fn tier_stat_value(tier: StatusTier) -> &'static str {
    match tier {
        StatusTier::Ok => "text-2xl font-bold text-green-600",
        StatusTier::Warning => "text-2xl font-bold text-yellow-600",
        StatusTier::Critical => "text-2xl font-bold text-red-600",
    }
}

// ============================================
// ACTIVITY FEED
// ============================================

pub fn action_dot(action: &str) -> &'static str {
    if action == ActionKind::Create.as_str() {
        "w-2 h-2 rounded-full bg-green-500"
    } else if action == ActionKind::Update.as_str() {
        "w-2 h-2 rounded-full bg-blue-500"
    } else {
        "w-2 h-2 rounded-full bg-red-500"
    }
}

// ============================================
// BUTTONS
// ============================================

pub const BTN_PRIMARY: &str =
    "bg-blue-500 hover:bg-blue-600 text-white px-4 py-2 rounded-lg flex items-center gap-2";
pub const BTN_SECONDARY: &str = "px-4 py-2 text-gray-700 bg-gray-100 hover:bg-gray-200 rounded-lg";
pub const BTN_DANGER: &str = "px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700";
pub const LINK_ACTION: &str = "text-blue-600 hover:text-blue-700 text-sm font-medium";
pub const LINK_DANGER: &str = "text-red-600 hover:text-red-700 text-sm font-medium";
pub const LINK_CONFIRM: &str = "text-green-600 hover:text-green-700 text-sm font-medium";

// ============================================
// FORMS
// ============================================

pub const LABEL: &str = "block text-sm font-medium text-gray-700";
pub const INPUT: &str = "mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-blue-500 focus:ring-blue-500";
pub const INPUT_INLINE: &str = "w-full rounded-md border-gray-300 shadow-sm focus:border-blue-500 focus:ring-blue-500 text-sm";
pub const FILTER_INPUT: &str = "mt-1 text-xs border-gray-300 rounded-md";

// ============================================
// PANELS AND TABLES
// ============================================

pub const PAGE_TITLE: &str = "text-2xl font-bold text-gray-800";
pub const PANEL: &str = "bg-white rounded-lg shadow";
pub const PANEL_PADDED: &str = "bg-white rounded-lg shadow p-6";
pub const TABLE: &str = "min-w-full divide-y divide-gray-200";
pub const THEAD: &str = "bg-gray-50";
pub const TH: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
pub const TBODY: &str = "bg-white divide-y divide-gray-200";
pub const TD: &str = "px-6 py-4 whitespace-nowrap text-sm text-gray-500";
pub const TD_STRONG: &str = "px-6 py-4 whitespace-nowrap text-sm text-gray-900";
