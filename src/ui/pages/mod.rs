use dioxus::prelude::*;
use dioxus::router::Navigator;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::app::Route;
use crate::infra::store::StoreError;
use crate::ui::components::toast::{push_toast, ToastKind, ToastMessage};

pub mod applications;
pub mod assets;
pub mod client_overview;
pub mod clients;
pub mod dashboard;
pub mod inbound;
pub mod integration;
pub mod login;
pub mod networks;
pub mod printers;

pub use applications::ApplicationsPage;
pub use assets::AssetsPage;
pub use client_overview::ClientOverviewPage;
pub use clients::ClientsPage;
pub use dashboard::DashboardPage;
pub use inbound::InboundPage;
pub use integration::IntegrationPage;
pub use login::LoginPage;
pub use networks::NetworkDocsPage;
pub use printers::PrintersPage;

/// Permission failures bounce to the login view; everything else surfaces as
/// a toast on the triggering page.
pub(crate) fn report_store_error(
    nav: &Navigator,
    toasts: Signal<Vec<ToastMessage>>,
    context: &str,
    err: &StoreError,
) {
    if err.is_permission_denied() {
        nav.push(Route::Login {});
    } else {
        push_toast(toasts, ToastKind::Error, format!("{context}: {err}"));
    }
}

#[component]
pub(crate) fn Loading() -> Element {
    rsx! {
        div { class: "flex items-center justify-center h-64",
            div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-500" }
        }
    }
}

pub(crate) fn display_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub(crate) fn display_datetime(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]"
    ))
    .unwrap_or_default()
}
