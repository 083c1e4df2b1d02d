use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::SessionState,
    infra::store::StoreClient,
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{
            ApplicationsPage, AssetsPage, ClientOverviewPage, ClientsPage, DashboardPage,
            InboundPage, IntegrationPage, LoginPage, NetworkDocsPage, PrintersPage,
        },
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Dashboard {},
    #[route("/login")]
    Login {},
    #[route("/clients")]
    Clients {},
    #[route("/inbound")]
    Inbound {},
    #[route("/admin/integration")]
    Integration {},
    #[route("/clients/:client_id")]
    ClientOverview { client_id: String },
    #[route("/clients/:client_id/inbound")]
    ClientInbound { client_id: String },
    #[route("/clients/:client_id/network")]
    NetworkDocs { client_id: String },
    #[route("/clients/:client_id/printers")]
    Printers { client_id: String },
    #[route("/clients/:client_id/assets")]
    Assets { client_id: String },
    #[route("/clients/:client_id/applications")]
    Applications { client_id: String },
}

impl Route {
    /// The client id carried by client-scoped routes. This, not any ambient
    /// selection, is what the shell and pages derive their scope from.
    pub fn client_id(&self) -> Option<&str> {
        match self {
            Route::ClientOverview { client_id }
            | Route::ClientInbound { client_id }
            | Route::NetworkDocs { client_id }
            | Route::Printers { client_id }
            | Route::Assets { client_id }
            | Route::Applications { client_id } => Some(client_id),
            _ => None,
        }
    }
}

/// Generation counter for the cached client directory; bump it after login or
/// a client mutation to re-run the directory fetch.
#[derive(Clone, Copy)]
pub struct DirectoryRefresh(pub Signal<u32>);

impl DirectoryRefresh {
    pub fn bump(&mut self) {
        let mut signal = self.0;
        signal.with_mut(|generation| *generation += 1);
    }
}

#[component]
pub fn App() -> Element {
    let state = use_signal(SessionState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    let directory_refresh = DirectoryRefresh(use_signal(|| 0u32));
    use_context_provider(|| directory_refresh);

    let _directory = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || async move { fetch_client_directory(state.clone(), toasts.clone(), directory_refresh).await }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_session(state: &Signal<SessionState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        tracing::warn!(target: "session", error = %err, "failed to persist session state");
    }
}

async fn fetch_client_directory(
    mut state: Signal<SessionState>,
    toasts: Signal<Vec<ToastMessage>>,
    refresh: DirectoryRefresh,
) {
    // Subscribe to the generation counter so bumps re-run this resource.
    let _generation = (refresh.0)();

    if !state.with(|st| st.is_configured()) {
        return;
    }

    let store = match state.with(StoreClient::from_session) {
        Ok(store) => store,
        Err(err) => {
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to initialise store client: {err}"),
            );
            return;
        }
    };

    match store.client_directory().await {
        Ok(clients) => state.with_mut(|st| st.clients = clients),
        Err(err) if err.is_permission_denied() => {
            // The triggering page redirects to login; nothing to do here.
            tracing::debug!(target: "session", "client directory fetch rejected, session expired");
        }
        Err(err) => {
            push_toast(
                toasts,
                ToastKind::Error,
                format!("Failed to load client directory: {err}"),
            );
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn Login() -> Element {
    rsx! { LoginPage {} }
}

#[component]
pub fn Clients() -> Element {
    rsx! { Shell { ClientsPage {} } }
}

#[component]
pub fn Inbound() -> Element {
    rsx! { Shell { InboundPage {} } }
}

#[component]
pub fn Integration() -> Element {
    rsx! { Shell { IntegrationPage {} } }
}

#[component]
pub fn ClientOverview(client_id: String) -> Element {
    rsx! { Shell { ClientOverviewPage { client_id } } }
}

#[component]
pub fn ClientInbound(client_id: String) -> Element {
    rsx! { Shell { InboundPage { client_id } } }
}

#[component]
pub fn NetworkDocs(client_id: String) -> Element {
    rsx! { Shell { NetworkDocsPage { client_id } } }
}

#[component]
pub fn Printers(client_id: String) -> Element {
    rsx! { Shell { PrintersPage { client_id } } }
}

#[component]
pub fn Assets(client_id: String) -> Element {
    rsx! { Shell { AssetsPage { client_id } } }
}

#[component]
pub fn Applications(client_id: String) -> Element {
    rsx! { Shell { ApplicationsPage { client_id } } }
}
