//! Session-wide state shared through the component tree.
//!
//! There is deliberately no "currently selected client" here: client-scoped
//! routes carry the client id as a route parameter, and the shell resolves it
//! against the cached directory via [`SessionState::scope_for`]. Views can
//! never race on an implicit selection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::ClientSummary;

/// The person driving the console; stamped onto activity entries and
/// package completions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Operator {
    pub name: String,
    pub email: String,
}

impl Operator {
    /// Preferred identity string: email when present, display name otherwise.
    pub fn identity(&self) -> &str {
        if self.email.is_empty() {
            &self.name
        } else {
            &self.email
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub operator: Operator,
    pub store_url: String,
    pub store_key: String,
    pub relay_url: String,
    /// Id/name directory used by client selects and the sidebar scope label.
    pub clients: Vec<ClientSummary>,
}

/// An explicit client scope resolved from the current route.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientScope {
    pub id: Uuid,
    pub name: String,
}

impl SessionState {
    pub fn is_configured(&self) -> bool {
        !self.store_url.is_empty() && !self.store_key.is_empty()
    }

    pub fn client_name(&self, id: Uuid) -> Option<&str> {
        self.clients
            .iter()
            .find(|client| client.id == id)
            .map(|client| client.name.as_str())
    }

    /// Resolves a raw route parameter into a scope. Unknown ids still yield a
    /// scope (with an empty name) so a stale directory never blanks a page.
    pub fn scope_for(&self, raw_id: &str) -> Option<ClientScope> {
        let id = Uuid::parse_str(raw_id).ok()?;
        Some(ClientScope {
            id,
            name: self.client_name(id).unwrap_or_default().to_string(),
        })
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.operator = Operator {
            name: persisted.operator_name,
            email: persisted.operator_email,
        };
        self.store_url = persisted.store_url;
        self.store_key = persisted.store_key;
        self.relay_url = if persisted.relay_url.is_empty() {
            default_relay_url()
        } else {
            persisted.relay_url
        };
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            operator_name: self.operator.name.clone(),
            operator_email: self.operator.email.clone(),
            store_url: self.store_url.clone(),
            store_key: self.store_key.clone(),
            relay_url: self.relay_url.clone(),
        }
    }
}

/// Snapshot written to the config directory between runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub operator_name: String,
    #[serde(default)]
    pub operator_email: String,
    #[serde(default)]
    pub store_url: String,
    #[serde(default)]
    pub store_key: String,
    #[serde(default)]
    pub relay_url: String,
}

pub fn default_relay_url() -> String {
    "http://127.0.0.1:8787/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_resolves_known_clients() {
        let id = Uuid::new_v4();
        let mut state = SessionState::default();
        state.clients.push(ClientSummary {
            id,
            name: "Northwind".to_string(),
        });

        let scope = state.scope_for(&id.to_string()).expect("valid uuid");
        assert_eq!(scope.name, "Northwind");
        assert!(state.scope_for("not-a-uuid").is_none());
    }

    #[test]
    fn persisted_roundtrip_keeps_connection_settings() {
        let mut state = SessionState::default();
        state.apply_persisted(PersistedState {
            operator_name: "Dana".into(),
            operator_email: "dana@example.com".into(),
            store_url: "https://store.example.com".into(),
            store_key: "key".into(),
            relay_url: String::new(),
        });

        assert!(state.is_configured());
        assert_eq!(state.relay_url, default_relay_url());
        assert_eq!(state.operator.identity(), "dana@example.com");

        let snapshot = state.to_persisted();
        assert_eq!(snapshot.store_url, "https://store.example.com");
    }
}
