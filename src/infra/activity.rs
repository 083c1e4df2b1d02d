//! Append-only activity trail.
//!
//! Recording is strictly best-effort: a failed insert is logged and dropped
//! so it can never block or fail the operation that triggered it.

use uuid::Uuid;

use crate::domain::{ActionKind, ResourceKind};
use crate::infra::records::ActivityInsert;
use crate::infra::store::StoreClient;

#[derive(Clone)]
pub struct ActivityLog {
    store: StoreClient,
    actor: String,
}

impl ActivityLog {
    pub fn new(store: StoreClient, actor: impl Into<String>) -> Self {
        Self {
            store,
            actor: actor.into(),
        }
    }

    pub async fn record(
        &self,
        action: ActionKind,
        resource: ResourceKind,
        resource_id: Uuid,
        details: impl Into<String>,
    ) {
        // No identified operator, nothing to attribute: skip, as the original
        // flow does for anonymous sessions.
        if self.actor.is_empty() {
            return;
        }
        let entry = ActivityInsert {
            actor: self.actor.clone(),
            action_type: action.as_str().to_string(),
            resource_type: resource.as_str().to_string(),
            resource_id: resource_id.to_string(),
            details: details.into(),
        };
        if let Err(err) = self.store.insert("activity_logs", &[entry]).await {
            tracing::warn!(target: "activity", error = %err, "failed to record activity entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn records_an_entry_with_actor_and_kinds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/activity_logs"))
            .and(body_partial_json(json!([{
                "actor": "dana@example.com",
                "action_type": "CREATE",
                "resource_type": "INBOUND_PACKAGE",
            }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let store = StoreClient::new(&server.uri(), "key").expect("valid base url");
        let log = ActivityLog::new(store, "dana@example.com");
        log.record(
            ActionKind::Create,
            ResourceKind::InboundPackage,
            Uuid::new_v4(),
            "Created new inbound package: Laptop for Northwind",
        )
        .await;
    }

    #[tokio::test]
    async fn sink_failures_are_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/activity_logs"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = StoreClient::new(&server.uri(), "key").expect("valid base url");
        let log = ActivityLog::new(store, "dana@example.com");
        // Must not panic or propagate anything.
        log.record(
            ActionKind::Delete,
            ResourceKind::Client,
            Uuid::new_v4(),
            "Deleted client: Contoso",
        )
        .await;
    }

    #[tokio::test]
    async fn anonymous_sessions_record_nothing() {
        let server = MockServer::start().await;
        // No mock mounted: any request would 404 and fail the expect below.
        Mock::given(method("POST"))
            .and(path("/rest/v1/activity_logs"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let store = StoreClient::new(&server.uri(), "key").expect("valid base url");
        let log = ActivityLog::new(store, "");
        log.record(
            ActionKind::Update,
            ResourceKind::Network,
            Uuid::new_v4(),
            "Updated network: Office LAN",
        )
        .await;
    }
}
