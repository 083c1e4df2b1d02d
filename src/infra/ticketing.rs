//! Client for the third-party ticketing system's customer list.
//!
//! All traffic goes through the relay endpoint: the web build cannot call
//! the ticketing API cross-origin, and routing the desktop build the same
//! way keeps one code path.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::domain::{TicketingCustomer, TicketingSettings};

const USER_AGENT: &str = concat!("msp-console/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum TicketingError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("ticketing API error ({status}): {body}")]
    Upstream { status: u16, body: String },
}

#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    relay_base: Url,
}

impl RelayClient {
    pub fn new(relay_base: &str) -> Result<Self, TicketingError> {
        let relay_base = Url::parse(relay_base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, relay_base })
    }

    /// Fetches the ticketing system's customer list via the relay.
    pub async fn ticketing_customers(
        &self,
        settings: &TicketingSettings,
    ) -> Result<Vec<TicketingCustomer>, TicketingError> {
        let endpoint = self.relay_base.join("cors-proxy")?;
        let upstream_url = format!("{}/customers", settings.api_url.trim_end_matches('/'));
        let payload = json!({
            "url": upstream_url,
            "method": "GET",
            "headers": { "X-API-KEY": settings.api_key },
        });

        let response = self.http.post(endpoint).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TicketingError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let page: CustomerPage = response.json().await?;
        Ok(page
            .items
            .into_iter()
            .map(|dto| TicketingCustomer {
                id: dto.id,
                name: dto.name,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct CustomerPage {
    #[serde(default)]
    items: Vec<CustomerDto>,
}

#[derive(Debug, Deserialize)]
struct CustomerDto {
    #[serde(rename = "CustomerID")]
    id: i64,
    #[serde(rename = "CustomerName")]
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> TicketingSettings {
        TicketingSettings {
            id: None,
            api_key: "k-123".to_string(),
            api_url: "https://tickets.example.com/api/v3/".to_string(),
        }
    }

    #[tokio::test]
    async fn customers_are_requested_through_the_relay() {
        let relay = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cors-proxy"))
            .and(body_partial_json(json!({
                "url": "https://tickets.example.com/api/v3/customers",
                "method": "GET",
                "headers": {"X-API-KEY": "k-123"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"CustomerID": 7, "CustomerName": "Northwind"},
                    {"CustomerID": 12, "CustomerName": "Contoso"},
                ],
            })))
            .mount(&relay)
            .await;

        let client = RelayClient::new(&relay.uri()).expect("valid relay url");
        let customers = client
            .ticketing_customers(&settings())
            .await
            .expect("fetch succeeds");

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].id, 7);
        assert_eq!(customers[0].name, "Northwind");
    }

    #[tokio::test]
    async fn relay_failures_surface_status_and_body() {
        let relay = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cors-proxy"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&relay)
            .await;

        let client = RelayClient::new(&relay.uri()).expect("valid relay url");
        let error = client
            .ticketing_customers(&settings())
            .await
            .expect_err("must fail");
        match error {
            TicketingError::Upstream { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_items_field_yields_an_empty_list() {
        let relay = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cors-proxy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&relay)
            .await;

        let client = RelayClient::new(&relay.uri()).expect("valid relay url");
        let customers = client
            .ticketing_customers(&settings())
            .await
            .expect("fetch succeeds");
        assert!(customers.is_empty());
    }
}
