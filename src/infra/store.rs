//! Generic client for the hosted relational store.
//!
//! Speaks the store's REST dialect: table endpoints under `rest/v1/`, column
//! predicates as query parameters (`col=eq.value`), mutations via
//! POST/PATCH/DELETE with an optional returned representation. Every typed
//! query in [`crate::infra::queries`] goes through this client. Nothing here
//! retries; a failed call surfaces to the triggering UI action and stops.

use reqwest::{header, Client, Method, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SessionState;

const SERVICE_PATH: &str = "rest/v1/";
const USER_AGENT: &str = concat!("msp-console/", env!("CARGO_PKG_VERSION"));

/// The store's code for an authorization/session failure. Pages translate
/// this into a redirect to the login view.
const PERMISSION_DENIED_CODE: &str = "42501";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("permission denied by the data store")]
    PermissionDenied,
    #[error("store error {code}: {message}")]
    Api { code: String, message: String },
    #[error("row not found")]
    NotFound,
}

impl StoreError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, StoreError::PermissionDenied)
    }
}

#[derive(Clone)]
pub struct StoreClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl StoreClient {
    pub fn new(base: &str, api_key: &str) -> Result<Self, StoreError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Builds a client from the session's connection settings.
    pub fn from_session(session: &SessionState) -> Result<Self, StoreError> {
        Self::new(&session.store_url, &session.store_key)
    }

    /// Starts a read query against `table`, projecting `columns` (which may
    /// include embedded relations, e.g. `*,client:clients(name)`).
    pub fn select(&self, table: &str, columns: &str) -> SelectQuery {
        SelectQuery {
            client: self.clone(),
            table: table.to_string(),
            params: vec![("select".to_string(), columns.to_string())],
        }
    }

    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        rows: &T,
    ) -> Result<(), StoreError> {
        let url = self.endpoint(table)?;
        let response = self.request(Method::POST, url).json(rows).send().await?;
        check(response).await?;
        Ok(())
    }

    /// Insert returning the stored representation (ids, defaults filled in).
    pub async fn insert_returning<T, R>(&self, table: &str, rows: &T) -> Result<Vec<R>, StoreError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(table)?;
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        table: &str,
        patch: &T,
        matches: &[(&str, String)],
    ) -> Result<(), StoreError> {
        let url = self.match_endpoint(table, matches)?;
        let response = self.request(Method::PATCH, url).json(patch).send().await?;
        check(response).await?;
        Ok(())
    }

    pub async fn update_returning<T, R>(
        &self,
        table: &str,
        patch: &T,
        matches: &[(&str, String)],
        columns: &str,
    ) -> Result<Vec<R>, StoreError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut url = self.match_endpoint(table, matches)?;
        url.query_pairs_mut().append_pair("select", columns);
        let response = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete(&self, table: &str, matches: &[(&str, String)]) -> Result<(), StoreError> {
        let url = self.match_endpoint(table, matches)?;
        let response = self.request(Method::DELETE, url).send().await?;
        check(response).await?;
        Ok(())
    }

    pub async fn delete_returning<R: DeserializeOwned>(
        &self,
        table: &str,
        matches: &[(&str, String)],
        columns: &str,
    ) -> Result<Vec<R>, StoreError> {
        let mut url = self.match_endpoint(table, matches)?;
        url.query_pairs_mut().append_pair("select", columns);
        let response = self
            .request(Method::DELETE, url)
            .header("Prefer", "return=representation")
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    fn endpoint(&self, table: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(SERVICE_PATH)?.join(table)
    }

    fn match_endpoint(
        &self,
        table: &str,
        matches: &[(&str, String)],
    ) -> Result<Url, url::ParseError> {
        let mut url = self.endpoint(table)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (column, value) in matches {
                pairs.append_pair(column, &format!("eq.{value}"));
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }
}

/// Builder for a read query; terminal methods perform the request.
pub struct SelectQuery {
    client: StoreClient,
    table: String,
    params: Vec<(String, String)>,
}

impl SelectQuery {
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn lt(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("lt.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.params
            .push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    pub fn limit(mut self, count: usize) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, StoreError> {
        let response = self.send(Method::GET, &[]).await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, StoreError> {
        let mut rows: Vec<T> = self.limit(1).fetch().await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        self.fetch_optional().await?.ok_or(StoreError::NotFound)
    }

    /// Exact row count without transferring rows (HEAD + `Prefer: count=exact`).
    pub async fn count(self) -> Result<u64, StoreError> {
        let response = self
            .send(Method::HEAD, &[("Prefer", "count=exact")])
            .await?;
        let response = check(response).await?;
        let range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        range
            .rsplit('/')
            .next()
            .and_then(|total| total.parse().ok())
            .ok_or_else(|| StoreError::Api {
                code: "content-range".to_string(),
                message: format!("unparseable count response: {range:?}"),
            })
    }

    async fn send(
        &self,
        method: Method,
        extra_headers: &[(&str, &str)],
    ) -> Result<Response, StoreError> {
        let mut url = self.client.endpoint(&self.table)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }
        let mut builder = self.client.request(method, url);
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        Ok(builder.send().await?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

async fn check(response: Response) -> Result<Response, StoreError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.json::<ApiErrorBody>().await.unwrap_or_default();
    if body.code == PERMISSION_DENIED_CODE {
        return Err(StoreError::PermissionDenied);
    }
    let code = if body.code.is_empty() {
        status.as_u16().to_string()
    } else {
        body.code
    };
    let message = if body.message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown store failure")
            .to_string()
    } else {
        body.message
    };
    Err(StoreError::Api { code, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct NameRow {
        name: String,
    }

    #[tokio::test]
    async fn select_builds_predicates_and_decodes_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/clients"))
            .and(query_param("select", "name"))
            .and(query_param("completed", "eq.false"))
            .and(query_param("order", "name.asc"))
            .and(header("apikey", "secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"name": "Northwind"}])),
            )
            .mount(&server)
            .await;

        let client = StoreClient::new(&server.uri(), "secret").expect("valid base url");
        let rows: Vec<NameRow> = client
            .select("clients", "name")
            .eq("completed", "false")
            .order("name", false)
            .fetch()
            .await
            .expect("select succeeds");

        assert_eq!(
            rows,
            vec![NameRow {
                name: "Northwind".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn permission_code_maps_to_dedicated_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/clients"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": "42501",
                "message": "permission denied for table clients",
            })))
            .mount(&server)
            .await;

        let client = StoreClient::new(&server.uri(), "secret").expect("valid base url");
        let error = client
            .select("clients", "*")
            .fetch::<NameRow>()
            .await
            .expect_err("must fail");
        assert!(error.is_permission_denied());
    }

    #[tokio::test]
    async fn count_reads_the_content_range_total() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/rest/v1/inbound_packages"))
            .and(header("Prefer", "count=exact"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-range", "0-0/42"))
            .mount(&server)
            .await;

        let client = StoreClient::new(&server.uri(), "secret").expect("valid base url");
        let total = client
            .select("inbound_packages", "id")
            .count()
            .await
            .expect("count succeeds");
        assert_eq!(total, 42);
    }

    #[tokio::test]
    async fn other_errors_keep_the_store_code() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/clients"))
            .and(query_param("id", "eq.abc"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23503",
                "message": "violates foreign key constraint",
            })))
            .mount(&server)
            .await;

        let client = StoreClient::new(&server.uri(), "secret").expect("valid base url");
        let error = client
            .delete("clients", &[("id", "abc".to_string())])
            .await
            .expect_err("must fail");
        match error {
            StoreError::Api { code, .. } => assert_eq!(code, "23503"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
