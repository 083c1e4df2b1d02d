//! The request-relay endpoint.
//!
//! Browsers block the console's web build from calling the ticketing API
//! directly, so this tiny service accepts a description of the request,
//! performs it server-side, and mirrors back the upstream status, body and
//! content type. It forwards exactly what it is told to forward and knows
//! nothing about any particular upstream.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;

#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
enum RelayError {
    #[error("invalid method: {0}")]
    Method(#[from] axum::http::method::InvalidMethod),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

/// Router serving `POST /cors-proxy`. Non-POST methods on the path get a 405
/// from the method router itself.
pub fn router() -> Router {
    let http = reqwest::Client::new();
    Router::new()
        .route("/cors-proxy", post(forward))
        .layer(CorsLayer::permissive())
        .with_state(http)
}

async fn forward(State(http): State<reqwest::Client>, Json(request): Json<RelayRequest>) -> Response {
    let Some(url) = request.url.clone().filter(|url| !url.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "URL is required").into_response();
    };

    match perform(&http, &url, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(target: "relay", error = %err, %url, "proxy request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn perform(
    http: &reqwest::Client,
    url: &str,
    request: RelayRequest,
) -> Result<Response, RelayError> {
    let method =
        reqwest::Method::from_bytes(request.method.as_deref().unwrap_or("GET").as_bytes())?;

    let mut builder = http.request(method, url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    let upstream = builder.send().await?;
    let status = upstream.status().as_u16();
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    let body = upstream.text().await?;

    Ok(Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn body_string(response: Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    fn post_json(value: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/cors-proxy")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("valid request")
    }

    #[tokio::test]
    async fn non_post_is_rejected() {
        let request = Request::builder()
            .method("GET")
            .uri("/cors-proxy")
            .body(Body::empty())
            .expect("valid request");
        let response = router().oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn missing_url_is_a_bad_request() {
        let response = router()
            .oneshot(post_json(json!({"method": "GET"})))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "URL is required");
    }

    #[tokio::test]
    async fn forwards_method_headers_and_mirrors_the_upstream() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customers"))
            .and(header_matcher("X-API-KEY", "k-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"items":[]}"#.as_bytes().to_vec(), "application/json"),
            )
            .mount(&upstream)
            .await;

        let response = router()
            .oneshot(post_json(json!({
                "url": format!("{}/customers", upstream.uri()),
                "method": "GET",
                "headers": {"X-API-KEY": "k-123"},
            })))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(body_string(response).await, r#"{"items":[]}"#);
    }

    #[tokio::test]
    async fn upstream_content_type_defaults_to_json() {
        let upstream = MockServer::start().await;
        // 204 carries no body and no content type.
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&upstream)
            .await;

        let response = router()
            .oneshot(post_json(json!({"url": format!("{}/ping", upstream.uri())})))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_internal_error() {
        // Nothing listens on this port.
        let response = router()
            .oneshot(post_json(json!({"url": "http://127.0.0.1:1/nowhere"})))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn non_2xx_upstream_status_is_passed_through() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teapot"))
            .respond_with(
                ResponseTemplate::new(418).set_body_raw(b"short and stout".to_vec(), "text/plain"),
            )
            .mount(&upstream)
            .await;

        let response = router()
            .oneshot(post_json(
                json!({"url": format!("{}/teapot", upstream.uri())}),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(body_string(response).await, "short and stout");
    }
}
