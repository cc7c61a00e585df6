//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::{HeaderMap, Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;

use archtool_api::AppState;
use archtool_auth::Claims;
use archtool_core::config::{AppConfig, StoreBackend};
use archtool_database::Stores;

/// Secret shared by the test app and the token helper.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Test app over a fresh in-memory store that requires a bearer token.
    pub fn new() -> Self {
        Self::with_anonymous(false)
    }

    /// Test app that also accepts requests without a token.
    pub fn anonymous() -> Self {
        Self::with_anonymous(true)
    }

    fn with_anonymous(allow_anonymous: bool) -> Self {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Memory;
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.auth.allow_anonymous = allow_anonymous;
        config.validate().expect("Test config is invalid");

        let state = AppState::new(config.clone(), Stores::memory());
        let router = archtool_api::build_app(state);

        Self { router, config }
    }

    /// Issue a valid access token for `user_id`
    pub fn token(&self, user_id: i64) -> String {
        sign(&Claims::new(user_id, Utc::now() + Duration::minutes(15)))
    }

    /// Create a diagram and return its id
    pub async fn create_diagram(&self, name: &str, token: &str) -> String {
        let body = serde_json::json!({
            "name": name,
            "registry_type": "application",
            "content": "<xml/>",
        });
        let response = self
            .request("POST", "/api/diagrams", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No id in create response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[])
            .await
    }

    /// Make an HTTP request with extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send_raw(method, path, body_str, token, headers).await
    }

    /// Make a request with an unencoded body
    pub async fn send_raw(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Sign claims with the test secret
pub fn sign(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `ETag` header, if present
    pub fn etag(&self) -> Option<&str> {
        self.headers.get("etag").and_then(|v| v.to_str().ok())
    }
}
