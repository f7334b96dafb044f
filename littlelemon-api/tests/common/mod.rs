//! Common test utilities for integration tests
//!
//! Builds the full router over in-memory storage, mints bearer tokens with
//! the configured secret, and wraps `oneshot` calls with JSON helpers.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use littlelemon_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, JwtConfig},
};
use littlelemon_shared::auth::jwt::{create_token, Claims};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Test context holding the app and a valid token
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a context over fresh in-memory stores
    pub fn new() -> Self {
        let state = AppState::in_memory(test_config());
        let app = build_router(state.clone());
        let jwt_token = create_token(&Claims::new("testuser"), TEST_SECRET).unwrap();

        TestContext {
            app,
            state,
            jwt_token,
        }
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends a request and returns status plus raw body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    /// Sends a JSON request, with or without the test token
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        authenticated: bool,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if authenticated {
            builder = builder.header(header::AUTHORIZATION, self.auth_header());
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, body) = self.send(request).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap_or(Value::String(body))
        };
        (status, value)
    }

    /// GET without credentials
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Method::GET, uri, None, false).await
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: None,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    }
}
