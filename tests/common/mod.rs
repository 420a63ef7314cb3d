// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use car_doctor::domain::RepositoryPtr;
use car_doctor::{
    build_router, create_memory_repository, create_noop_metrics, create_router, AppConfig,
    AuthConfig, ServerConfig, StoreConfig,
};
use reqwest::Client;
use serde_json::Value;
use std::sync::Once;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

macro_rules! set_env_if_unset {
    // ---
    ($key:expr, $val:expr) => {
        if std::env::var($key).is_err() {
            std::env::set_var($key, $val);
        }
    };
}

static INIT: Once = Once::new();

// ============================================================================
// In-process router
// ============================================================================

pub fn test_config(enforce_ownership: bool) -> AppConfig {
    // ---
    let mut auth = AuthConfig::new(SECRET);
    auth.enforce_ownership = enforce_ownership;

    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        store: StoreConfig::memory(),
        auth,
    }
}

/// Router over a fresh in-memory store, driven with `oneshot`.
pub struct TestApp {
    pub router: Router,
    pub repository: RepositoryPtr,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    // ---
    pub fn new() -> Self {
        // ---
        Self::with_config(test_config(false))
    }

    pub fn with_ownership() -> Self {
        // ---
        Self::with_config(test_config(true))
    }

    pub fn with_config(config: AppConfig) -> Self {
        // ---
        let repository = create_memory_repository();
        let metrics = create_noop_metrics().expect("noop metrics");
        let router = build_router(&config, repository.clone(), metrics);

        Self { router, repository }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        // ---
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        // ---
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Posts to `/jwt` and returns the `token=...` pair to send back.
    pub async fn login(&self, email: &str) -> String {
        // ---
        let response = self
            .request(
                Method::POST,
                "/jwt",
                None,
                Some(serde_json::json!({ "email": email })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        session_pair(&response.headers).expect("token cookie set")
    }

    /// Creates a booking and returns its id.
    pub async fn book(&self, email: &str, service: &str) -> String {
        // ---
        let response = self
            .request(
                Method::POST,
                "/bookings",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "service_id": service,
                    "customerName": "Test Customer",
                    "date": "2026-10-20",
                    "price": 120
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        response.body["insertedId"]
            .as_str()
            .expect("insertedId")
            .to_string()
    }
}

/// Extracts `token=<value>` from a `Set-Cookie` header.
pub fn session_pair(headers: &HeaderMap) -> Option<String> {
    // ---
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

// ============================================================================
// Spawned server
// ============================================================================

/// Initialize environment variables for a server built by `create_router()`.
pub fn setup_test_env() {
    // ---
    INIT.call_once(|| {
        // ---
        set_env_if_unset!("ACCESS_TOKEN_SECRET", SECRET);
        set_env_if_unset!("CAR_DOCTOR_STORE_TYPE", "memory");
        set_env_if_unset!("CAR_DOCTOR_METRICS_TYPE", "noop");
    });
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // --
        setup_test_env();

        let app = create_router().await.expect("Should be able to create router");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
