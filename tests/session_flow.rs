//! Credential issuance and the session layer, driven through the router.

use axum::http::{header, Method, StatusCode};
use car_doctor::domain::Identity;
use car_doctor::TokenService;
use serde_json::json;
use std::time::Duration;

mod common;
use common::{session_pair, TestApp, SECRET};

#[tokio::test]
async fn jwt_sets_http_only_token_cookie() {
    // ---
    let app = TestApp::new();

    let response = app
        .request(Method::POST, "/jwt", None, Some(json!({ "email": "user@x.com" })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header");
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=7200"));
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn jwt_ignores_extra_claim_fields() {
    // ---
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/jwt",
            None,
            Some(json!({ "email": "user@x.com", "displayName": "User", "role": "admin" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(session_pair(&response.headers).is_some());
}

#[tokio::test]
async fn jwt_rejects_blank_or_missing_email() {
    // ---
    let app = TestApp::new();

    let blank = app
        .request(Method::POST, "/jwt", None, Some(json!({ "email": "  " })))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["status"], 400);

    let missing = app
        .request(Method::POST, "/jwt", None, Some(json!({ "name": "nobody" })))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert!(session_pair(&missing.headers).is_none());
}

#[tokio::test]
async fn jwt_rejects_malformed_json() {
    // ---
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/jwt")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{ invalid json }"))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_cookie_is_not_authorized() {
    // ---
    let app = TestApp::new();

    let response = app
        .request(Method::GET, "/bookings?email=user@x.com", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "not authorized" }));
}

#[tokio::test]
async fn empty_cookie_is_not_authorized() {
    // ---
    let app = TestApp::new();

    let response = app
        .request(Method::GET, "/bookings?email=user@x.com", Some("token="), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "not authorized" }));
}

#[tokio::test]
async fn garbage_cookie_is_unauthorized() {
    // ---
    let app = TestApp::new();

    let response = app
        .request(
            Method::GET,
            "/bookings?email=user@x.com",
            Some("token=definitely-not-a-jwt"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "unauthorized" }));
}

#[tokio::test]
async fn foreign_secret_is_unauthorized() {
    // ---
    let app = TestApp::new();
    let foreign = TokenService::new(b"someone-elses-secret", Duration::from_secs(7_200));
    let token = foreign
        .issue(&Identity::new("user@x.com").unwrap())
        .unwrap();

    let response = app
        .request(
            Method::GET,
            "/bookings?email=user@x.com",
            Some(&format!("token={token}")),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "unauthorized" }));
}

#[tokio::test]
async fn expired_credential_is_unauthorized() {
    // ---
    let app = TestApp::new();
    let tokens = TokenService::new(SECRET.as_bytes(), Duration::from_secs(7_200));
    let three_hours_ago = chrono::Utc::now().timestamp() - 3 * 3_600;
    let token = tokens
        .issue_at(&Identity::new("user@x.com").unwrap(), three_hours_ago)
        .unwrap();

    let response = app
        .request(
            Method::GET,
            "/bookings?email=user@x.com",
            Some(&format!("token={token}")),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "unauthorized" }));
}

#[tokio::test]
async fn issued_cookie_opens_protected_route() {
    // ---
    let app = TestApp::new();
    let cookie = app.login("user@x.com").await;

    let response = app
        .request(Method::GET, "/bookings?email=user@x.com", Some(&cookie), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn logout_clears_cookie() {
    // ---
    let app = TestApp::new();

    let response = app.request(Method::POST, "/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true }));

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header");
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn secure_cookie_when_configured() {
    // ---
    let mut config = common::test_config(false);
    config.auth.cookie_secure = true;
    let app = TestApp::with_config(config);

    let response = app
        .request(Method::POST, "/jwt", None, Some(json!({ "email": "user@x.com" })))
        .await;

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie header");
    assert!(set_cookie.contains("Secure"));
}
