use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Car Doctor is running!
Version: {version}

Available endpoints:
  - POST   /jwt                  - Issue a session cookie for an email
  - POST   /logout               - Clear the session cookie
  - GET    /services             - List the service catalog
  - GET    /services/{{id}}        - Fetch a service by id
  - GET    /bookings?email=...   - List your bookings (session required)
  - POST   /bookings             - Create a booking
  - GET    /bookings/{{id}}        - Fetch a booking by id
  - PATCH  /bookings/{{id}}        - Change a booking's status
  - DELETE /bookings/{{id}}        - Delete a booking
  - GET    /health               - Light health check
  - GET    /health?mode=full     - Full health check (includes the store)
  - GET    /metrics              - Prometheus metrics
"#
    )
}
