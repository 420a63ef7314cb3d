use metrics::{counter, histogram};
use std::time::Instant;

/// Increment a counter for created bookings.
pub fn increment_booking_created() {
    counter!("bookings_created_total").increment(1);
}

/// Increment a counter for issued session credentials.
pub fn increment_token_issued() {
    counter!("tokens_issued_total").increment(1);
}

/// Count a rejected request, labelled by why it was rejected.
pub fn increment_auth_rejected(reason: &'static str) {
    counter!("auth_rejections_total", "reason" => reason).increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
