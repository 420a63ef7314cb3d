use crate::domain::Metrics;
use std::time::Instant;

/// Discards every event. `/metrics` answers with an empty body.
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }

    fn record_booking_created(&self) {}

    fn record_token_issued(&self) {}

    fn record_auth_rejected(&self, _reason: &'static str) {}

    fn record_http_request(&self, _start: Instant, _path: &str, _method: &str, _status: u16) {}
}
