use std::sync::Arc;
use std::time::Instant;

/// Abstraction for application metrics (counters, histograms).
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Render current metrics in Prometheus text format.
    fn render(&self) -> String;

    /// Record a "booking created" event.
    fn record_booking_created(&self);

    /// Record a credential issued by `POST /jwt`.
    fn record_token_issued(&self);

    /// Record a request rejected by the session or access layers.
    fn record_auth_rejected(&self, reason: &'static str);

    /// Record HTTP request duration and labels.
    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16);
}

/// Type alias for any backend that implements Metrics.
pub type MetricsPtr = Arc<dyn Metrics>;
