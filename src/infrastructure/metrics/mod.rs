//! Metrics backends behind the [`Metrics`](crate::domain::Metrics) trait.

mod noop;
mod prometheus;

use crate::domain::MetricsPtr;

pub use noop::create as create_noop_metrics;
pub use prometheus::create as create_prom_metrics;

/// Picks a backend by name: `prom` for Prometheus, anything else is no-op.
pub fn create_metrics(kind: &str) -> anyhow::Result<MetricsPtr> {
    // ---
    match kind.trim() {
        "prom" => create_prom_metrics(),
        "noop" => create_noop_metrics(),
        other => {
            tracing::warn!("Unknown metrics type {:?}; metrics are disabled", other);
            create_noop_metrics()
        }
    }
}
