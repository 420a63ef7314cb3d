//! Concrete adapters for the domain traits.

mod database;
mod metrics;

pub use database::{create_memory_repository, create_redis_repository, seed_services};
pub use metrics::{create_metrics, create_noop_metrics, create_prom_metrics};
