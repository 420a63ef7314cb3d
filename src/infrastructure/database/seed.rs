use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::{Repository, ServiceRecord};

/// Loads catalog entries from a JSON array file into the store.
///
/// Entries are upserted by id, so re-running with the same file is
/// idempotent. Returns the number of entries written.
pub async fn seed_services(repository: &dyn Repository, path: &Path) -> Result<usize> {
    // ---
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read services seed {}", path.display()))?;

    let services: Vec<ServiceRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid services seed {}", path.display()))?;

    let count = services.len();
    for service in services {
        repository.upsert_service(service).await?;
    }

    tracing::info!("Seeded {} services from {}", count, path.display());
    Ok(count)
}
