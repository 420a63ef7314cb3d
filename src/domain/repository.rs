use super::models::{Booking, RecordId, ServiceRecord};
use anyhow::Result;
use std::sync::Arc;

/// Abstraction over the document store holding services and bookings.
///
/// Every method is a single-document (or single-collection read) operation;
/// the service never needs multi-document transactions.
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    // ---
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// List every catalog entry.
    async fn list_services(&self) -> Result<Vec<ServiceRecord>>;

    /// Get a catalog entry by ID.
    async fn get_service(&self, id: RecordId) -> Result<Option<ServiceRecord>>;

    /// Insert or replace a catalog entry (used by start-up seeding).
    async fn upsert_service(&self, service: ServiceRecord) -> Result<()>;

    /// Insert a new booking.
    async fn insert_booking(&self, booking: Booking) -> Result<()>;

    /// List bookings, optionally restricted to one owner email.
    async fn list_bookings(&self, email: Option<&str>) -> Result<Vec<Booking>>;

    /// Get a booking by ID.
    async fn get_booking(&self, id: RecordId) -> Result<Option<Booking>>;

    /// Replace an existing booking. Returns false if it no longer exists.
    async fn replace_booking(&self, booking: &Booking) -> Result<bool>;

    /// Delete a booking by ID, returning the number of documents removed.
    async fn delete_booking(&self, id: RecordId) -> Result<u64>;
}

/// Type alias for any backend that implements Repository.
pub type RepositoryPtr = Arc<dyn Repository>;
