mod identity;
mod metrics;
mod models;
mod repository;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose identity and document abstractions
pub use identity::{Claims, Identity};
pub use models::{
    Booking, BookingStatus, DeleteResult, InsertResult, RecordId, ServiceRecord, UpdateResult,
};
pub use repository::{Repository, RepositoryPtr};
