//! Status changes and removal of booking records.

use crate::access::AccessGuard;
use crate::domain::{BookingStatus, Claims, DeleteResult, RecordId, RepositoryPtr, UpdateResult};
use crate::error::AppError;

/// Applies status updates and deletions to stored bookings.
///
/// There is no transition table: any label replaces any other. Concurrent
/// updates to one booking race and the last write wins.
#[derive(Clone)]
pub struct BookingStateController {
    // ---
    repository: RepositoryPtr,
    guard: AccessGuard,
}

impl BookingStateController {
    // ---
    pub fn new(repository: RepositoryPtr, guard: AccessGuard) -> Self {
        // ---
        Self { repository, guard }
    }

    /// Overwrites the status of booking `id` with `status`.
    ///
    /// # Errors
    /// - `NotFound` if no booking has this id
    /// - `Forbidden` / `Unauthenticated` when ownership is enforced and
    ///   `caller` is not the owner
    pub async fn update_status(
        &self,
        id: RecordId,
        status: BookingStatus,
        caller: Option<&Claims>,
    ) -> Result<UpdateResult, AppError> {
        // ---
        let mut booking = self
            .repository
            .get_booking(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.guard.authorize_mutation(&booking, caller)?;

        let modified = booking.status != status;
        tracing::info!("Booking {}: {} -> {}", id, booking.status, status);
        booking.status = status;

        // Removed between load and write.
        if !self.repository.replace_booking(&booking).await? {
            return Err(AppError::NotFound);
        }

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    /// Removes booking `id`.
    ///
    /// Deleting an id that does not exist is not an error; the result
    /// reports zero deleted documents.
    pub async fn delete(
        &self,
        id: RecordId,
        caller: Option<&Claims>,
    ) -> Result<DeleteResult, AppError> {
        // ---
        if self.guard.enforces_ownership() {
            match self.repository.get_booking(id).await? {
                Some(booking) => self.guard.authorize_mutation(&booking, caller)?,
                None => return Ok(Self::deleted(0)),
            }
        }

        let deleted = self.repository.delete_booking(id).await?;
        if deleted == 0 {
            tracing::info!("Delete of booking {} matched nothing", id);
        }

        Ok(Self::deleted(deleted))
    }

    fn deleted(count: u64) -> DeleteResult {
        // ---
        DeleteResult {
            acknowledged: true,
            deleted_count: count,
        }
    }
}
