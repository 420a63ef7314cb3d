//! Ownership rules between an authenticated caller and booking records.

use crate::domain::{Booking, Claims};
use crate::error::{AppError, AuthFailure};

/// Decides whether a caller may see or change bookings.
///
/// With `enforce_ownership` off, the guard keeps the historical behaviour:
/// listings are only checked when the caller names an email, and updates or
/// deletes are open to anyone.
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard {
    // ---
    enforce_ownership: bool,
}

impl AccessGuard {
    // ---
    pub fn new(enforce_ownership: bool) -> Self {
        // ---
        Self { enforce_ownership }
    }

    pub fn enforces_ownership(&self) -> bool {
        // ---
        self.enforce_ownership
    }

    /// Resolves the owner filter for a booking listing.
    ///
    /// A requested email that differs from the caller's is `Forbidden`.
    /// No requested email lists every booking, or only the caller's own when
    /// ownership is enforced.
    pub fn booking_list_scope<'a>(
        &self,
        requested: Option<&'a str>,
        caller: &'a Claims,
    ) -> Result<Option<&'a str>, AppError> {
        // ---
        match requested {
            Some(email) if !caller.owns(email) => {
                tracing::warn!(
                    "Caller {} asked for bookings of {}; forbidden",
                    caller.email,
                    email
                );
                Err(AppError::Forbidden)
            }
            Some(email) => Ok(Some(email)),
            None if self.enforce_ownership => Ok(Some(caller.email.as_str())),
            None => {
                tracing::warn!("Unscoped booking listing by {}", caller.email);
                Ok(None)
            }
        }
    }

    /// Checks that `caller` may update or delete `booking`.
    pub fn authorize_mutation(
        &self,
        booking: &Booking,
        caller: Option<&Claims>,
    ) -> Result<(), AppError> {
        // ---
        if !self.enforce_ownership {
            return Ok(());
        }

        let caller = caller.ok_or(AppError::Unauthenticated(AuthFailure::MissingCredential))?;
        if booking.is_owned_by(&caller.email) {
            Ok(())
        } else {
            tracing::warn!(
                "Caller {} tried to modify booking {} owned by {}",
                caller.email,
                booking.id,
                booking.email
            );
            Err(AppError::Forbidden)
        }
    }
}
