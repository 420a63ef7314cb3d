use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::error::AppError;

/// Identifier of a stored document (service or booking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    // ---
    pub fn new() -> Self {
        // ---
        Self(Uuid::new_v4())
    }

    /// Parses an id taken from a request path.
    ///
    /// A malformed id is a validation failure, never "not found".
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        // ---
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AppError::Validation(format!("malformed id: {raw}")))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form booking status label.
///
/// The set of labels is open; the constants below are the ones the
/// front-end currently uses. Only blank labels are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingStatus(String);

impl BookingStatus {
    // ---
    pub const PENDING: &'static str = "pending";
    pub const CONFIRMED: &'static str = "confirmed";
    pub const IN_PROGRESS: &'static str = "in-progress";
    pub const COMPLETED: &'static str = "completed";
    pub const CANCELED: &'static str = "canceled";

    const WELL_KNOWN: [&'static str; 5] = [
        Self::PENDING,
        Self::CONFIRMED,
        Self::IN_PROGRESS,
        Self::COMPLETED,
        Self::CANCELED,
    ];

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        // ---
        let label = raw.trim();
        if label.is_empty() {
            return Err(AppError::Validation("status must not be empty".to_string()));
        }
        Ok(Self(label.to_string()))
    }

    pub fn as_str(&self) -> &str {
        // ---
        &self.0
    }

    pub fn is_well_known(&self) -> bool {
        // ---
        Self::WELL_KNOWN.contains(&self.0.as_str())
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self(Self::PENDING.to_string())
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog entry. Only the title is typed; everything else the catalog
/// carries (price, image, facilities) passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    // ---
    pub id: RecordId,

    #[serde(default)]
    pub title: String,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A service booking owned by the customer whose email it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    // ---
    pub id: RecordId,

    /// Owner of the booking.
    pub email: String,

    /// Stored and returned under the key clients send.
    #[serde(default, rename = "service_id", alias = "serviceRef")]
    pub service_ref: String,

    #[serde(default)]
    pub status: BookingStatus,

    /// Customer name, date, price and whatever else the client sent.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Booking {
    // ---
    pub fn is_owned_by(&self, email: &str) -> bool {
        // ---
        self.email == email
    }
}

/// Result of a document insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    // ---
    pub acknowledged: bool,
    pub inserted_id: RecordId,
}

/// Result of a single-document update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    // ---
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Result of a single-document delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    // ---
    pub acknowledged: bool,
    pub deleted_count: u64,
}
