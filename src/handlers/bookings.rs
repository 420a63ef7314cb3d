//! Booking handlers.
//!
//! Listing sits behind the session layer and the access guard. Creation and
//! single-booking reads are open. Status updates and deletes go through the
//! [`BookingStateController`](crate::booking_state::BookingStateController),
//! which applies the ownership check when it is enabled.

use crate::app_state::AppState;
use crate::domain::{
    Booking, BookingStatus, Claims, DeleteResult, Identity, InsertResult, RecordId, UpdateResult,
};
use crate::error::AppError;
use crate::handlers::shared_types::AppJson;
use crate::session::Caller;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub email: Option<String>,
}

/// Body of `POST /bookings`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub email: String,

    /// Stored and returned under the key clients send.
    #[serde(default, rename = "service_id", alias = "serviceRef")]
    pub service_ref: String,

    pub status: Option<String>,

    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Body of `PATCH /bookings/{id}`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

/// Handler for listing bookings (GET /bookings?email=...).
///
/// - `403 Forbidden` if `email` names someone other than the session owner
/// - Otherwise `200 OK` with the matching bookings
#[tracing::instrument(skip(state, claims))]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    // ---
    let scope = state
        .guard()
        .booking_list_scope(query.email.as_deref(), &claims)
        .inspect_err(|_| state.metrics().record_auth_rejected("forbidden"))?;

    let bookings = state.repository().list_bookings(scope).await?;
    tracing::debug!("Listed {} bookings for {}", bookings.len(), claims.email);

    Ok(Json(bookings))
}

/// Handler for creating a booking (POST /bookings).
///
/// The owner email is taken from the body as-is; it is not tied to any
/// session.
///
/// - `201 Created` with `{ acknowledged, insertedId }`
/// - `400 Bad Request` if the body is malformed or the email is blank
#[tracing::instrument(skip(state, new_booking))]
pub async fn create_booking(
    State(state): State<AppState>,
    AppJson(new_booking): AppJson<NewBooking>,
) -> Result<(StatusCode, Json<InsertResult>), AppError> {
    // ---
    let owner = Identity::new(new_booking.email)?;
    let status = match new_booking.status.as_deref() {
        Some(raw) => BookingStatus::parse(raw)?,
        None => BookingStatus::default(),
    };

    // Ids are assigned here; never trust one from the client.
    let mut details = new_booking.details;
    details.remove("id");
    details.remove("_id");

    let booking = Booking {
        id: RecordId::new(),
        email: owner.email().to_string(),
        service_ref: new_booking.service_ref,
        status,
        details,
    };
    let inserted_id = booking.id;

    state.repository().insert_booking(booking).await?;
    state.metrics().record_booking_created();
    tracing::info!("Created booking {} for {}", inserted_id, owner.email());

    Ok((
        StatusCode::CREATED,
        Json(InsertResult {
            acknowledged: true,
            inserted_id,
        }),
    ))
}

/// Handler for fetching a booking by ID (GET /bookings/{id}).
///
/// - `404 Not Found` if no booking has this id
/// - `400 Bad Request` if the id is malformed
#[tracing::instrument(skip(state))]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    // ---
    let id = RecordId::parse(&id)?;
    let booking = state
        .repository()
        .get_booking(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(booking))
}

/// Handler for changing a booking's status (PATCH /bookings/{id}).
///
/// Any non-blank label is accepted regardless of the current status.
///
/// - `200 OK` with `{ acknowledged, matchedCount, modifiedCount }`
/// - `404 Not Found` if no booking has this id
/// - `400 Bad Request` if the id is malformed or `status` is missing/blank
#[tracing::instrument(skip(state, caller, update))]
pub async fn update_booking_status(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
    AppJson(update): AppJson<StatusUpdate>,
) -> Result<Json<UpdateResult>, AppError> {
    // ---
    let id = RecordId::parse(&id)?;
    let raw = update
        .status
        .ok_or_else(|| AppError::Validation("status is required".to_string()))?;
    let status = BookingStatus::parse(&raw)?;

    let result = state
        .bookings()
        .update_status(id, status, caller.as_ref())
        .await?;

    Ok(Json(result))
}

/// Handler for deleting a booking (DELETE /bookings/{id}).
///
/// Deleting an unknown id is `200 OK` with `deletedCount: 0`.
#[tracing::instrument(skip(state, caller))]
pub async fn delete_booking(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, AppError> {
    // ---
    let id = RecordId::parse(&id)?;
    let result = state.bookings().delete(id, caller.as_ref()).await?;

    Ok(Json(result))
}
