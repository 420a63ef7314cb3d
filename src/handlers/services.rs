use crate::app_state::AppState;
use crate::domain::{RecordId, ServiceRecord};
use crate::error::AppError;
use axum::{
    extract::{Path, State},
    Json,
};

/// Handler for listing the service catalog (GET /services).
#[tracing::instrument(skip(state))]
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceRecord>>, AppError> {
    // ---
    Ok(Json(state.repository().list_services().await?))
}

/// Handler for fetching a catalog entry by ID (GET /services/{id}).
///
/// An unknown id answers `200 OK` with a `null` body; a malformed id is
/// `400 Bad Request`.
#[tracing::instrument(skip(state))]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<ServiceRecord>>, AppError> {
    // ---
    let id = RecordId::parse(&id)?;
    Ok(Json(state.repository().get_service(id).await?))
}
