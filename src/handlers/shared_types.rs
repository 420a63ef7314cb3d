use axum::extract::FromRequest;
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor whose rejections become [`AppError::Validation`].
///
/// Syntax errors and missing fields both answer `400` with the same body
/// shape as every other error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Body of the session endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> axum::Json<Self> {
        axum::Json(Self { success: true })
    }
}
