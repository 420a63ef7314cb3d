//! Error taxonomy shared by every handler.
//!
//! Each variant maps to one HTTP status and a small JSON body. Store
//! failures are logged in full and answered with a generic message so
//! driver details never reach the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Why a request failed authentication.
///
/// The two cases answer with different messages: a missing cookie is
/// "not authorized", a cookie that fails verification is "unauthorized".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    // ---
    MissingCredential,
    InvalidCredential,
}

impl AuthFailure {
    // ---
    pub fn message(self) -> &'static str {
        // ---
        match self {
            AuthFailure::MissingCredential => "not authorized",
            AuthFailure::InvalidCredential => "unauthorized",
        }
    }

    /// Metrics label for this failure.
    pub fn reason(self) -> &'static str {
        // ---
        match self {
            AuthFailure::MissingCredential => "missing_credential",
            AuthFailure::InvalidCredential => "invalid_credential",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ---
    #[error("{}", .0.message())]
    Unauthenticated(AuthFailure),

    #[error("forbidden access")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("internal failure: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    // ---
    pub fn status_code(&self) -> StatusCode {
        // ---
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status_code();

        let body = match &self {
            AppError::Unauthenticated(failure) => ErrorBody {
                message: failure.message().to_string(),
                status: None,
            },
            AppError::Internal(err) => {
                tracing::error!("Request failed: {:?}", err);
                ErrorBody {
                    message: "internal server error".to_string(),
                    status: Some(status.as_u16()),
                }
            }
            other => ErrorBody {
                message: other.to_string(),
                status: Some(status.as_u16()),
            },
        };

        (status, Json(body)).into_response()
    }
}
