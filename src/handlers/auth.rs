//! Session issuance and removal.

use crate::app_state::AppState;
use crate::domain::Identity;
use crate::error::AppError;
use crate::handlers::shared_types::{AppJson, SuccessResponse};
use crate::session::{removal_cookie, session_cookie};
use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

/// Body of `POST /jwt`. Any other fields the client sends are ignored.
#[derive(Debug, Deserialize)]
pub struct IssueRequest {
    pub email: String,
}

/// Handler for issuing a session credential (POST /jwt).
///
/// Signs a credential for the posted email and sets it in the `token`
/// cookie. The email is not checked against any user registry.
///
/// - `200 OK` with `{ "success": true }` and a `Set-Cookie` header
/// - `400 Bad Request` if the body is malformed or the email is blank
#[tracing::instrument(skip(state, jar, req))]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(req): AppJson<IssueRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    // ---
    let identity = Identity::new(req.email)?;

    let token = state.tokens().issue(&identity).map_err(|e| {
        tracing::error!("Failed to sign credential for {}: {}", identity.email(), e);
        AppError::Internal(e.into())
    })?;

    let cookie = session_cookie(&token, state.tokens().ttl(), state.cookie_secure())?;
    state.metrics().record_token_issued();
    tracing::info!("Issued session for {}", identity.email());

    Ok((jar.add(cookie), SuccessResponse::ok()))
}

/// Handler for clearing the session cookie (POST /logout).
///
/// Credentials are stateless, so this only tells the client to drop the
/// cookie; a copied credential stays valid until it expires.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    // ---
    (jar.remove(removal_cookie()), SuccessResponse::ok())
}
