//! Cookie-backed session layer for protected routes.

use crate::app_state::AppState;
use crate::domain::Claims;
use crate::error::{AppError, AuthFailure};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::convert::Infallible;
use std::time::Duration;

/// Name of the cookie carrying the signed credential.
pub const TOKEN_COOKIE: &str = "token";

/// Verifies the `token` cookie and attaches its [`Claims`] to the request.
///
/// - No cookie, or an empty one: `401 { "message": "not authorized" }`
/// - Cookie fails verification: `401 { "message": "unauthorized" }`
/// - Otherwise the claims go into the request extensions and the next
///   handler runs.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // ---
    // An empty value counts as no cookie at all.
    let Some(cookie) = jar.get(TOKEN_COOKIE).filter(|c| !c.value().is_empty()) else {
        return Err(reject(&state, request.uri().path(), AuthFailure::MissingCredential));
    };

    match state.tokens().verify(cookie.value()) {
        Ok(claims) => {
            tracing::debug!("Session verified for {}", claims.email);
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(err) => {
            tracing::warn!("Rejected credential on {}: {}", request.uri().path(), err);
            Err(reject(&state, request.uri().path(), AuthFailure::InvalidCredential))
        }
    }
}

fn reject(state: &AppState, path: &str, failure: AuthFailure) -> AppError {
    // ---
    tracing::warn!("Unauthenticated request to {}: {}", path, failure.message());
    state.metrics().record_auth_rejected(failure.reason());
    AppError::Unauthenticated(failure)
}

/// Claims of the caller, when a session layer ran for this route.
///
/// Routes without the session layer always see `None`.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Claims>);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // ---
        Ok(Caller(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Builds the `Set-Cookie` value carrying a freshly issued credential.
pub fn session_cookie(
    token: &str,
    ttl: Duration,
    secure: bool,
) -> Result<Cookie<'static>, AppError> {
    // ---
    let mut raw = format!(
        "{TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        ttl.as_secs()
    );
    if secure {
        raw.push_str("; Secure");
    }

    Cookie::parse(raw)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to build session cookie: {e}")))
}

/// Cookie that clears the credential on the client.
pub fn removal_cookie() -> Cookie<'static> {
    // ---
    Cookie::build(TOKEN_COOKIE).path("/").build()
}
