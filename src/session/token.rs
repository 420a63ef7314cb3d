//! Signed session credentials.
//!
//! A credential is an HS256 JWT carrying [`Claims`]. The signing secret is
//! injected at construction, so every `AppState` (and every test) owns its
//! own key material.

use crate::config::AuthConfig;
use crate::domain::{Claims, Identity};
use jsonwebtoken::{
    errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::time::Duration;

/// Why a credential was refused or could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    // ---
    #[error("credential is malformed")]
    Malformed,

    #[error("credential signature does not match")]
    InvalidSignature,

    #[error("credential has expired")]
    Expired,

    #[error("failed to sign credential: {0}")]
    Signing(String),
}

/// Issues and verifies session credentials with a single HMAC secret.
pub struct TokenService {
    // ---
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    // ---
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        // ---
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        // ---
        Self::new(config.jwt_secret.as_bytes(), config.token_ttl)
    }

    /// Lifetime of every credential this service issues.
    pub fn ttl(&self) -> Duration {
        // ---
        self.ttl
    }

    /// Signs a credential for `identity`, valid from now for [`Self::ttl`].
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        // ---
        self.issue_at(identity, chrono::Utc::now().timestamp())
    }

    /// Signs a credential as if issued at `now` (unix seconds).
    pub fn issue_at(&self, identity: &Identity, now: i64) -> Result<String, TokenError> {
        // ---
        let expires_at = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| TokenError::Signing(format!("lifetime {:?} is out of range", self.ttl)))?;

        let claims = Claims {
            email: identity.email().to_string(),
            issued_at: now,
            expires_at,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies a credential against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        // ---
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verifies a credential against `now` (unix seconds).
    ///
    /// Expiry is decided before the signature: an expired credential is
    /// `Expired` whatever key signed it. A live credential must carry a
    /// signature made with this service's secret.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        // ---
        let mut unverified = Validation::new(Algorithm::HS256);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;

        let peeked = jsonwebtoken::decode::<Claims>(token, &self.decoding, &unverified)
            .map_err(|_| TokenError::Malformed)?
            .claims;

        if now > peeked.expires_at {
            return Err(TokenError::Expired);
        }

        // Expiry was checked above against the caller's clock.
        let mut strict = Validation::new(Algorithm::HS256);
        strict.validate_exp = false;

        let verified = jsonwebtoken::decode::<Claims>(token, &self.decoding, &strict)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        Ok(verified.claims)
    }
}
