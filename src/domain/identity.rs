use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identity a credential is issued for.
///
/// Issuance signs whatever identity it is handed; there is no user registry
/// behind it. Routing every issuance through this type keeps the place where
/// a registry lookup would go in one spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    // ---
    email: String,
}

impl Identity {
    // ---
    /// Builds an identity, rejecting a blank email.
    pub fn new(email: impl Into<String>) -> Result<Self, AppError> {
        // ---
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(AppError::Validation("email is required".to_string()));
        }
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        // ---
        &self.email
    }
}

/// Claims embedded in a signed credential.
///
/// Timestamps are unix seconds and use the registered JWT claim names on the
/// wire so standard validation applies to `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    // ---
    pub email: String,

    #[serde(rename = "iat")]
    pub issued_at: i64,

    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    // ---
    /// True when `email` names the same owner as these claims.
    pub fn owns(&self, email: &str) -> bool {
        // ---
        self.email == email
    }
}
