// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the service.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub store: store::StoreConfig,
    pub auth: auth::AuthConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            server: server::ServerConfig::from_env()?,
            store: store::StoreConfig::from_env()?,
            auth: auth::AuthConfig::from_env()?,
        })
    }
}

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// Listen address for the HTTP server.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Interface to bind. Defaults to 127.0.0.1.
        pub host: String,

        /// TCP port. Defaults to 5000.
        pub port: u16,
    }

    impl ServerConfig {
        pub fn from_env() -> Result<Self> {
            // ---
            let host =
                std::env::var("CAR_DOCTOR_BIND_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = optional_env_parse!("PORT", u16, 5000);

            Ok(Self { host, port })
        }

        pub fn bind_addr(&self) -> String {
            // ---
            format!("{}:{}", self.host, self.port)
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Document store configuration
// ============================================================

mod store {
    // ---
    use super::*;
    use std::path::PathBuf;

    /// Which repository backend to build at startup.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum StoreKind {
        Redis,
        Memory,
    }

    impl std::str::FromStr for StoreKind {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            match s.trim().to_ascii_lowercase().as_str() {
                "redis" => Ok(StoreKind::Redis),
                "memory" => Ok(StoreKind::Memory),
                other => anyhow::bail!("Invalid CAR_DOCTOR_STORE_TYPE: {other}"),
            }
        }
    }

    /// Document store configuration.
    #[derive(Debug, Clone)]
    pub struct StoreConfig {
        pub kind: StoreKind,

        /// Redis connection string, credentials included. Required for `redis`.
        pub redis_url: Option<String>,

        /// Optional JSON file with catalog entries loaded at startup.
        pub services_seed: Option<PathBuf>,
    }

    impl StoreConfig {
        /// Builds a [`StoreConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if the store type is unknown, or if the Redis
        /// backend is selected without a connection string.
        pub fn from_env() -> Result<Self> {
            // ---
            let kind = match std::env::var("CAR_DOCTOR_STORE_TYPE") {
                Ok(raw) => raw.parse()?,
                Err(_) => StoreKind::Redis,
            };

            let redis_url = match kind {
                StoreKind::Redis => Some(required_env!("CAR_DOCTOR_REDIS_URL")),
                StoreKind::Memory => None,
            };

            let services_seed = std::env::var("CAR_DOCTOR_SERVICES_SEED")
                .ok()
                .map(PathBuf::from);

            Ok(Self {
                kind,
                redis_url,
                services_seed,
            })
        }

        /// In-memory store with no seed, for tests and local runs.
        pub fn memory() -> Self {
            // ---
            Self {
                kind: StoreKind::Memory,
                redis_url: None,
                services_seed: None,
            }
        }
    }
}
pub use store::{StoreConfig, StoreKind};

// ============================================================
// Auth configuration
// ============================================================

mod auth {
    // ---
    use super::*;

    /// Credential lifetime when not overridden (2 hours).
    pub const DEFAULT_TOKEN_TTL_SECS: u64 = 7_200;

    /// Longest accepted credential lifetime (1 year).
    pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 3_600;

    /// Session credential and access policy configuration.
    #[derive(Clone)]
    pub struct AuthConfig {
        /// HMAC secret used to sign and verify credentials.
        pub jwt_secret: String,

        /// Lifetime of an issued credential and its cookie.
        pub token_ttl: Duration,

        /// Whether the `token` cookie carries the `Secure` attribute.
        pub cookie_secure: bool,

        /// Require the owner's session to update, delete or list bookings.
        pub enforce_ownership: bool,
    }

    impl AuthConfig {
        /// Config with the given secret and every other field defaulted.
        pub fn new(jwt_secret: impl Into<String>) -> Self {
            // ---
            Self {
                jwt_secret: jwt_secret.into(),
                token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
                cookie_secure: false,
                enforce_ownership: false,
            }
        }

        /// Builds an [`AuthConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if the signing secret is missing or empty.
        pub fn from_env() -> Result<Self> {
            // ---
            let jwt_secret = required_env!("ACCESS_TOKEN_SECRET");
            anyhow::ensure!(
                !jwt_secret.is_empty(),
                "Invalid configuration: ACCESS_TOKEN_SECRET is empty"
            );

            let ttl_secs = optional_env_parse!("CAR_DOCTOR_TOKEN_TTL_SEC", u64, DEFAULT_TOKEN_TTL_SECS);
            anyhow::ensure!(
                (1..=MAX_TOKEN_TTL_SECS).contains(&ttl_secs),
                "Invalid configuration: CAR_DOCTOR_TOKEN_TTL_SEC must be between 1 and {MAX_TOKEN_TTL_SECS}"
            );
            let cookie_secure = optional_env_parse!("CAR_DOCTOR_COOKIE_SECURE", bool, false);
            let enforce_ownership = optional_env_parse!("CAR_DOCTOR_ENFORCE_OWNERSHIP", bool, false);

            Ok(Self {
                jwt_secret,
                token_ttl: Duration::from_secs(ttl_secs),
                cookie_secure,
                enforce_ownership,
            })
        }
    }

    // Keeps the secret out of logs.
    impl std::fmt::Debug for AuthConfig {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("AuthConfig")
                .field("jwt_secret", &"<redacted>")
                .field("token_ttl", &self.token_ttl)
                .field("cookie_secure", &self.cookie_secure)
                .field("enforce_ownership", &self.enforce_ownership)
                .finish()
        }
    }
}
pub use auth::{AuthConfig, DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS};

// ============================================================
// Tests
// ============================================================
