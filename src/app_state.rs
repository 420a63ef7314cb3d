//! Application state management.
//!
//! This module defines the shared state structure that gets passed to all
//! Axum handlers via the `State` extractor. The `AppState` contains shared
//! resources like the document repository, metrics implementation, and the
//! session token service.
//!
//! The state is cheaply cloneable (using `Arc` internally where needed) so
//! it can be passed to each request handler without copying resources.

use crate::access::AccessGuard;
use crate::booking_state::BookingStateController;
use crate::config::AuthConfig;
use crate::domain::{MetricsPtr, RepositoryPtr};
use crate::session::TokenService;
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the application.
///
/// # Design Principles
///
/// - **Dependency Inversion**: Handlers depend on abstractions (Repository trait),
///   not concrete implementations (RedisRepository).
/// - **Immutable After Initialization**: State is built once at startup and
///   never mutated. The signing secret lives here, not in a global.
/// - **Cheap Cloning**: Heavy resources are wrapped in `Arc`.
///
/// # Lifecycle
///
/// 1. Created once in `build_router()` during application startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub(crate) struct AppState {
    /// Document store holding services and bookings.
    repository: RepositoryPtr,

    /// Metrics implementation for recording application events.
    ///
    /// Either Prometheus-backed (production) or no-op (testing/development).
    metrics: MetricsPtr,

    /// Signs and verifies session credentials with the injected secret.
    tokens: Arc<TokenService>,

    /// Ownership rules for booking reads and writes.
    guard: AccessGuard,

    /// Status updates and deletes, with the ownership check applied.
    bookings: BookingStateController,

    /// Whether the session cookie carries `Secure`.
    cookie_secure: bool,
}

impl AppState {
    // ---

    pub fn new(repository: RepositoryPtr, metrics: MetricsPtr, auth: &AuthConfig) -> Self {
        // ---
        let guard = AccessGuard::new(auth.enforce_ownership);

        AppState {
            bookings: BookingStateController::new(repository.clone(), guard),
            repository,
            metrics,
            tokens: Arc::new(TokenService::from_config(auth)),
            guard,
            cookie_secure: auth.cookie_secure,
        }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    /// Get the session token service.
    pub(crate) fn tokens(&self) -> &TokenService {
        // ---
        &self.tokens
    }

    pub(crate) fn guard(&self) -> &AccessGuard {
        // ---
        &self.guard
    }

    pub(crate) fn bookings(&self) -> &BookingStateController {
        // ---
        &self.bookings
    }

    pub(crate) fn cookie_secure(&self) -> bool {
        // ---
        self.cookie_secure
    }
}
