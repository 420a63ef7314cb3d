// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use domain::{MetricsPtr, RepositoryPtr};
use handlers::*;
use std::env;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod access;
mod app_state;
mod booking_state;
mod config;
mod error;
mod handlers;
mod infrastructure;
mod session;

// Hoist up only the public symbol(s)
pub use access::AccessGuard;
pub use booking_state::BookingStateController;
pub use error::{AppError, AuthFailure};
pub use session::{TokenError, TokenService, TOKEN_COOKIE};

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_memory_repository, // ---
    create_metrics,
    create_noop_metrics,
    create_prom_metrics,
    create_redis_repository,
    seed_services,
};

/// Build the HTTP router from configuration loaded from the environment.
pub async fn create_router() -> Result<Router> {
    // ---
    let config = AppConfig::from_env()?;
    create_router_from_config(&config).await
}

/// Build the HTTP router, creating the store and metrics backends that
/// `config` and `CAR_DOCTOR_METRICS_TYPE` select.
pub async fn create_router_from_config(config: &AppConfig) -> Result<Router> {
    // ---
    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    // Determine metrics implementation from environment
    let metrics_type = env::var("CAR_DOCTOR_METRICS_TYPE").unwrap_or_else(|_| "noop".to_string());
    let metrics = create_metrics(&metrics_type)?;

    let repository = match config.store.kind {
        StoreKind::Redis => {
            let url = config.store.redis_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("Missing required configuration: CAR_DOCTOR_REDIS_URL")
            })?;
            create_redis_repository(url)?
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            create_memory_repository()
        }
    };

    if let Some(path) = &config.store.services_seed {
        seed_services(repository.as_ref(), path).await?;
    }

    Ok(build_router(config, repository, metrics))
}

/// Build the HTTP router around already-constructed backends.
///
/// `GET /bookings` always requires a session. `PATCH` and `DELETE` on
/// `/bookings/{id}` require one only when ownership is enforced.
pub fn build_router(config: &AppConfig, repository: RepositoryPtr, metrics: MetricsPtr) -> Router {
    // ---
    let app_state = AppState::new(repository, metrics, &config.auth);
    let session = middleware::from_fn_with_state(app_state.clone(), session::require_session);

    let booking_mutations = patch(update_booking_status).delete(delete_booking);
    let booking_mutations = if config.auth.enforce_ownership {
        booking_mutations.route_layer(session.clone())
    } else {
        booking_mutations
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout))
        .route("/services", get(list_services))
        .route("/services/{id}", get(get_service))
        .route(
            "/bookings",
            get(list_bookings).route_layer(session).post(create_booking),
        )
        .route("/bookings/{id}", booking_mutations.get(get_booking))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_http_requests,
        ))
        .with_state(app_state)
}
