// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod auth;
mod bookings;
mod health;
mod metrics;
mod root;
mod services;
mod shared_types;

// Core handlers
pub use health::health_check;
pub use metrics::{metrics_handler, track_http_requests};
pub use root::root_handler;

// Session handlers
pub use auth::{issue_token, logout};

// Catalog handlers
pub use services::{get_service, list_services};

// Booking handlers
pub use bookings::{create_booking, delete_booking, get_booking, list_bookings, update_booking_status};
