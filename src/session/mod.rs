//! Session credentials: issuance, verification, and the request layer that
//! enforces them.

mod middleware;
mod token;

pub use middleware::{removal_cookie, require_session, session_cookie, Caller, TOKEN_COOKIE};
pub use token::{TokenError, TokenService};
