//! API middleware.

mod auth;

pub use auth::{identify, require_auth, CurrentUser};
