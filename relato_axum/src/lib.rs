//! relato-axum - Axum integration for the relato story backend
//!
//! Provides the HTTP surface on top of the relato coordination crate: the
//! route handlers, the `AuthUser` extractor, and the sliding-renewal
//! request interceptor.

mod auth;
mod error;
mod middleware;
mod router;
mod session;
mod stories;
mod user;

pub use middleware::sliding_session_renewal;
pub use router::{relato_router, relato_router_no_trace};
pub use session::{AuthRejection, AuthUser};

// Re-export what a typical application needs without depending on the core
// crate directly
pub use relato::{init, Comedian, Story, UserProfile};
