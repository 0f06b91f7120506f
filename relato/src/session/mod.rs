//! Cookie-based session management: signed session and profile tokens, the
//! sliding-expiration cookie policy, and the persisted session table that
//! makes revocation effective while tokens are still unexpired.

mod config;
mod errors;
mod main;
mod storage;
mod types;

pub use config::{PROFILE_COOKIE_NAME, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use main::{
    CookieInspection, append_cleared_cookies, get_authenticated_user, inspect_auth_cookies,
    prepare_logout_response,
};
pub use types::{AuthenticatedUser, ProfileClaims, SessionClaims, SessionRecord};

pub(crate) use main::create_new_session;
pub(crate) use storage::SessionStore;

/// Initialize the session database tables.
pub(crate) async fn init() -> Result<(), SessionError> {
    SessionStore::init().await
}
