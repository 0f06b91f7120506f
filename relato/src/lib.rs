//! relato - Cookie-authenticated backend for comedian-styled story telling
//!
//! This crate coordinates user accounts, dual-cookie session management and
//! story generation. Authentication rides on two signed cookies: an
//! HTTP-only `session` cookie that is the authority credential, and a
//! script-readable `profile` cookie carrying display data. Sessions are
//! persisted so revocation takes effect even while tokens are unexpired.

mod coordination;
mod session;
mod storage;
mod stories;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

// Coordination flows handlers call
pub use coordination::{
    CoordinationError, ProfileUpdate, UserProfile, delete_account, generate_story, get_profile,
    list_stories, list_users, login, logout, register, update_profile,
};

pub use session::{
    AuthenticatedUser, CookieInspection, PROFILE_COOKIE_NAME, SESSION_COOKIE_NAME, SessionError,
    SessionRecord, append_cleared_cookies, get_authenticated_user, inspect_auth_cookies,
    prepare_logout_response,
};

pub use stories::{Comedian, Persona, PersonaRegistry, Story, StoryError};

pub use userdb::UserError;

/// Initialize the data store and every table the crate uses.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    userdb::init().await?;
    session::init().await?;
    stories::init().await?;
    Ok(())
}
