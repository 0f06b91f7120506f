//! Coordination layer: the flows handlers call, built on the session, user
//! and story modules.

mod auth;
mod errors;
mod story;
mod user;

pub use auth::{login, logout, register};
pub use errors::CoordinationError;
pub use story::{generate_story, list_stories};
pub use user::{ProfileUpdate, UserProfile, delete_account, get_profile, list_users, update_profile};
