//! User accounts: the persisted account table and bcrypt password hashing.

mod errors;
mod password;
mod storage;
mod types;

pub use errors::UserError;
pub use types::User;

pub(crate) use password::{hash_password, verify_password};
pub(crate) use storage::UserStore;

/// Initialize the user database tables.
pub(crate) async fn init() -> Result<(), UserError> {
    UserStore::init().await
}
