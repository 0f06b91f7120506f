use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UserError {
    /// Username or email already taken by another account
    #[error("{0}")]
    Conflict(String),

    #[error("User not found")]
    NotFound,

    /// Password hashing or verification failure
    #[error("Password error: {0}")]
    Password(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
