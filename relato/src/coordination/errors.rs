//! Error type for the coordination layer

use thiserror::Error;

use crate::session::SessionError;
use crate::stories::StoryError;
use crate::userdb::UserError;
use crate::utils::UtilError;

/// Errors that can occur while coordinating account, session and story
/// operations
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Wrong username or password. Deliberately carries no detail about
    /// which of the two was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unauthorized access error
    #[error("Unauthorized access")]
    Unauthorized,

    /// Invalid user-supplied field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Resource not found with context
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),

    /// Error from story operations
    #[error("Story error: {0}")]
    StoryError(StoryError),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

impl CoordinationError {
    /// Log the error and return self, allowing method chaining when a
    /// construction site wants explicit logging.
    pub fn log(self) -> Self {
        match &self {
            Self::Database(msg) => tracing::error!("Database error: {}", msg),
            Self::InvalidCredentials => tracing::debug!("Invalid credentials"),
            Self::Unauthorized => tracing::debug!("Unauthorized access"),
            Self::Validation(msg) => tracing::debug!("Validation error: {}", msg),
            Self::Conflict(message) => tracing::debug!("Conflict: {}", message),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::debug!("Resource not found: {} {}", resource_type, resource_id),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
            Self::StoryError(err) => tracing::error!("Story error: {}", err),
            Self::UtilsError(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// Custom From implementations that automatically log errors

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        // A failed credential check is routine, not an operational fault
        if matches!(err, SessionError::Unauthenticated) {
            tracing::debug!("Session error: {}", err);
            return Self::Unauthorized;
        }
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        let error = match err {
            UserError::Conflict(msg) => Self::Conflict(msg),
            other => Self::UserError(other),
        };
        tracing::error!("{}", error);
        error
    }
}

impl From<StoryError> for CoordinationError {
    fn from(err: StoryError) -> Self {
        let error = Self::StoryError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}
