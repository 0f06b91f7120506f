use http::StatusCode;
use relato::{CoordinationError, StoryError};

/// Helper trait for converting errors to a standard response error format
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Maps coordination errors to status codes. Credential failures collapse
/// to a generic 401 body so responses never reveal whether the username,
/// password or session was at fault.
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| match e {
            CoordinationError::Unauthorized | CoordinationError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            CoordinationError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            CoordinationError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            CoordinationError::ResourceNotFound { .. } => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            CoordinationError::StoryError(StoryError::UnknownComedian(name)) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown comedian: {name}"),
            ),
            CoordinationError::StoryError(StoryError::NotConfigured) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Story generation is not configured".to_string(),
            ),
            CoordinationError::StoryError(StoryError::Api(_)) => (
                StatusCode::BAD_GATEWAY,
                "Story generation failed".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        })
    }
}
