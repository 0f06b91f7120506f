use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryError {
    /// The request named a comedian the registry does not know
    #[error("Unknown comedian: {0}")]
    UnknownComedian(String),

    /// Generation is disabled because no API key is configured
    #[error("Story generation is not configured")]
    NotConfigured,

    /// The completion endpoint rejected the request or returned an
    /// unusable body
    #[error("Completion API error: {0}")]
    Api(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
