use std::env;
use std::sync::LazyLock;

/// API key for the completion endpoint. Empty means story generation is
/// disabled; every other operation keeps working.
pub(crate) static OPENAI_API_KEY: LazyLock<String> =
    LazyLock::new(|| env::var("OPENAI_API_KEY").unwrap_or_default());

pub(crate) static OPENAI_API_BASE: LazyLock<String> = LazyLock::new(|| {
    env::var("OPENAI_API_BASE").unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
});

pub(crate) static OPENAI_MODEL: LazyLock<String> =
    LazyLock::new(|| env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()));
