use std::env;
use std::sync::LazyLock;

use sha2::{Digest, Sha256};

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("session".to_string())
});

pub static PROFILE_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("PROFILE_COOKIE_NAME")
        .ok()
        .unwrap_or("profile".to_string())
});

pub static COOKIE_DOMAIN: LazyLock<String> = LazyLock::new(|| {
    env::var("COOKIE_DOMAIN")
        .ok()
        .unwrap_or("localhost".to_string())
});

pub static SESSION_LIFETIME_SECONDS: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_LIFETIME_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1800) // Default to 30 minutes if not set or invalid
});

pub static SESSION_RENEWAL_WINDOW_SECONDS: LazyLock<u64> = LazyLock::new(|| {
    env::var("SESSION_RENEWAL_WINDOW_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(900) // Default to 15 minutes if not set or invalid
});

/// Symmetric secret used to sign both the session and the profile token.
///
/// When `WEB_SESSION_SECRET` is unset, a digest of host-identifying data is
/// used so local development works out of the box. That default changes
/// between hosts and offers no security guarantee; production deployments
/// must set the variable.
pub(crate) static WEB_SESSION_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| match env::var("WEB_SESSION_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) => {
            tracing::warn!(
                "WEB_SESSION_SECRET is not set; using a host-derived default. \
                 Sessions will not survive host changes and the secret is guessable."
            );
            host_derived_secret()
        }
    });

fn host_derived_secret() -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(env::consts::OS.as_bytes());
    hasher.update(env::consts::ARCH.as_bytes());
    if let Ok(hostname) = env::var("HOSTNAME") {
        hasher.update(hostname.as_bytes());
    }
    hasher.finalize().to_vec()
}
