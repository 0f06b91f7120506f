//! Login, logout and registration flows.

use http::HeaderMap;

use crate::coordination::errors::CoordinationError;
use crate::session::{AuthenticatedUser, create_new_session, prepare_logout_response};
use crate::userdb::{User, UserStore, hash_password, verify_password};

use super::user::UserProfile;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Verify a username/password pair and open a new session.
///
/// On success the returned headers carry both auth cookies. An unknown
/// username and a wrong password produce the identical error so the
/// response never reveals which accounts exist.
pub async fn login(
    username: &str,
    password: &str,
    user_agent: Option<String>,
    ip_address: Option<String>,
) -> Result<HeaderMap, CoordinationError> {
    let user = UserStore::get_user_by_username(username.trim())
        .await?
        .ok_or_else(|| CoordinationError::InvalidCredentials.log())?;

    if !verify_password(password, &user.password_hash) {
        return Err(CoordinationError::InvalidCredentials.log());
    }

    let headers = create_new_session(&user, user_agent, ip_address).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(headers)
}

/// Revoke the current session and clear both cookies.
pub async fn logout(user: &AuthenticatedUser) -> Result<HeaderMap, CoordinationError> {
    let headers = prepare_logout_response(user).await?;
    tracing::info!(user_id = %user.user_id, "User logged out");
    Ok(headers)
}

/// Create a new account. Registration does not log the user in; the client
/// follows up with a login call.
pub async fn register(
    username: &str,
    email: &str,
    password: &str,
) -> Result<UserProfile, CoordinationError> {
    let username = username.trim();
    let email = email.trim();

    if username.is_empty() {
        return Err(CoordinationError::Validation("Username must not be empty".to_string()).log());
    }
    if email.is_empty() || !email.contains('@') {
        return Err(CoordinationError::Validation("Invalid email address".to_string()).log());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoordinationError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))
        .log());
    }

    let password_hash = hash_password(password)?;
    let user = UserStore::create_user(User::new(
        username.to_string(),
        email.to_string(),
        password_hash,
    ))
    .await?;

    tracing::info!(user_id = %user.id, "User registered");
    UserProfile::try_from(&user)
}
