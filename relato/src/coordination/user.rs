//! Profile and account management flows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coordination::errors::CoordinationError;
use crate::session::{AuthenticatedUser, SessionStore};
use crate::stories::StoryStore;
use crate::userdb::{User, UserStore, hash_password};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Public view of an account. This is the only account shape that leaves
/// the crate; the password hash stays behind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl TryFrom<&User> for UserProfile {
    type Error = CoordinationError;

    // Account ids are minted by this crate as UUIDs; a row that fails to
    // parse is corrupt and must not surface under a fabricated id.
    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&user.id).map_err(|_| {
            CoordinationError::Database(format!("Invalid user id: {}", user.id)).log()
        })?;
        Ok(Self {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
        })
    }
}

/// Fields a user may change on their own profile. `password` is optional;
/// when absent the stored hash is untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
}

/// Fetch the caller's profile from the account table. The session may
/// outlive the account row, so a missing row is an authorization failure
/// rather than a plain not-found.
pub async fn get_profile(user: &AuthenticatedUser) -> Result<UserProfile, CoordinationError> {
    let account = UserStore::get_user(&user.user_id.to_string())
        .await?
        .ok_or_else(|| CoordinationError::Unauthorized.log())?;
    UserProfile::try_from(&account)
}

/// Update the caller's profile. Username and email must stay unique across
/// all other accounts; a password shorter than the minimum is rejected
/// before anything is written.
pub async fn update_profile(
    user: &AuthenticatedUser,
    update: ProfileUpdate,
) -> Result<UserProfile, CoordinationError> {
    let username = update.username.trim().to_lowercase();
    let email = update.email.trim().to_lowercase();

    if username.is_empty() {
        return Err(CoordinationError::Validation("Username must not be empty".to_string()).log());
    }
    if email.is_empty() || !email.contains('@') {
        return Err(CoordinationError::Validation("Invalid email address".to_string()).log());
    }
    if let Some(password) = &update.password {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(CoordinationError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ))
            .log());
        }
    }

    let user_id = user.user_id.to_string();

    // Uniqueness check excludes the caller's own row so keeping the same
    // username or email is not a conflict
    if let Some(existing) = UserStore::get_user_by_username(&username).await? {
        if existing.id != user_id {
            return Err(
                CoordinationError::Conflict("Username or email already registered".to_string())
                    .log(),
            );
        }
    }
    if let Some(existing) = UserStore::get_user_by_email(&email).await? {
        if existing.id != user_id {
            return Err(
                CoordinationError::Conflict("Username or email already registered".to_string())
                    .log(),
            );
        }
    }

    let mut account = UserStore::get_user(&user_id)
        .await?
        .ok_or_else(|| CoordinationError::Unauthorized.log())?;

    account.username = username;
    account.email = email;
    if let Some(password) = &update.password {
        account.password_hash = hash_password(password)?;
    }

    let updated = UserStore::update_user(account).await?;
    tracing::info!(user_id = %updated.id, "Profile updated");
    UserProfile::try_from(&updated)
}

/// Delete the caller's account along with their stories and every active
/// session on every device.
pub async fn delete_account(user: &AuthenticatedUser) -> Result<(), CoordinationError> {
    let user_id = user.user_id.to_string();

    UserStore::get_user(&user_id)
        .await?
        .ok_or_else(|| CoordinationError::Unauthorized.log())?;

    StoryStore::delete_all_for_user(&user_id).await?;
    SessionStore::delete_all_for_user(&user_id).await?;
    UserStore::delete_user(&user_id).await?;

    tracing::info!(user_id = %user_id, "Account deleted");
    Ok(())
}

/// List all registered accounts as public profiles.
pub async fn list_users() -> Result<Vec<UserProfile>, CoordinationError> {
    let users = UserStore::get_all_users().await?;
    users.iter().map(UserProfile::try_from).collect()
}
