use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account. `username` and `email` are stored lowercased and
/// are unique across the table. `password_hash` is a bcrypt hash and never
/// leaves the crate; the type is deliberately not serializable.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub(crate) password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field to search for a user by
#[derive(Debug, Clone)]
pub(crate) enum UserSearchField {
    Id(String),
    Username(String),
    Email(String),
}

impl std::fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "id={id}"),
            UserSearchField::Username(username) => write!(f, "username={username}"),
            UserSearchField::Email(email) => write!(f, "email={email}"),
        }
    }
}

impl User {
    pub(crate) fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_lowercase(),
            email: email.to_lowercase(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
