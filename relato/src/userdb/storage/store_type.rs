use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct UserStore;

impl UserStore {
    /// Initialize the user database tables
    pub(crate) async fn init() -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    pub(crate) async fn get_all_users() -> Result<Vec<User>, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_all_users_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            get_all_users_postgres(pool).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by their ID
    #[tracing::instrument(fields(user_id = %id))]
    pub(crate) async fn get_user(id: &str) -> Result<Option<User>, UserError> {
        Self::get_user_by(UserSearchField::Id(id.to_string())).await
    }

    /// Get a user by username. Usernames are stored lowercased, so the
    /// lookup value is lowercased first.
    pub(crate) async fn get_user_by_username(username: &str) -> Result<Option<User>, UserError> {
        Self::get_user_by(UserSearchField::Username(username.to_lowercase())).await
    }

    pub(crate) async fn get_user_by_email(email: &str) -> Result<Option<User>, UserError> {
        Self::get_user_by(UserSearchField::Email(email.to_lowercase())).await
    }

    #[tracing::instrument(fields(user_field = %field))]
    async fn get_user_by(field: UserSearchField) -> Result<Option<User>, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "User lookup failed");
        }

        result
    }

    /// Create a new user. Fails with `Conflict` when the username or email
    /// is already taken.
    #[tracing::instrument(skip(user), fields(user_id = %user.id))]
    pub(crate) async fn create_user(user: User) -> Result<User, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            create_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            create_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => {
                tracing::info!(username = %user.username, "User created");
            }
            Err(e) => {
                tracing::debug!(error = %e, "User creation failed");
            }
        }

        result
    }

    /// Update an existing user row. Fails with `NotFound` when the id has
    /// no matching row.
    #[tracing::instrument(skip(user), fields(user_id = %user.id))]
    pub(crate) async fn update_user(user: User) -> Result<User, UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            update_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            update_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    pub(crate) async fn delete_user(id: &str) -> Result<(), UserError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use chrono::Utc;
    use serial_test::serial;

    /// Helper function to create a test user with unique timestamp-based identifiers
    fn create_test_user(suffix: &str) -> User {
        let timestamp = Utc::now().timestamp_millis();
        User::new(
            format!("user-{suffix}-{timestamp}"),
            format!("user-{suffix}-{timestamp}@example.com"),
            "bcrypt-hash-placeholder".to_string(),
        )
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_init_is_idempotent() {
        init_test_environment().await;

        assert!(UserStore::init().await.is_ok());
        assert!(UserStore::init().await.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_create_and_get() {
        init_test_environment().await;

        let test_user = create_test_user("create");
        let created = UserStore::create_user(test_user.clone())
            .await
            .expect("Creating new user should succeed");
        assert_eq!(created.id, test_user.id);

        let fetched = UserStore::get_user(&created.id)
            .await
            .expect("Get should succeed")
            .expect("User should exist");
        assert_eq!(fetched.username, test_user.username);
        assert_eq!(fetched.email, test_user.email);

        // Clean up
        let _ = UserStore::delete_user(&created.id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_duplicate_username_conflicts() {
        init_test_environment().await;

        let first = create_test_user("dup");
        UserStore::create_user(first.clone())
            .await
            .expect("First create should succeed");

        let mut second = create_test_user("dup-other");
        second.username = first.username.clone();

        let result = UserStore::create_user(second).await;
        assert!(matches!(result, Err(UserError::Conflict(_))));

        // Clean up
        let _ = UserStore::delete_user(&first.id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_duplicate_email_conflicts() {
        init_test_environment().await;

        let first = create_test_user("email");
        UserStore::create_user(first.clone())
            .await
            .expect("First create should succeed");

        let mut second = create_test_user("email-other");
        second.email = first.email.clone();

        let result = UserStore::create_user(second).await;
        assert!(matches!(result, Err(UserError::Conflict(_))));

        // Clean up
        let _ = UserStore::delete_user(&first.id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_username_lookup_is_case_insensitive() {
        init_test_environment().await;

        let test_user = create_test_user("case");
        let created = UserStore::create_user(test_user.clone())
            .await
            .expect("Create should succeed");

        let fetched = UserStore::get_user_by_username(&created.username.to_uppercase())
            .await
            .expect("Lookup should succeed")
            .expect("User should be found regardless of case");
        assert_eq!(fetched.id, created.id);

        // Clean up
        let _ = UserStore::delete_user(&created.id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_update_user() {
        init_test_environment().await;

        let test_user = create_test_user("update");
        let created = UserStore::create_user(test_user.clone())
            .await
            .expect("Create should succeed");

        let mut updated = created.clone();
        updated.email = format!("changed-{}", created.email);

        let result = UserStore::update_user(updated.clone())
            .await
            .expect("Update should succeed");
        assert_eq!(result.email, updated.email);
        assert!(
            result.updated_at > created.updated_at,
            "updated_at should be newer"
        );
        assert_eq!(result.created_at, created.created_at);

        // Clean up
        let _ = UserStore::delete_user(&created.id).await;
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_update_missing_user_is_not_found() {
        init_test_environment().await;

        let phantom = create_test_user("phantom");
        let result = UserStore::update_user(phantom).await;
        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_delete_user() {
        init_test_environment().await;

        let test_user = create_test_user("delete");
        let created = UserStore::create_user(test_user)
            .await
            .expect("Create should succeed");

        UserStore::delete_user(&created.id)
            .await
            .expect("Delete should succeed");

        let fetched = UserStore::get_user(&created.id)
            .await
            .expect("Get should succeed");
        assert!(fetched.is_none(), "User should not exist after deletion");

        // Deleting a non-existent user should not error
        let result = UserStore::delete_user("non-existent-user-id").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_userstore_get_all_users() {
        init_test_environment().await;

        let initial = UserStore::get_all_users().await.unwrap_or_default().len();

        let user1 = UserStore::create_user(create_test_user("all1"))
            .await
            .expect("create 1");
        let user2 = UserStore::create_user(create_test_user("all2"))
            .await
            .expect("create 2");

        let all_users = UserStore::get_all_users()
            .await
            .expect("Getting all users should succeed");
        assert_eq!(all_users.len(), initial + 2);

        let ids: Vec<&str> = all_users.iter().map(|u| u.id.as_str()).collect();
        assert!(ids.contains(&user1.id.as_str()));
        assert!(ids.contains(&user2.id.as_str()));

        // Clean up
        let _ = UserStore::delete_user(&user1.id).await;
        let _ = UserStore::delete_user(&user2.id).await;
    }
}
