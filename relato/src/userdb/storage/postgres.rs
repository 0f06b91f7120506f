use sqlx::{Pool, Postgres};

use crate::storage::{DB_TABLE_USERS, validate_postgres_table_schema};
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the User table schema matches what we expect
pub(super) async fn validate_user_tables_postgres(pool: &Pool<Postgres>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    let expected_columns = vec![
        ("id", "text"),
        ("username", "text"),
        ("email", "text"),
        ("password_hash", "text"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, users_table, &expected_columns, UserError::Storage).await
}

pub(super) async fn get_all_users_postgres(pool: &Pool<Postgres>) -> Result<Vec<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} ORDER BY created_at ASC
        "#
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn get_user_by_field_postgres(
    pool: &Pool<Postgres>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let (column, value) = match field {
        UserSearchField::Id(id) => ("id", id),
        UserSearchField::Username(username) => ("username", username),
        UserSearchField::Email(email) => ("email", email),
    };

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE {column} = $1
        "#
    ))
    .bind(value)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn create_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let taken: Option<(String,)> = sqlx::query_as(&format!(
        r#"
        SELECT id FROM {table_name} WHERE username = $1 OR email = $2
        "#
    ))
    .bind(&user.username)
    .bind(&user.email)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    if taken.is_some() {
        return Err(UserError::Conflict(
            "Username or email already registered".to_string(),
        ));
    }

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, username, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#
    ))
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(user)
}

pub(super) async fn update_user_postgres(
    pool: &Pool<Postgres>,
    user: User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();
    let now = chrono::Utc::now();
    let mut updated_user = user;
    updated_user.updated_at = now;

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name}
        SET username = $1, email = $2, password_hash = $3, updated_at = $4
        WHERE id = $5
        "#
    ))
    .bind(&updated_user.username)
    .bind(&updated_user.email)
    .bind(&updated_user.password_hash)
    .bind(now)
    .bind(&updated_user.id)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(UserError::NotFound);
    }

    Ok(updated_user)
}

pub(super) async fn delete_user_postgres(pool: &Pool<Postgres>, id: &str) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}
