use sqlx::{Pool, Postgres};

use crate::session::errors::SessionError;
use crate::session::types::SessionRecord;
use crate::storage::{DB_TABLE_SESSIONS, DB_TABLE_USERS, validate_postgres_table_schema};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            session_id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES {users_table}(id),
            expires_at TIMESTAMPTZ NOT NULL,
            user_agent TEXT,
            ip_address TEXT
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the session table schema matches what we expect
pub(super) async fn validate_session_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), SessionError> {
    let sessions_table = DB_TABLE_SESSIONS.as_str();

    let expected_columns = vec![
        ("session_id", "text"),
        ("user_id", "text"),
        ("expires_at", "timestamp with time zone"),
        ("user_agent", "text"),
        ("ip_address", "text"),
    ];

    validate_postgres_table_schema(pool, sessions_table, &expected_columns, SessionError::Storage)
        .await
}

pub(super) async fn create_session_postgres(
    pool: &Pool<Postgres>,
    record: SessionRecord,
) -> Result<(), SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    let existing: Option<(String,)> = sqlx::query_as(&format!(
        r#"
        SELECT session_id FROM {table_name} WHERE session_id = $1
        "#
    ))
    .bind(&record.session_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    if existing.is_some() {
        return Err(SessionError::Conflict);
    }

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (session_id, user_id, expires_at, user_agent, ip_address)
        VALUES ($1, $2, $3, $4, $5)
        "#
    ))
    .bind(&record.session_id)
    .bind(&record.user_id)
    .bind(record.expires_at)
    .bind(&record.user_agent)
    .bind(&record.ip_address)
    .execute(&mut *tx)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    tx.commit()
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn find_session_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    session_id: &str,
) -> Result<Option<SessionRecord>, SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, SessionRecord>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE user_id = $1 AND session_id = $2
        "#
    ))
    .bind(user_id)
    .bind(session_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn delete_session_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    session_id: &str,
) -> Result<(), SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE user_id = $1 AND session_id = $2
        "#
    ))
    .bind(user_id)
    .bind(session_id)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn delete_all_sessions_for_user_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<(), SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE user_id = $1
        "#
    ))
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}
