use sqlx::{Pool, Sqlite};

use crate::session::errors::SessionError;
use crate::session::types::SessionRecord;
use crate::storage::{DB_TABLE_SESSIONS, DB_TABLE_USERS, validate_sqlite_table_schema};

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            session_id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES {users_table}(id),
            expires_at TIMESTAMP NOT NULL,
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
pub(super) async fn validate_session_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), SessionError> {
    let sessions_table = DB_TABLE_SESSIONS.as_str();

    let expected_columns = vec![
        ("session_id", "TEXT"),
        ("user_id", "TEXT"),
        ("expires_at", "TIMESTAMP"),
        ("user_agent", "TEXT"),
        ("ip_address", "TEXT"),
    ];

    validate_sqlite_table_schema(pool, sessions_table, &expected_columns, SessionError::Storage)
        .await
}

pub(super) async fn create_session_sqlite(
    pool: &Pool<Sqlite>,
    record: SessionRecord,
) -> Result<(), SessionError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SESSIONS.as_str();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| SessionError::Storage(e.to_string()))?;

    let existing: Option<(String,)> = sqlx::query_as(&format!(
        r#"
        SELECT session_id FROM {table_name} WHERE session_id = ?
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
        VALUES (?, ?, ?, ?, ?)
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

pub(super) async fn find_session_sqlite(
    pool: &Pool<Sqlite>,
    user_id: &str,
    session_id: &str,
) -> Result<Option<SessionRecord>, SessionError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, SessionRecord>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE user_id = ? AND session_id = ?
        "#
    ))
    .bind(user_id)
    .bind(session_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn delete_session_sqlite(
    pool: &Pool<Sqlite>,
    user_id: &str,
    session_id: &str,
) -> Result<(), SessionError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE user_id = ? AND session_id = ?
        "#
    ))
    .bind(user_id)
    .bind(session_id)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn delete_all_sessions_for_user_sqlite(
    pool: &Pool<Sqlite>,
    user_id: &str,
) -> Result<(), SessionError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE user_id = ?
        "#
    ))
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}
