use crate::session::errors::SessionError;
use crate::session::types::SessionRecord;
use crate::storage::GENERIC_DATA_STORE;

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct SessionStore;

impl SessionStore {
    /// Initialize the session database tables
    pub(crate) async fn init() -> Result<(), SessionError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_session_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_session_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    /// Insert a new session row. The session id must be fresh; a duplicate
    /// is a `Conflict` and the login that produced it fails.
    #[tracing::instrument(skip(record), fields(user_id = %record.user_id))]
    pub(crate) async fn create(record: SessionRecord) -> Result<(), SessionError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            create_session_sqlite(pool, record).await
        } else if let Some(pool) = store.as_postgres() {
            create_session_postgres(pool, record).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "Session creation failed");
        }

        result
    }

    /// Look up a session row by owner and session id. `None` means the
    /// session was revoked or never existed.
    pub(crate) async fn find(
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionRecord>, SessionError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            find_session_sqlite(pool, user_id, session_id).await
        } else if let Some(pool) = store.as_postgres() {
            find_session_postgres(pool, user_id, session_id).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Revoke a single session. Deleting a row that is already gone is not
    /// an error.
    pub(crate) async fn delete(user_id: &str, session_id: &str) -> Result<(), SessionError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_session_sqlite(pool, user_id, session_id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_session_postgres(pool, user_id, session_id).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Revoke every session a user holds, across all devices.
    pub(crate) async fn delete_all_for_user(user_id: &str) -> Result<(), SessionError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_all_sessions_for_user_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_all_sessions_for_user_postgres(pool, user_id).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
