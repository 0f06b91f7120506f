mod data_store;
mod errors;
mod schema_validation;

use errors::StorageError;

/// Bring up the configured data store and verify it answers a query.
/// Pools are created lazily, so connectivity problems would otherwise stay
/// hidden until the first table operation.
pub async fn init() -> Result<(), StorageError> {
    let store = GENERIC_DATA_STORE.lock().await;

    if let Some(pool) = store.as_sqlite() {
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(|e| StorageError::Storage(e.to_string()))?;
    } else if let Some(pool) = store.as_postgres() {
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(|e| StorageError::Storage(e.to_string()))?;
    } else {
        return Err(StorageError::Storage(
            "Unsupported database type".to_string(),
        ));
    }

    Ok(())
}

pub use data_store::{DB_TABLE_SESSIONS, DB_TABLE_STORIES, DB_TABLE_USERS, DataStore};
pub(crate) use data_store::GENERIC_DATA_STORE;

pub(crate) use schema_validation::{
    validate_postgres_table_schema, validate_sqlite_table_schema,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_init_verifies_connectivity() {
        init_test_environment().await;

        assert!(init().await.is_ok());
        // A second init re-runs the check against the live pool
        assert!(init().await.is_ok());
    }
}
