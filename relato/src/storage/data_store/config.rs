//! Database connection and table configuration

use std::{env, str::FromStr, sync::LazyLock};
use tokio::sync::Mutex;

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};

static DATABASE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("DATABASE_TYPE").unwrap_or_else(|_| "sqlite".to_string()));

static DATABASE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:relato.db?mode=rwc".to_string())
});

pub(crate) static GENERIC_DATA_STORE: LazyLock<Mutex<Box<dyn DataStore>>> = LazyLock::new(|| {
    let store_type = DATABASE_TYPE.as_str();
    let store_url = DATABASE_URL.as_str();

    tracing::info!(
        "Initializing data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store = match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .expect("Failed to parse SQLite connection string")
                .create_if_missing(true);

            Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }) as Box<dyn DataStore>
        }
        "postgres" => Box::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url).expect("Failed to create Postgres pool"),
        }) as Box<dyn DataStore>,
        t => panic!(
            "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
            t
        ),
    };

    Mutex::new(store)
});

/// Table prefix from environment variable
static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "relato_".to_string()));

pub static DB_TABLE_USERS: LazyLock<String> =
    LazyLock::new(|| format!("{}users", DB_TABLE_PREFIX.as_str()));

pub static DB_TABLE_SESSIONS: LazyLock<String> =
    LazyLock::new(|| format!("{}sessions", DB_TABLE_PREFIX.as_str()));

pub static DB_TABLE_STORIES: LazyLock<String> =
    LazyLock::new(|| format!("{}stories", DB_TABLE_PREFIX.as_str()));

#[cfg(test)]
mod tests {
    use std::env;

    // Helper struct to safely manage environment variables during tests
    struct EnvVarGuard {
        key: String,
        original_value: Option<String>,
    }

    impl EnvVarGuard {
        fn new(key: &str, value: &str) -> Self {
            let original_value = env::var(key).ok();

            unsafe {
                env::set_var(key, value);
            }

            Self {
                key: key.to_string(),
                original_value,
            }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            unsafe {
                match &self.original_value {
                    Some(value) => env::set_var(&self.key, value),
                    None => env::remove_var(&self.key),
                }
            }
        }
    }

    #[test]
    fn test_env_var_parsing() {
        let _type_guard = EnvVarGuard::new("DATABASE_TYPE", "sqlite");
        let _url_guard = EnvVarGuard::new("DATABASE_URL", "sqlite::memory:");

        let store_type = env::var("DATABASE_TYPE").unwrap();
        let store_url = env::var("DATABASE_URL").unwrap();

        assert_eq!(store_type, "sqlite");
        assert_eq!(store_url, "sqlite::memory:");
    }

    #[test]
    fn test_database_type_default() {
        let store_type = env::var("DATABASE_TYPE_UNSET_FOR_TEST")
            .unwrap_or_else(|_| "sqlite".to_string());
        assert_eq!(store_type, "sqlite");
    }

    #[test]
    fn test_db_table_prefix_custom() {
        let _prefix_guard = EnvVarGuard::new("DB_TABLE_PREFIX", "custom_");

        let prefix = env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "relato_".to_string());
        assert_eq!(prefix, "custom_");
        assert_eq!(format!("{prefix}users"), "custom_users");
    }

    #[test]
    #[should_panic(expected = "Unsupported store type")]
    fn test_unsupported_store_type() {
        let store_type = "unsupported";
        match store_type {
            "sqlite" => {}
            "postgres" => {}
            t => panic!(
                "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
                t
            ),
        };
    }
}
