//! Shared test initialization.
//!
//! Centralized setup used by test modules across the crate so every test
//! sees the same environment and an initialized database. SQLite functions
//! ensure tables exist at the point of use, so no retry logic is needed
//! here.

use std::sync::Once;

/// Initialize the test environment: load `.env_test` (falling back to
/// `.env`) once, point the data store at a shared in-memory SQLite database
/// unless the environment says otherwise, and initialize all stores.
///
/// ## Usage
/// ```rust,ignore
/// use crate::test_utils::init_test_environment;
///
/// #[tokio::test]
/// async fn my_test() {
///     init_test_environment().await;
///     // ... test code that requires database access
/// }
/// ```
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        // Default to a shared in-memory database so tests never touch a
        // developer's on-disk file
        if std::env::var("DATABASE_TYPE").is_err() {
            unsafe { std::env::set_var("DATABASE_TYPE", "sqlite") };
        }
        if std::env::var("DATABASE_URL").is_err() {
            unsafe {
                std::env::set_var(
                    "DATABASE_URL",
                    "sqlite:file:relato_test?mode=memory&cache=shared",
                )
            };
        }
    });

    ensure_database_initialized().await;
}

/// Initialize stores, logging failures instead of panicking so individual
/// tests report their own errors.
async fn ensure_database_initialized() {
    use crate::session::SessionStore;
    use crate::stories::StoryStore;
    use crate::userdb::UserStore;

    if let Err(e) = UserStore::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
    if let Err(e) = SessionStore::init().await {
        eprintln!("Warning: Failed to initialize SessionStore: {e}");
    }
    if let Err(e) = StoryStore::init().await {
        eprintln!("Warning: Failed to initialize StoryStore: {e}");
    }
}
