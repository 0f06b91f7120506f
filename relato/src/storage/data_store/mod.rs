mod config;
mod types;

pub(crate) use config::GENERIC_DATA_STORE;
pub use config::{DB_TABLE_SESSIONS, DB_TABLE_STORIES, DB_TABLE_USERS};
pub use types::DataStore;
