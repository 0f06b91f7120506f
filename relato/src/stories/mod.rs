//! Comedian-styled story generation: the persona registry, the completion
//! client, and the persisted story history.

mod config;
mod errors;
mod generate;
mod personas;
mod storage;
mod types;

pub use errors::StoryError;
pub use personas::{Persona, PersonaRegistry};
pub use types::{Comedian, Story};

pub(crate) use generate::generate_story_text;
pub(crate) use storage::StoryStore;

/// Initialize the story database tables.
pub(crate) async fn init() -> Result<(), StoryError> {
    StoryStore::init().await
}
