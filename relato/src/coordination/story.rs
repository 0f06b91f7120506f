//! Story generation and history flows.

use chrono::Utc;
use uuid::Uuid;

use crate::coordination::errors::CoordinationError;
use crate::session::AuthenticatedUser;
use crate::stories::{Comedian, PersonaRegistry, Story, StoryStore, generate_story_text};

/// Generate a story in the chosen comedian's voice and persist it in the
/// caller's history.
pub async fn generate_story(
    user: &AuthenticatedUser,
    comedian: Comedian,
    prompt: &str,
) -> Result<Story, CoordinationError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(CoordinationError::Validation("Prompt must not be empty".to_string()).log());
    }

    let registry = PersonaRegistry::builtin();
    let story_text = generate_story_text(&registry, comedian, prompt).await?;

    let story = StoryStore::create(Story {
        id: Uuid::new_v4().to_string(),
        user_id: user.user_id.to_string(),
        prompt: prompt.to_string(),
        comedian: comedian.to_string(),
        story: story_text,
        created_at: Utc::now(),
    })
    .await?;

    tracing::info!(user_id = %user.user_id, comedian = %comedian, "Story generated");
    Ok(story)
}

/// The caller's story history, newest first.
pub async fn list_stories(user: &AuthenticatedUser) -> Result<Vec<Story>, CoordinationError> {
    let stories = StoryStore::get_all_for_user(&user.user_id.to_string()).await?;
    Ok(stories)
}
