use crate::stories::errors::StoryError;
use crate::stories::types::Story;
use crate::storage::GENERIC_DATA_STORE;

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct StoryStore;

impl StoryStore {
    /// Initialize the story database tables
    pub(crate) async fn init() -> Result<(), StoryError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_story_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_story_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(StoryError::Storage("Unsupported database type".to_string())),
        }
    }

    #[tracing::instrument(skip(story), fields(user_id = %story.user_id))]
    pub(crate) async fn create(story: Story) -> Result<Story, StoryError> {
        let store = GENERIC_DATA_STORE.lock().await;

        let result = if let Some(pool) = store.as_sqlite() {
            create_story_sqlite(pool, story).await
        } else if let Some(pool) = store.as_postgres() {
            create_story_postgres(pool, story).await
        } else {
            Err(StoryError::Storage("Unsupported database type".to_string()))
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "Story creation failed");
        }

        result
    }

    /// A user's stories, newest first
    pub(crate) async fn get_all_for_user(user_id: &str) -> Result<Vec<Story>, StoryError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_stories_for_user_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_stories_for_user_postgres(pool, user_id).await
        } else {
            Err(StoryError::Storage("Unsupported database type".to_string()))
        }
    }

    pub(crate) async fn delete_all_for_user(user_id: &str) -> Result<(), StoryError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_stories_for_user_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_stories_for_user_postgres(pool, user_id).await
        } else {
            Err(StoryError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use crate::userdb::{User, UserStore};
    use chrono::{Duration, Utc};
    use serial_test::serial;
    use uuid::Uuid;

    async fn create_test_user(suffix: &str) -> User {
        let timestamp = Utc::now().timestamp_millis();
        let user = User::new(
            format!("story-user-{suffix}-{timestamp}"),
            format!("story-{suffix}-{timestamp}@example.com"),
            "hash".to_string(),
        );
        UserStore::create_user(user.clone())
            .await
            .expect("Failed to create user")
    }

    fn test_story(user_id: &str, prompt: &str, age_minutes: i64) -> Story {
        Story {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            prompt: prompt.to_string(),
            comedian: "leo_harlem".to_string(),
            story: format!("¡Esto es de locos! {prompt}"),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_storystore_init_is_idempotent() {
        init_test_environment().await;

        assert!(StoryStore::init().await.is_ok());
        assert!(StoryStore::init().await.is_ok());
    }

    #[tokio::test]
    #[serial]
    async fn test_storystore_create_and_list_newest_first() {
        init_test_environment().await;

        let user = create_test_user("list").await;

        StoryStore::create(test_story(&user.id, "older", 10))
            .await
            .expect("create older");
        StoryStore::create(test_story(&user.id, "newer", 1))
            .await
            .expect("create newer");

        let stories = StoryStore::get_all_for_user(&user.id)
            .await
            .expect("list should succeed");
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].prompt, "newer");
        assert_eq!(stories[1].prompt, "older");
    }

    #[tokio::test]
    #[serial]
    async fn test_storystore_listing_is_scoped_to_owner() {
        init_test_environment().await;

        let alice = create_test_user("scope-a").await;
        let bob = create_test_user("scope-b").await;

        StoryStore::create(test_story(&alice.id, "alice story", 1))
            .await
            .expect("create");

        let bobs = StoryStore::get_all_for_user(&bob.id)
            .await
            .expect("list should succeed");
        assert!(bobs.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_storystore_delete_all_for_user() {
        init_test_environment().await;

        let user = create_test_user("wipe").await;
        StoryStore::create(test_story(&user.id, "one", 2))
            .await
            .expect("create");
        StoryStore::create(test_story(&user.id, "two", 1))
            .await
            .expect("create");

        StoryStore::delete_all_for_user(&user.id)
            .await
            .expect("delete all");

        let remaining = StoryStore::get_all_for_user(&user.id)
            .await
            .expect("list");
        assert!(remaining.is_empty());
    }
}
