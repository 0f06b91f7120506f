use sqlx::{Pool, Postgres};

use crate::stories::errors::StoryError;
use crate::stories::types::Story;
use crate::storage::{DB_TABLE_STORIES, DB_TABLE_USERS, validate_postgres_table_schema};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), StoryError> {
    let table_name = DB_TABLE_STORIES.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES {users_table}(id),
            prompt TEXT NOT NULL,
            comedian TEXT NOT NULL,
            story TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| StoryError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the story table schema matches what we expect
pub(super) async fn validate_story_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), StoryError> {
    let stories_table = DB_TABLE_STORIES.as_str();

    let expected_columns = vec![
        ("id", "text"),
        ("user_id", "text"),
        ("prompt", "text"),
        ("comedian", "text"),
        ("story", "text"),
        ("created_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, stories_table, &expected_columns, StoryError::Storage)
        .await
}

pub(super) async fn create_story_postgres(
    pool: &Pool<Postgres>,
    story: Story,
) -> Result<Story, StoryError> {
    let table_name = DB_TABLE_STORIES.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (id, user_id, prompt, comedian, story, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#
    ))
    .bind(&story.id)
    .bind(&story.user_id)
    .bind(&story.prompt)
    .bind(&story.comedian)
    .bind(&story.story)
    .bind(story.created_at)
    .execute(pool)
    .await
    .map_err(|e| StoryError::Storage(e.to_string()))?;

    Ok(story)
}

pub(super) async fn get_stories_for_user_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Vec<Story>, StoryError> {
    let table_name = DB_TABLE_STORIES.as_str();

    sqlx::query_as::<_, Story>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE user_id = $1 ORDER BY created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| StoryError::Storage(e.to_string()))
}

pub(super) async fn delete_stories_for_user_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<(), StoryError> {
    let table_name = DB_TABLE_STORIES.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE user_id = $1
        "#
    ))
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| StoryError::Storage(e.to_string()))?;

    Ok(())
}
