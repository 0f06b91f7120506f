use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use relato::{Comedian, PersonaRegistry, Story};

use crate::error::IntoResponseError;
use crate::session::AuthUser;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/", get(list_stories))
        .route("/generate", post(generate_story))
        .route("/comedians", get(list_comedians))
}

#[derive(Deserialize)]
struct GenerateRequest {
    prompt: String,
    comedian: Comedian,
}

/// Generate a story in the chosen comedian's voice and store it in the
/// caller's history.
async fn generate_story(
    user: AuthUser,
    Json(form): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<Story>), (StatusCode, String)> {
    let story = relato::generate_story(&(&user).into(), form.comedian, &form.prompt)
        .await
        .into_response_error()?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// The caller's story history, newest first.
async fn list_stories(user: AuthUser) -> Result<Json<Vec<Story>>, (StatusCode, String)> {
    let stories = relato::list_stories(&(&user).into())
        .await
        .into_response_error()?;
    Ok(Json(stories))
}

#[derive(Serialize)]
struct ComedianItem {
    name: Comedian,
    display_name: &'static str,
}

/// The available comedians, for populating a picker.
async fn list_comedians() -> Json<Vec<ComedianItem>> {
    let registry = PersonaRegistry::builtin();
    let comedians = registry
        .all()
        .map(|persona| ComedianItem {
            name: persona.comedian,
            display_name: persona.comedian.display_name(),
        })
        .collect();
    Json(comedians)
}
