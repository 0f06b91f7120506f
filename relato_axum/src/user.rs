use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::get,
};

use relato::{ProfileUpdate, UserProfile};

use crate::error::IntoResponseError;
use crate::session::AuthUser;

pub(crate) fn router() -> Router {
    Router::new().route("/", get(get_profile).put(update_profile).delete(delete_profile))
}

pub(crate) fn users_router() -> Router {
    Router::new().route("/", get(list_users))
}

async fn get_profile(user: AuthUser) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let profile = relato::get_profile(&(&user).into())
        .await
        .into_response_error()?;
    Ok(Json(profile))
}

async fn update_profile(
    user: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    let profile = relato::update_profile(&(&user).into(), update)
        .await
        .into_response_error()?;
    Ok(Json(profile))
}

/// Delete the caller's account. Every session is revoked server-side and
/// the response clears both cookies.
async fn delete_profile(
    user: AuthUser,
) -> Result<(HeaderMap, StatusCode), (StatusCode, String)> {
    relato::delete_account(&(&user).into())
        .await
        .into_response_error()?;

    let mut headers = HeaderMap::new();
    if let Err(e) = relato::append_cleared_cookies(&mut headers) {
        tracing::error!("Failed to append cleared cookies: {}", e);
    }
    Ok((headers, StatusCode::NO_CONTENT))
}

/// Public directory of registered accounts.
async fn list_users() -> Result<Json<Vec<UserProfile>>, (StatusCode, String)> {
    let users = relato::list_users().await.into_response_error()?;
    Ok(Json(users))
}
