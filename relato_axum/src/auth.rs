use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use axum_extra::{TypedHeader, headers};
use serde::Deserialize;

use relato::UserProfile;

use crate::error::IntoResponseError;
use crate::session::AuthUser;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/register", post(register))
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// Open a new session. Responds 204 with both auth cookies on success and
/// a generic 401 otherwise.
async fn login(
    headers: HeaderMap,
    user_agent: Option<TypedHeader<headers::UserAgent>>,
    Json(form): Json<LoginRequest>,
) -> Result<(HeaderMap, StatusCode), (StatusCode, String)> {
    let user_agent = user_agent.map(|TypedHeader(ua)| ua.to_string());
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let cookie_headers = relato::login(&form.username, &form.password, user_agent, ip_address)
        .await
        .into_response_error()?;

    Ok((cookie_headers, StatusCode::NO_CONTENT))
}

/// Revoke the caller's session and clear both cookies.
async fn logout(user: AuthUser) -> Result<(HeaderMap, StatusCode), (StatusCode, String)> {
    let cookie_headers = relato::logout(&(&user).into()).await.into_response_error()?;
    Ok((cookie_headers, StatusCode::NO_CONTENT))
}

#[derive(Deserialize)]
struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

/// Create a new account. Registration does not log the user in.
async fn register(
    Json(form): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), (StatusCode, String)> {
    let profile = relato::register(&form.username, &form.email, &form.password)
        .await
        .into_response_error()?;
    Ok((StatusCode::CREATED, Json(profile)))
}
