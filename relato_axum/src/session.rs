use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use http::{StatusCode, request::Parts};

use relato::AuthenticatedUser;

/// Rejection for the `AuthUser` extractor: a bare 401 with no detail about
/// which check failed.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
    }
}

/// Authenticated user information, available as an Axum extractor
///
/// Extracting `AuthUser` runs the strict validation path: both auth cookies
/// are re-verified and the session row must still exist, so a revoked
/// session is rejected even while its tokens are unexpired.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use relato_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.username)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Unique user identifier
    pub user_id: uuid::Uuid,
    pub username: String,
    pub email: String,
    /// Id of the session this request rides on
    pub session_id: String,
}

impl From<AuthenticatedUser> for AuthUser {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            session_id: user.session_id,
        }
    }
}

impl From<&AuthUser> for AuthenticatedUser {
    fn from(user: &AuthUser) -> Self {
        AuthenticatedUser {
            user_id: user.user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            session_id: user.session_id.clone(),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let user = relato::get_authenticated_user(&parts.headers)
            .await
            .map_err(|e| {
                tracing::debug!("Authentication failed: {}", e);
                AuthRejection
            })?;
        Ok(AuthUser::from(user))
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AuthUser as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(_) => Ok(None),
        }
    }
}
