//! Combined router for all relato endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create a combined router for all relato endpoints.
///
/// The endpoints will be available at:
/// - /auth/login, /auth/logout, /auth/register
/// - /profile (GET, PUT, DELETE)
/// - /stories, /stories/generate, /stories/comedians
/// - /users
///
/// The sliding-renewal interceptor is NOT included; mount
/// [`sliding_session_renewal`](crate::sliding_session_renewal) as a layer on
/// the application so responses to every route, not just these, carry
/// renewed cookies.
pub fn relato_router() -> Router {
    relato_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`relato_router`] but without the HTTP tracing middleware, for
/// applications that bring their own.
pub fn relato_router_no_trace() -> Router {
    Router::new()
        .nest("/auth", super::auth::router())
        .nest("/profile", super::user::router())
        .nest("/stories", super::stories::router())
        .nest("/users", super::user::users_router())
}
