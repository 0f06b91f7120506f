//! End-to-end checks of the sliding-renewal interceptor over the real
//! login and logout flows.
//!
//! The environment pins a token lifetime shorter than the renewal window,
//! so a freshly issued cookie pair is immediately eligible for renewal and
//! the interceptor queues replacement cookies on every authenticated
//! request.

use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{Router, body::Body, middleware, routing::get};
use http::header::{COOKIE, SET_COOKIE};
use http::{Request, Response, StatusCode};
use tower::ServiceExt;

use relato_axum::{relato_router_no_trace, sliding_session_renewal};

fn init_environment() {
    static INIT: Once = Once::new();
    INIT.call_once(|| unsafe {
        std::env::set_var("DATABASE_TYPE", "sqlite");
        std::env::set_var(
            "DATABASE_URL",
            "sqlite:file:relato_axum_test?mode=memory&cache=shared",
        );
        std::env::set_var("SESSION_LIFETIME_SECONDS", "100");
        std::env::set_var("SESSION_RENEWAL_WINDOW_SECONDS", "900");
    });
}

fn app() -> Router {
    Router::new()
        .route(
            "/boom",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .merge(relato_router_no_trace())
        .layer(middleware::from_fn(sliding_session_renewal))
}

/// Register a fresh account, log in, and return the Cookie header value a
/// user agent would send back.
async fn login_cookie_header(suffix: &str) -> String {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_millis();
    let username = format!("renewal-{suffix}-{unique}");
    let email = format!("renewal-{suffix}-{unique}@example.com");

    relato::register(&username, &email, "password1")
        .await
        .expect("register");
    let headers = relato::login(&username, "password1", None, None)
        .await
        .expect("login");

    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|s| s.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .collect()
}

#[tokio::test]
async fn logout_clears_cookies_even_inside_renewal_window() {
    init_environment();
    relato_axum::init().await.expect("init");

    let cookie = login_cookie_header("logout").await;
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2, "logout sets exactly the two clears");
    // The last Set-Cookie for a name wins on the user agent, so every auth
    // cookie on a logout response must be a clearing one; a renewed token
    // after the clears would keep the session alive.
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn delete_account_response_carries_no_renewed_cookies() {
    init_environment();
    relato_axum::init().await.expect("init");

    let cookie = login_cookie_header("delete").await;
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/profile")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn renewal_headers_ride_on_handler_errors() {
    init_environment();
    relato_axum::init().await.expect("init");

    let cookie = login_cookie_header("boom").await;
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/boom")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    // The handler failed, but the client presented a valid in-window pair;
    // both renewed cookies still ride on the error response.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("session=")));
    assert!(cookies.iter().any(|c| c.starts_with("profile=")));
    assert!(cookies.iter().all(|c| !c.contains("Max-Age=0")));
}
