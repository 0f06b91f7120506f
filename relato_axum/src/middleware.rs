use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::HeaderMap;
use http::header::SET_COOKIE;

use relato::{
    CookieInspection, PROFILE_COOKIE_NAME, SESSION_COOKIE_NAME, append_cleared_cookies,
    inspect_auth_cookies,
};

/// Request interceptor implementing the sliding-expiration cookie policy.
///
/// Runs on every request, authenticated or not, and does pure token work
/// only; the session store is never consulted here.
///
/// - no auth cookies: the request passes through untouched
/// - a valid cookie pair: any renewal Set-Cookie headers the policy
///   produced ride on the response, including error responses, so an
///   active client keeps its session alive even while hitting failures.
///   Responses on which the handler already set an auth cookie (logout,
///   account deletion) are left alone
/// - a partial or invalid pair: the request is rejected with a 401
///
/// Every 401 leaving through this interceptor carries expired replacement
/// cookies so the user agent drops whatever credential it holds.
pub async fn sliding_session_renewal(req: Request, next: Next) -> Response {
    let inspection = match inspect_auth_cookies(req.headers()) {
        Ok(inspection) => inspection,
        Err(e) => {
            tracing::debug!("Rejecting request with bad auth cookies: {}", e);
            return unauthorized_with_cleared_cookies();
        }
    };

    match inspection {
        CookieInspection::Anonymous => {
            let response = next.run(req).await;
            ensure_cleared_cookies_on_401(response)
        }
        CookieInspection::Authenticated { renewal_headers } => {
            let mut response = next.run(req).await;
            if response.status() == StatusCode::UNAUTHORIZED {
                return ensure_cleared_cookies_on_401(response);
            }
            // A handler that already set either auth cookie (logout, account
            // deletion) owns the cookie state for this response; the last
            // Set-Cookie wins on the user agent, so appending a renewal here
            // would resurrect the credential the handler just cleared.
            if carries_auth_cookie(response.headers()) {
                return response;
            }
            for (name, value) in &renewal_headers {
                response.headers_mut().append(name, value.clone());
            }
            response
        }
    }
}

fn carries_auth_cookie(headers: &HeaderMap) -> bool {
    headers.get_all(SET_COOKIE).iter().any(|value| {
        value.to_str().is_ok_and(|cookie| {
            cookie.starts_with(&format!("{}=", SESSION_COOKIE_NAME.as_str()))
                || cookie.starts_with(&format!("{}=", PROFILE_COOKIE_NAME.as_str()))
        })
    })
}

fn unauthorized_with_cleared_cookies() -> Response {
    let response = (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response();
    ensure_cleared_cookies_on_401(response)
}

fn ensure_cleared_cookies_on_401(mut response: Response) -> Response {
    if response.status() != StatusCode::UNAUTHORIZED {
        return response;
    }
    if let Err(e) = append_cleared_cookies(response.headers_mut()) {
        tracing::error!("Failed to append cleared cookies: {}", e);
    }
    response
}
