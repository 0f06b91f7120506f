use chrono::{Duration, Utc};
use http::header::{COOKIE, HeaderMap};
use uuid::Uuid;

use crate::session::config::SESSION_LIFETIME_SECONDS;
use crate::session::errors::SessionError;
use crate::session::storage::SessionStore;
use crate::session::types::{
    AuthenticatedUser, CookieToken, ProfileClaims, SessionClaims, SessionRecord,
};
use crate::userdb::User;
use crate::utils::gen_random_string;

use super::cookie::{append_auth_cookie, append_clear_auth_cookies, should_renew};
use super::token::verify_token;

/// Outcome of the per-request cookie inspection performed by the middleware.
#[derive(Debug)]
pub enum CookieInspection {
    /// Neither auth cookie was present; the handler decides whether an
    /// identity is required.
    Anonymous,
    /// Both tokens verified. `renewal_headers` holds any Set-Cookie
    /// replacements the sliding-expiration policy produced (possibly none);
    /// they must be attached to the outbound response.
    Authenticated { renewal_headers: HeaderMap },
}

/// Create a new login session for `user`: insert the session row and build
/// both signed cookies with a matching expiry.
pub(crate) async fn create_new_session(
    user: &User,
    user_agent: Option<String>,
    ip_address: Option<String>,
) -> Result<HeaderMap, SessionError> {
    let user_id = parse_user_id(&user.id)?;
    let session_id = gen_random_string(32)?;
    let expires_at = Utc::now() + Duration::seconds(*SESSION_LIFETIME_SECONDS as i64);

    SessionStore::create(SessionRecord {
        session_id: session_id.clone(),
        user_id: user.id.clone(),
        expires_at,
        user_agent,
        ip_address,
    })
    .await?;

    let exp = expires_at.timestamp();
    let session_claims = SessionClaims {
        sub: user_id,
        sid: session_id,
        exp,
        nonce: gen_random_string(16)?,
    };
    let profile_claims = ProfileClaims {
        sub: user_id,
        username: user.username.clone(),
        email: user.email.clone(),
        exp,
        nonce: gen_random_string(16)?,
    };

    let mut headers = HeaderMap::new();
    append_auth_cookie(&mut headers, &session_claims)?;
    append_auth_cookie(&mut headers, &profile_claims)?;

    tracing::debug!(user_id = %user.id, "Created new session");
    Ok(headers)
}

/// Per-request cookie check used by the request interceptor. Pure token
/// work: no store I/O happens here.
///
/// - neither cookie present: pass through unauthenticated
/// - exactly one present: reject; a partial credential is never trusted
/// - both present: verify each, and ask the renewal policy independently
///   per token whether a replacement cookie should ride on the response
pub fn inspect_auth_cookies(headers: &HeaderMap) -> Result<CookieInspection, SessionError> {
    let session_token = get_cookie_from_headers(headers, SessionClaims::cookie_name())?;
    let profile_token = get_cookie_from_headers(headers, ProfileClaims::cookie_name())?;

    let (session_token, profile_token) = match (session_token, profile_token) {
        (None, None) => return Ok(CookieInspection::Anonymous),
        (Some(s), Some(p)) => (s, p),
        _ => {
            tracing::debug!("Partial auth cookie pair; rejecting");
            return Err(SessionError::Unauthenticated);
        }
    };

    let session_claims: SessionClaims = verify_token(session_token)?;
    let profile_claims: ProfileClaims = verify_token(profile_token)?;

    let mut renewal_headers = HeaderMap::new();
    if let Some(renewed) = should_renew(&session_claims)? {
        append_auth_cookie(&mut renewal_headers, &renewed)?;
    }
    if let Some(renewed) = should_renew(&profile_claims)? {
        append_auth_cookie(&mut renewal_headers, &renewed)?;
    }

    Ok(CookieInspection::Authenticated { renewal_headers })
}

/// Strict validation path for handlers that require an identity.
///
/// Re-verifies both tokens, rejects spliced pairs, and confirms a matching
/// session row still exists. Token validity alone is not sufficient, so a
/// revoked session is rejected even while its token is unexpired.
pub async fn get_authenticated_user(
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, SessionError> {
    let session_token = get_cookie_from_headers(headers, SessionClaims::cookie_name())?
        .ok_or(SessionError::Unauthenticated)?;
    let profile_token = get_cookie_from_headers(headers, ProfileClaims::cookie_name())?
        .ok_or(SessionError::Unauthenticated)?;

    let session_claims: SessionClaims = verify_token(session_token)?;
    let profile_claims: ProfileClaims = verify_token(profile_token)?;

    if session_claims.sub != profile_claims.sub {
        tracing::warn!("Session and profile tokens carry different user ids");
        return Err(SessionError::Unauthenticated);
    }

    let record = SessionStore::find(&session_claims.sub.to_string(), &session_claims.sid)
        .await?
        .ok_or(SessionError::Unauthenticated)?;

    Ok(AuthenticatedUser {
        user_id: session_claims.sub,
        username: profile_claims.username,
        email: profile_claims.email,
        session_id: record.session_id,
    })
}

/// Prepare a logout response: best-effort delete of the session row, then
/// clear both cookies. A store failure is logged and swallowed; the client
/// must always be able to clear its own browser state.
pub async fn prepare_logout_response(
    user: &AuthenticatedUser,
) -> Result<HeaderMap, SessionError> {
    if let Err(e) = SessionStore::delete(&user.user_id.to_string(), &user.session_id).await {
        tracing::warn!(error = %e, user_id = %user.user_id, "Failed to delete session during logout");
    }

    let mut headers = HeaderMap::new();
    append_clear_auth_cookies::<SessionClaims, ProfileClaims>(&mut headers)?;
    Ok(headers)
}

/// Append expired replacements for both auth cookies to `headers`.
/// Used by the interceptor when an outbound response carries a 401.
pub fn append_cleared_cookies(headers: &mut HeaderMap) -> Result<(), SessionError> {
    append_clear_auth_cookies::<SessionClaims, ProfileClaims>(headers)
}

fn parse_user_id(id: &str) -> Result<Uuid, SessionError> {
    Uuid::parse_str(id).map_err(|_| SessionError::Storage(format!("Invalid user id: {id}")))
}

pub(crate) fn get_cookie_from_headers<'a>(
    headers: &'a HeaderMap,
    cookie_name: &str,
) -> Result<Option<&'a str>, SessionError> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        return Ok(None);
    };

    let cookie_str = cookie_header.to_str().map_err(|e| {
        tracing::error!("Invalid cookie header: {}", e);
        SessionError::HeaderError("Invalid cookie header".to_string())
    })?;

    let value = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name => Some(v),
            _ => None,
        }
    });

    Ok(value)
}
