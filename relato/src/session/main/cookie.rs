//! Cookie policy: sliding-expiration renewal decisions and Set-Cookie
//! construction for the two auth cookies.

use chrono::{DateTime, Utc};
use http::HeaderMap;

use crate::session::config::{
    COOKIE_DOMAIN, SESSION_LIFETIME_SECONDS, SESSION_RENEWAL_WINDOW_SECONDS,
};
use crate::session::errors::SessionError;
use crate::session::types::CookieToken;
use crate::utils::{gen_random_string, header_set_cookie};

use super::token::sign_token;

/// Sliding expiration: when a verified token is inside the renewal-trigger
/// window, return a replacement claim set with a pushed-out expiry and a
/// fresh nonce. Outside the window, return `None` and the token rides as-is.
///
/// Active clients therefore never see their session expire, while idle ones
/// expire exactly at `exp`.
pub(crate) fn should_renew<T: CookieToken>(claims: &T) -> Result<Option<T>, SessionError> {
    let now = Utc::now().timestamp();
    let seconds_until_expiry = claims.expires_at() - now;

    if seconds_until_expiry > *SESSION_RENEWAL_WINDOW_SECONDS as i64 {
        return Ok(None);
    }

    let mut renewed = claims.clone();
    renewed.renew(
        now + *SESSION_LIFETIME_SECONDS as i64,
        gen_random_string(16)?,
    );
    Ok(Some(renewed))
}

/// Sign the claims and append the resulting Set-Cookie header.
///
/// The session cookie is HTTP-only because it is the authority credential;
/// the profile cookie is left script-readable so pages can render display
/// fields without a round trip. Both are Secure, SameSite=Strict and scoped
/// to the configured domain, with `Expires` matching the claims' expiry.
pub(crate) fn append_auth_cookie<T: CookieToken>(
    headers: &mut HeaderMap,
    claims: &T,
) -> Result<(), SessionError> {
    let token = sign_token(claims)?;
    let cookie = format_auth_cookie(T::cookie_name(), &token, claims.expires_at(), T::http_only())?;
    header_set_cookie(headers, &cookie)?;
    Ok(())
}

/// Append expired replacements for both auth cookies, instructing the user
/// agent to drop whatever credential it holds.
pub(crate) fn append_clear_auth_cookies<S: CookieToken, P: CookieToken>(
    headers: &mut HeaderMap,
) -> Result<(), SessionError> {
    header_set_cookie(
        headers,
        &format_expired_cookie(S::cookie_name(), S::http_only()),
    )?;
    header_set_cookie(
        headers,
        &format_expired_cookie(P::cookie_name(), P::http_only()),
    )?;
    Ok(())
}

fn format_auth_cookie(
    name: &str,
    value: &str,
    expires_at: i64,
    http_only: bool,
) -> Result<String, SessionError> {
    let expires = DateTime::<Utc>::from_timestamp(expires_at, 0)
        .ok_or_else(|| SessionError::Cookie("Invalid expiry timestamp".to_string()))?;

    let mut cookie = format!(
        "{name}={value}; SameSite=Strict; Secure; Path=/; Domain={}; Expires={}",
        COOKIE_DOMAIN.as_str(),
        expires.format("%a, %d %b %Y %H:%M:%S GMT"),
    );
    if http_only {
        cookie.push_str("; HttpOnly");
    }
    Ok(cookie)
}

fn format_expired_cookie(name: &str, http_only: bool) -> String {
    let mut cookie = format!(
        "{name}=; SameSite=Strict; Secure; Path=/; Domain={}; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0",
        COOKIE_DOMAIN.as_str(),
    );
    if http_only {
        cookie.push_str("; HttpOnly");
    }
    cookie
}
