/**
 * Session Cookie Helpers
 *
 * The token pair travels in two HTTP-only cookies, `accessToken` and
 * `refreshToken`, alongside the JSON body. These helpers build the
 * `Set-Cookie` values for issuing and clearing them and read cookie values
 * back off a request.
 */

use axum::http::{header, HeaderMap, HeaderValue};

/// Cookie name for the access token
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Cookie name for the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build a `Set-Cookie` value for a session token
///
/// HTTP-only, secure, and scoped to the whole site.
pub fn session_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!("{name}={value}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={max_age_secs}")
}

/// Build a `Set-Cookie` value that clears a session cookie
pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0")
}

/// Read a cookie value from request headers
///
/// Returns `None` when the `Cookie` header is absent or does not contain
/// the named cookie.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Append `Set-Cookie` headers issuing both session cookies
pub fn set_session_cookies(
    headers: &mut HeaderMap,
    access_token: &str,
    access_max_age: u64,
    refresh_token: &str,
    refresh_max_age: u64,
) {
    let access = session_cookie(ACCESS_TOKEN_COOKIE, access_token, access_max_age);
    let refresh = session_cookie(REFRESH_TOKEN_COOKIE, refresh_token, refresh_max_age);

    // JWTs and cookie attributes are always valid header characters
    if let Ok(value) = HeaderValue::from_str(&access) {
        headers.append(header::SET_COOKIE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&refresh) {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Append `Set-Cookie` headers clearing both session cookies
pub fn clear_session_cookies(headers: &mut HeaderMap) {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        if let Ok(value) = HeaderValue::from_str(&clear_cookie(name)) {
            headers.append(header::SET_COOKIE, value);
        }
    }
}
