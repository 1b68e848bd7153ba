/**
 * Authentication Middleware
 *
 * Gate for protected routes. Extracts the access token from the
 * `accessToken` cookie or the `Authorization` header (cookie wins),
 * verifies it against the access-token secret, loads the account it names,
 * and attaches a sanitized view to the request for downstream handlers.
 *
 * This is a pure gate: it never mutates stored state. Every failure mode
 * (missing token, bad signature, expired token, deleted account) collapses
 * to the same 401 so callers learn nothing about why a token was rejected.
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::accounts;
use crate::auth::cookies::{cookie_value, ACCESS_TOKEN_COOKIE};
use crate::auth::tokens::verify_access_token;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Sanitized authenticated account attached to the request
///
/// Carries no password hash and no refresh token; handlers that need those
/// re-read the full row themselves.
#[derive(Clone, Debug)]
pub struct CurrentAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: String,
}

/// Authentication middleware for protected routes
///
/// 1. Extract the bearer token (cookie takes precedence over header)
/// 2. Verify signature and expiry against the access-token secret
/// 3. Load the account by the token's claim id
/// 4. Attach `CurrentAccount` to request extensions
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&request)
        .ok_or_else(|| ApiError::unauthorized("Unauthorized request"))?;

    let claims = verify_access_token(&app_state.auth, &token).map_err(|e| {
        tracing::warn!("access token rejected: {}", e);
        ApiError::unauthorized("Invalid access token")
    })?;

    let account_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("Invalid access token"))?;

    // The account may have been deleted after the token was issued
    let account = accounts::find_by_id(&app_state.pool, account_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("token for unknown account: {}", account_id);
            ApiError::unauthorized("Invalid access token")
        })?;

    request.extensions_mut().insert(CurrentAccount {
        id: account.id,
        username: account.username,
        email: account.email,
        full_name: account.full_name,
        avatar_url: account.avatar_url,
        cover_image_url: account.cover_image_url,
    });

    Ok(next.run(request).await)
}

/// Pull the access token off a request; cookie first, then bearer header
fn extract_token(request: &Request) -> Option<String> {
    if let Some(token) = cookie_value(request.headers(), ACCESS_TOKEN_COOKIE) {
        return Some(token);
    }

    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Extractor handing the authenticated account to handlers
///
/// Usable as a handler parameter on any route behind `require_auth`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub CurrentAccount);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account = parts
            .extensions
            .get::<CurrentAccount>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("CurrentAccount missing from request extensions");
                ApiError::unauthorized("Unauthorized request")
            })?;

        Ok(AuthUser(account))
    }
}
