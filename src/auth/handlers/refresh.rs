/**
 * Token Refresh Handler
 *
 * POST /api/v1/users/refresh-token
 *
 * Exchanges a valid refresh token for a fresh access/refresh pair. The
 * incoming token may arrive in the `refreshToken` cookie or the JSON body
 * (cookie wins). The presented token must exactly equal the account's
 * stored refresh token; the swap to the new token is a single atomic
 * compare-and-swap, so a stale token (reused after a newer login or
 * refresh) is rejected even when its signature is valid and unexpired.
 */

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use uuid::Uuid;

use crate::auth::accounts;
use crate::auth::cookies::{cookie_value, set_session_cookies, REFRESH_TOKEN_COOKIE};
use crate::auth::handlers::types::{AccountResponse, RefreshRequest, SessionResponse};
use crate::auth::tokens::{issue_access_token, issue_refresh_token, verify_refresh_token};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::server::state::AppState;

/// Refresh handler
///
/// # Errors
///
/// * `401 Unauthorized` - token absent, invalid, expired, for a deleted
///   account, or already rotated away ("expired or used")
/// * `500 Internal Server Error` - database or signing failure
pub async fn refresh_token(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let incoming = cookie_value(&headers, REFRESH_TOKEN_COOKIE)
        .or_else(|| body.and_then(|Json(r)| r.refresh_token))
        .ok_or_else(|| ApiError::unauthorized("Unauthorized request"))?;

    let claims = verify_refresh_token(&app_state.auth, &incoming).map_err(|e| {
        tracing::warn!("refresh token rejected: {}", e);
        ApiError::unauthorized("Invalid refresh token")
    })?;

    let account_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("Invalid refresh token"))?;

    let account = accounts::find_by_id(&app_state.pool, account_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid refresh token"))?;

    let next_refresh = issue_refresh_token(&app_state.auth, account.id)?;

    // CAS rotation: only succeeds while the stored token still equals the
    // presented one. A miss means it was rotated or cleared since issuance.
    let account = accounts::rotate_refresh_token(&app_state.pool, account.id, &incoming, &next_refresh)
        .await?
        .ok_or_else(|| {
            tracing::warn!("stale refresh token for: {}", account.username);
            ApiError::unauthorized("Refresh token is expired or used")
        })?;

    let access_token = issue_access_token(&app_state.auth, &account)?;

    tracing::info!("token refreshed for: {}", account.username);

    let mut response_headers = HeaderMap::new();
    set_session_cookies(
        &mut response_headers,
        &access_token,
        app_state.auth.access_token_ttl_secs,
        &next_refresh,
        app_state.auth.refresh_token_ttl_secs,
    );

    let payload = ApiResponse::ok(
        SessionResponse {
            user: AccountResponse::from(&account),
            access_token,
            refresh_token: next_refresh,
        },
        "Access token refreshed",
    );

    Ok((response_headers, payload))
}
