/**
 * Logout Handler
 *
 * POST /api/v1/users/logout (authenticated)
 *
 * Clears the stored refresh token for the authenticated account and expires
 * both session cookies. The identity comes from the authentication
 * middleware, never from client-supplied input. This is the only way to
 * invalidate a refresh token before its natural expiry.
 */

use axum::{extract::State, http::HeaderMap, response::IntoResponse};

use crate::auth::accounts;
use crate::auth::cookies::clear_session_cookies;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::server::state::AppState;

/// Logout handler
///
/// # Errors
///
/// * `401 Unauthorized` - no authenticated account (middleware)
/// * `500 Internal Server Error` - database failure
pub async fn logout(
    State(app_state): State<AppState>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    accounts::set_refresh_token(&app_state.pool, account.id, None).await?;
    tracing::info!("logout: {}", account.username);

    let mut headers = HeaderMap::new();
    clear_session_cookies(&mut headers);

    Ok((headers, ApiResponse::ok((), "Logged out successfully")))
}
