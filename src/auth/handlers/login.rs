/**
 * Login Handler
 *
 * POST /api/v1/users/login
 *
 * # Authentication Process
 *
 * 1. Require at least one of username/email
 * 2. Look up the account by either identity
 * 3. Verify the password with bcrypt
 * 4. Issue a fresh access/refresh pair
 * 5. Persist the new refresh token, overwriting any prior one - this
 *    invalidates every previously issued refresh token for the account
 * 6. Set both session cookies and return account + tokens
 *
 * # Security
 *
 * - Password verification uses bcrypt's constant-time comparison
 * - A failed password check leaves the stored refresh token unchanged
 */

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::auth::accounts;
use crate::auth::cookies::set_session_cookies;
use crate::auth::handlers::types::{AccountResponse, LoginRequest, SessionResponse};
use crate::auth::tokens::issue_token_pair;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - neither username nor email supplied
/// * `404 Not Found` - no matching account
/// * `401 Unauthorized` - password verification failed
/// * `500 Internal Server Error` - database, hashing, or signing failure
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = request
        .username
        .as_deref()
        .or(request.email.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("Username or email is required"))?;

    tracing::info!("login request for: {}", identity);

    let account = accounts::find_by_identity(&app_state.pool, identity)
        .await?
        .ok_or_else(|| {
            tracing::warn!("login for unknown identity: {}", identity);
            ApiError::not_found("Account does not exist")
        })?;

    let valid = accounts::verify_password(&request.password, &account.password_hash)?;
    if !valid {
        tracing::warn!("invalid password for: {}", account.username);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let pair = issue_token_pair(&app_state.auth, &account)?;

    // Rotation on login: the stored token is the single source of truth, so
    // overwriting it here invalidates any earlier session
    accounts::set_refresh_token(&app_state.pool, account.id, Some(&pair.refresh_token)).await?;

    tracing::info!("login successful: {} ({})", account.username, account.email);

    let mut headers = HeaderMap::new();
    set_session_cookies(
        &mut headers,
        &pair.access_token,
        app_state.auth.access_token_ttl_secs,
        &pair.refresh_token,
        app_state.auth.refresh_token_ttl_secs,
    );

    let body = ApiResponse::ok(
        SessionResponse {
            user: AccountResponse::from(&account),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        },
        "Login successful",
    );

    Ok((headers, body))
}
