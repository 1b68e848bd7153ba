/**
 * Password Change Handler
 *
 * POST /api/v1/users/change-password (authenticated)
 *
 * Verifies the old password against the stored hash, then re-hashes and
 * stores the new one. The stored refresh token is deliberately left in
 * place: sessions survive a password change, and logout remains the way to
 * force invalidation.
 */

use axum::{extract::State, Json};

use crate::auth::accounts;
use crate::auth::handlers::types::ChangePasswordRequest;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::server::state::AppState;

/// Change password handler
///
/// # Errors
///
/// * `400 Bad Request` - new password blank after trimming
/// * `401 Unauthorized` - old password incorrect
/// * `500 Internal Server Error` - database or hashing failure
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthUser(current): AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<ApiResponse<()>, ApiError> {
    if request.new_password.trim().is_empty() {
        return Err(ApiError::validation("New password is required"));
    }

    // The middleware's sanitized view has no hash; re-read the full row
    let account = accounts::find_by_id(&app_state.pool, current.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized request"))?;

    let valid = accounts::verify_password(&request.old_password, &account.password_hash)?;
    if !valid {
        tracing::warn!("password change with wrong old password: {}", account.username);
        return Err(ApiError::unauthorized("Old password is incorrect"));
    }

    let password_hash =
        accounts::hash_password(&request.new_password, app_state.auth.hash_cost)?;
    accounts::set_password_hash(&app_state.pool, account.id, &password_hash).await?;

    tracing::info!("password changed for: {}", account.username);

    Ok(ApiResponse::ok((), "Password changed successfully"))
}
