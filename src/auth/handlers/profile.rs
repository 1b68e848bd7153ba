/**
 * Profile Update Handlers
 *
 * PATCH /api/v1/users/profile     - display name and/or email
 * PATCH /api/v1/users/avatar      - replace avatar (multipart)
 * PATCH /api/v1/users/cover-image - replace cover image (multipart)
 *
 * All three require authentication. Media updates upload to the external
 * service first and only persist the new URL once the upload succeeds.
 */

use axum::extract::{Multipart, State};
use axum::Json;

use crate::auth::accounts;
use crate::auth::handlers::types::{AccountResponse, UpdateProfileRequest};
use crate::error::ApiError;
use crate::media::StagedFile;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::server::state::AppState;

/// Update display name and/or email
///
/// # Errors
///
/// * `400 Bad Request` - no field supplied, or a supplied field is blank
/// * `409 Conflict` - email already registered to another account
pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthUser(current): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<ApiResponse<AccountResponse>, ApiError> {
    let full_name = normalize(request.full_name.as_deref())?;
    let email = normalize(request.email.as_deref())?;

    if full_name.is_none() && email.is_none() {
        return Err(ApiError::validation("At least one field is required"));
    }

    let account =
        accounts::update_profile(&app_state.pool, current.id, full_name, email).await?;

    tracing::info!("profile updated: {}", account.username);

    Ok(ApiResponse::ok(
        AccountResponse::from(&account),
        "Profile updated successfully",
    ))
}

/// Replace the avatar image
///
/// # Errors
///
/// * `400 Bad Request` - no avatar file in the multipart body
/// * `502 Bad Gateway` - media upload failed (URL left unchanged)
pub async fn update_avatar(
    State(app_state): State<AppState>,
    AuthUser(current): AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<AccountResponse>, ApiError> {
    let staged = staged_file(&app_state, multipart, "avatar")
        .await?
        .ok_or_else(|| ApiError::validation("Avatar file is required"))?;

    let avatar_url = app_state
        .media
        .upload(staged)
        .await
        .map_err(|_| ApiError::upstream("Avatar upload failed"))?;

    let account = accounts::update_avatar_url(&app_state.pool, current.id, &avatar_url).await?;
    tracing::info!("avatar updated: {}", account.username);

    Ok(ApiResponse::ok(
        AccountResponse::from(&account),
        "Avatar updated successfully",
    ))
}

/// Replace the cover image
///
/// Unlike registration, an explicit cover-image update is not optional:
/// the upload must succeed before the URL changes.
///
/// # Errors
///
/// * `400 Bad Request` - no cover image file in the multipart body
/// * `502 Bad Gateway` - media upload failed (URL left unchanged)
pub async fn update_cover_image(
    State(app_state): State<AppState>,
    AuthUser(current): AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<AccountResponse>, ApiError> {
    let staged = staged_file(&app_state, multipart, "coverImage")
        .await?
        .ok_or_else(|| ApiError::validation("Cover image file is required"))?;

    let cover_url = app_state
        .media
        .upload(staged)
        .await
        .map_err(|_| ApiError::upstream("Cover image upload failed"))?;

    let account =
        accounts::update_cover_image_url(&app_state.pool, current.id, &cover_url).await?;
    tracing::info!("cover image updated: {}", account.username);

    Ok(ApiResponse::ok(
        AccountResponse::from(&account),
        "Cover image updated successfully",
    ))
}

/// Trim an optional field; present-but-blank is a validation error
fn normalize(value: Option<&str>) -> Result<Option<&str>, ApiError> {
    match value.map(str::trim) {
        Some("") => Err(ApiError::validation("Fields must not be blank")),
        other => Ok(other),
    }
}

/// Pull the named file field out of a multipart body and stage it
async fn staged_file(
    app_state: &AppState,
    mut multipart: Multipart,
    field_name: &str,
) -> Result<Option<StagedFile>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Malformed multipart request"))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| ApiError::validation("Malformed multipart request"))?;

        return Ok(Some(
            StagedFile::stage(&app_state.media_temp_dir, &file_name, &bytes).await?,
        ));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize(Some("  A L  ")).unwrap(), Some("A L"));
        assert_eq!(normalize(None).unwrap(), None);
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(normalize(Some("   ")).is_err());
    }
}
