/**
 * Registration Handler
 *
 * POST /api/v1/users/register (multipart)
 *
 * # Registration Process
 *
 * 1. Parse multipart fields; stage avatar/cover files to temp storage
 * 2. Validate required fields (blank after trimming rejects)
 * 3. Reject duplicate username/email (DB constraint is the backstop)
 * 4. Upload the avatar (mandatory - failure fails the whole operation)
 * 5. Upload the cover image (optional - failure falls back to "")
 * 6. Hash the password and create the account
 * 7. Return the sanitized account projection
 *
 * Staged temp files are removed on every path, including early errors.
 */

use axum::extract::{Multipart, State};

use crate::auth::accounts::{self, NewAccount};
use crate::auth::handlers::types::AccountResponse;
use crate::error::ApiError;
use crate::media::StagedFile;
use crate::response::ApiResponse;
use crate::server::state::AppState;

/// Parsed multipart registration form
#[derive(Default)]
struct RegisterForm {
    full_name: String,
    email: String,
    username: String,
    password: String,
    avatar: Option<StagedFile>,
    cover_image: Option<StagedFile>,
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - blank required field, or missing avatar file
/// * `409 Conflict` - username or email already registered
/// * `502 Bad Gateway` - mandatory avatar upload failed
/// * `500 Internal Server Error` - hashing or persistence failure
pub async fn register(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Result<ApiResponse<AccountResponse>, ApiError> {
    let form = parse_form(&app_state, multipart).await?;
    tracing::info!("registration request for username: {}", form.username);

    // Blank-after-trim means missing; trimming already happened during parse
    if form.full_name.is_empty()
        || form.email.is_empty()
        || form.username.is_empty()
        || form.password.trim().is_empty()
    {
        return Err(ApiError::validation("All fields are required"));
    }

    if accounts::find_conflicting(&app_state.pool, &form.username, &form.email)
        .await?
        .is_some()
    {
        tracing::warn!("duplicate registration for username: {}", form.username);
        return Err(ApiError::conflict(
            "Account with this email or username already exists",
        ));
    }

    let avatar = form
        .avatar
        .ok_or_else(|| ApiError::validation("Avatar file is required"))?;

    // Mandatory upload: a failure fails the whole registration. The staged
    // cover image, if any, is cleaned up by its drop guard on this path.
    let avatar_url = app_state
        .media
        .upload(avatar)
        .await
        .map_err(|_| ApiError::upstream("Avatar upload failed"))?;

    // Optional upload: tolerated failure falls back to an empty cover image
    let cover_image_url = match form.cover_image {
        Some(staged) => app_state.media.upload(staged).await.unwrap_or_default(),
        None => String::new(),
    };

    let password_hash = accounts::hash_password(&form.password, app_state.auth.hash_cost)?;

    let account = accounts::create_account(
        &app_state.pool,
        NewAccount {
            username: form.username,
            email: form.email,
            full_name: form.full_name,
            avatar_url,
            cover_image_url,
            password_hash,
        },
    )
    .await?;

    tracing::info!("account created: {} ({})", account.username, account.email);

    Ok(ApiResponse::created(
        AccountResponse::from(&account),
        "Account created successfully",
    ))
}

/// Read multipart fields, staging file parts to temp storage
async fn parse_form(
    app_state: &AppState,
    mut multipart: Multipart,
) -> Result<RegisterForm, ApiError> {
    let mut form = RegisterForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("Malformed multipart request"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "fullName" => form.full_name = text(field).await?,
            "email" => form.email = text(field).await?,
            "username" => form.username = text(field).await?,
            "password" => form.password = raw_text(field).await?,
            "avatar" => form.avatar = Some(stage(app_state, field).await?),
            "coverImage" => form.cover_image = Some(stage(app_state, field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn raw_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|_| ApiError::validation("Malformed multipart request"))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    Ok(raw_text(field).await?.trim().to_string())
}

async fn stage(
    app_state: &AppState,
    field: axum::extract::multipart::Field<'_>,
) -> Result<StagedFile, ApiError> {
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|_| ApiError::validation("Malformed multipart request"))?;

    Ok(StagedFile::stage(&app_state.media_temp_dir, &file_name, &bytes).await?)
}
