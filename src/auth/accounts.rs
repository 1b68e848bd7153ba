/**
 * Account Model and Database Operations
 *
 * This module owns the account row: identity fields, the bcrypt password
 * hash, media URLs and the single live refresh token. It is the only place
 * that hashes or verifies passwords, and the only place that touches the
 * stored refresh token.
 *
 * # Invariants
 *
 * - `password_hash` is only ever produced by `hash_password`; plaintext is
 *   never stored or compared directly.
 * - `refresh_token` is the source of truth for whether a previously issued
 *   refresh token is still valid; at most one is live per account.
 * - Refresh-token updates never re-hash the password.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Account row as stored in the database
///
/// Handlers must never serialize this directly; responses go through the
/// sanitized projection in `handlers::types::AccountResponse`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID)
    pub id: Uuid,
    /// Username (unique, stored lowercase)
    pub username: String,
    /// Email address (unique, stored lowercase)
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Avatar URL on the media service (required)
    pub avatar_url: String,
    /// Cover image URL, empty string when none was uploaded
    pub cover_image_url: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Currently valid refresh token, if any
    pub refresh_token: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an account
///
/// `password_hash` must already be hashed by the caller via `hash_password`.
#[derive(Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: String,
    pub password_hash: String,
}

const ACCOUNT_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
                               password_hash, refresh_token, created_at, updated_at";

/// Hash a plaintext password with bcrypt
///
/// The cost factor comes from `AuthConfig`; it is applied only when the
/// password field actually changes (registration and password change), never
/// on refresh-token or profile updates.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, cost)
}

/// Verify a plaintext password against a stored bcrypt hash
pub fn verify_password(plain: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(plain, hash)
}

/// Look up an account by username or email
///
/// The identity is lowercased before matching, mirroring how it is stored.
pub async fn find_by_identity(pool: &PgPool, identity: &str) -> Result<Option<Account>, sqlx::Error> {
    let identity = identity.trim().to_lowercase();

    let account = sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1 OR email = $1"
    ))
    .bind(&identity)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Look up an account by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Check whether an account with this username or email already exists
pub async fn find_conflicting(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1 OR email = $2"
    ))
    .bind(username.to_lowercase())
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Create a new account
///
/// The unique constraints on `username` and `email` are the source of truth
/// for duplicate identities; a constraint violation is mapped to
/// `ApiError::Conflict` so concurrent registrations racing past the
/// handler's pre-check still fail correctly.
pub async fn create_account(pool: &PgPool, fields: NewAccount) -> Result<Account, ApiError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let result = sqlx::query_as::<_, Account>(&format!(
        "INSERT INTO accounts \
             (id, username, email, full_name, avatar_url, cover_image_url, \
              password_hash, refresh_token, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, NULL, $8, $8) \
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(id)
    .bind(fields.username.to_lowercase())
    .bind(fields.email.to_lowercase())
    .bind(&fields.full_name)
    .bind(&fields.avatar_url)
    .bind(&fields.cover_image_url)
    .bind(&fields.password_hash)
    .bind(now)
    .fetch_one(pool)
    .await;

    result.map_err(|e| match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            ApiError::conflict("Account with this email or username already exists")
        }
        _ => ApiError::Database(e),
    })
}

/// Persist or clear the stored refresh token
///
/// Passing `None` clears the token (logout). This touches only the
/// refresh-token column, so the password is never re-hashed.
pub async fn set_refresh_token(
    pool: &PgPool,
    id: Uuid,
    token: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET refresh_token = $1, updated_at = $2 WHERE id = $3")
        .bind(token)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Atomically rotate the stored refresh token
///
/// Compare-and-swap on the refresh-token column: the update only applies
/// when the stored value still equals `current`. Of two concurrent refresh
/// attempts presenting the same token, exactly one observes success; the
/// other gets `None` and must be rejected as expired-or-used.
pub async fn rotate_refresh_token(
    pool: &PgPool,
    id: Uuid,
    current: &str,
    next: &str,
) -> Result<Option<Account>, sqlx::Error> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "UPDATE accounts SET refresh_token = $1, updated_at = $2 \
         WHERE id = $3 AND refresh_token = $4 \
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(next)
    .bind(Utc::now())
    .bind(id)
    .bind(current)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

/// Replace the stored password hash
///
/// The caller hashes via `hash_password` first; the stored refresh token is
/// deliberately left untouched (sessions survive a password change).
pub async fn set_password_hash(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET password_hash = $1, updated_at = $2 WHERE id = $3")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Update display name and/or email
///
/// `None` fields are left unchanged. Email uniqueness violations map to
/// `ApiError::Conflict` like registration.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    full_name: Option<&str>,
    email: Option<&str>,
) -> Result<Account, ApiError> {
    let result = sqlx::query_as::<_, Account>(&format!(
        "UPDATE accounts \
         SET full_name = COALESCE($1, full_name), \
             email = COALESCE($2, email), \
             updated_at = $3 \
         WHERE id = $4 \
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(full_name)
    .bind(email.map(|e| e.to_lowercase()))
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await;

    result.map_err(|e| match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            ApiError::conflict("Email already registered")
        }
        _ => ApiError::Database(e),
    })
}

/// Replace the avatar URL after a successful upload
pub async fn update_avatar_url(
    pool: &PgPool,
    id: Uuid,
    avatar_url: &str,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "UPDATE accounts SET avatar_url = $1, updated_at = $2 WHERE id = $3 \
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(avatar_url)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Replace the cover image URL after a successful upload
pub async fn update_cover_image_url(
    pool: &PgPool,
    id: Uuid,
    cover_image_url: &str,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "UPDATE accounts SET cover_image_url = $1, updated_at = $2 WHERE id = $3 \
         RETURNING {ACCOUNT_COLUMNS}"
    ))
    .bind(cover_image_url)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("p1", 4).unwrap();
        assert_ne!(hash, "p1");
        assert!(verify_password("p1", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same-password", 4).unwrap();
        let second = hash_password("same-password", 4).unwrap();
        assert_ne!(first, second);
    }
}
