/**
 * Handler Request and Response Types
 *
 * Wire-level DTOs shared by the session handlers. The only account shape
 * that ever leaves the server is `AccountResponse`, which carries no
 * password hash and no refresh token.
 */

use serde::{Deserialize, Serialize};

use crate::auth::accounts::Account;
use crate::middleware::auth::CurrentAccount;

/// Login request
///
/// At least one of `username`/`email` must be present.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

/// Refresh request body
///
/// The refresh token may arrive here instead of the cookie (mobile clients).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Password change request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Profile update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Sanitized account projection
///
/// Safe to return to clients: never includes the password hash or the
/// stored refresh token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            avatar_url: account.avatar_url.clone(),
            cover_image_url: account.cover_image_url.clone(),
        }
    }
}

impl From<&CurrentAccount> for AccountResponse {
    fn from(account: &CurrentAccount) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            avatar_url: account.avatar_url.clone(),
            cover_image_url: account.cover_image_url.clone(),
        }
    }
}

/// Login/refresh response payload: the account plus both tokens
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: AccountResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            username: "al".to_string(),
            email: "a@x.com".to_string(),
            full_name: "A L".to_string(),
            avatar_url: "https://media.example/a.png".to_string(),
            cover_image_url: String::new(),
            password_hash: "$2b$04$secret".to_string(),
            refresh_token: Some("live-token".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_projection_excludes_secrets() {
        let response = AccountResponse::from(&account());
        let value = serde_json::to_value(&response).unwrap();
        let rendered = value.to_string();

        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("refreshToken").is_none());
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("live-token"));
    }

    #[test]
    fn test_projection_uses_camel_case() {
        let value = serde_json::to_value(AccountResponse::from(&account())).unwrap();
        assert_eq!(value["fullName"], "A L");
        assert_eq!(value["coverImage"], serde_json::Value::Null);
        assert_eq!(value["coverImageUrl"], "");
        assert_eq!(value["avatarUrl"], "https://media.example/a.png");
    }

    #[test]
    fn test_login_request_accepts_either_identity() {
        let by_email: LoginRequest =
            serde_json::from_str(r#"{"email": "a@x.com", "password": "p1"}"#).unwrap();
        assert!(by_email.username.is_none());
        assert_eq!(by_email.email.as_deref(), Some("a@x.com"));

        let by_username: LoginRequest =
            serde_json::from_str(r#"{"username": "al", "password": "p1"}"#).unwrap();
        assert_eq!(by_username.username.as_deref(), Some("al"));
    }

    #[test]
    fn test_refresh_request_token_optional() {
        let empty: RefreshRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.refresh_token.is_none());

        let with_token: RefreshRequest =
            serde_json::from_str(r#"{"refreshToken": "abc"}"#).unwrap();
        assert_eq!(with_token.refresh_token.as_deref(), Some("abc"));
    }
}
