/**
 * Access and Refresh Token Issuance
 *
 * This module creates and verifies the signed, time-bounded JWTs that make
 * up a session. Access tokens carry denormalized identity claims and expire
 * quickly; refresh tokens carry only the account id and live longer. The
 * two kinds are signed with distinct secrets, so possession of one type
 * cannot forge the other.
 *
 * All functions take `&AuthConfig` explicitly; there are no environment
 * lookups here.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::auth::accounts::Account;
use crate::server::config::AuthConfig;

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Username
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration (Unix timestamp)
    pub exp: u64,
}

/// Claims carried by a refresh token
///
/// Deliberately minimal: only the account id. Everything else is re-read
/// from the store when the token is redeemed.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Account ID
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration (Unix timestamp)
    pub exp: u64,
}

/// A freshly issued access/refresh token pair
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Issue a short-lived access token for an account
pub fn issue_access_token(
    config: &AuthConfig,
    account: &Account,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();
    let claims = AccessClaims {
        sub: account.id.to_string(),
        email: account.email.clone(),
        username: account.username.clone(),
        full_name: account.full_name.clone(),
        iat: now,
        exp: now + config.access_token_ttl_secs,
    };

    let key = EncodingKey::from_secret(config.access_token_secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Issue a long-lived refresh token carrying only the account id
pub fn issue_refresh_token(
    config: &AuthConfig,
    account_id: Uuid,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();
    let claims = RefreshClaims {
        sub: account_id.to_string(),
        iat: now,
        exp: now + config.refresh_token_ttl_secs,
    };

    let key = EncodingKey::from_secret(config.refresh_token_secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Issue a matching access/refresh pair for an account
pub fn issue_token_pair(
    config: &AuthConfig,
    account: &Account,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    Ok(TokenPair {
        access_token: issue_access_token(config, account)?,
        refresh_token: issue_refresh_token(config, account.id)?,
    })
}

/// Verify an access token and return its claims
///
/// Bad signatures and expired tokens both come back as errors; callers
/// collapse them into a single generic unauthorized response.
pub fn verify_access_token(
    config: &AuthConfig,
    token: &str,
) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.access_token_secret.as_ref());
    let data = decode::<AccessClaims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}

/// Verify a refresh token and return its claims
pub fn verify_refresh_token(
    config: &AuthConfig,
    token: &str,
) -> Result<RefreshClaims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.refresh_token_secret.as_ref());
    let data = decode::<RefreshClaims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}
