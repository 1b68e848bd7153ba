/**
 * Server Configuration
 *
 * All configuration is read from the environment exactly once at startup and
 * carried in explicit structs from then on. Token issuance, password hashing
 * and the media client take their config as arguments; nothing reads env
 * vars past this module.
 *
 * # Variables
 *
 * - `SERVER_PORT`                 (default 8000)
 * - `DATABASE_URL`                (required)
 * - `ACCESS_TOKEN_SECRET`         (required)
 * - `ACCESS_TOKEN_TTL_SECS`       (default 900 = 15 minutes)
 * - `REFRESH_TOKEN_SECRET`        (required)
 * - `REFRESH_TOKEN_TTL_SECS`      (default 864000 = 10 days)
 * - `PASSWORD_HASH_COST`          (default 10)
 * - `MEDIA_UPLOAD_URL`            (required)
 * - `MEDIA_API_KEY`               (default empty)
 * - `MEDIA_TEMP_DIR`              (default "./tmp/uploads")
 */

use std::path::PathBuf;

/// Token and password-hashing configuration
///
/// Access and refresh tokens are signed with distinct secrets so possession
/// of one type cannot forge the other.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for access tokens
    pub access_token_secret: String,
    /// Access token lifetime in seconds (short)
    pub access_token_ttl_secs: u64,
    /// HMAC secret for refresh tokens
    pub refresh_token_secret: String,
    /// Refresh token lifetime in seconds (long)
    pub refresh_token_ttl_secs: u64,
    /// bcrypt cost factor
    pub hash_cost: u32,
}

/// Media upload service configuration
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Upload endpoint of the external media service
    pub upload_url: String,
    /// Bearer token for the media service (may be empty for local stubs)
    pub api_key: String,
    /// Directory where multipart files are staged before upload
    pub temp_dir: PathBuf,
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Postgres connection string
    pub database_url: String,
    pub auth: AuthConfig,
    pub media: MediaConfig,
}

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}")]
    Invalid(&'static str),
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// Called once from `main`; the resulting struct is the only
    /// configuration source for the rest of the process.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: parsed_or("SERVER_PORT", 8000)?,
            database_url: required("DATABASE_URL")?,
            auth: AuthConfig {
                access_token_secret: required("ACCESS_TOKEN_SECRET")?,
                access_token_ttl_secs: parsed_or("ACCESS_TOKEN_TTL_SECS", 900)?,
                refresh_token_secret: required("REFRESH_TOKEN_SECRET")?,
                refresh_token_ttl_secs: parsed_or("REFRESH_TOKEN_TTL_SECS", 864_000)?,
                hash_cost: parsed_or("PASSWORD_HASH_COST", 10)?,
            },
            media: MediaConfig {
                upload_url: required("MEDIA_UPLOAD_URL")?,
                api_key: std::env::var("MEDIA_API_KEY").unwrap_or_default(),
                temp_dir: std::env::var("MEDIA_TEMP_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./tmp/uploads")),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed config for unit tests; low hash cost keeps bcrypt fast
    pub fn test_auth_config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-test-secret".to_string(),
            access_token_ttl_secs: 900,
            refresh_token_secret: "refresh-test-secret".to_string(),
            refresh_token_ttl_secs: 864_000,
            hash_cost: 4,
        }
    }

    #[test]
    fn test_secrets_are_distinct_in_fixture() {
        let config = test_auth_config();
        assert_ne!(config.access_token_secret, config.refresh_token_secret);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Missing("DATABASE_URL");
        assert!(error.to_string().contains("DATABASE_URL"));
    }
}

#[cfg(test)]
pub use tests::test_auth_config;
