/**
 * API Error Types
 *
 * This module defines the error type used across HTTP handlers. Each variant
 * maps to a fixed HTTP status code, and internal variants deliberately hide
 * their details from the response body.
 *
 * # Security
 *
 * Token verification failures (malformed, expired, or for a deleted account)
 * are all surfaced as `Unauthorized` by callers, so a client cannot tell why
 * a token was rejected.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors returned by account and session handlers
///
/// Client-facing variants carry a human-readable message that is included in
/// the JSON error envelope. Internal variants wrap the source error for
/// logging and render a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or blank required fields
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// An account with the same username or email already exists
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// No matching account
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Bad credentials, or a missing/invalid/expired/reused token
    #[error("{message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// The external media service rejected or failed an upload
    #[error("{message}")]
    Upstream {
        /// Human-readable error message
        message: String,
    },

    /// Database failure after validation passed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token issuance failure
    ///
    /// Verification failures are mapped to `Unauthorized` at the call site;
    /// this variant only covers signing errors during issuance.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Filesystem failure while staging an upload
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an upstream (media service) error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `Upstream` - 502 Bad Gateway
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message rendered into the error envelope
    ///
    /// Internal variants return a generic message; their source error is
    /// logged server-side only.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Conflict { message }
            | Self::NotFound { message }
            | Self::Unauthorized { message }
            | Self::Upstream { message } => message.clone(),
            Self::Database(_) | Self::Hashing(_) | Self::Token(_) | Self::Io(_) => {
                "Internal server error".to_string()
            }
        }
    }
}
