//! clipstream - user-account backend
//!
//! Registration with media upload, credential login, JWT access/refresh
//! token issuance, logout, token rotation, password change, and profile
//! updates, backed by Postgres and an external media-upload service.
//!
//! The interesting part is the session-token lifecycle: how access and
//! refresh tokens are issued, verified, rotated, and invalidated, and how
//! that interacts with password hashing and the single stored refresh token
//! per account. See the `auth` module.

/// Account storage, tokens, and session handlers
pub mod auth;

/// Error taxonomy and HTTP conversion
pub mod error;

/// Media staging and upload client
pub mod media;

/// Authentication middleware
pub mod middleware;

/// Success response envelope
pub mod response;

/// Route configuration
pub mod routes;

/// Configuration, state, and server assembly
pub mod server;
