//! API Error Module
//!
//! This module defines the error taxonomy for the account backend and its
//! conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError definition and constructors
//! └── conversion.rs - IntoResponse implementation (JSON envelope)
//! ```
//!
//! # Error Taxonomy
//!
//! - `Validation` - missing/blank required fields (400)
//! - `Conflict` - duplicate username or email (409)
//! - `NotFound` - no matching account (404)
//! - `Unauthorized` - bad credentials or bad/expired/reused token (401)
//! - `Upstream` - media upload failure (502)
//! - `Database` / `Hashing` / `Token` / `Io` - internal failures (500)
//!
//! All handlers return `Result<_, ApiError>`; the `IntoResponse` impl in
//! `conversion` renders the uniform JSON error envelope.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
