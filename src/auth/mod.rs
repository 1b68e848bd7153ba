//! Authentication Module
//!
//! Account storage, token issuance, and the HTTP handlers that tie them
//! into the session lifecycle.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── accounts.rs  - Account model and database operations
//! ├── tokens.rs    - Access/refresh JWT issuance and verification
//! ├── cookies.rs   - Session cookie helpers
//! └── handlers/    - HTTP handlers (register, login, refresh, ...)
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage and never serialized
//! - Access and refresh tokens use distinct signing secrets
//! - Exactly one refresh token is live per account; rotation is atomic
//! - Token rejection reasons are collapsed to a generic 401

/// Account model and database operations
pub mod accounts;

/// JWT issuance and verification
pub mod tokens;

/// Session cookie helpers
pub mod cookies;

/// HTTP handlers for session endpoints
pub mod handlers;

// Re-export commonly used types
pub use accounts::Account;
pub use tokens::TokenPair;
