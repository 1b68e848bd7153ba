//! Session Handlers Module
//!
//! HTTP handlers for the account/session lifecycle. Each handler lives in a
//! focused submodule.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request/response DTOs, sanitized projection
//! ├── register.rs - Registration with media upload
//! ├── login.rs    - Credential login + token pair issuance
//! ├── logout.rs   - Refresh-token invalidation
//! ├── refresh.rs  - Token rotation
//! ├── password.rs - Password change
//! ├── profile.rs  - Profile / avatar / cover-image updates
//! └── me.rs       - Current account lookup
//! ```
//!
//! # Session Flow
//!
//! 1. **Register**: multipart fields + avatar → account created → sanitized projection
//! 2. **Login**: credentials verified → token pair issued, refresh token stored
//! 3. **Refresh**: valid stored refresh token → pair rotated atomically
//! 4. **Logout**: stored refresh token cleared, cookies expired

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Token refresh handler
pub mod refresh;

/// Password change handler
pub mod password;

/// Profile update handlers
pub mod profile;

/// Current account handler
pub mod me;

// Re-export commonly used types and handlers
pub use types::{
    AccountResponse, ChangePasswordRequest, LoginRequest, RefreshRequest, SessionResponse,
    UpdateProfileRequest,
};

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use password::change_password;
pub use profile::{update_avatar, update_cover_image, update_profile};
pub use refresh::refresh_token;
pub use register::register;
