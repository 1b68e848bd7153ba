//! Middleware Module
//!
//! HTTP middleware applied ahead of handlers. Currently this is the
//! authentication gate for protected routes.
//!
//! - **`auth`** - access-token verification and account loading

pub mod auth;

pub use auth::{require_auth, AuthUser, CurrentAccount};
