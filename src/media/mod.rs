//! Media Upload Module
//!
//! Files arrive as multipart fields, are staged to local temp storage, then
//! forwarded to the external media service which returns a persistent URL.
//! The staged local file is removed on both the success and failure paths;
//! cleanup failures are logged and otherwise ignored.
//!
//! # Module Structure
//!
//! ```text
//! media/
//! ├── mod.rs     - Module exports and documentation
//! ├── staging.rs - Temp-file staging for multipart uploads
//! └── client.rs  - HTTP client for the media service
//! ```
//!
//! # Flow
//!
//! 1. Handler reads a multipart field and stages it via `StagedFile::stage`
//! 2. `MediaClient::upload` posts the file and deletes the local copy
//! 3. The returned URL is persisted on the account

/// Temp-file staging for multipart uploads
pub mod staging;

/// HTTP client for the media service
pub mod client;

pub use client::{MediaClient, MediaError};
pub use staging::StagedFile;
