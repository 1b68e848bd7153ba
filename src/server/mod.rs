//! Server Module
//!
//! Configuration loading, shared application state, and server assembly.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── config.rs - Explicit configuration structs (env read once)
//! ├── state.rs  - AppState and FromRef impls
//! └── init.rs   - Pool connection, migrations, router assembly
//! ```

/// Configuration structs and env loading
pub mod config;

/// Application state
pub mod state;

/// Server assembly
pub mod init;

pub use config::{AppConfig, AuthConfig, MediaConfig};
pub use init::create_app;
pub use state::AppState;
