/**
 * Application State
 *
 * Central state container for the Axum application: the Postgres pool, the
 * auth configuration, and the media service client. `FromRef` impls let
 * handlers extract just the piece they need.
 *
 * # Thread Safety
 *
 * Every field is cheaply cloneable and safe to share across request tasks:
 * `PgPool` is an internally shared handle, `AuthConfig` travels behind an
 * `Arc`, and `MediaClient` wraps a shared `reqwest::Client`.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::media::MediaClient;
use crate::server::config::{AuthConfig, MediaConfig};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Postgres connection pool
    pub pool: PgPool,
    /// Token and password-hashing configuration
    pub auth: Arc<AuthConfig>,
    /// Client for the external media service
    pub media: MediaClient,
    /// Staging directory for multipart uploads
    pub media_temp_dir: std::path::PathBuf,
}

impl AppState {
    /// Assemble application state from its parts
    pub fn new(pool: PgPool, auth: AuthConfig, media_config: &MediaConfig) -> Self {
        Self {
            pool,
            auth: Arc::new(auth),
            media: MediaClient::new(media_config),
            media_temp_dir: media_config.temp_dir.clone(),
        }
    }
}

/// Extract the database pool directly from `AppState`
impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

/// Extract the auth configuration directly from `AppState`
impl FromRef<AppState> for Arc<AuthConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

/// Extract the media client directly from `AppState`
impl FromRef<AppState> for MediaClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.media.clone()
    }
}
