/**
 * Router Configuration
 *
 * Assembles all HTTP routes. Session-mutating routes that need an
 * authenticated caller are grouped behind the auth middleware; the public
 * routes (register, login, refresh) are mounted alongside them.
 *
 * # Routes
 *
 * Public:
 * - `POST /api/v1/users/register`      - multipart registration
 * - `POST /api/v1/users/login`         - credential login
 * - `POST /api/v1/users/refresh-token` - token rotation
 *
 * Protected (auth middleware):
 * - `POST  /api/v1/users/logout`
 * - `GET   /api/v1/users/me`
 * - `POST  /api/v1/users/change-password`
 * - `PATCH /api/v1/users/profile`
 * - `PATCH /api/v1/users/avatar`
 * - `PATCH /api/v1/users/cover-image`
 */

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::handlers;
use crate::middleware::auth::require_auth;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = Router::new()
        .route("/api/v1/users/logout", post(handlers::logout))
        .route("/api/v1/users/me", get(handlers::me))
        .route("/api/v1/users/change-password", post(handlers::change_password))
        .route("/api/v1/users/profile", patch(handlers::update_profile))
        .route("/api/v1/users/avatar", patch(handlers::update_avatar))
        .route("/api/v1/users/cover-image", patch(handlers::update_cover_image))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let public = Router::new()
        .route("/api/v1/users/register", post(handlers::register))
        .route("/api/v1/users/login", post(handlers::login))
        .route("/api/v1/users/refresh-token", post(handlers::refresh_token));

    Router::new()
        .merge(public)
        .merge(protected)
        .route("/healthz", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
