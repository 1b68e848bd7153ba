/**
 * Server Initialization
 *
 * Builds the running application from configuration: connects the Postgres
 * pool, runs embedded migrations, assembles state, and configures routes.
 *
 * # Initialization Steps
 *
 * 1. Connect the database pool from `AppConfig.database_url`
 * 2. Run `sqlx::migrate!` (accounts table, unique constraints)
 * 3. Build `AppState` (pool, auth config, media client)
 * 4. Create the router
 */

use axum::Router;
use sqlx::postgres::PgPoolOptions;

use crate::routes::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;

/// Initialization failure
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("database connection failed: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Create and configure the Axum application
///
/// The unique constraints created by the migrations are load-bearing:
/// `create_account` relies on them as the source of truth for duplicate
/// identities.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    tracing::info!("running database migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool, config.auth.clone(), &config.media);

    tracing::info!("router configured");
    Ok(create_router(app_state))
}
