//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use elithe_common::{AppConfig, AppError, JwtService, QrCredentialIssuer};
use elithe_core::SnowflakeGenerator;
use elithe_db::{
    create_pool, run_migrations, PgConfirmationRepository, PgEventRepository, PgHealthCheck,
    PgMemberRepository, PoolConfig,
};
use elithe_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get the base stack only, so probes are never rate limited.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let request_timeout = Duration::from_secs(config.api.request_timeout_secs);

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        request_timeout,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes(), request_timeout);

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    // Identity verification and credential rendering
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let credential_issuer = Arc::new(QrCredentialIssuer::from_config(&config.credential));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories
    let member_repo = Arc::new(PgMemberRepository::new(pool.clone()));
    let event_repo = Arc::new(PgEventRepository::new(pool.clone()));
    let confirmation_repo = Arc::new(PgConfirmationRepository::new(pool.clone()));
    let health_check = Arc::new(PgHealthCheck::new(pool));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .member_repo(member_repo)
        .event_repo(event_repo)
        .confirmation_repo(confirmation_repo)
        .health_check(health_check)
        .identity_verifier(jwt_service)
        .credential_issuer(credential_issuer)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
