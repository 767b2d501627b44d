//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use blog_common::{AppConfig, AppError, JwtService};
use blog_db::{
    create_pool, run_migrations, PgCommentRepository, PgPool, PgPostRepository, PgUserRepository,
};
use blog_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// When a static directory is configured, paths outside /api are served from
/// it, falling back to its `index.html` for client-side routes.
///
/// # Errors
/// Returns a configuration error if the middleware cannot be built
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let mut router = create_router();

    if let Some(dir) = &config.static_files.dir {
        let index = Path::new(dir).join("index.html");
        info!(dir = %dir, "Serving static client");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    let router = apply_middleware(
        router,
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// The pool is returned alongside the state so the caller can close it on
/// shutdown.
pub async fn create_app_state(config: AppConfig) -> Result<(AppState, PgPool), AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = blog_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
    }

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.session_expiry,
    ));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok((AppState::new(service_context, config), pool))
}

/// Run the HTTP server until Ctrl-C or SIGTERM
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    // Create app state
    let (state, pool) = create_app_state(config).await?;

    // Build application
    let app = create_app(state)?;

    // Run server
    let result = run_server(app, &address).await;

    pool.close().await;
    info!("Database pool closed");

    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
