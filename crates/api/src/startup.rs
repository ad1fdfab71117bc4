//! Process bootstrap: config → store → notifier → router → listener.

use std::net::SocketAddr;
use std::sync::Arc;

use folio_db::PgSubmissionStore;
use folio_events::{EmailDelivery, NotificationDispatcher};

use crate::config::ServerConfig;
use crate::router::build_app_router;
use crate::state::AppState;

/// Everything that can stop the server from starting (or keep running).
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migrations(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Build the notification dispatcher from optional email settings.
///
/// Missing credentials or an unusable address disable notifications; neither
/// is fatal.
pub fn build_dispatcher(config: &ServerConfig) -> NotificationDispatcher {
    let Some(email) = &config.email else {
        tracing::warn!("EMAIL_USER or EMAIL_PASS not set, owner notifications disabled");
        return NotificationDispatcher::disabled();
    };

    match EmailDelivery::new(email) {
        Ok(delivery) => {
            tracing::info!(
                smtp_host = %email.smtp_host,
                smtp_port = email.smtp_port,
                "Email notifications enabled"
            );
            NotificationDispatcher::new(Arc::new(delivery), email.timeout)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Email settings unusable, owner notifications disabled");
            NotificationDispatcher::disabled()
        }
    }
}

/// Connect to the database, apply migrations and assemble the shared state.
pub async fn build_state(config: ServerConfig) -> Result<AppState, StartupError> {
    let pool = folio_db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    folio_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    folio_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let notifications = build_dispatcher(&config);

    Ok(AppState {
        store: Arc::new(PgSubmissionStore::new(pool)),
        notifications,
        config: Arc::new(config),
    })
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let addr = config.socket_addr();
    let state = build_state(config).await?;
    let app = build_app_router(state.clone(), &state.config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    state.notifications.drain().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
