//! # Little Lemon API Server
//!
//! Serves the menu and booking JSON resources, the public booking endpoint
//! and the restaurant's HTML pages.
//!
//! ## Storage
//!
//! With `DATABASE_URL` set, the server connects to PostgreSQL and applies
//! pending migrations at startup. Without it, data lives in memory and is
//! lost on restart.
//!
//! ## Usage
//!
//! ```bash
//! JWT_SECRET=... cargo run -p littlelemon-api
//! ```

use littlelemon_api::{
    app::{build_router, AppState},
    config::Config,
};
use littlelemon_shared::db::{
    migrations::run_migrations,
    pool::{close_pool, create_pool, DatabaseConfig},
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG and LOG_FORMAT, so load it before the subscriber
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!(
        "Little Lemon API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let state = match &config.database {
        Some(db) => {
            let pool = create_pool(DatabaseConfig {
                url: db.url.clone(),
                max_connections: db.max_connections,
                ..Default::default()
            })
            .await?;

            run_migrations(&pool).await?;
            AppState::postgres(pool, config.clone())
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory storage (data is lost on restart)");
            AppState::in_memory(config.clone())
        }
    };

    let pool = state.db.clone();
    let app = build_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Installs the global subscriber; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "littlelemon_api=debug,littlelemon_shared=debug,tower_http=debug".into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
