use anyhow::Context;
use clap::Parser;
use huddle_server::{
    AppState, Cli, MeetingStore, MemoryStore, ServerConfig, SqliteStore, build_router, cors_layer,
    seed,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Cli::parse().apply(ServerConfig::from_env());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let store: Arc<dyn MeetingStore> = match &config.database_url {
        Some(url) => Arc::new(
            SqliteStore::connect(url)
                .await
                .with_context(|| format!("failed to open store at {url}"))?,
        ),
        None => {
            warn!("HUDDLE_DATABASE_URL not set, notes and meetings live in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    seed::seed_constant_meeting(store.as_ref())
        .await
        .context("failed to seed the constant meeting")?;

    let state = AppState::new(store, config.hub_queue);
    let app = build_router(state, cors_layer(&config.cors_origins));

    let addr = config
        .listen_addr()
        .with_context(|| format!("failed to resolve listen host {}", config.host))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Signaling server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited unexpectedly")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
