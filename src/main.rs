use anyhow::Context;
use std::net::SocketAddr;

use impostor::{app::build_router, config::ServerConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .init();

    tracing::info!("Impostor server starting ({})", config.environment);

    let state = AppState::new(config.secret_key.clone());

    // Reap idle sessions in the background
    let session_manager = state.session_manager.clone();
    let session_ttl = time::Duration::try_from(config.session_ttl)
        .context("Session TTL out of range")?;
    let mut cleanup_interval = tokio::time::interval(config.cleanup_interval);
    tokio::spawn(async move {
        loop {
            cleanup_interval.tick().await;
            session_manager
                .write()
                .await
                .cleanup_idle_sessions(session_ttl);
        }
    });

    let app = build_router(state, &config.allowed_origins());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on http://{} (public url {})", addr, config.public_url);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
