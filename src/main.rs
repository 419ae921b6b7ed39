// scribegate - caching, rate-limited gateway for LLM chat completions

use anyhow::Result;
use clap::Parser;
use scribegate::cli::Args;
use scribegate::config::AppConfig;
use scribegate::server::create_router;
use scribegate::store::RedisStore;
use scribegate::upstream::UpstreamClient;
use scribegate::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(&args)?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting scribegate v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the runtime with the configured worker count
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(run(config))
}

async fn run(config: AppConfig) -> Result<()> {
    // Phase 4: Connect to the shared store
    let store = Arc::new(RedisStore::connect(&config.redis).await?);

    // Phase 5: Construct the upstream client (fails fast on a missing key)
    let upstream = UpstreamClient::new(&config.upstream)?;

    // Phase 6: Build and start the HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, store, upstream)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 7: Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
