//! Order Service - order dashboard with a cached order list

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_service::{
    api::create_router,
    cache::{CacheBackend, HttpCacheBackend, MemoryBackend, OrderCache},
    notify::HttpNotifier,
    session::SessionStore,
    spawn_cleanup_task,
    store::SqliteOrderStore,
    AppState, Config, OrderService,
};

const REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Main entry point for the order service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the order store and apply migrations
/// 4. Pick the cache backend (remote if `CACHE_URL` is set, in-process otherwise)
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Order Service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, database={}, cache={}, order_list_ttl={}s",
        config.server_port,
        config.database_url,
        config.cache_url.as_deref().unwrap_or("in-process"),
        config.order_list_ttl
    );

    let store = SqliteOrderStore::connect(&config.database_url, config.db_max_connections)
        .await
        .context("failed to open order store")?;
    store
        .run_migrations()
        .await
        .context("failed to migrate order store")?;

    let (backend, cleanup_handle) = cache_backend(&config)?;
    let cache = OrderCache::new(backend, config.order_list_ttl);

    let notifier = HttpNotifier::new(config.notification_url.clone(), REMOTE_TIMEOUT)
        .context("failed to build notification client")?;

    let state = AppState::new(
        OrderService::new(Arc::new(store), cache),
        SessionStore::new(),
        Arc::new(notifier),
    );
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the configured cache backend. The in-process backend comes with
/// its cleanup task.
fn cache_backend(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CacheBackend>, Option<JoinHandle<()>>)> {
    match &config.cache_url {
        Some(url) => {
            let backend = HttpCacheBackend::new(url, REMOTE_TIMEOUT)
                .with_context(|| format!("invalid CACHE_URL '{}'", url))?;
            info!("Using remote cache at {}", url);
            Ok((Arc::new(backend), None))
        }
        None => {
            let backend = MemoryBackend::new(config.max_cache_entries);
            let handle = spawn_cleanup_task(backend.shared(), config.cleanup_interval);
            info!("Using in-process cache");
            Ok((Arc::new(backend), Some(handle)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
