//! Civic Cache - TTL-cached access to municipal information feeds
//!
//! Serves every data category over HTTP through one shared cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civic_cache::api::create_router;
use civic_cache::source::{DataSource, HttpSource, StaticSource};
use civic_cache::{spawn_cleanup_task, AppState, CacheAsideRepository, Config, TtlCache};

/// Main entry point for the civic cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache and the origin data source
/// 4. Start the expired-entry sweep, unless disabled
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civic_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting civic cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl={}s, port={}, cleanup_interval={}s, source={}",
        config.default_ttl, config.server_port, config.cleanup_interval, config.source_base_url
    );

    // One cache for the whole process, injected into the repository
    let cache = Arc::new(TtlCache::new(config.default_ttl()));
    let source = build_source(&config)?;
    let repository = CacheAsideRepository::new(cache.clone(), source);
    let state = AppState::new(repository);

    let cleanup_handle = config
        .cleanup_interval()
        .map(|interval| spawn_cleanup_task(cache.clone(), interval));
    if cleanup_handle.is_none() {
        info!("Expired-entry sweep disabled, relying on lazy expiration");
    }

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

/// Picks the origin: a local JSON fixture when `SOURCE_FIXTURE` names one,
/// otherwise the REST origin at `SOURCE_BASE_URL`.
fn build_source(config: &Config) -> anyhow::Result<Arc<dyn DataSource>> {
    if let Ok(path) = std::env::var("SOURCE_FIXTURE") {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture {}", path))?;
        let document = serde_json::from_str(&text)
            .with_context(|| format!("fixture {} is not valid JSON", path))?;
        info!("Serving categories from fixture {}", path);
        return Ok(Arc::new(StaticSource::from_json(document)?));
    }

    Ok(Arc::new(HttpSource::from_config(config)?))
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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
