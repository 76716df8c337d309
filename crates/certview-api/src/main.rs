//! # certview-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the certificate API.
//! Binds to the configured port (default 5002).

use certview_api::config::AppConfig;
use certview_api::db::LazyPool;
use certview_api::service::CertificateService;
use certview_api::state::AppState;
use certview_api::store::MemoryStore;
use metrics_exporter_prometheus::PrometheusBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;
    tracing::debug!(?config, "configuration loaded");

    // Store selection: PostgreSQL when DATABASE_URL is set, otherwise in-memory.
    let certificates = match &config.database_url {
        Some(url) => {
            tracing::info!("Using PostgreSQL store; connecting on first request");
            CertificateService::postgres(LazyPool::new(url.as_str(), config.db_max_connections))
        }
        None => {
            let store = match &config.fixtures_path {
                Some(path) => MemoryStore::from_fixture_file(path).map_err(|e| {
                    tracing::error!("Fixture loading failed: {e}");
                    e
                })?,
                None => MemoryStore::new(),
            };
            tracing::warn!(
                records = store.len(),
                "DATABASE_URL not set; serving from the in-memory store"
            );
            CertificateService::in_memory(store)
        }
    };

    let port = config.port;
    let mut state = AppState {
        certificates,
        ..AppState::with_config(config)
    };

    if state.config.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            tracing::error!("Failed to install Prometheus recorder: {e}");
            e
        })?;
        certview_api::middleware::metrics::describe();
        state = state.with_metrics(handle);
    }

    let app = certview_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("certview API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
