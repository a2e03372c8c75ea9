//! # vcontrold: vcontrol daemon
//!
//! Composition root that wires all adapters together and runs the poller.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise structured logging
//! - Construct the heat pump client and the catalogue store (adapters)
//! - Set up the integration: declared sensors, then the first refresh
//! - Start the background poller and serve the read-only HTTP surface
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use vcontrol_adapter_http_axum::router;
use vcontrol_adapter_http_axum::state::AppState;
use vcontrol_adapter_http_reqwest::VControlClient;
use vcontrol_adapter_storage_json::JsonCatalogueStore;
use vcontrol_app::event_bus::InProcessEventBus;
use vcontrol_app::services::integration::VControlIntegration;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Adapters
    let client = VControlClient::new(&config.device).context("invalid device configuration")?;
    let store = JsonCatalogueStore::new(&config.storage.catalogue_path);
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // Integration
    let mut integration = VControlIntegration::new(
        client,
        store,
        Arc::clone(&event_bus),
        config.poll_interval(),
    );
    let sensors = integration
        .setup()
        .await
        .context("heat pump integration setup failed")?;
    integration.start_background();

    // HTTP
    let app = router::build(AppState::new(sensors, Arc::clone(&event_bus)));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "vcontrold listening");

    if let Err(err) = integration.on_host_ready().await {
        tracing::warn!(error = %err, "refresh after startup failed");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    integration.teardown().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}
