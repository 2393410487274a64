// Scheduler binary entry point
//
// Runs the menu refresh loop and logs every exposed-state transition; the
// logged state is the same structure a presentation layer would consume.

use anyhow::Result;
use common::config::Settings;
use common::fetch::HttpMenuSource;
use common::models::MenuState;
use common::scheduler::{RefreshConfig, RefreshEngine};
use common::telemetry;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::Error::new(e)
    })?;
    settings.validate().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        anyhow::Error::msg(e)
    })?;

    // Initialize tracing/logging
    telemetry::init_logging(
        &settings.observability.log_level,
        settings.observability.tracing_endpoint.as_deref(),
    )?;

    info!("Starting canteen menu scheduler");
    info!(
        menu_url = %settings.menu.url,
        refresh_interval_seconds = settings.scheduler.refresh_interval_seconds,
        "Configuration loaded"
    );

    // Initialize Prometheus metrics exporter
    telemetry::init_metrics(settings.observability.metrics_port).map_err(|e| {
        error!(error = %e, "Failed to initialize metrics exporter");
        e
    })?;

    // Create the HTTP menu source
    let source = HttpMenuSource::new(
        settings.menu.url.clone(),
        settings.menu.fetch_timeout_seconds,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to create menu source");
        e
    })?;
    info!("Menu source initialized");

    // Create the refresh engine
    let refresh_config = RefreshConfig {
        refresh_interval_seconds: settings.scheduler.refresh_interval_seconds,
        delimiter: settings.menu.delimiter,
        timezone: settings.menu_timezone(),
    };
    let engine = Arc::new(RefreshEngine::new(refresh_config, Arc::new(source)));
    info!("Refresh engine created");

    // Log every state transition; this is the presentation handoff.
    let mut state_rx = engine.subscribe();
    tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            let state = state_rx.borrow_and_update().clone();
            match state {
                MenuState::Idle => {}
                MenuState::Loading => info!(state = "loading", "Menu refresh in progress"),
                MenuState::Ready { view, as_of } => {
                    if view.is_empty() {
                        info!(state = "ready", as_of = %as_of, "Menu not updated yet for today");
                    } else {
                        info!(
                            state = "ready",
                            as_of = %as_of,
                            categories = ?view.categories(),
                            records = view.record_count(),
                            "Menu view ready"
                        );
                    }
                }
                MenuState::Error { message } => {
                    warn!(state = "error", message = %message, "Menu unavailable");
                }
            }
        }
    });

    // Set up graceful shutdown
    let engine_for_shutdown = engine.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        info!("Received Ctrl+C signal, initiating graceful shutdown");
        engine_for_shutdown.stop();
    });

    // Run the refresh loop until shutdown
    engine.run().await;

    telemetry::shutdown_tracer();
    info!("Scheduler shut down");
    Ok(())
}
