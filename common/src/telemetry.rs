// Telemetry module for structured logging, metrics, and tracing

use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{RandomIdGenerator, Sampler, TracerProvider},
    Resource,
};
use std::net::SocketAddr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

/// Initialize structured logging with JSON formatting and trace context
///
/// Sets up the tracing subscriber with JSON output, log levels from
/// configuration or environment, and an optional OpenTelemetry layer when an
/// OTLP endpoint is configured.
pub fn init_logging(log_level: &str, tracing_endpoint: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_target(true)
        .with_filter(env_filter);

    let registry = tracing_subscriber::registry().with(json_layer);

    if let Some(endpoint) = tracing_endpoint {
        let tracer = init_tracer(endpoint)?;
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);
        registry
            .with(telemetry_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    } else {
        registry
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;
    }

    tracing::info!(
        log_level = log_level,
        tracing_endpoint = tracing_endpoint,
        "Structured logging initialized"
    );

    Ok(())
}

/// Initialize OpenTelemetry tracer with OTLP exporter
fn init_tracer(endpoint: &str) -> Result<opentelemetry_sdk::trace::Tracer> {
    use opentelemetry_sdk::runtime::Tokio;

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .build_span_exporter()
        .map_err(|e| anyhow::anyhow!("Failed to build span exporter: {}", e))?;

    let tracer_provider = TracerProvider::builder()
        .with_batch_exporter(exporter, Tokio)
        .with_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(Resource::new(vec![
                    KeyValue::new("service.name", "canteen-menu"),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                ])),
        )
        .build();

    global::set_tracer_provider(tracer_provider.clone());

    let tracer = tracer_provider.tracer("canteen-menu");

    tracing::info!(endpoint = endpoint, "OpenTelemetry tracer initialized");

    Ok(tracer)
}

/// Shutdown OpenTelemetry tracer provider
///
/// This should be called on graceful shutdown to flush remaining spans
pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}

/// Initialize Prometheus metrics exporter
///
/// Registers all refresh-cycle metrics:
/// - menu_refresh_success_total: Counter for refresh cycles that reached Ready
/// - menu_refresh_failed_total: Counter for refresh cycles that reached Error
/// - menu_refresh_duration_seconds: Histogram for full-cycle duration
/// - menu_items_today: Gauge for record count in the current view
pub fn init_metrics(metrics_port: u16) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", metrics_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid metrics port: {}", e))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus exporter: {}", e))?;

    describe_counter!(
        "menu_refresh_success_total",
        "Total number of refresh cycles that produced a menu view"
    );
    describe_counter!(
        "menu_refresh_failed_total",
        "Total number of refresh cycles that ended in the error state"
    );
    describe_histogram!(
        "menu_refresh_duration_seconds",
        "Duration of full refresh cycles in seconds"
    );
    describe_gauge!(
        "menu_items_today",
        "Number of menu records in the currently exposed view"
    );

    tracing::info!(
        metrics_port = metrics_port,
        "Prometheus metrics exporter initialized"
    );

    Ok(())
}

/// Record a refresh cycle that produced a view
#[inline]
pub fn record_refresh_success(cycle_id: &Uuid, duration_seconds: f64, item_count: usize) {
    counter!("menu_refresh_success_total").increment(1);
    histogram!("menu_refresh_duration_seconds", "outcome" => "success").record(duration_seconds);
    gauge!("menu_items_today").set(item_count as f64);
    tracing::debug!(cycle_id = %cycle_id, item_count, "Refresh metrics recorded");
}

/// Record a refresh cycle that ended in the error state
#[inline]
pub fn record_refresh_failure(cycle_id: &Uuid, duration_seconds: f64, reason: &str) {
    counter!("menu_refresh_failed_total", "reason" => reason.to_string()).increment(1);
    histogram!("menu_refresh_duration_seconds", "outcome" => "failure").record(duration_seconds);
    tracing::debug!(cycle_id = %cycle_id, reason, "Refresh failure metrics recorded");
}
