//! ReviewSentry Server
//!
//! HTTP surface for the review moderation pipeline. Accepts an uploaded
//! review report plus a recipient address, classifies every review against
//! the policy category registry, emails a take-down request per confirmed
//! violation, and mails the aggregate CSV report when the run completes.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

mod config;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "reviewsentry-server")]
#[command(about = "ReviewSentry review moderation server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8500")]
    port: u16,

    /// OpenAI API key (classification oracle)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, default_value = "")]
    openai_api_key: String,

    /// SendGrid API key (notification delivery)
    #[arg(long, env = "SENDGRID_API_KEY", hide_env_values = true, default_value = "")]
    sendgrid_api_key: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting ReviewSentry Server");

    // Load configuration
    let config = ServerConfig::load(&cli.config)?;
    info!("Configuration loaded successfully");
    info!("Upload dir: {}", config.upload_dir);
    info!("Output report: {}", config.output_path().display());
    info!("Classification model: {}", config.classify_model);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Build application state; this validates both API keys before any
    // request is accepted.
    let state = AppState::new(
        config,
        &cli.openai_api_key,
        &cli.sendgrid_api_key,
        metrics_handle,
    )?;
    info!("Application state initialized successfully");

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Graceful shutdown handler
    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("reviewsentry=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reviewsentry=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "reviewsentry_requests_total",
        "Total number of review submissions accepted"
    );
    metrics::describe_counter!(
        "reviewsentry_runs_total",
        "Total number of pipeline runs started"
    );
    metrics::describe_counter!(
        "reviewsentry_classifications_total",
        "Total number of (review, category) classification calls"
    );
    metrics::describe_counter!(
        "reviewsentry_flags_total",
        "Total number of tentative flags raised by classification"
    );
    metrics::describe_counter!(
        "reviewsentry_violations_total",
        "Total number of confirmed violations recorded"
    );
    metrics::describe_counter!(
        "reviewsentry_notifications_total",
        "Total number of take-down notifications delivered"
    );
    metrics::describe_counter!(
        "reviewsentry_run_failures_total",
        "Total number of pipeline runs aborted by an error"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
