//! MailGuard Server
//!
//! HTTP API for multi-stage email spam/phishing analysis. Delegates
//! classification and attribution to configurable backends and applies the
//! trust-override, sentence re-scoring, and downgrade decision logic.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use mailguard_server::{create_router, AppState, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "mailguard-server")]
#[command(about = "MailGuard spam analysis API server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "mailguard.yaml")]
    config: String,

    /// Listen address
    #[arg(short = 'l', long, default_value = "127.0.0.1")]
    listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "8000")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting MailGuard Server");

    // Load configuration
    let config = ServerConfig::load(&cli.config)?;
    info!("Configuration loaded successfully");

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Initialize application state (build classifier, explainer, pipeline)
    let state = AppState::from_config(&config, metrics_handle)?;
    info!("Application state initialized successfully");

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let app = create_router(state);

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
        EnvFilter::new("mailguard=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mailguard=info"))
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
        "mailguard_requests_total",
        "Total number of analysis requests received"
    );
    metrics::describe_counter!(
        "mailguard_verdicts_total",
        "Total number of final verdicts by label"
    );
    metrics::describe_counter!(
        "mailguard_trust_overrides_total",
        "Total number of verdicts forced safe by a trust pattern"
    );
    metrics::describe_counter!(
        "mailguard_downgrades_total",
        "Total number of spam verdicts downgraded for lack of corroboration"
    );
    metrics::describe_histogram!(
        "mailguard_analysis_latency_us",
        metrics::Unit::Microseconds,
        "End-to-end analysis latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
