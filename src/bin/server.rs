use chrono::Local;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use vending_dashboard::dashboard::Dashboard;
use vending_dashboard::dashboard::chart::WaterQualityCharts;
use vending_dashboard::server::config::DashboardConfig;
use vending_dashboard::version::{VERSION, version_line};
use vending_dashboard::web::{AppState, create_axum_router};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "dashboard.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal.");
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("{}", version_line());
        return Ok(());
    }

    let args = Args::parse();

    let config = match DashboardConfig::load(args.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Failed to load dashboard configuration: {e}");
            return Err(e.into());
        }
    };

    init_logging(&config.log_dir);
    info!(version = VERSION, "Starting vending dashboard.");

    let charts = WaterQualityCharts::generate(
        &mut rand::rng(),
        Local::now().naive_local(),
        &config.chart_settings(),
    );
    info!(
        points = config.chart_points,
        interval_secs = config.chart_interval_secs,
        "Generated water quality chart series."
    );
    let dashboard = Dashboard::new(config.dashboard_settings(), charts);

    let app_state = match AppState::new(dashboard) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!(error = %e, "Failed to prepare page templates.");
            return Err(e.into());
        }
    };
    let app = create_axum_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_address).await?;
    info!(address = %config.listen_address, "Dashboard HTTP server listening.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard server stopped.");
    Ok(())
}
