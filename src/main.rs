mod api;
mod app;
mod cli;
mod config;
mod form;
mod nav;
mod notify;
mod store;
mod task;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{ApiClient, PortfolioApi};
use crate::cli::Cli;
use crate::config::Config;
use crate::nav::Route;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; CLI runs stay quiet unless asked
    let default_filter = if cli.command.is_none() || cli.output.verbose {
        "portfolio_admin=debug,info"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(command) = cli.command {
        if let Err(e) = cli::run(command, &cli.output).await {
            cli::print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    let start = match cli.open.as_deref() {
        Some(path) => Route::parse(path).with_context(|| format!("Unknown route: {}", path))?,
        None => Route::Dashboard,
    };
    run_gui(start)
}

fn run_gui(start: Route) -> Result<()> {
    tracing::info!("Starting portfolio admin");

    let config = Config::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let api: Arc<dyn PortfolioApi> = Arc::new(ApiClient::new(&config.api)?);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([900.0, 800.0])
        .with_min_inner_size([640.0, 520.0])
        .with_title("Portfolio Admin");

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Admin",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::AdminApp::new(cc, config, api, start)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
