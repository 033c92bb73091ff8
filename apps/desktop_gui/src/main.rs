use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use list_controller::ListConfig;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{CountriesApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Browse, search and compare countries")]
struct Args {
    /// GraphQL endpoint of the countries API.
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file; defaults to ./countries.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    page_size: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(endpoint) = args.endpoint.as_deref() {
        settings.set_endpoint(endpoint)?;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    settings.validate()?;
    let list_config = ListConfig::with_page_size(settings.page_size)
        .context("page size must be greater than zero")?;

    tracing::info!(
        endpoint = %settings.graphql_endpoint,
        page_size = settings.page_size,
        "starting country explorer"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let startup = StartupConfig {
        list_config,
        endpoint: settings.graphql_endpoint.clone(),
    };
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Country Explorer")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Country Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(CountriesApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop GUI exited with error: {err}"))
}
