mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use app::DashboardApp;
use config::DashboardConfig;

/// Climate dashboard: hurricanes, temperature, arctic ice and sea levels.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Verbose logging and pretty-printed callback payloads
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = DashboardConfig {
        debug: args.debug,
        ..Default::default()
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    let datasets = data::loader::load_datasets(&config.data_dir)
        .with_context(|| format!("loading datasets from {}", config.data_dir.display()))?;
    let app = DashboardApp::new(datasets, &config)?;

    app::serve(app, config.bind_addr).await
}
