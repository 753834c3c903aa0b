//! Salesboard main entry point

use anyhow::Context;
use clap::Parser;
use salesboard_api::{start_server, AppState};
use salesboard_config::{Config, ConfigError};
use salesboard_core::{HttpSeedSource, Seeder};
use salesboard_store::open_store;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "salesboard")]
#[command(author = "Salesboard Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Product transaction reporting API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: PathBuf) -> anyhow::Result<(Config, Option<String>)> {
    match Config::load(path) {
        Ok(config) => Ok((config, None)),
        Err(ConfigError::FileNotFound { path }) => Ok((
            Config::default(),
            Some(format!("Config file not found: {}, using defaults", path)),
        )),
        Err(e) => {
            eprintln!("{}", e.to_details());
            Err(e).context("Failed to load configuration")
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, warning) = load_config(args.config)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }

    log::info!(
        "Config loaded: backend={}, database={}, collection={}",
        config.database.backend, config.database.name, config.database.collection
    );

    let rt = Runtime::new()?;

    rt.block_on(async {
        let store = open_store(&config.database)
            .await
            .context("Failed to open transaction store")?;
        let seed_source = Arc::new(HttpSeedSource::from_config(&config.seed));

        if config.seed.initialize_on_startup {
            let seeder = Seeder::new(seed_source.clone(), store.clone());
            match seeder.initialize().await {
                Ok(report) => log::info!("Startup seed inserted {} records", report.inserted),
                Err(e) => log::error!("Startup seed failed: {}", e),
            }
        }

        let state = AppState::new(config, store, seed_source);
        start_server(state).await
    })
}
