//! gastoweb main entry point

use clap::Parser;
use gastoweb_api::start_server;
use gastoweb_config::Config;
use gastoweb_store::SqliteStore;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "gastoweb")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal ledger with a monthly financial dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = if args.config.exists() {
        Config::load(args.config.clone())?
    } else {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
        Config::default()
    };

    log::info!("Opening database {}", config.database.url);
    let store = SqliteStore::connect(&config.database.url, config.database.max_connections).await?;

    start_server(config, store).await?;
    Ok(())
}
