mod cli;
mod dashboard;
mod error;
mod import;
mod models;
mod store;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting scenario-report");
    cli.execute().await?;

    Ok(())
}
