mod api;
mod cache;
mod cli;
mod config;
mod mac;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before env_logger so RUST_LOG from the file is honored
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = cli::Cli::parse();
    cli::run(args).await
}
