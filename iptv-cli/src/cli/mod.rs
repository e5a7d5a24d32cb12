//! Command-line surface: argument parsing and dispatch

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use commands::clients::{self, DeleteArgs, ListArgs, Session};

#[derive(Parser)]
#[command(name = "iptv-cli", version, about = "IPTV Client Manager")]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new client
    Add,
    /// List all clients
    List(ListArgs),
    /// Edit an existing client
    Edit,
    /// Delete a client
    Delete(DeleteArgs),
}

pub async fn run(cli: Cli) -> Result<()> {
    // Handle --no-color flag
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;
    let mut session = Session::connect(&config).await?;

    match cli.command {
        Some(Commands::Add) => clients::handle_add(&mut session).await,
        Some(Commands::List(args)) => clients::handle_list(&mut session, &args).await,
        Some(Commands::Edit) => clients::handle_edit(&mut session).await,
        Some(Commands::Delete(args)) => clients::handle_delete(&mut session, &args).await,
        None => clients::run_menu(&mut session).await,
    }
}
