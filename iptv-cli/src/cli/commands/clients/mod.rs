//! The four client views: Add, List, Edit, Delete

mod forms;
mod handler;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

pub use handler::{Session, handle_add, handle_delete, handle_edit, handle_list, run_menu};

#[derive(Args, Default)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Default)]
pub struct DeleteArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}
