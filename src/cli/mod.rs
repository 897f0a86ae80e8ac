//! CLI module for the portfolio admin
//!
//! Every dashboard form is also reachable headless. Without a subcommand the
//! desktop UI starts instead.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::{print_error, OutputFormat};

/// Portfolio Admin - manage projects and profile of a portfolio backend
#[derive(Parser, Debug)]
#[command(name = "portfolio-admin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Open the desktop UI at this route (e.g. "/update/project/<id>")
    #[arg(long, value_name = "ROUTE")]
    pub open: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List, add and update projects
    Project {
        #[command(subcommand)]
        command: commands::project::ProjectCommands,
    },

    /// Show and update the owner's profile
    Profile {
        #[command(subcommand)]
        command: commands::profile::ProfileCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run a CLI subcommand
pub async fn run(command: Commands, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Project { command } => commands::project::run(command, format, quiet).await,
        Commands::Profile { command } => commands::profile::run(command, format, quiet).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}
