//! CLI module - command definitions and handlers

mod config_cmd;
mod run;
mod schema;

use clap::{Parser, Subcommand};

pub use config_cmd::ConfigArgs;
pub use run::RunArgs;
pub use schema::SchemaArgs;

/// port-search - validated search port for pluggable index adapters
#[derive(Parser)]
#[command(name = "port-search")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the search port contract
    Schema(SchemaArgs),

    /// Replay a script of port calls through a bound adapter
    Run(RunArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "port_search=debug,warn"
        } else if self.quiet {
            "warn"
        } else {
            "port_search=info,warn"
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Schema(args) => schema::run(args).await,
            Commands::Run(args) => run::run(args, self.verbose).await,
            Commands::Config(args) => config_cmd::run(args).await,
        }
    }
}
