//! Config command - manage port-search configuration

use clap::{Args, Subcommand};

use crate::adapter::AdapterKind;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Initialize config file with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set the default adapter
    Adapter {
        /// Adapter kind
        kind: String,
    },

    /// Show config file path
    Path,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let config = Config::load();
            let path = Config::config_path();

            if path.exists() {
                println!("Config file: {}", path.display());
            } else {
                println!("Config file: {} (not found, using defaults)", path.display());
            }
            println!();
            println!("[adapter]");
            println!("kind = \"{}\"", config.adapter.kind);
            if !config.adapter.env.is_empty() {
                println!();
                println!("[adapter.env]");
                for (key, value) in &config.adapter.env {
                    println!("{} = {}", key, value);
                }
            }
            println!();
            println!("[run]");
            println!("keep_going = {}", config.run.keep_going);
        }

        ConfigCommands::Init { force } => {
            let path = Config::config_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }

            Config::write_example()?;
            println!("Created config file at {}", path.display());
            println!();
            println!("Edit [adapter] to pick the adapter bound by 'port-search run',");
            println!("and [adapter.env] to pass settings through to it.");
        }

        ConfigCommands::Adapter { kind } => {
            kind.parse::<AdapterKind>()?;

            let mut config = Config::load();
            config.adapter.kind = kind;
            config.save()?;
            println!(
                "Default adapter set to '{}' in {}",
                config.adapter.kind,
                Config::config_path().display()
            );
        }

        ConfigCommands::Path => {
            println!("{}", Config::config_path().display());
        }
    }

    Ok(())
}
