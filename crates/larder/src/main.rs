// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Larder - LLM query broker and vision log reducer.
//!
//! This is the binary entry point for the Larder service.

mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Larder - LLM query broker and vision log reducer.
#[derive(Parser, Debug)]
#[command(name = "larder", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Larder gateway server.
    Serve,
    /// Print the effective configuration.
    Config,
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match larder_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            larder_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.service.log_level);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                eprintln!("larder: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("larder: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("larder: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["larder", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));

        let cli = Cli::try_parse_from(["larder", "config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config)));

        let cli = Cli::try_parse_from(["larder"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn default_config_is_valid() {
        let config = larder_config::load_and_validate_str("").expect("defaults should validate");
        assert_eq!(config.gateway.port, 8080);
    }
}
