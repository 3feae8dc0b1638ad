// SPDX-FileCopyrightText: 2026 Concierge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concierge - a guided intake interview bot.
//!
//! This is the binary entry point. The interview engine itself lives in
//! the library crates; a transport binding wires it to a chat platform.

use clap::{Parser, Subcommand};
use concierge_catalog::CategoryCatalog;
use concierge_core::types::Category;

/// Concierge - a guided intake interview bot.
#[derive(Parser, Debug)]
#[command(name = "concierge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration and print a summary.
    Check,
    /// Print the category catalog with its destination wiring.
    Catalog {
        /// Limit output to one category (bug, suggestion, complaint).
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match concierge_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            concierge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    match cli.command {
        Some(Commands::Check) => {
            println!("config ok (agent.name={})", config.agent.name);
            println!(
                "cooldowns: owner={}s administrator={}s verified={}s default={}s",
                config.cooldown.owner_secs,
                config.cooldown.administrator_secs,
                config.cooldown.verified_secs,
                config.cooldown.default_secs
            );
        }
        Some(Commands::Catalog { category }) => {
            let selected = match category.as_deref().map(Category::parse).transpose() {
                Ok(selected) => selected,
                Err(e) => {
                    eprintln!("concierge: {e}");
                    std::process::exit(1);
                }
            };
            let catalog = CategoryCatalog::new(&config.destinations);
            for category in Category::ALL {
                if selected.is_some_and(|s| s != category) {
                    continue;
                }
                let definition = catalog.definition(category);
                let sink = definition
                    .sink
                    .as_ref()
                    .map_or("(none)", |s| s.0.as_str());
                println!("{category}: sink={sink}");
                for field in &definition.fields {
                    println!("  {}: {}", field.name, field.prompt);
                }
            }
        }
        None => {
            println!("concierge: use --help for available commands");
        }
    }
}

fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config = concierge_config::load_and_validate()
            .expect("default config should be valid");
        assert_eq!(config.agent.name, "concierge");
    }

    #[test]
    fn default_catalog_has_all_categories() {
        use concierge_catalog::CategoryCatalog;
        use concierge_core::types::Category;

        let catalog = CategoryCatalog::new(&Default::default());
        for category in Category::ALL {
            assert!(!catalog.definition(category).fields.is_empty());
        }
    }
}
