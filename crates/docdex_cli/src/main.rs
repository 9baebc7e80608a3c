//! docdex CLI - Documentation lookup without an MCP host
//!
//! Usage: docdex <command> [options]

use anyhow::Result;
use clap::{Parser, Subcommand};
use docdex_common::EXIT_ERROR;
use docdex_config::Config;
use docdex_core::DocsService;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docdex",
    version,
    about = "Search library documentation from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose/debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a docdex.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up documentation for a query
    Lookup {
        /// The query to search for (e.g., "Chroma DB")
        query: String,

        /// The library to search in (e.g., "langchain")
        #[arg(short, long)]
        library: String,
    },

    /// List the supported libraries and their documentation domains
    Libraries,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize structured logging via centralized telemetry module
    docdex_common::telemetry::init_tracing(cli.verbose, false);
    tracing::info!("docdex CLI started");

    let result = match cli.command {
        Commands::Lookup { query, library } => cmd_lookup(cli.config, &query, &library).await,
        Commands::Libraries => cmd_libraries(cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_ERROR);
    }
}

/// Run a documentation lookup and print the aggregated text
async fn cmd_lookup(config_path: Option<PathBuf>, query: &str, library: &str) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let service = DocsService::new(&config, Config::api_key())?;

    let text = service.lookup(query, library).await?;
    println!("{}", text);
    Ok(())
}

/// Print the registry entries
fn cmd_libraries(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let registry = docdex_core::LibraryRegistry::with_extra(&config.registry.libraries);

    for (name, domain) in registry.entries() {
        println!("{:<12} {}", name, domain);
    }
    Ok(())
}
