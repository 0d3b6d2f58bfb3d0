//! Twin MCP server CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;
pub(crate) mod shared;

/// MCP tool server with greeting, arithmetic, clock and Twin profile tools.
#[derive(Debug, Parser)]
#[command(name = "twin-mcp", version, about)]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long, global = true, env = "TWIN_CONFIG")]
    config: Option<String>,

    /// Verbosity level (-v, -vv). Overrides `logging.level`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the MCP server over stdio or HTTP.
    Serve(commands::serve::ServeArgs),
    /// List the tools the server exposes.
    Tools(commands::tools::ToolsArgs),
    /// Call one tool in-process and print its result.
    Call(commands::call::CallArgs),
    /// List the Twin records held by the configured store.
    Query(commands::query::QueryArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = twin_config::load_config(cli.config.as_deref())?;

    // Logs go to stderr; stdout carries the stdio protocol stream.
    let level = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match cli.log_format.as_str() {
        "json" => builder.json().with_target(true).init(),
        _ => builder.init(),
    };

    tracing::debug!(config_path = ?cli.config, "configuration loaded");

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Tools(args) => commands::tools::execute(args),
        Commands::Call(args) => commands::call::execute(args, &config).await,
        Commands::Query(args) => commands::query::execute(args, &config).await,
    }
}
