mod archive;
mod assemble;
mod cli;
mod commands;
mod config;
mod error;
mod mcp;
mod page_range;
mod pdf;
mod progress;
mod selection;
mod session;
mod status;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::Mcp => {
            mcp::run_server(cli.global.operation_config(false)).await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path, &cli.global.operation_config(false))?;
        }
        Commands::Pages { pages, total } => {
            commands::pages::run(&pages, total, &cli.global.operation_config(false))?;
        }
        Commands::Extract {
            path,
            pages,
            all_if_empty,
            output,
        } => {
            let config = cli.global.operation_config(all_if_empty);
            commands::extract::run(&path, &pages, output.as_deref(), &config)?;
        }
        Commands::Remove {
            path,
            pages,
            output,
        } => {
            let config = cli.global.operation_config(false);
            commands::remove::run(&path, &pages, output.as_deref(), &config)?;
        }
        Commands::SplitAll { path, output } => {
            let config = cli.global.operation_config(false);
            commands::split::run(&path, output.as_deref(), &config)?;
        }
    }

    Ok(())
}

// Logs go to stderr; stdout carries command output and the MCP transport.
fn init_tracing(verbose: bool) {
    let default = if verbose { "pagecut=debug" } else { "pagecut=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
