//! wpp CLI - bilingual WordPress content proxy.
//!
//! Provides commands for:
//! - `serve`: Start the proxy server

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ServeArgs;
use output::Output;

/// wpp - bilingual WordPress content proxy.
#[derive(Parser)]
#[command(name = "wpp", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the proxy server.
    Serve(ServeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(e) => Err(e.into()),
        },
    };

    if let Err(err) = result {
        output.error(&format!("Error: {}", error::error_chain(&err)));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
