//! Main entry point for the markup translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod processors;
mod server;
mod utils;

use cli::commands::Commands;

/// Markup batch translator - translates record datasets while preserving markup structure
#[derive(Parser, Debug)]
#[command(name = "markup-translator", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
            |_| tracing_subscriber::EnvFilter::new(format!("markup_translator={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Some(Commands::Translate { url, file, output }) => {
            cli::commands::handle_translate(url, file, output).await?;
        }
        Some(Commands::Serve { host, port }) => {
            cli::commands::handle_serve(host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
