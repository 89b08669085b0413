//! `aero`, the component lifecycle integrity toolkit.

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod config;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("aero error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config =
        config::AeroConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.path.clone());
    let store = aero_store::LibsqlStore::open_local(&db_path)
        .await
        .with_context(|| format!("failed to open database at {db_path}"))?;

    match &cli.command {
        cli::Commands::Import(args) => commands::import::handle(&store, args).await,
        cli::Commands::Scan(args) => commands::scan::handle(store, args, cli.json).await,
        cli::Commands::Fleet(args) => {
            commands::fleet::handle(store, args, &config, cli.json).await
        }
        cli::Commands::Trace(args) => commands::trace::handle(store, args, cli.json).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("AEROTRACE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
