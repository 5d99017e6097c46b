use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level())?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    todo_cli::run(&cli, stdin, &mut stdout).await
}

/// Log to stderr so the list on stdout stays clean.
fn init_tracing(default_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("failed to install tracing subscriber")
}
