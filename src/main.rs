use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use radiation::app::AppContext;
use radiation::cli::{commands, Cli, Commands};
use radiation::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Read);
    if command == Commands::Init {
        commands::init_config(cli.config.as_deref())?;
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).context("configuration file error")?;
    let ctx = AppContext::new(config)?;

    match command {
        Commands::Read => {
            radiation::tui::run(&ctx).await?;
        }
        Commands::List => {
            commands::list_entries(&ctx).await?;
        }
        Commands::Show { id } => {
            commands::show_entry(&ctx, id).await?;
        }
        Commands::Init => {}
    }

    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .with(EnvFilter::from_default_env())
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    }
    Ok(())
}
