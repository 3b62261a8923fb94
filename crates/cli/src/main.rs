//! smsgate CLI
//!
//! Send and receive SMS through a Hormuud channel described in a TOML config
//! file.

mod commands;
mod config;
mod error;
mod state_factory;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use smsgate_handler::{HandlerRegistry, StateTokenCache};
use smsgate_hormuud::{CHANNEL_TYPE, HormuudHandler};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::SmsgateConfig;

/// smsgate CLI: deliver and translate SMS through channel handlers.
#[derive(Parser, Debug)]
#[command(name = "smsgate", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(
        long,
        short,
        env = "SMSGATE_CONFIG",
        default_value = "smsgate.toml",
        global = true
    )]
    config: PathBuf,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a message through the configured channel.
    Send(commands::send::SendArgs),
    /// Translate an inbound webhook form body.
    Receive(commands::receive::ReceiveArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SmsgateConfig::load(&cli.config)?;
    debug!(?config, "configuration loaded");

    let store = state_factory::create_state(&config.state)?;
    let cache = Arc::new(StateTokenCache::new(store, CHANNEL_TYPE.to_lowercase()));
    let handler = HormuudHandler::new(config.hormuud.to_config(), cache)?;

    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(handler));

    let channel = config.channel.to_channel()?;

    match cli.command {
        Command::Send(args) => commands::send::run(&registry, &channel, &args, &cli.format).await,
        Command::Receive(args) => commands::receive::run(&registry, &channel, &args, &cli.format),
    }
}
