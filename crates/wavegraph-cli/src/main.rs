//! Wavegraph CLI - Command-line interface for the wavegraph node engine.

mod chain;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wavegraph")]
#[command(author, version, about = "Wavegraph node engine CLI", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available nodes and their ports
    Nodes(commands::nodes::NodesArgs),

    /// Display WAV file header information
    Info(commands::info::InfoArgs),

    /// Render a tone or noise to a WAV file
    Generate(commands::generate::GenerateArgs),

    /// Run a linear chain of nodes
    Chain(commands::chain::ChainArgs),

    /// Play a WAV file on an output device
    Play(commands::play::PlayArgs),

    /// List audio output devices
    Devices,

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Nodes(args) => commands::nodes::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Generate(args) => {
            commands::generate::run(args, &commands::common::load_config(config_path)?)
        }
        Commands::Chain(args) => {
            commands::chain::run(args, &commands::common::load_config(config_path)?)
        }
        Commands::Play(args) => {
            commands::play::run(args, &commands::common::load_config(config_path)?)
        }
        Commands::Devices => commands::devices::run(),
        Commands::Config(args) => commands::config::run(args, config_path),
    }
}
