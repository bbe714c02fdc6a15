//! Configuration file command.

use clap::{Args, Subcommand};
use std::path::Path;
use wavegraph_config::{EngineConfig, default_config_path, ensure_user_config_dir};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, path: Option<&Path>) -> anyhow::Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => {
            let config = EngineConfig::load_or_default(path)?;
            print!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            let path = path.map_or_else(default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = match path {
                Some(path) => path.to_path_buf(),
                None => {
                    ensure_user_config_dir()?;
                    default_config_path()
                }
            };
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            EngineConfig::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
