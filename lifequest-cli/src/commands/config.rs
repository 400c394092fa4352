//! `config show` and `config path`.

use std::fmt::Write as _;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigLoader, ConfigSources, LifequestConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration and where each value came from
    Show,
    /// Show configuration file paths
    Path,
}

pub fn run(args: ConfigArgs, config: &LifequestConfig, sources: &ConfigSources) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("{}", config_report(config, sources)?);
            Ok(())
        }
        ConfigCommands::Path => show_paths(config),
    }
}

/// Merged TOML followed by a commented list of value origins
fn config_report(config: &LifequestConfig, sources: &ConfigSources) -> Result<String> {
    let mut out = toml::to_string_pretty(config)?;
    if !out.ends_with('\n') {
        out.push('\n');
    }

    writeln!(out)?;
    writeln!(out, "# Sources")?;
    writeln!(out, "# storage.save_file  <- {}", sources.save_file)?;
    writeln!(out, "# suggestions.count  <- {}", sources.suggestion_count)?;
    write!(out, "# quests             <- {}", sources.quests)?;
    Ok(out)
}

fn show_paths(config: &LifequestConfig) -> Result<()> {
    println!("User config:    {}", ConfigLoader::user_config_path().display());
    println!("Project config: {}", ConfigLoader::project_config_path().display());
    println!("Save file:      {}", config.storage.save_file.display());
    Ok(())
}
