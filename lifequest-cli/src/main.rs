use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use config::{ConfigLoader, ConfigSource};

#[derive(Parser)]
#[command(name = "lifequest", about = "Daily habit quests with XP, levels and suggestions")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Save file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    save_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stats, today's quests, suggestions and success chart
    Status,
    /// List quests with rewards and success estimates
    Quests,
    /// Complete a quest for today
    Complete(commands::quest::QuestNameArgs),
    /// Record a skipped quest
    Skip(commands::quest::QuestNameArgs),
    /// Suggest quests to focus on
    Suggest(commands::board::SuggestArgs),
    /// Chart the estimated success probability of each quest
    Chart,
    /// Clear today's completions to start a new day
    ResetDay,
    /// Write the current progress to the save file
    Save,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (mut config, mut sources) = ConfigLoader::load()?;
    if let Some(save_file) = cli.save_file {
        config.storage.save_file = save_file;
        sources.save_file = ConfigSource::CommandLine;
    }

    match cli.command {
        Commands::Status => commands::board::status(&config),
        Commands::Quests => commands::board::quests(&config),
        Commands::Complete(args) => commands::quest::complete(&config, args),
        Commands::Skip(args) => commands::quest::skip(&config, args),
        Commands::Suggest(args) => commands::board::suggest(&config, args),
        Commands::Chart => commands::board::chart(&config),
        Commands::ResetDay => commands::quest::reset_day(&config),
        Commands::Save => commands::quest::save(&config),
        Commands::Config(args) => commands::config::run(args, &config, &sources),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_multi_word_quest() {
        let cli = Cli::try_parse_from(["lifequest", "complete", "Read", "book"]).unwrap();
        match cli.command {
            Commands::Complete(args) => assert_eq!(args.name(), "Read book"),
            _ => panic!("Expected Complete command"),
        }
    }

    #[test]
    fn test_parse_global_save_file() {
        let cli =
            Cli::try_parse_from(["lifequest", "skip", "Run", "--save-file", "/tmp/q.json"]).unwrap();
        assert_eq!(cli.save_file, Some(PathBuf::from("/tmp/q.json")));
    }

    #[test]
    fn test_complete_requires_a_quest() {
        assert!(Cli::try_parse_from(["lifequest", "complete"]).is_err());
    }

    #[test]
    fn test_parse_suggest_count() {
        let cli = Cli::try_parse_from(["lifequest", "suggest", "-n", "3"]).unwrap();
        match cli.command {
            Commands::Suggest(args) => assert_eq!(args.count, Some(3)),
            _ => panic!("Expected Suggest command"),
        }
    }
}
