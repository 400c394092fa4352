//! Read-only views of player progress.

use std::fmt::Write as _;

use anyhow::{Result, bail};
use clap::Args;
use lifequest_core::{SessionController, level_for_xp, xp_to_next_level};

use super::open_session;
use crate::config::LifequestConfig;
use crate::render::{CHART_WIDTH, level_progress, probability_chart, quest_line, quest_table};

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Number of quests to suggest (defaults to suggestions.count)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Stats, quest board, suggestions and chart in one page
pub fn status(config: &LifequestConfig) -> Result<()> {
    let mut session = open_session(config)?;
    println!("{}", status_report(&mut session, config.suggestions.count)?);
    Ok(())
}

pub fn quests(config: &LifequestConfig) -> Result<()> {
    let session = open_session(config)?;
    println!("{}", quest_table(&session.quest_board()));
    Ok(())
}

pub fn suggest(config: &LifequestConfig, args: SuggestArgs) -> Result<()> {
    let count = args.count.unwrap_or(config.suggestions.count);
    if count == 0 {
        bail!("--count must be at least 1");
    }

    let mut session = open_session(config)?;
    for name in session.get_suggestions(count)? {
        println!("👉 {}", name);
    }
    Ok(())
}

pub fn chart(config: &LifequestConfig) -> Result<()> {
    let session = open_session(config)?;
    println!(
        "{}",
        probability_chart(&session.get_display_probabilities(), CHART_WIDTH)
    );
    Ok(())
}

fn status_report(session: &mut SessionController, suggestions: usize) -> Result<String> {
    let mut out = String::new();
    let xp = session.state().xp();

    writeln!(out, "🎮 Player Stats")?;
    writeln!(out, "  XP:    {}", xp)?;
    writeln!(out, "  Level: {}  {}", level_for_xp(xp), level_progress(xp))?;
    writeln!(
        out,
        "  Next:  {} XP to level {}",
        xp_to_next_level(xp),
        level_for_xp(xp) + 1
    )?;
    writeln!(out)?;

    writeln!(out, "📋 Today's Quests")?;
    for status in session.quest_board() {
        writeln!(out, "  {}", quest_line(&status))?;
    }
    writeln!(out)?;

    writeln!(out, "🤖 Suggested Quests")?;
    writeln!(out, "  Based on your past performance, try:")?;
    for name in session.get_suggestions(suggestions)? {
        writeln!(out, "  👉 {}", name)?;
    }
    writeln!(out)?;

    writeln!(out, "📊 Quest Success Predictions")?;
    for line in probability_chart(&session.get_display_probabilities(), CHART_WIDTH).lines() {
        writeln!(out, "  {}", line)?;
    }

    Ok(out.trim_end().to_string())
}
