//! Commands that change player progress.
//!
//! Each command loads the save file, applies one action and writes the
//! save back only if the action changed something.

use anyhow::Result;
use clap::Args;
use lifequest_core::SessionController;

use super::{explain, open_session};
use crate::config::LifequestConfig;

#[derive(Args, Debug)]
pub struct QuestNameArgs {
    /// Quest name, e.g. "Read book" (quotes optional)
    #[arg(required = true, num_args = 1..)]
    pub quest: Vec<String>,
}

impl QuestNameArgs {
    pub fn name(&self) -> String {
        self.quest.join(" ")
    }
}

pub fn complete(config: &LifequestConfig, args: QuestNameArgs) -> Result<()> {
    let mut session = open_session(config)?;
    let report = complete_quest(&mut session, &args.name())?;
    println!("{}", report);
    save_if_dirty(&mut session)
}

pub fn skip(config: &LifequestConfig, args: QuestNameArgs) -> Result<()> {
    let mut session = open_session(config)?;
    let report = skip_quest(&mut session, &args.name())?;
    println!("{}", report);
    save_if_dirty(&mut session)
}

pub fn reset_day(config: &LifequestConfig) -> Result<()> {
    let mut session = open_session(config)?;
    let cleared = session.reset_day();
    println!("🌅 New day started ({} completion(s) cleared)", cleared);
    save_if_dirty(&mut session)
}

pub fn save(config: &LifequestConfig) -> Result<()> {
    let mut session = open_session(config)?;
    session.save()?;
    println!("💾 Game saved to {}", session.store().path().display());
    Ok(())
}

fn save_if_dirty(session: &mut SessionController) -> Result<()> {
    if session.is_dirty() {
        session.save()?;
    }
    Ok(())
}

/// Complete a quest and describe the result.
///
/// A repeat completion is a warning, not an error.
fn complete_quest(session: &mut SessionController, name: &str) -> Result<String> {
    match session.complete(name) {
        Ok(outcome) => {
            let mut report = format!("✅ Completed: {} (+{} XP)", outcome.quest, outcome.reward);
            if outcome.leveled_up {
                report.push_str(&format!(
                    "\n🎉 LEVEL UP! You are now level {}",
                    outcome.new_level
                ));
            }
            Ok(report)
        }
        Err(err) if err.is_recoverable() => {
            Ok(format!("⚠️  You already completed '{}' today!", name))
        }
        Err(err) => Err(explain(err, session.catalog())),
    }
}

fn skip_quest(session: &mut SessionController, name: &str) -> Result<String> {
    match session.skip(name) {
        Ok(outcome) => Ok(format!("❌ You skipped {}", outcome.quest)),
        Err(err) => Err(explain(err, session.catalog())),
    }
}
