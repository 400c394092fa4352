//! lifequest-core - Habit quests with adaptive rewards
//!
//! Tracks daily quests, awards XP scaled by how hard each quest has been
//! historically, and ranks quests for suggestion with Thompson sampling over
//! per-quest Beta posteriors.
//!
//! The presentation layer owns a [`SessionController`], drives it with one
//! action at a time, and calls [`SessionController::save`] after each
//! mutation.

pub mod bandit;
pub mod catalog;
pub mod error;
pub mod reward;
pub mod session;
pub mod store;
pub mod types;

pub use bandit::{
    BanditRecommender, QuestProbability, QuestScore, display_probabilities,
    mean_success_probability,
};
pub use catalog::{Quest, QuestCatalog};
pub use error::{QuestError, Result};
pub use reward::{
    CompletionOutcome, SkipOutcome, XP_PER_LEVEL, apply_completion, apply_skip, compute_reward,
    level_for_xp, xp_to_next_level,
};
pub use session::{QuestStatus, SessionController};
pub use store::ProgressStore;
pub use types::*;
