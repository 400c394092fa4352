//! Adaptive rewards and leveling
//!
//! Quests with a lower historical success rate pay more: the bonus scales
//! linearly from 1.0x at a perfect record to 1.5x when every attempt was
//! skipped. Levels are a pure function of total XP.

use tracing::{debug, info};

use crate::catalog::Quest;
use crate::error::{QuestError, Result};
use crate::types::{PlayerState, QuestStats};

/// XP needed per level
pub const XP_PER_LEVEL: u64 = 100;

/// Level reached with `xp` total experience
pub fn level_for_xp(xp: u64) -> u64 {
    xp / XP_PER_LEVEL
}

/// XP still missing until the next level
pub fn xp_to_next_level(xp: u64) -> u64 {
    XP_PER_LEVEL - xp % XP_PER_LEVEL
}

/// XP awarded for completing `quest` given its stats.
///
/// `floor(base_xp * (1 + 0.5 * (1 - success / total)))`, evaluated in
/// integers as `base_xp * (2 * total + fail) / (2 * total)` so the floor is
/// exact.
pub fn compute_reward(quest: &Quest, stats: &QuestStats) -> u64 {
    let base = u64::from(quest.base_xp);
    let total = stats.total();
    if total == 0 {
        return base;
    }
    let numerator = u128::from(base) * u128::from(2 * total + u64::from(stats.fail));
    // at most 1.5x base, so it fits back into u64
    (numerator / u128::from(2 * total)) as u64
}

/// Result of a successful completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub quest: String,
    pub reward: u64,
    pub previous_level: u64,
    pub new_level: u64,
    pub leveled_up: bool,
    /// Stats after recording the success
    pub stats: QuestStats,
}

/// Result of a skip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipOutcome {
    pub quest: String,
    /// Stats after recording the failure
    pub stats: QuestStats,
}

/// Record a completion and award XP.
///
/// Fails with `AlreadyCompleted` before touching `state` if the quest was
/// already completed this day-cycle. The reward is priced from the stats as
/// they stood before this success was counted.
pub fn apply_completion(state: &mut PlayerState, quest: &Quest) -> Result<CompletionOutcome> {
    if state.is_completed(&quest.name) {
        return Err(QuestError::AlreadyCompleted(quest.name.clone()));
    }

    let prior = state.stats(&quest.name);
    let reward = compute_reward(quest, &prior);
    debug!(
        quest = %quest.name,
        base_xp = quest.base_xp,
        success = prior.success,
        fail = prior.fail,
        rate = prior.success_rate(),
        reward,
        "Priced completion"
    );

    state.mark_completed(&quest.name);
    let stats = state.stats_mut(&quest.name);
    stats.record_success();
    let stats = *stats;
    let (previous_level, new_level) = state.add_xp(reward);
    let leveled_up = new_level > previous_level;

    info!(quest = %quest.name, reward, xp = state.xp(), "Quest completed");
    if leveled_up {
        info!(previous_level, new_level, "Level up");
    }

    Ok(CompletionOutcome {
        quest: quest.name.clone(),
        reward,
        previous_level,
        new_level,
        leveled_up,
        stats,
    })
}

/// Record a skip. Repeated skips on the same day each count as a failure.
pub fn apply_skip(state: &mut PlayerState, quest: &Quest) -> SkipOutcome {
    let stats = state.stats_mut(&quest.name);
    stats.record_failure();
    let stats = *stats;
    info!(quest = %quest.name, fail = stats.fail, "Quest skipped");

    SkipOutcome {
        quest: quest.name.clone(),
        stats,
    }
}
