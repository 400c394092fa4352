//! Player progress: XP, derived level, today's completions and quest stats

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::stats::QuestStats;
use crate::reward::level_for_xp;

/// Everything persisted between sessions.
///
/// `level` is a cache of `xp / 100`. It has no setter; every XP change goes
/// through [`PlayerState::add_xp`], which recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredState", into = "StoredState")]
pub struct PlayerState {
    xp: u64,
    level: u64,
    completed_today: Vec<String>,
    stats: BTreeMap<String, QuestStats>,
}

/// On-disk shape of the save file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredState {
    xp: u64,
    #[serde(default)]
    level: u64,
    completed_today: Vec<String>,
    success: BTreeMap<String, QuestStats>,
}

impl From<StoredState> for PlayerState {
    fn from(stored: StoredState) -> Self {
        let level = level_for_xp(stored.xp);
        if stored.level != level {
            warn!(
                stored = stored.level,
                derived = level,
                xp = stored.xp,
                "Stored level disagrees with xp, using derived level"
            );
        }

        let mut completed_today: Vec<String> = Vec::with_capacity(stored.completed_today.len());
        for name in stored.completed_today {
            if !completed_today.contains(&name) {
                completed_today.push(name);
            }
        }

        Self {
            xp: stored.xp,
            level,
            completed_today,
            stats: stored.success,
        }
    }
}

impl From<PlayerState> for StoredState {
    fn from(state: PlayerState) -> Self {
        Self {
            xp: state.xp,
            level: state.level,
            completed_today: state.completed_today,
            success: state.stats,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    /// Fresh player: no XP, level 0, nothing completed, no stats
    pub fn new() -> Self {
        Self {
            xp: 0,
            level: 0,
            completed_today: Vec::new(),
            stats: BTreeMap::new(),
        }
    }

    /// Rebuild a state from its parts; the level is derived from `xp`.
    pub fn from_parts(
        xp: u64,
        completed_today: impl IntoIterator<Item = String>,
        stats: BTreeMap<String, QuestStats>,
    ) -> Self {
        StoredState {
            xp,
            level: level_for_xp(xp),
            completed_today: completed_today.into_iter().collect(),
            success: stats,
        }
        .into()
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    /// Names completed in the current day-cycle, in completion order
    pub fn completed_today(&self) -> &[String] {
        &self.completed_today
    }

    pub fn is_completed(&self, quest: &str) -> bool {
        self.completed_today.iter().any(|name| name == quest)
    }

    /// Stats for a quest, falling back to the `{1, 1}` prior when none are recorded
    pub fn stats(&self, quest: &str) -> QuestStats {
        self.stats.get(quest).copied().unwrap_or_default()
    }

    /// Recorded stats only, without prior fill-in
    pub fn stats_map(&self) -> &BTreeMap<String, QuestStats> {
        &self.stats
    }

    /// Names with recorded stats
    pub fn recorded_quests(&self) -> impl Iterator<Item = &str> {
        self.stats.keys().map(String::as_str)
    }

    pub(crate) fn stats_mut(&mut self, quest: &str) -> &mut QuestStats {
        self.stats.entry(quest.to_string()).or_default()
    }

    /// Add XP and recompute the level. Returns `(old_level, new_level)`.
    pub(crate) fn add_xp(&mut self, amount: u64) -> (u64, u64) {
        let old_level = self.level;
        self.xp = self.xp.saturating_add(amount);
        self.level = level_for_xp(self.xp);
        (old_level, self.level)
    }

    /// Returns false if the quest was already marked
    pub(crate) fn mark_completed(&mut self, quest: &str) -> bool {
        if self.is_completed(quest) {
            return false;
        }
        self.completed_today.push(quest.to_string());
        true
    }

    /// Clear today's completions, returning how many were cleared
    pub(crate) fn clear_completed(&mut self) -> usize {
        let cleared = self.completed_today.len();
        self.completed_today.clear();
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = PlayerState::new();
        assert_eq!(state.xp(), 0);
        assert_eq!(state.level(), 0);
        assert!(state.completed_today().is_empty());
        assert!(state.stats_map().is_empty());
    }

    #[test]
    fn test_stats_default_to_prior() {
        let state = PlayerState::new();
        assert_eq!(state.stats("Run"), QuestStats::new(1, 1));
    }

    #[test]
    fn test_add_xp_recomputes_level() {
        let mut state = PlayerState::new();
        assert_eq!(state.add_xp(99), (0, 0));
        assert_eq!(state.add_xp(1), (0, 1));
        assert_eq!(state.add_xp(250), (1, 3));
        assert_eq!(state.level(), state.xp() / 100);
    }

    #[test]
    fn test_mark_completed_once() {
        let mut state = PlayerState::new();
        assert!(state.mark_completed("Run"));
        assert!(!state.mark_completed("Run"));
        assert_eq!(state.completed_today(), ["Run".to_string()]);
    }

    #[test]
    fn test_clear_completed() {
        let mut state = PlayerState::new();
        state.mark_completed("Run");
        state.mark_completed("Read book");
        assert_eq!(state.clear_completed(), 2);
        assert!(!state.is_completed("Run"));
    }

    #[test]
    fn test_from_parts_derives_level() {
        let state = PlayerState::from_parts(250, Vec::new(), BTreeMap::new());
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_serializes_save_file_schema() {
        let mut state = PlayerState::new();
        state.add_xp(62);
        state.mark_completed("Run");
        state.stats_mut("Run").record_success();

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "xp": 62,
                "level": 0,
                "completed_today": ["Run"],
                "success": { "Run": { "success": 2, "fail": 1 } }
            })
        );
    }

    #[test]
    fn test_deserialize_collapses_duplicate_completions() {
        let json = r#"{"xp": 10, "level": 0, "completed_today": ["Run", "Run"], "success": {}}"#;
        let state: PlayerState = serde_json::from_str(json).unwrap();
        assert_eq!(state.completed_today(), ["Run".to_string()]);
    }

    #[test]
    fn test_deserialize_recomputes_level() {
        let json = r#"{"xp": 340, "level": 1, "completed_today": [], "success": {}}"#;
        let state: PlayerState = serde_json::from_str(json).unwrap();
        assert_eq!(state.level(), 3);
    }

    #[test]
    fn test_deserialize_rejects_negative_xp() {
        let json = r#"{"xp": -5, "level": 0, "completed_today": [], "success": {}}"#;
        assert!(serde_json::from_str::<PlayerState>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_missing_stats() {
        let json = r#"{"xp": 5, "level": 0, "completed_today": []}"#;
        assert!(serde_json::from_str::<PlayerState>(json).is_err());
    }
}
