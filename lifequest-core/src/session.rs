//! One player's session: the loaded state plus the actions applied to it
//!
//! Actions run one at a time against the in-memory [`PlayerState`]. A failed
//! action leaves the state exactly as it was. Persisting is the caller's
//! call: mutate, then [`SessionController::save`].

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::bandit::{BanditRecommender, QuestProbability, display_probabilities};
use crate::catalog::{Quest, QuestCatalog};
use crate::error::Result;
use crate::reward::{CompletionOutcome, SkipOutcome, apply_completion, apply_skip};
use crate::store::ProgressStore;
use crate::types::{PlayerState, QuestStats};

/// A catalog row with today's status, for rendering the quest board
#[derive(Debug, Clone, PartialEq)]
pub struct QuestStatus {
    pub quest: Quest,
    pub completed: bool,
    pub stats: QuestStats,
}

/// Orchestrates user actions against a loaded player state
pub struct SessionController<R = StdRng> {
    catalog: QuestCatalog,
    store: ProgressStore,
    state: PlayerState,
    recommender: BanditRecommender<R>,
    dirty: bool,
}

impl SessionController<StdRng> {
    /// Load state from `store` and start a session with an entropy-seeded recommender
    pub fn open(catalog: QuestCatalog, store: ProgressStore) -> Result<Self> {
        let state = store.load()?;
        Ok(Self::new(catalog, store, state, BanditRecommender::new()))
    }
}

impl<R: Rng> SessionController<R> {
    pub fn new(
        catalog: QuestCatalog,
        store: ProgressStore,
        state: PlayerState,
        recommender: BanditRecommender<R>,
    ) -> Self {
        // Kept as-is so a catalog change never discards history
        for name in state.completed_today() {
            if !catalog.contains(name) {
                warn!(quest = %name, "Save file lists a completion for a quest not in the catalog");
            }
        }
        for name in state.recorded_quests() {
            if !catalog.contains(name) {
                warn!(quest = %name, "Save file has stats for a quest not in the catalog");
            }
        }

        Self {
            catalog,
            store,
            state,
            recommender,
            dirty: false,
        }
    }

    /// Complete a quest for today
    pub fn complete(&mut self, quest_name: &str) -> Result<CompletionOutcome> {
        let quest = self.catalog.require(quest_name)?;
        let outcome = apply_completion(&mut self.state, quest)?;
        self.dirty = true;
        Ok(outcome)
    }

    /// Record that a quest was skipped
    pub fn skip(&mut self, quest_name: &str) -> Result<SkipOutcome> {
        let quest = self.catalog.require(quest_name)?;
        let outcome = apply_skip(&mut self.state, quest);
        self.dirty = true;
        Ok(outcome)
    }

    /// Start a new day-cycle by clearing today's completions.
    ///
    /// XP, level and stats are untouched. Returns how many completions were cleared.
    pub fn reset_day(&mut self) -> usize {
        let cleared = self.state.clear_completed();
        if cleared > 0 {
            self.dirty = true;
        }
        info!(cleared, "Day reset");
        cleared
    }

    /// Persist the current state
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.state)?;
        self.dirty = false;
        Ok(())
    }

    /// Sample `n` suggestions. Each call draws fresh samples.
    pub fn get_suggestions(&mut self, n: usize) -> Result<Vec<String>> {
        self.recommender.suggest(&self.catalog, &self.state, n)
    }

    /// Posterior mean success probability per quest, in catalog order
    pub fn get_display_probabilities(&self) -> Vec<QuestProbability> {
        display_probabilities(&self.catalog, &self.state)
    }

    /// Every catalog quest with its completion flag and stats
    pub fn quest_board(&self) -> Vec<QuestStatus> {
        self.catalog
            .list_quests()
            .iter()
            .map(|quest| QuestStatus {
                quest: quest.clone(),
                completed: self.state.is_completed(&quest.name),
                stats: self.state.stats(&quest.name),
            })
            .collect()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Whether there are changes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
