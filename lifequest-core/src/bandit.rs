//! Quest suggestions via Thompson sampling
//!
//! Each quest's chance of being done is modelled as `Beta(1 + success, 1 + fail)`.
//! A suggestion round draws one sample per quest and ranks by the draws, so
//! quests with a strong record usually lead while weaker ones still surface
//! from time to time.
//!
//! The random source is a type parameter. Production code uses an
//! entropy-seeded [`StdRng`]; tests pass a seeded one.

use std::cmp::Ordering;

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Beta, Distribution};
use tracing::debug;

use crate::catalog::QuestCatalog;
use crate::error::{QuestError, Result};
use crate::types::{PlayerState, QuestStats};

/// One posterior draw for a quest
#[derive(Debug, Clone, PartialEq)]
pub struct QuestScore {
    pub name: String,
    pub score: f64,
}

/// Posterior mean for a quest, for display
#[derive(Debug, Clone, PartialEq)]
pub struct QuestProbability {
    pub name: String,
    pub probability: f64,
}

/// Thompson-sampling ranker over the quest catalog
pub struct BanditRecommender<R = StdRng> {
    rng: R,
}

impl Default for BanditRecommender<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl BanditRecommender<StdRng> {
    /// Create a recommender seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a recommender with a specific seed (for testing)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> BanditRecommender<R> {
    /// Use an arbitrary random source
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one posterior sample per quest, in catalog order
    pub fn sample_scores(
        &mut self,
        catalog: &QuestCatalog,
        state: &PlayerState,
    ) -> Result<Vec<QuestScore>> {
        catalog
            .list_quests()
            .iter()
            .map(|quest| {
                let posterior = posterior(&state.stats(&quest.name))?;
                Ok(QuestScore {
                    name: quest.name.clone(),
                    score: posterior.sample(&mut self.rng),
                })
            })
            .collect()
    }

    /// Top `n` quest names by sampled score.
    ///
    /// Returns `min(n, catalog.len())` distinct names. Equal draws keep
    /// catalog order.
    pub fn suggest(
        &mut self,
        catalog: &QuestCatalog,
        state: &PlayerState,
        n: usize,
    ) -> Result<Vec<String>> {
        let mut scores = self.sample_scores(catalog, state)?;
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        debug!(?scores, n, "Ranked quests");

        Ok(scores.into_iter().take(n).map(|s| s.name).collect())
    }
}

fn posterior(stats: &QuestStats) -> Result<Beta<f64>> {
    Beta::new(stats.alpha(), stats.beta()).map_err(|e| {
        QuestError::Sampling(format!(
            "Beta({}, {}) rejected: {}",
            stats.alpha(),
            stats.beta(),
            e
        ))
    })
}

/// Deterministic posterior mean `alpha / (alpha + beta)` for one quest
pub fn mean_success_probability(state: &PlayerState, quest: &str) -> f64 {
    state.stats(quest).mean_success_probability()
}

/// Posterior means for every quest, in catalog order
pub fn display_probabilities(catalog: &QuestCatalog, state: &PlayerState) -> Vec<QuestProbability> {
    catalog
        .names()
        .map(|name| QuestProbability {
            name: name.to_string(),
            probability: mean_success_probability(state, name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use super::*;
    use crate::catalog::Quest;

    fn state_with(stats: &[(&str, u32, u32)]) -> PlayerState {
        let map: BTreeMap<_, _> = stats
            .iter()
            .map(|(name, s, f)| (name.to_string(), QuestStats::new(*s, *f)))
            .collect();
        PlayerState::from_parts(0, Vec::new(), map)
    }

    #[test]
    fn test_suggest_length_is_clamped() {
        let catalog = QuestCatalog::builtin();
        let state = PlayerState::new();
        let mut bandit = BanditRecommender::with_seed(7);

        assert_eq!(bandit.suggest(&catalog, &state, 2).unwrap().len(), 2);
        assert_eq!(bandit.suggest(&catalog, &state, 4).unwrap().len(), 4);
        assert_eq!(bandit.suggest(&catalog, &state, 10).unwrap().len(), 4);
        assert!(bandit.suggest(&catalog, &state, 0).unwrap().is_empty());
    }

    #[test]
    fn test_suggest_returns_distinct_catalog_names() {
        let catalog = QuestCatalog::builtin();
        let state = state_with(&[("Run", 5, 2), ("Drink water", 1, 6)]);
        let mut bandit = BanditRecommender::with_seed(11);

        for _ in 0..50 {
            let picks = bandit.suggest(&catalog, &state, 3).unwrap();
            let unique: HashSet<_> = picks.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(picks.iter().all(|name| catalog.contains(name)));
        }
    }

    #[test]
    fn test_same_seed_same_ranking() {
        let catalog = QuestCatalog::builtin();
        let state = state_with(&[("Run", 3, 3), ("Read book", 2, 4)]);

        let first = BanditRecommender::with_seed(42)
            .suggest(&catalog, &state, 4)
            .unwrap();
        let second = BanditRecommender::with_seed(42)
            .suggest(&catalog, &state, 4)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_strong_record_leads() {
        let catalog =
            QuestCatalog::new(vec![Quest::new("Weak", 10), Quest::new("Strong", 10)]).unwrap();
        let state = state_with(&[("Weak", 1, 50), ("Strong", 50, 1)]);
        let mut bandit = BanditRecommender::with_seed(3);

        for _ in 0..200 {
            assert_eq!(bandit.suggest(&catalog, &state, 1).unwrap(), vec!["Strong"]);
        }
    }

    #[test]
    fn test_close_records_both_get_explored() {
        let catalog = QuestCatalog::new(vec![Quest::new("A", 10), Quest::new("B", 10)]).unwrap();
        let state = state_with(&[("A", 3, 2), ("B", 2, 3)]);
        let mut bandit = BanditRecommender::with_seed(5);

        let mut a_first = 0;
        let mut b_first = 0;
        for _ in 0..500 {
            match bandit.suggest(&catalog, &state, 1).unwrap()[0].as_str() {
                "A" => a_first += 1,
                _ => b_first += 1,
            }
        }
        assert!(a_first > b_first);
        assert!(b_first > 0, "weaker quest was never explored");
    }

    #[test]
    fn test_sample_scores_are_probabilities() {
        let catalog = QuestCatalog::builtin();
        let state = PlayerState::new();
        let mut bandit = BanditRecommender::with_seed(1);

        let scores = bandit.sample_scores(&catalog, &state).unwrap();
        assert_eq!(scores.len(), catalog.len());
        assert_eq!(scores[0].name, "Run");
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.score)));
    }

    #[test]
    fn test_fresh_mean_is_one_half() {
        let state = PlayerState::new();
        for name in QuestCatalog::builtin().names() {
            assert!((mean_success_probability(&state, name) - 0.5).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_mean_is_deterministic() {
        let state = state_with(&[("Run", 4, 1)]);
        // alpha = 5, beta = 2
        let expected = 5.0 / 7.0;
        for _ in 0..3 {
            assert!((mean_success_probability(&state, "Run") - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_display_probabilities_follow_catalog() {
        let catalog = QuestCatalog::builtin();
        let state = state_with(&[("Drink water", 1, 3)]);
        let probs = display_probabilities(&catalog, &state);

        let names: Vec<_> = probs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Run", "Read book", "Drink water", "Eat 3k calories"]);
        assert!((probs[2].probability - 2.0 / 6.0).abs() < 1e-12);
        assert!(probs.iter().all(|p| p.probability > 0.0 && p.probability < 1.0));
    }
}
