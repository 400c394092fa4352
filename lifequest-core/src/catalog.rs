//! Quest definitions
//!
//! The catalog is fixed for the lifetime of a session. Its order is the
//! display order and breaks ties when suggestions sample equal scores.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{QuestError, Result};

/// A trackable habit with its base reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub base_xp: u32,
}

impl Quest {
    pub fn new(name: impl Into<String>, base_xp: u32) -> Self {
        Self {
            name: name.into(),
            base_xp,
        }
    }
}

/// Immutable, ordered list of quests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestCatalog {
    quests: Vec<Quest>,
}

impl Default for QuestCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuestCatalog {
    /// The quests shipped with lifequest
    pub fn builtin() -> Self {
        Self {
            quests: vec![
                Quest::new("Run", 50),
                Quest::new("Read book", 30),
                Quest::new("Drink water", 20),
                Quest::new("Eat 3k calories", 70),
            ],
        }
    }

    /// Build a catalog from user-supplied definitions.
    ///
    /// Names must be non-blank and unique, and every quest must award XP.
    pub fn new(quests: Vec<Quest>) -> Result<Self> {
        if quests.is_empty() {
            return Err(QuestError::InvalidCatalog("no quests defined".into()));
        }

        let mut seen = HashSet::new();
        for quest in &quests {
            if quest.name.trim().is_empty() {
                return Err(QuestError::InvalidCatalog("quest name is blank".into()));
            }
            if quest.base_xp == 0 {
                return Err(QuestError::InvalidCatalog(format!(
                    "quest '{}' must award at least 1 XP",
                    quest.name
                )));
            }
            if !seen.insert(quest.name.as_str()) {
                return Err(QuestError::InvalidCatalog(format!(
                    "duplicate quest '{}'",
                    quest.name
                )));
            }
        }

        Ok(Self { quests })
    }

    pub fn list_quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn get(&self, name: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.name == name)
    }

    /// Look up a quest, failing with `UnknownQuest` if absent
    pub fn require(&self, name: &str) -> Result<&Quest> {
        self.get(name)
            .ok_or_else(|| QuestError::UnknownQuest(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.quests.iter().map(|q| q.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}
