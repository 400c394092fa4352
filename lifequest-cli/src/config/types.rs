use std::path::PathBuf;

use lifequest_core::{Quest, QuestCatalog};
use serde::{Deserialize, Serialize};

/// Number of suggestions shown when none is configured
pub const DEFAULT_SUGGESTION_COUNT: usize = 2;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawLifequestConfig {
    #[serde(default)]
    pub storage: RawStorageConfig,

    #[serde(default)]
    pub suggestions: RawSuggestionsConfig,

    /// Replaces the built-in catalog when present
    #[serde(default)]
    pub quests: Option<Vec<Quest>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStorageConfig {
    /// Path of the save file
    pub save_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawSuggestionsConfig {
    /// How many quests to suggest
    pub count: Option<usize>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LifequestConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub suggestions: SuggestionsConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quests: Option<Vec<Quest>>,
}

impl LifequestConfig {
    /// Configured catalog, or the built-in one
    pub fn catalog(&self) -> lifequest_core::Result<QuestCatalog> {
        match &self.quests {
            Some(quests) => QuestCatalog::new(quests.clone()),
            None => Ok(QuestCatalog::builtin()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub save_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_file: lifequest_paths::default_save_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    pub count: usize,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SUGGESTION_COUNT,
        }
    }
}
