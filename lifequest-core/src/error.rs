//! Error types for lifequest-core

use std::path::PathBuf;

use thiserror::Error;

/// Error type for quest, progress and session operations
#[derive(Debug, Error)]
pub enum QuestError {
    /// Save file exists but does not hold a valid player state
    #[error("Corrupt save file {}: {source}", path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Quest was already completed in the current day-cycle
    #[error("Quest already completed today: {0}")]
    AlreadyCompleted(String),

    /// Quest name is not part of the catalog
    #[error("Unknown quest: {0}")]
    UnknownQuest(String),

    /// Catalog definition violates its invariants
    #[error("Invalid quest catalog: {0}")]
    InvalidCatalog(String),

    /// Posterior distribution could not be constructed
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// Serialization of the player state failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl QuestError {
    /// Whether the caller can present this as a warning and carry on.
    ///
    /// Only duplicate completions qualify; everything else aborts the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AlreadyCompleted(_))
    }
}

/// Result type alias for lifequest operations
pub type Result<T> = std::result::Result<T, QuestError>;
