//! Core data types
//!
//! - [`QuestStats`]: per-quest success/failure counts
//! - [`PlayerState`]: persisted player progress

mod state;
mod stats;

pub use state::PlayerState;
pub use stats::QuestStats;
