pub mod board;
pub mod config;
pub mod quest;

use anyhow::{Result, anyhow};
use lifequest_core::{ProgressStore, QuestCatalog, QuestError, SessionController};
use tracing::debug;

use crate::config::LifequestConfig;

/// Build the catalog and load the save file named by `config`
pub fn open_session(config: &LifequestConfig) -> Result<SessionController> {
    let catalog = config.catalog()?;
    let store = ProgressStore::new(&config.storage.save_file);
    debug!(save_file = %store.path().display(), quests = catalog.len(), "Opening session");
    Ok(SessionController::open(catalog, store)?)
}

/// Turn an unknown-quest error into one that lists what is available
pub fn explain(err: QuestError, catalog: &QuestCatalog) -> anyhow::Error {
    match err {
        QuestError::UnknownQuest(name) => {
            let available: Vec<_> = catalog.names().collect();
            anyhow!(
                "Unknown quest '{}'. Available quests: {}",
                name,
                available.join(", ")
            )
        }
        other => other.into(),
    }
}
