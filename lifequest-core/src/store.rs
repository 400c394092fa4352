//! File-backed player progress
//!
//! The save file is pretty-printed JSON. Saves go to a sibling temp file
//! that is synced and then renamed over the previous save, so a failed
//! write never leaves a truncated save behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::error::{QuestError, Result};
use crate::types::PlayerState;

/// Sole reader and writer of the save file
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the saved state, or a fresh one if nothing has been saved yet.
    ///
    /// Content that does not parse as a player state is reported as
    /// `CorruptState`; it is never replaced with defaults here.
    pub fn load(&self) -> Result<PlayerState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No save file, starting fresh");
            return Ok(PlayerState::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let state: PlayerState =
            serde_json::from_str(&contents).map_err(|source| QuestError::CorruptState {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            xp = state.xp(),
            level = state.level(),
            "Loaded save file"
        );
        Ok(state)
    }

    /// Overwrite the save file with `state`
    pub fn save(&self, state: &PlayerState) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = encode(state)?;
        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, &contents) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!(path = %self.path.display(), xp = state.xp(), "Progress saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("save.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// JSON with four-space indentation
fn encode(state: &PlayerState) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    state
        .serialize(&mut serializer)
        .map_err(|e| QuestError::Serialization(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
