use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::types::{
    DEFAULT_SUGGESTION_COUNT, LifequestConfig, RawLifequestConfig, RawStorageConfig,
    RawSuggestionsConfig, StorageConfig, SuggestionsConfig,
};

/// Overrides the save file from every config layer
pub const SAVE_FILE_ENV: &str = "LIFEQUEST_SAVE_FILE";

/// Overrides the project config directory (useful for isolated e2e tests)
pub const PROJECT_CONFIG_DIR_ENV: &str = "LIFEQUEST_PROJECT_CONFIG_DIR";

/// Layer that supplied a configuration value
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    File(PathBuf),
    Env(&'static str),
    CommandLine,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Env(var) => write!(f, "${}", var),
            Self::CommandLine => write!(f, "command line"),
        }
    }
}

/// Where each setting of the merged config came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigSources {
    pub save_file: ConfigSource,
    pub suggestion_count: ConfigSource,
    pub quests: ConfigSource,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + environment)
    pub fn load() -> Result<(LifequestConfig, ConfigSources)> {
        Self::load_layers(&[Self::user_config_path(), Self::project_config_path()])
    }

    /// Merge the given config files in order, then apply the environment
    pub fn load_layers(paths: &[PathBuf]) -> Result<(LifequestConfig, ConfigSources)> {
        let mut raw = RawLifequestConfig::default();
        let mut sources = ConfigSources::default();

        for path in paths {
            if path.exists() {
                let layer = Self::read_raw(path)?;
                Self::record_sources(&mut sources, &layer, path);
                raw = Self::merge_raw(raw, layer);
                debug!(path = %path.display(), "Merged config layer");
            }
        }

        if let Ok(save_file) = std::env::var(SAVE_FILE_ENV)
            && !save_file.is_empty()
        {
            raw.storage.save_file = Some(PathBuf::from(save_file));
            sources.save_file = ConfigSource::Env(SAVE_FILE_ENV);
        }

        Ok((Self::finalize(raw)?, sources))
    }

    /// Get user config path (`$XDG_CONFIG_HOME/lifequest/config.toml`)
    pub fn user_config_path() -> PathBuf {
        lifequest_paths::user_config_file()
    }

    /// Get project config path
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var(PROJECT_CONFIG_DIR_ENV) {
            PathBuf::from(dir).join(lifequest_paths::CONFIG_FILE)
        } else {
            PathBuf::from(lifequest_paths::PROJECT_CONFIG_DIR).join(lifequest_paths::CONFIG_FILE)
        }
    }

    fn read_raw(path: &Path) -> Result<RawLifequestConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Attribute every value the layer sets to that layer's file
    fn record_sources(sources: &mut ConfigSources, layer: &RawLifequestConfig, path: &Path) {
        if layer.storage.save_file.is_some() {
            sources.save_file = ConfigSource::File(path.to_path_buf());
        }
        if layer.suggestions.count.is_some() {
            sources.suggestion_count = ConfigSource::File(path.to_path_buf());
        }
        if layer.quests.is_some() {
            sources.quests = ConfigSource::File(path.to_path_buf());
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawLifequestConfig, overlay: RawLifequestConfig) -> RawLifequestConfig {
        RawLifequestConfig {
            storage: RawStorageConfig {
                save_file: overlay.storage.save_file.or(base.storage.save_file),
            },
            suggestions: RawSuggestionsConfig {
                count: overlay.suggestions.count.or(base.suggestions.count),
            },
            quests: overlay.quests.or(base.quests),
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawLifequestConfig) -> Result<LifequestConfig> {
        let count = raw.suggestions.count.unwrap_or(DEFAULT_SUGGESTION_COUNT);
        if count == 0 {
            bail!("suggestions.count must be at least 1");
        }

        Ok(LifequestConfig {
            storage: StorageConfig {
                save_file: raw
                    .storage
                    .save_file
                    .unwrap_or_else(lifequest_paths::default_save_file),
            },
            suggestions: SuggestionsConfig { count },
            quests: raw.quests,
        })
    }
}
