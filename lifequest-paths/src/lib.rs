//! XDG Base Directory paths for lifequest.
//!
//! The save file itself defaults to a path relative to the working
//! directory; only configuration lives under the XDG config home.

use std::path::PathBuf;

/// File name of the save file when none is configured.
pub const DEFAULT_SAVE_FILE: &str = "save.json";

/// File name of the user and project configuration files.
pub const CONFIG_FILE: &str = "config.toml";

/// Directory, relative to the working directory, holding project config.
pub const PROJECT_CONFIG_DIR: &str = ".lifequest";

/// Get the lifequest config directory.
///
/// Returns `$XDG_CONFIG_HOME/lifequest` if set, otherwise `~/.config/lifequest`.
///
/// # Examples
///
/// ```
/// use lifequest_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("lifequest")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/lifequest")
    } else {
        PathBuf::from(".config/lifequest")
    }
}

/// Path of the user-level config file.
pub fn user_config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Save file used when nothing is configured.
pub fn default_save_file() -> PathBuf {
    PathBuf::from(DEFAULT_SAVE_FILE)
}
