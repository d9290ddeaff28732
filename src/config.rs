use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildCutError, Result};

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "buildcut.toml";

/// Represents the complete configuration for build-cut.
///
/// Tool locations, the optional settings plist, release notes placement and
/// the remote used when publishing tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub settings_plist: SettingsPlistConfig,

    #[serde(default)]
    pub release_notes: ReleaseNotesConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_agvtool() -> PathBuf {
    PathBuf::from("/usr/bin/agvtool")
}

fn default_plist_buddy() -> PathBuf {
    PathBuf::from("/usr/libexec/PlistBuddy")
}

/// Locations of the external binaries build-cut drives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_agvtool")]
    pub agvtool: PathBuf,

    #[serde(default = "default_plist_buddy")]
    pub plist_buddy: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            agvtool: default_agvtool(),
            plist_buddy: default_plist_buddy(),
        }
    }
}

fn default_plist_key() -> String {
    "PreferenceSpecifiers:1:DefaultValue".to_string()
}

/// The Settings.bundle plist that shows the version in the Settings app.
///
/// With no `path` the plist step is skipped with a warning.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SettingsPlistConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_plist_key")]
    pub key: String,
}

impl Default for SettingsPlistConfig {
    fn default() -> Self {
        SettingsPlistConfig {
            path: None,
            key: default_plist_key(),
        }
    }
}

fn default_notes_directory() -> PathBuf {
    PathBuf::from("ReleaseNotes")
}

fn default_notes_extension() -> String {
    "mkd".to_string()
}

fn default_true() -> bool {
    true
}

/// Where release notes are written, relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseNotesConfig {
    #[serde(default = "default_notes_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_notes_extension")]
    pub extension: String,

    #[serde(default = "default_true")]
    pub copy_to_clipboard: bool,
}

impl Default for ReleaseNotesConfig {
    fn default() -> Self {
        ReleaseNotesConfig {
            directory: default_notes_directory(),
            extension: default_notes_extension(),
            copy_to_clipboard: true,
        }
    }
}

fn default_remote_name() -> String {
    "origin".to_string()
}

/// Remote that `push-tag` publishes to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
        }
    }
}

impl Config {
    /// Settings the build workflow needs, detached from file-level config
    pub fn build_settings(&self) -> BuildSettings {
        BuildSettings {
            settings_plist: self.settings_plist.path.clone(),
            plist_key: self.settings_plist.key.clone(),
            notes_directory: self.release_notes.directory.clone(),
            notes_extension: self.release_notes.extension.clone(),
        }
    }
}

/// Inputs to a build cut that come from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSettings {
    pub settings_plist: Option<PathBuf>,
    pub plist_key: String,
    pub notes_directory: PathBuf,
    pub notes_extension: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Config::default().build_settings()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `buildcut.toml` in current directory
/// 3. `.buildcut.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        BuildCutError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| BuildCutError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| BuildCutError::config(e.to_string()))
}
