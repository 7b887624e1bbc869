//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bstviz/bstviz.toml`
//! 3. Local config: `<dir>/.bstviz.toml` (usually the working directory)
//! 4. Environment variables: `BSTVIZ_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{SearchMode, ANONYMOUS_USER};

/// Unified configuration for bstviz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding snapshot records (default: ~/.bstviz/trees)
    pub store_dir: PathBuf,
    /// Owner recorded on snapshots (default: "anonymous")
    pub user_id: String,
    /// Working snapshot used when `--snapshot` is not given
    pub default_snapshot: String,
    /// Search routine used when `--mode` is not given
    pub search_mode: SearchMode,
    /// Replay interval between steps, in milliseconds
    pub step_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: dirs_default_store_dir(),
            user_id: ANONYMOUS_USER.to_string(),
            default_snapshot: "default".to_string(),
            search_mode: SearchMode::Complete,
            step_delay_ms: 1000,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub store_dir: Option<PathBuf>,
    pub user_id: Option<String>,
    pub default_snapshot: Option<String>,
    pub search_mode: Option<SearchMode>,
    pub step_delay_ms: Option<u64>,
}

/// Get the default store directory (~/.bstviz/trees).
fn dirs_default_store_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".bstviz").join("trees"))
        .unwrap_or_else(|| PathBuf::from("~/.bstviz/trees"))
}

/// Get the XDG config directory for bstviz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bstviz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bstviz.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".bstviz.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        let raw = self.store_dir.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| raw.clone());
        self.store_dir = PathBuf::from(expanded);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            store_dir: overlay
                .store_dir
                .clone()
                .unwrap_or_else(|| self.store_dir.clone()),
            user_id: overlay
                .user_id
                .clone()
                .unwrap_or_else(|| self.user_id.clone()),
            default_snapshot: overlay
                .default_snapshot
                .clone()
                .unwrap_or_else(|| self.default_snapshot.clone()),
            search_mode: overlay.search_mode.unwrap_or(self.search_mode),
            step_delay_ms: overlay.step_delay_ms.unwrap_or(self.step_delay_ms),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.bstviz.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/bstviz/bstviz.toml`
    /// 3. Local config: `<local_dir>/.bstviz.toml`
    /// 4. Environment variables: `BSTVIZ_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply BSTVIZ_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // config crate is used just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BSTVIZ")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("store_dir") {
            settings.store_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("user_id") {
            settings.user_id = val;
        }
        if let Ok(val) = config.get_string("default_snapshot") {
            settings.default_snapshot = val;
        }
        if let Ok(val) = config.get_string("search_mode") {
            settings.search_mode = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("BSTVIZ_SEARCH_MODE: {}", e),
            })?;
        }
        if let Ok(val) = config.get_string("step_delay_ms") {
            settings.step_delay_ms = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("BSTVIZ_STEP_DELAY_MS: {}", e),
            })?;
        }

        Ok(settings)
    }

    /// Render settings as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
