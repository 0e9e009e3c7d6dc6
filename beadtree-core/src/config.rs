//! Configuration management for beadtree
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (BEADTREE_*)
//! 3. Config file (~/.config/beadtree/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Stories declaring more tasks than this stay story-only.
pub const DEFAULT_MAX_TASKS_PER_STORY: usize = 5;

/// Tracker (bd CLI) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Path to the bd executable
    pub bd_path: String,

    /// Prefix of the identifiers bd generates
    pub id_prefix: String,

    /// Status passed to `bd create --status`
    pub status: String,

    /// Maximum time a single `bd create` may take
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Directory to run bd in (defaults to the current directory)
    pub workdir: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            bd_path: "bd".to_string(),
            id_prefix: "bd-".to_string(),
            status: "open".to_string(),
            timeout: Duration::from_secs(30),
            workdir: None,
        }
    }
}

/// Provisioning run configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Stories with more declared tasks than this skip task creation
    pub max_tasks_per_story: usize,

    /// Pause after a day (epic) was created
    #[serde(with = "humantime_serde")]
    pub day_delay: Duration,

    /// Pause after a story was created
    #[serde(with = "humantime_serde")]
    pub story_delay: Duration,

    /// Pause after a task was created
    #[serde(with = "humantime_serde")]
    pub task_delay: Duration,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            max_tasks_per_story: DEFAULT_MAX_TASKS_PER_STORY,
            day_delay: Duration::from_millis(500),
            story_delay: Duration::from_millis(300),
            task_delay: Duration::from_millis(200),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Tracker configuration
    pub tracker: TrackerConfig,

    /// Provisioning configuration
    pub provision: ProvisionConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/beadtree/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("beadtree").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - BEADTREE_BD_PATH: Path to bd executable
    /// - BEADTREE_ID_PREFIX: Identifier prefix bd prints
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bd_path) = std::env::var("BEADTREE_BD_PATH") {
            self.tracker.bd_path = bd_path;
        }

        if let Ok(prefix) = std::env::var("BEADTREE_ID_PREFIX") {
            self.tracker.id_prefix = prefix;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, bd_path: Option<String>, max_tasks: Option<usize>) -> Self {
        if let Some(path) = bd_path {
            self.tracker.bd_path = path;
        }

        if let Some(max) = max_tasks {
            self.provision.max_tasks_per_story = max;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults. An explicit config
    /// file replaces the default location and must exist.
    pub fn load_with_overrides(
        config_file: Option<&Path>,
        bd_path: Option<String>,
        max_tasks: Option<usize>,
    ) -> Result<Self> {
        let base = match config_file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        let config = base
            .with_env_overrides()
            .with_cli_overrides(bd_path, max_tasks);
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every creation call fail
    pub fn validate(&self) -> Result<()> {
        if self.tracker.bd_path.trim().is_empty() {
            return Err(Error::Config("tracker.bd_path must not be empty".to_string()));
        }
        if self.tracker.id_prefix.is_empty() {
            return Err(Error::Config("tracker.id_prefix must not be empty".to_string()));
        }
        if self.tracker.timeout.is_zero() {
            return Err(Error::Config("tracker.timeout must be positive".to_string()));
        }
        Ok(())
    }
}
