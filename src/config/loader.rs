//! Configuration loader with tier-based merging.

use super::types::Config;
use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name looked up in each tier directory.
const CONFIG_FILE: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config ($CWD/tasky/)
    Project = 1,
    /// User-level config (~/.tasky/)
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Directories searched for each file tier.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub project_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration directories from environment and defaults.
    pub fn discover() -> Self {
        let user_dir = std::env::var("TASKY_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".tasky")));

        let project_dir = std::env::var("TASKY_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("tasky")));

        Self {
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }

    fn file_for(&self, tier: ConfigTier) -> Option<PathBuf> {
        let dir = match tier {
            ConfigTier::Project => self.project_dir.as_ref(),
            ConfigTier::User => self.user_dir.as_ref(),
            ConfigTier::Defaults | ConfigTier::Environment => None,
        }?;
        Some(dir.join(CONFIG_FILE))
    }
}

/// Overlay `overlay` onto `base`.
///
/// Mappings merge key by key; any other value in `overlay` replaces the base
/// value, except `null`, which leaves it untouched.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Null => {}
        Value::Object(entries) => {
            if let Value::Object(target) = base {
                for (key, value) in entries {
                    merge_values(target.entry(key).or_insert(Value::Null), value);
                }
            } else {
                *base = Value::Object(entries);
            }
        }
        other => *base = other,
    }
}

/// Read one tier's YAML file. Missing files are skipped; unreadable or
/// malformed ones are skipped with a warning.
fn read_tier(path: &Path, tier: ConfigTier) -> Option<Value> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(%tier, path = %path.display(), "Cannot read config file: {}", e);
            return None;
        }
    };
    match serde_yaml::from_str::<Value>(&content) {
        Ok(value) => {
            debug!(%tier, path = %path.display(), "Loaded config tier");
            Some(value)
        }
        Err(e) => {
            warn!(%tier, path = %path.display(), "Ignoring malformed config file: {}", e);
            None
        }
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: Config,
    /// Highest-priority config file that contributed, if any
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers with proper merging.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration with explicit paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        // Explicit config file overrides the file tiers
        if let Ok(explicit_path) = std::env::var("TASKY_CONFIG_PATH") {
            return Self::load_explicit(paths, PathBuf::from(explicit_path));
        }

        let mut merged = serde_json::to_value(Config::default())?;
        let mut config_path = None;

        for tier in [ConfigTier::Project, ConfigTier::User] {
            let Some(path) = paths.file_for(tier) else {
                continue;
            };
            if let Some(value) = read_tier(&path, tier) {
                merge_values(&mut merged, value);
                config_path = Some(path);
            }
        }

        let mut config: Config = serde_json::from_value(merged)?;
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        Ok(Self {
            paths,
            config,
            config_path,
        })
    }

    /// Load a single named file, still honoring environment overrides.
    pub fn load_explicit(paths: ConfigPaths, path: PathBuf) -> Result<Self> {
        let mut config = Config::load(&path)?;
        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(Self {
            paths,
            config,
            config_path: Some(path),
        })
    }

    /// Apply environment variable overrides to config.
    pub fn apply_env_overrides<F>(config: &mut Config, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("TASKY_HOST") {
            config.server.host = host;
        }

        if let Some(port) = var("TASKY_PORT") {
            match port.parse() {
                Ok(port) => config.server.port = port,
                Err(_) => warn!("Ignoring invalid TASKY_PORT '{}'", port),
            }
        }

        if let Some(api_url) = var("TASKY_API_URL") {
            config.client.api_url = api_url;
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
