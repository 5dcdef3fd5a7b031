//! Synchronous configuration loading and state-dir/config-path resolution.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::ClawConfig;

pub const OPENCLAW_STATE_DIR_ENV: &str = "OPENCLAW_STATE_DIR";
pub const OPENCLAW_CONFIG_PATH_ENV: &str = "OPENCLAW_CONFIG_PATH";
pub const OPENCLAW_CONFIG_FILE_NAME: &str = "openclaw.json";
const OPENCLAW_DEFAULT_STATE_DIR_NAME: &str = ".openclaw";

/// Trait contract for `ConfigLoader` behavior.
pub trait ConfigLoader: Send + Sync {
    fn load_config(&self) -> Result<ClawConfig>;
}

#[derive(Debug, Clone)]
/// Loads `openclaw.json` from disk; a missing file yields the default config.
pub struct FileConfigLoader {
    path: PathBuf,
}

impl FileConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load_config(&self) -> Result<ClawConfig> {
        if !self.path.exists() {
            return Ok(ClawConfig::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        parse_claw_config(&raw, &self.path)
    }
}

#[derive(Debug, Clone, Default)]
/// Serves a fixed in-memory configuration.
pub struct StaticConfigLoader {
    config: ClawConfig,
}

impl StaticConfigLoader {
    pub fn new(config: ClawConfig) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load_config(&self) -> Result<ClawConfig> {
        Ok(self.config.clone())
    }
}

pub fn parse_claw_config(raw: &str, path: &Path) -> Result<ClawConfig> {
    if raw.trim().is_empty() {
        return Ok(ClawConfig::default());
    }
    let value = serde_json::from_str::<Value>(raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    if !value.is_object() {
        bail!(
            "config file {} must contain a JSON object at the root",
            path.display()
        );
    }
    serde_json::from_value::<ClawConfig>(value)
        .with_context(|| format!("invalid configuration in {}", path.display()))
}

pub fn expand_home_path(raw: &str, home_dir: Option<&str>) -> PathBuf {
    let trimmed = raw.trim();
    let Some(home) = home_dir.map(str::trim).filter(|home| !home.is_empty()) else {
        return PathBuf::from(trimmed);
    };
    if trimmed == "~" {
        return PathBuf::from(home);
    }
    match trimmed.strip_prefix("~/") {
        Some(rest) => Path::new(home).join(rest),
        None => PathBuf::from(trimmed),
    }
}

pub fn resolve_state_dir_from(state_dir_override: Option<&str>, home_dir: Option<&str>) -> PathBuf {
    if let Some(state_dir) = state_dir_override
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return expand_home_path(state_dir, home_dir);
    }
    match home_dir.map(str::trim).filter(|home| !home.is_empty()) {
        Some(home) => Path::new(home).join(OPENCLAW_DEFAULT_STATE_DIR_NAME),
        None => PathBuf::from(OPENCLAW_DEFAULT_STATE_DIR_NAME),
    }
}

pub fn resolve_state_dir() -> PathBuf {
    let state_dir_override = std::env::var(OPENCLAW_STATE_DIR_ENV).ok();
    let home_dir = std::env::var("HOME").ok();
    resolve_state_dir_from(state_dir_override.as_deref(), home_dir.as_deref())
}

pub fn resolve_config_path_from(
    config_path_override: Option<&str>,
    state_dir: &Path,
    home_dir: Option<&str>,
) -> PathBuf {
    match config_path_override
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        Some(path) => expand_home_path(path, home_dir),
        None => state_dir.join(OPENCLAW_CONFIG_FILE_NAME),
    }
}

pub fn resolve_config_path(state_dir: &Path) -> PathBuf {
    let config_path_override = std::env::var(OPENCLAW_CONFIG_PATH_ENV).ok();
    let home_dir = std::env::var("HOME").ok();
    resolve_config_path_from(config_path_override.as_deref(), state_dir, home_dir.as_deref())
}
