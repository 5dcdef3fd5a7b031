//! Plugin registry assembled from manifest discovery.

use std::path::{Path, PathBuf};

use anyhow::Result;
use claw_config::{expand_home_path, ClawConfig};
use serde::Serialize;
use serde_json::Value;

use crate::{discover_plugin_manifest_paths, load_plugin_manifest, PluginLogger};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `PluginOrigin` values.
pub enum PluginOrigin {
    Workspace,
    Global,
    Config,
}

impl PluginOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Global => "global",
            Self::Config => "config",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Public struct `PluginDescriptor` used across OpenClaw components.
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub ui_hints: Option<Value>,
    pub config_json_schema: Option<Value>,
    pub enabled: bool,
    pub origin: PluginOrigin,
    pub manifest_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Public struct `PluginDiagnostic` used across OpenClaw components.
pub struct PluginDiagnostic {
    pub manifest_path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
/// Public struct `PluginRegistry` used across OpenClaw components.
pub struct PluginRegistry {
    pub plugins: Vec<PluginDescriptor>,
    pub diagnostics: Vec<PluginDiagnostic>,
}

impl PluginRegistry {
    pub fn plugin_ids(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.id.as_str()).collect()
    }
}

/// Trait contract for `PluginLoader` behavior.
pub trait PluginLoader: Send + Sync {
    fn load_plugins(
        &self,
        config: &ClawConfig,
        workspace_dir: &Path,
        logger: &dyn PluginLogger,
    ) -> Result<PluginRegistry>;
}

#[derive(Debug, Clone)]
/// Discovers plugins from workspace, global, and configured manifest roots.
pub struct ManifestPluginLoader {
    state_dir: PathBuf,
    home_dir: Option<String>,
}

impl ManifestPluginLoader {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            home_dir: std::env::var("HOME").ok(),
        }
    }

    pub fn with_home_dir(mut self, home_dir: Option<String>) -> Self {
        self.home_dir = home_dir;
        self
    }

    fn plugin_roots(
        &self,
        config: &ClawConfig,
        workspace_dir: &Path,
    ) -> Vec<(PathBuf, PluginOrigin)> {
        let mut roots = vec![
            (
                workspace_dir.join(".openclaw").join("extensions"),
                PluginOrigin::Workspace,
            ),
            (self.state_dir.join("extensions"), PluginOrigin::Global),
        ];
        for path in &config.plugins.load.paths {
            if path.trim().is_empty() {
                continue;
            }
            roots.push((
                expand_home_path(path, self.home_dir.as_deref()),
                PluginOrigin::Config,
            ));
        }
        roots
    }
}

impl PluginLoader for ManifestPluginLoader {
    fn load_plugins(
        &self,
        config: &ClawConfig,
        workspace_dir: &Path,
        logger: &dyn PluginLogger,
    ) -> Result<PluginRegistry> {
        let mut registry = PluginRegistry::default();
        if !config.plugins.enabled {
            logger.info("plugins disabled by config; skipping discovery");
            return Ok(registry);
        }

        for (root, origin) in self.plugin_roots(config, workspace_dir) {
            if !root.exists() {
                logger.debug(&format!(
                    "plugin root {} does not exist; skipping",
                    root.display()
                ));
                continue;
            }
            for manifest_path in discover_plugin_manifest_paths(&root)? {
                let manifest = match load_plugin_manifest(&manifest_path) {
                    Ok(manifest) => manifest,
                    Err(error) => {
                        let message = format!("{error:#}");
                        logger.warn(&message);
                        registry.diagnostics.push(PluginDiagnostic {
                            manifest_path,
                            message,
                        });
                        continue;
                    }
                };
                if !config.plugins.permits(&manifest.id) {
                    logger.debug(&format!(
                        "plugin '{}' excluded by plugins.allow/deny",
                        manifest.id
                    ));
                    continue;
                }
                let enabled = config.plugins.entry_enabled(&manifest.id);
                let name = manifest
                    .name
                    .clone()
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| manifest.id.clone());
                registry.plugins.push(PluginDescriptor {
                    id: manifest.id,
                    name,
                    description: manifest.description,
                    version: manifest.version,
                    ui_hints: manifest.ui_hints,
                    config_json_schema: manifest.config_schema,
                    enabled,
                    origin,
                    manifest_path,
                });
            }
        }

        logger.debug(&format!(
            "plugin discovery finished: plugins={} diagnostics={}",
            registry.plugins.len(),
            registry.diagnostics.len()
        ));
        Ok(registry)
    }
}
