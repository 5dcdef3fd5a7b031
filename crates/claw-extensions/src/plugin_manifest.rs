//! `openclaw.plugin.json` manifest parsing and manifest path discovery.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PLUGIN_MANIFEST_FILE_NAME: &str = "openclaw.plugin.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `PluginManifest` used across OpenClaw components.
pub struct PluginManifest {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_schema: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_hints: Option<Value>,
}

pub fn load_plugin_manifest(path: &Path) -> Result<PluginManifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read plugin manifest {}", path.display()))?;
    parse_plugin_manifest(&raw)
        .with_context(|| format!("invalid plugin manifest {}", path.display()))
}

pub fn parse_plugin_manifest(raw: &str) -> Result<PluginManifest> {
    let value = serde_json::from_str::<Value>(raw).context("failed to parse manifest JSON")?;
    if !value.is_object() {
        bail!("plugin manifest must be a JSON object");
    }
    if let Some(ui_hints) = value.get("uiHints") {
        if !ui_hints.is_object() && !ui_hints.is_null() {
            bail!("plugin manifest 'uiHints' must be an object");
        }
    }
    let manifest =
        serde_json::from_value::<PluginManifest>(value).context("failed to decode manifest")?;
    Ok(manifest)
}

/// Lists manifests under `root`: either `root` itself is a plugin directory,
/// or each immediate subdirectory holding a manifest is one.
pub fn discover_plugin_manifest_paths(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    if !root.is_dir() {
        bail!("plugin root '{}' is not a directory", root.display());
    }
    let direct_manifest = root.join(PLUGIN_MANIFEST_FILE_NAME);
    if direct_manifest.is_file() {
        return Ok(vec![direct_manifest]);
    }

    let mut paths = Vec::new();
    let read_dir = fs::read_dir(root)
        .with_context(|| format!("failed to read plugin root {}", root.display()))?;
    for entry in read_dir {
        let entry =
            entry.with_context(|| format!("failed to inspect plugin root {}", root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let manifest_path = path.join(PLUGIN_MANIFEST_FILE_NAME);
        if manifest_path.is_file() {
            paths.push(manifest_path);
        }
    }
    paths.sort();
    Ok(paths)
}
