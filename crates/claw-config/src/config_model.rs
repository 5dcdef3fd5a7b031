//! Typed model of the `openclaw.json` configuration file.
//!
//! Only the sections the runtime reads are typed; every other top-level key
//! is preserved in `extra` so loading never drops user configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_AGENT_ID: &str = "main";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `ClawConfig` used across OpenClaw components.
pub struct ClawConfig {
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub plugins: PluginsConfig,
    #[serde(default)]
    pub channels: BTreeMap<String, Value>,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `AgentsConfig` used across OpenClaw components.
pub struct AgentsConfig {
    #[serde(default)]
    pub defaults: AgentDefaultsConfig,
    #[serde(default)]
    pub list: Vec<AgentEntryConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `AgentDefaultsConfig` used across OpenClaw components.
pub struct AgentDefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `AgentEntryConfig` used across OpenClaw components.
pub struct AgentEntryConfig {
    pub id: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
}

fn default_plugins_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `PluginsConfig` used across OpenClaw components.
pub struct PluginsConfig {
    #[serde(default = "default_plugins_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub deny: Vec<String>,
    #[serde(default)]
    pub load: PluginLoadConfig,
    #[serde(default)]
    pub entries: BTreeMap<String, PluginEntryConfig>,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            enabled: default_plugins_enabled(),
            allow: Vec::new(),
            deny: Vec::new(),
            load: PluginLoadConfig::default(),
            entries: BTreeMap::new(),
        }
    }
}

impl PluginsConfig {
    /// Returns whether discovery may surface `plugin_id` under allow/deny lists.
    pub fn permits(&self, plugin_id: &str) -> bool {
        if self.deny.iter().any(|denied| denied == plugin_id) {
            return false;
        }
        self.allow.is_empty() || self.allow.iter().any(|allowed| allowed == plugin_id)
    }

    pub fn entry_enabled(&self, plugin_id: &str) -> bool {
        self.entries
            .get(plugin_id)
            .and_then(|entry| entry.enabled)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `PluginLoadConfig` used across OpenClaw components.
pub struct PluginLoadConfig {
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `PluginEntryConfig` used across OpenClaw components.
pub struct PluginEntryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `GatewayConfig` used across OpenClaw components.
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default)]
    pub auth: GatewayAuthConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Public struct `GatewayAuthConfig` used across OpenClaw components.
pub struct GatewayAuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
