//! Normalization of plugin and channel descriptors into contributions.

use claw_extensions::{ChannelDescriptor, PluginDescriptor};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `ContributionSource` values.
pub enum ContributionSource {
    Plugin,
    Channel,
}

impl ContributionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plugin => "plugin",
            Self::Channel => "channel",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One extension's schema fragment plus the UI metadata shown next to it.
pub struct ExtensionContribution {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_fragment: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_hints: Option<Value>,
    pub source: ContributionSource,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn contribution_from_plugin(plugin: &PluginDescriptor) -> Option<ExtensionContribution> {
    let id = non_blank(Some(plugin.id.as_str()))?;
    Some(ExtensionContribution {
        id: id.clone(),
        display_name: non_blank(Some(plugin.name.as_str())).unwrap_or(id),
        description: non_blank(plugin.description.as_deref()),
        schema_fragment: plugin.config_json_schema.clone(),
        ui_hints: plugin.ui_hints.clone(),
        source: ContributionSource::Plugin,
    })
}

pub fn contribution_from_channel(channel: &ChannelDescriptor) -> Option<ExtensionContribution> {
    let id = non_blank(Some(channel.id.as_str()))?;
    Some(ExtensionContribution {
        id: id.clone(),
        display_name: non_blank(Some(channel.label.as_str())).unwrap_or(id),
        description: non_blank(Some(channel.blurb.as_str())),
        schema_fragment: channel.config_schema.clone(),
        ui_hints: channel.ui_hints.clone(),
        source: ContributionSource::Channel,
    })
}

/// Flattens plugins (in discovery order) then channels; ids are trimmed and empty ones dropped.
pub fn normalize_extension_descriptors(
    plugins: &[PluginDescriptor],
    channels: &[ChannelDescriptor],
) -> Vec<ExtensionContribution> {
    plugins
        .iter()
        .filter_map(contribution_from_plugin)
        .chain(channels.iter().filter_map(contribution_from_channel))
        .collect()
}
