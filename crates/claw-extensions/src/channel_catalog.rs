//! Channel adapter catalog exposed as plain channel descriptors.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Public struct `ChannelDescriptor` used across OpenClaw components.
pub struct ChannelDescriptor {
    pub id: String,
    pub label: String,
    pub blurb: String,
    pub config_schema: Option<Value>,
    pub ui_hints: Option<Value>,
}

/// Trait contract for `ChannelPluginLister` behavior.
pub trait ChannelPluginLister: Send + Sync {
    fn list_channel_plugins(&self) -> Vec<ChannelDescriptor>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates built-in `ChannelTransport` values.
pub enum ChannelTransport {
    Telegram,
    Discord,
    Slack,
    Whatsapp,
}

impl ChannelTransport {
    pub const ALL: [ChannelTransport; 4] = [
        ChannelTransport::Telegram,
        ChannelTransport::Discord,
        ChannelTransport::Slack,
        ChannelTransport::Whatsapp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::Discord => "discord",
            Self::Slack => "slack",
            Self::Whatsapp => "whatsapp",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Telegram => "Telegram",
            Self::Discord => "Discord",
            Self::Slack => "Slack",
            Self::Whatsapp => "WhatsApp",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Self::Telegram => "Bot API channel; register a bot with @BotFather and paste its token.",
            Self::Discord => "Discord bot gateway connection for guild and DM conversations.",
            Self::Slack => "Slack Socket Mode app for workspace channels and DMs.",
            Self::Whatsapp => "WhatsApp Web session linked by QR code.",
        }
    }

    fn config_schema(self) -> Value {
        let mut properties = json!({
            "enabled": { "type": "boolean" },
            "allowFrom": { "type": "array", "items": { "type": "string" } },
            "dmPolicy": { "type": "string", "enum": ["pairing", "allowlist", "open", "disabled"] }
        });
        let credentials = match self {
            Self::Telegram => json!({ "botToken": { "type": "string" } }),
            Self::Discord => json!({ "token": { "type": "string" } }),
            Self::Slack => json!({
                "botToken": { "type": "string" },
                "appToken": { "type": "string" }
            }),
            Self::Whatsapp => json!({ "authDir": { "type": "string" } }),
        };
        if let (Some(target), Some(extra)) = (properties.as_object_mut(), credentials.as_object())
        {
            for (key, schema) in extra {
                target.insert(key.clone(), schema.clone());
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "additionalProperties": true
        })
    }

    fn ui_hints(self) -> Value {
        let secret_field = match self {
            Self::Telegram | Self::Slack => "botToken",
            Self::Discord => "token",
            Self::Whatsapp => "authDir",
        };
        json!({
            secret_field: {
                "label": format!("{} credential", self.label()),
                "sensitive": !matches!(self, Self::Whatsapp)
            },
            "dmPolicy": { "label": "Direct message policy" }
        })
    }

    pub fn descriptor(self) -> ChannelDescriptor {
        ChannelDescriptor {
            id: self.as_str().to_string(),
            label: self.label().to_string(),
            blurb: self.blurb().to_string(),
            config_schema: Some(self.config_schema()),
            ui_hints: Some(self.ui_hints()),
        }
    }
}

pub fn builtin_channel_descriptors() -> Vec<ChannelDescriptor> {
    ChannelTransport::ALL
        .iter()
        .map(|transport| transport.descriptor())
        .collect()
}

#[derive(Debug, Clone, Default)]
/// Lists the built-in channels followed by any registered extra channels.
pub struct BuiltinChannelLister {
    extra_channels: Vec<ChannelDescriptor>,
}

impl BuiltinChannelLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, descriptor: ChannelDescriptor) -> Self {
        self.extra_channels.push(descriptor);
        self
    }
}

impl ChannelPluginLister for BuiltinChannelLister {
    fn list_channel_plugins(&self) -> Vec<ChannelDescriptor> {
        let mut channels = builtin_channel_descriptors();
        channels.extend(self.extra_channels.iter().cloned());
        channels
    }
}

#[derive(Debug, Clone, Default)]
/// Lists exactly the descriptors it was built with.
pub struct StaticChannelLister {
    channels: Vec<ChannelDescriptor>,
}

impl StaticChannelLister {
    pub fn new(channels: Vec<ChannelDescriptor>) -> Self {
        Self { channels }
    }
}

impl ChannelPluginLister for StaticChannelLister {
    fn list_channel_plugins(&self) -> Vec<ChannelDescriptor> {
        self.channels.clone()
    }
}
