//! Static JSON Schema for the core `openclaw.json` configuration keys.
//!
//! This document is authoritative for core keys. Extension schemas are
//! merged on top of it per request by the config-schema composer.

use serde_json::{json, Value};

pub const CONFIG_SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";
pub const CONFIG_SCHEMA_ID: &str = "https://openclaw.ai/openclaw.schema.json";
pub const CONFIG_SCHEMA_TITLE: &str = "OpenClaw configuration";

pub const BASE_CONFIG_PROPERTY_KEYS: &[&str] = &[
    "agents", "channels", "env", "gateway", "logging", "meta", "models", "plugins", "session",
    "skills", "tools",
];

fn string_map_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "additionalProperties": { "type": "string" }
    })
}

fn agent_entry_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string", "minLength": 1 },
            "default": { "type": "boolean" },
            "name": { "type": "string" },
            "workspace": { "type": "string" },
            "model": { "type": "string" }
        },
        "required": ["id"],
        "additionalProperties": true
    })
}

fn plugins_schema() -> Value {
    json!({
        "type": "object",
        "description": "Plugin discovery and per-plugin configuration.",
        "properties": {
            "enabled": { "type": "boolean", "default": true },
            "allow": { "type": "array", "items": { "type": "string" } },
            "deny": { "type": "array", "items": { "type": "string" } },
            "load": {
                "type": "object",
                "properties": {
                    "paths": { "type": "array", "items": { "type": "string" } }
                },
                "additionalProperties": false
            },
            "entries": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "properties": {
                        "enabled": { "type": "boolean" },
                        "config": { "type": "object" }
                    },
                    "additionalProperties": false
                }
            }
        },
        "additionalProperties": false
    })
}

fn gateway_schema() -> Value {
    json!({
        "type": "object",
        "description": "Gateway control-plane listener settings.",
        "properties": {
            "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
            "bind": { "type": "string" },
            "mode": { "type": "string", "enum": ["local", "remote"] },
            "auth": {
                "type": "object",
                "properties": {
                    "token": { "type": "string" },
                    "password": { "type": "string" }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": true
    })
}

fn skills_schema() -> Value {
    json!({
        "type": "object",
        "description": "Skill installation and per-skill overrides.",
        "properties": {
            "allowBundled": { "type": "array", "items": { "type": "string" } },
            "install": {
                "type": "object",
                "properties": {
                    "preferBrew": { "type": "boolean" },
                    "nodeManager": { "type": "string", "enum": ["npm", "pnpm", "yarn", "bun"] }
                },
                "additionalProperties": true
            },
            "entries": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "properties": {
                        "enabled": { "type": "boolean" },
                        "apiKey": { "type": "string" },
                        "env": { "type": "object", "additionalProperties": { "type": "string" } }
                    },
                    "additionalProperties": true
                }
            }
        },
        "additionalProperties": true
    })
}

/// Builds the static base schema for core configuration keys.
pub fn base_config_schema() -> Value {
    json!({
        "$schema": CONFIG_SCHEMA_DRAFT,
        "$id": CONFIG_SCHEMA_ID,
        "title": CONFIG_SCHEMA_TITLE,
        "type": "object",
        "properties": {
            "meta": {
                "type": "object",
                "properties": {
                    "lastTouchedVersion": { "type": "string" },
                    "lastTouchedAt": { "type": "string" }
                },
                "additionalProperties": true
            },
            "env": string_map_schema("Environment variables injected into agent runs."),
            "logging": {
                "type": "object",
                "properties": {
                    "level": {
                        "type": "string",
                        "enum": ["silent", "error", "warn", "info", "debug", "trace"]
                    },
                    "file": { "type": "string" }
                },
                "additionalProperties": true
            },
            "gateway": gateway_schema(),
            "agents": {
                "type": "object",
                "properties": {
                    "defaults": {
                        "type": "object",
                        "properties": {
                            "workspace": { "type": "string" },
                            "model": { "type": "string" }
                        },
                        "additionalProperties": true
                    },
                    "list": { "type": "array", "items": agent_entry_schema() }
                },
                "additionalProperties": false
            },
            "models": {
                "type": "object",
                "description": "Model provider catalog overrides.",
                "additionalProperties": true
            },
            "channels": {
                "type": "object",
                "description": "Per-channel runtime settings keyed by channel id.",
                "additionalProperties": { "type": "object" }
            },
            "plugins": plugins_schema(),
            "skills": skills_schema(),
            "tools": {
                "type": "object",
                "properties": {
                    "allow": { "type": "array", "items": { "type": "string" } },
                    "deny": { "type": "array", "items": { "type": "string" } }
                },
                "additionalProperties": true
            },
            "session": {
                "type": "object",
                "properties": {
                    "scope": { "type": "string", "enum": ["per-sender", "global"] },
                    "idleMinutes": { "type": "integer", "minimum": 0 }
                },
                "additionalProperties": true
            }
        },
        "additionalProperties": false
    })
}
