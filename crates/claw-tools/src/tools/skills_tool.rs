//! `skills` tool: routes one action to the matching gateway method.

use std::{fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use claw_agent_core::{AgentTool, ToolDefinition, ToolExecutionResult};
use claw_gateway::{GatewayCallError, GatewayRpcClient};
use serde_json::json;
use thiserror::Error;

use super::*;

pub const SKILLS_TOOL_NAME: &str = "skills";
pub const SKILLS_INSTALL_MIN_TIMEOUT_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `SkillsAction` values.
pub enum SkillsAction {
    Status,
    Install,
    Update,
    Bins,
}

impl SkillsAction {
    pub const ALL: [SkillsAction; 4] = [Self::Status, Self::Install, Self::Update, Self::Bins];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Install => "install",
            Self::Update => "update",
            Self::Bins => "bins",
        }
    }

    /// Gateway method invoked for this action.
    pub fn gateway_method(self) -> &'static str {
        match self {
            Self::Status => "skills.status",
            Self::Install => "skills.install",
            Self::Update => "skills.update",
            Self::Bins => "skills.bins",
        }
    }
}

impl fmt::Display for SkillsAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SkillsAction {
    type Err = SkillsToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "status" => Ok(Self::Status),
            "install" => Ok(Self::Install),
            "update" => Ok(Self::Update),
            "bins" => Ok(Self::Bins),
            other => Err(SkillsToolError::UnknownAction {
                action: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Enumerates supported `SkillsToolError` values.
pub enum SkillsToolError {
    #[error("missing required string argument 'action'")]
    MissingAction,
    #[error("unknown action '{action}'; expected one of: status, install, update, bins")]
    UnknownAction { action: String },
    #[error("{message}")]
    InvalidParameter { name: String, message: String },
    #[error(transparent)]
    Remote(#[from] GatewayCallError),
}

impl SkillsToolError {
    fn invalid(name: &str, message: String) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            message,
        }
    }

    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::MissingAction => "missing_action",
            Self::UnknownAction { .. } => "unknown_action",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::Remote(error) => error.reason_code(),
        }
    }

    pub fn is_validation_error(&self) -> bool {
        !matches!(self, Self::Remote(_))
    }
}

/// Validated action arguments; optional fields are `None` when unset.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillsRequest {
    Status {
        agent_id: Option<String>,
    },
    Install {
        name: String,
        install_id: String,
        timeout_ms: Option<u64>,
    },
    Update {
        skill_key: String,
        enabled: Option<bool>,
        api_key: Option<String>,
        env: Option<Map<String, Value>>,
    },
    Bins,
}

impl SkillsRequest {
    pub fn action(&self) -> SkillsAction {
        match self {
            Self::Status { .. } => SkillsAction::Status,
            Self::Install { .. } => SkillsAction::Install,
            Self::Update { .. } => SkillsAction::Update,
            Self::Bins => SkillsAction::Bins,
        }
    }

    /// Minimal gateway payload; unset fields are omitted, never `null`.
    pub fn gateway_payload(&self) -> Value {
        let mut payload = Map::new();
        match self {
            Self::Status { agent_id } => {
                if let Some(agent_id) = agent_id {
                    payload.insert("agentId".to_string(), Value::String(agent_id.clone()));
                }
            }
            Self::Install {
                name,
                install_id,
                timeout_ms,
            } => {
                payload.insert("name".to_string(), Value::String(name.clone()));
                payload.insert("installId".to_string(), Value::String(install_id.clone()));
                if let Some(timeout_ms) = timeout_ms {
                    payload.insert("timeoutMs".to_string(), Value::from(*timeout_ms));
                }
            }
            Self::Update {
                skill_key,
                enabled,
                api_key,
                env,
            } => {
                payload.insert("skillKey".to_string(), Value::String(skill_key.clone()));
                if let Some(enabled) = enabled {
                    payload.insert("enabled".to_string(), Value::Bool(*enabled));
                }
                if let Some(api_key) = api_key {
                    payload.insert("apiKey".to_string(), Value::String(api_key.clone()));
                }
                if let Some(env) = env {
                    payload.insert("env".to_string(), Value::Object(env.clone()));
                }
            }
            Self::Bins => {}
        }
        Value::Object(payload)
    }
}

/// Floors a finite install timeout and clamps it to at least one second.
pub fn clamp_install_timeout_ms(raw: f64) -> Option<u64> {
    if !raw.is_finite() {
        return None;
    }
    Some(raw.floor().max(SKILLS_INSTALL_MIN_TIMEOUT_MS as f64) as u64)
}

pub fn parse_skills_action(arguments: &Value) -> Result<SkillsAction, SkillsToolError> {
    let action = arguments
        .get("action")
        .and_then(Value::as_str)
        .ok_or(SkillsToolError::MissingAction)?;
    action.trim().parse()
}

/// Validates tool arguments into a typed request without touching the network.
pub fn parse_skills_request(arguments: &Value) -> Result<SkillsRequest, SkillsToolError> {
    let required = |key: &str| {
        required_trimmed_string(arguments, key)
            .map_err(|message| SkillsToolError::invalid(key, message))
    };
    match parse_skills_action(arguments)? {
        SkillsAction::Status => Ok(SkillsRequest::Status {
            agent_id: optional_non_blank_string(arguments, "agentId"),
        }),
        SkillsAction::Install => Ok(SkillsRequest::Install {
            name: required("name")?,
            install_id: required("installId")?,
            timeout_ms: optional_finite_number(arguments, "timeoutMs")
                .and_then(clamp_install_timeout_ms),
        }),
        SkillsAction::Update => Ok(SkillsRequest::Update {
            skill_key: required("skillKey")?,
            enabled: optional_bool(arguments, "enabled"),
            api_key: optional_exact_string(arguments, "apiKey"),
            env: optional_object(arguments, "env")
                .map_err(|message| SkillsToolError::invalid("env", message))?,
        }),
        SkillsAction::Bins => Ok(SkillsRequest::Bins),
    }
}

/// Public struct `SkillsTool` used across OpenClaw components.
pub struct SkillsTool {
    client: Arc<dyn GatewayRpcClient>,
}

impl SkillsTool {
    pub fn new(client: Arc<dyn GatewayRpcClient>) -> Self {
        Self { client }
    }

    /// Validates, then performs exactly one gateway call.
    pub async fn run(&self, arguments: &Value) -> Result<(SkillsAction, Value), SkillsToolError> {
        let request = parse_skills_request(arguments)?;
        let action = request.action();
        let options = gateway_call_options_from_arguments(arguments);
        tracing::debug!(
            action = action.as_str(),
            method = action.gateway_method(),
            timeout_ms = options.timeout_ms,
            "invoking skills gateway method"
        );
        let result = self
            .client
            .call(action.gateway_method(), &options, request.gateway_payload())
            .await?;
        Ok((action, result))
    }
}

#[async_trait]
impl AgentTool for SkillsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: SKILLS_TOOL_NAME.to_string(),
            description: "Inspect, install, and configure agent skills through the OpenClaw gateway"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": SkillsAction::ALL
                            .iter()
                            .map(|action| action.as_str())
                            .collect::<Vec<_>>(),
                        "description": "status lists skills, install runs an installer, update edits skill config, bins lists required binaries"
                    },
                    "gatewayUrl": { "type": "string", "description": "Gateway websocket URL override" },
                    "gatewayToken": { "type": "string", "description": "Gateway auth token" },
                    "timeoutMs": {
                        "type": "number",
                        "description": "Call timeout in milliseconds; for install also forwarded as the installer timeout (minimum 1000)"
                    },
                    "agentId": { "type": "string", "description": "Agent to report on (status)" },
                    "name": { "type": "string", "description": "Skill name (install)" },
                    "installId": { "type": "string", "description": "Installer option id (install)" },
                    "skillKey": { "type": "string", "description": "Skill config key (update)" },
                    "enabled": { "type": "boolean", "description": "Enable or disable the skill (update)" },
                    "apiKey": { "type": "string", "description": "Skill API key; empty string clears it (update)" },
                    "env": {
                        "type": "object",
                        "additionalProperties": { "type": "string" },
                        "description": "Environment overrides; empty values clear a variable (update)"
                    }
                },
                "required": ["action"],
                "additionalProperties": false
            }),
        }
    }

    async fn execute(&self, arguments: Value) -> ToolExecutionResult {
        match self.run(&arguments).await {
            Ok((action, result)) => ToolExecutionResult::ok(json!({
                "tool": SKILLS_TOOL_NAME,
                "action": action.as_str(),
                "result": result,
            })),
            Err(error) => {
                if !error.is_validation_error() {
                    tracing::warn!(error = %error, "skills gateway call failed");
                }
                let mut content = Map::new();
                content.insert("tool".to_string(), json!(SKILLS_TOOL_NAME));
                if let Ok(action) = parse_skills_action(&arguments) {
                    content.insert("action".to_string(), json!(action.as_str()));
                }
                content.insert("reason_code".to_string(), json!(error.reason_code()));
                content.insert("error".to_string(), json!(error.to_string()));
                ToolExecutionResult::error(Value::Object(content))
            }
        }
    }
}
