//! Default agent selection and agent workspace directory resolution.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::{expand_home_path, ClawConfig, DEFAULT_AGENT_ID};

/// Trait contract for `WorkspaceResolver` behavior.
pub trait WorkspaceResolver: Send + Sync {
    fn resolve_workspace_dir(&self, config: &ClawConfig, agent_id: &str) -> Result<PathBuf>;
}

pub fn normalize_agent_id(raw: &str) -> String {
    let normalized = raw
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    let normalized = normalized.trim_matches('-');
    if normalized.is_empty() {
        DEFAULT_AGENT_ID.to_string()
    } else {
        normalized.to_string()
    }
}

/// Returns the agent flagged `default`, else the first listed agent, else `main`.
pub fn resolve_default_agent_id(config: &ClawConfig) -> String {
    let agents = &config.agents.list;
    agents
        .iter()
        .find(|agent| agent.default)
        .or_else(|| agents.first())
        .map(|agent| normalize_agent_id(&agent.id))
        .unwrap_or_else(|| DEFAULT_AGENT_ID.to_string())
}

#[derive(Debug, Clone)]
/// Public struct `DefaultWorkspaceResolver` used across OpenClaw components.
pub struct DefaultWorkspaceResolver {
    state_dir: PathBuf,
    home_dir: Option<String>,
}

impl DefaultWorkspaceResolver {
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
}

impl WorkspaceResolver for DefaultWorkspaceResolver {
    fn resolve_workspace_dir(&self, config: &ClawConfig, agent_id: &str) -> Result<PathBuf> {
        let agent_id = normalize_agent_id(agent_id);
        let default_agent_id = resolve_default_agent_id(config);
        let entry = config
            .agents
            .list
            .iter()
            .find(|agent| normalize_agent_id(&agent.id) == agent_id);
        if entry.is_none() && !config.agents.list.is_empty() {
            bail!("unknown agent id '{agent_id}'");
        }

        let configured = entry
            .and_then(|agent| agent.workspace.as_deref())
            .or_else(|| {
                (agent_id == default_agent_id)
                    .then_some(config.agents.defaults.workspace.as_deref())
                    .flatten()
            })
            .map(str::trim)
            .filter(|workspace| !workspace.is_empty());
        if let Some(workspace) = configured {
            return Ok(expand_home_path(workspace, self.home_dir.as_deref()));
        }

        if agent_id == default_agent_id {
            Ok(self.state_dir.join("workspace"))
        } else {
            Ok(self.state_dir.join(format!("workspace-{agent_id}")))
        }
    }
}
