//! `/openclaw.schema.json` handler: serves the composed configuration schema.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::IntoResponse,
};
use claw_config::{
    base_config_schema, resolve_default_agent_id, ConfigLoader, DefaultWorkspaceResolver,
    FileConfigLoader, WorkspaceResolver,
};
use claw_config_schema::{
    compose_config_schema, normalize_extension_descriptors, ComposedSchema, CompositionError,
};
use claw_extensions::{
    BuiltinChannelLister, ChannelPluginLister, ManifestPluginLoader, PluginLoader, PluginLogger,
    TracingPluginLogger,
};
use serde_json::Value;
use thiserror::Error;

use crate::http_dispatch::{GatewayHttpError, GatewayHttpHandler, GatewayHttpRequest, HandlerOutcome};

pub const CONFIG_SCHEMA_ENDPOINT: &str = "/openclaw.schema.json";
pub const CONFIG_SCHEMA_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Error)]
/// Enumerates supported `ConfigSchemaError` values.
pub enum ConfigSchemaError {
    #[error("failed to load config: {message}")]
    ConfigLoad { message: String },
    #[error("failed to resolve workspace for agent '{agent_id}': {message}")]
    WorkspaceResolution { agent_id: String, message: String },
    #[error("failed to load plugins: {message}")]
    PluginDiscovery { message: String },
    #[error(transparent)]
    Composition(#[from] CompositionError),
    #[error("failed to serialize config schema: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("config schema worker failed: {message}")]
    Worker { message: String },
}

/// Collaborators consulted for every schema request.
#[derive(Clone)]
pub struct ConfigSchemaSources {
    pub config_loader: Arc<dyn ConfigLoader>,
    pub workspace_resolver: Arc<dyn WorkspaceResolver>,
    pub plugin_loader: Arc<dyn PluginLoader>,
    pub channel_lister: Arc<dyn ChannelPluginLister>,
    pub plugin_logger: Arc<dyn PluginLogger>,
    pub base_schema: Value,
}

impl ConfigSchemaSources {
    /// File-backed config, manifest discovery and built-in channels rooted at `state_dir`.
    pub fn for_state_dir(state_dir: &Path, config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_loader: Arc::new(FileConfigLoader::new(config_path)),
            workspace_resolver: Arc::new(DefaultWorkspaceResolver::new(state_dir)),
            plugin_loader: Arc::new(ManifestPluginLoader::new(state_dir)),
            channel_lister: Arc::new(BuiltinChannelLister::new()),
            plugin_logger: Arc::new(TracingPluginLogger),
            base_schema: base_config_schema(),
        }
    }
}

/// Loads config, discovers extensions and composes the schema document.
pub fn build_config_schema_document(
    sources: &ConfigSchemaSources,
) -> Result<ComposedSchema, ConfigSchemaError> {
    let config = sources
        .config_loader
        .load_config()
        .map_err(|error| ConfigSchemaError::ConfigLoad {
            message: format!("{error:#}"),
        })?;
    let agent_id = resolve_default_agent_id(&config);
    let workspace_dir = sources
        .workspace_resolver
        .resolve_workspace_dir(&config, &agent_id)
        .map_err(|error| ConfigSchemaError::WorkspaceResolution {
            agent_id: agent_id.clone(),
            message: format!("{error:#}"),
        })?;
    let registry = sources
        .plugin_loader
        .load_plugins(&config, &workspace_dir, sources.plugin_logger.as_ref())
        .map_err(|error| ConfigSchemaError::PluginDiscovery {
            message: format!("{error:#}"),
        })?;
    let channels = sources.channel_lister.list_channel_plugins();
    let contributions = normalize_extension_descriptors(&registry.plugins, &channels);
    let composed = compose_config_schema(&sources.base_schema, &contributions)?;
    tracing::debug!(
        agent_id = %agent_id,
        workspace_dir = %workspace_dir.display(),
        plugins = registry.plugins.len(),
        plugin_diagnostics = registry.diagnostics.len(),
        channels = channels.len(),
        "composed config schema"
    );
    Ok(composed)
}

fn render_config_schema_body(sources: &ConfigSchemaSources) -> Result<String, ConfigSchemaError> {
    let composed = build_config_schema_document(sources)?;
    Ok(composed.to_json_string()?)
}

#[derive(Clone)]
/// Answers `GET` and `HEAD` on [`CONFIG_SCHEMA_ENDPOINT`].
pub struct ConfigSchemaHandler {
    sources: Arc<ConfigSchemaSources>,
}

impl ConfigSchemaHandler {
    pub fn new(sources: ConfigSchemaSources) -> Self {
        Self {
            sources: Arc::new(sources),
        }
    }

    async fn render(&self) -> Result<String, ConfigSchemaError> {
        let sources = Arc::clone(&self.sources);
        tokio::task::spawn_blocking(move || render_config_schema_body(&sources))
            .await
            .map_err(|error| ConfigSchemaError::Worker {
                message: error.to_string(),
            })?
    }
}

#[async_trait]
impl GatewayHttpHandler for ConfigSchemaHandler {
    async fn handle(&self, request: &GatewayHttpRequest) -> HandlerOutcome {
        if request.path != CONFIG_SCHEMA_ENDPOINT {
            return HandlerOutcome::NotMatched;
        }
        if request.method == Method::HEAD {
            return HandlerOutcome::Handled(
                (
                    StatusCode::OK,
                    [(CONTENT_TYPE, CONFIG_SCHEMA_CONTENT_TYPE)],
                    Body::empty(),
                )
                    .into_response(),
            );
        }
        if request.method != Method::GET {
            return HandlerOutcome::NotMatched;
        }
        match self.render().await {
            Ok(body) => HandlerOutcome::Handled(
                (
                    StatusCode::OK,
                    [(CONTENT_TYPE, CONFIG_SCHEMA_CONTENT_TYPE)],
                    body,
                )
                    .into_response(),
            ),
            Err(error) => HandlerOutcome::Errored(GatewayHttpError::internal(error.to_string())),
        }
    }
}
