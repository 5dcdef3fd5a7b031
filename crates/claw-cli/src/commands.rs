use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use claw_agent_core::AgentTool;
use claw_config::{
    resolve_config_path_from, resolve_state_dir_from, OPENCLAW_CONFIG_PATH_ENV,
    OPENCLAW_STATE_DIR_ENV,
};
use claw_gateway::{
    build_config_schema_document, run_gateway_http_server, ConfigSchemaSources,
    GatewayHttpServerConfig, WsGatewayRpcClient,
};
use claw_tools::SkillsTool;
use serde_json::{Map, Value};

use crate::cli_args::{Cli, CliCommand, SchemaArgs, SkillsArgs, StateArgs};

pub(crate) async fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        CliCommand::Serve(args) => {
            let (state_dir, config_path) = resolve_state_paths(&args.state, &process_env);
            run_gateway_http_server(GatewayHttpServerConfig {
                bind: args.bind,
                state_dir,
                config_path,
            })
            .await
        }
        CliCommand::Schema(args) => run_schema_command(&args),
        CliCommand::Skills(args) => run_skills_command(&args).await,
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Flag, then environment variable, then the home-relative default.
pub(crate) fn resolve_state_paths(
    state: &StateArgs,
    env: &dyn Fn(&str) -> Option<String>,
) -> (PathBuf, PathBuf) {
    let home_dir = env("HOME");
    let state_dir_override = state
        .state_dir
        .clone()
        .or_else(|| env(OPENCLAW_STATE_DIR_ENV));
    let state_dir = resolve_state_dir_from(state_dir_override.as_deref(), home_dir.as_deref());
    let config_override = state.config.clone().or_else(|| env(OPENCLAW_CONFIG_PATH_ENV));
    let config_path =
        resolve_config_path_from(config_override.as_deref(), &state_dir, home_dir.as_deref());
    (state_dir, config_path)
}

fn run_schema_command(args: &SchemaArgs) -> Result<()> {
    let (state_dir, config_path) = resolve_state_paths(&args.state, &process_env);
    let sources = ConfigSchemaSources::for_state_dir(&state_dir, config_path);
    let composed = build_config_schema_document(&sources)?;
    let rendered = if args.pretty {
        serde_json::to_string_pretty(composed.as_value())
    } else {
        composed.to_json_string()
    }
    .context("failed to render config schema")?;
    println!("{rendered}");
    Ok(())
}

/// Merges `--args-json` with the dedicated flags; flags win.
pub(crate) fn build_skills_arguments(args: &SkillsArgs) -> Result<Value> {
    let mut arguments = match args.args_json.as_deref() {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("invalid --args-json")? {
            Value::Object(object) => object,
            _ => bail!("--args-json must be a JSON object"),
        },
        None => Map::new(),
    };
    arguments.insert("action".to_string(), Value::String(args.action.clone()));
    if let Some(url) = &args.gateway_url {
        arguments.insert("gatewayUrl".to_string(), Value::String(url.clone()));
    }
    if let Some(token) = &args.gateway_token {
        arguments.insert("gatewayToken".to_string(), Value::String(token.clone()));
    }
    if let Some(timeout_ms) = args.timeout_ms {
        arguments.insert("timeoutMs".to_string(), Value::from(timeout_ms));
    }
    Ok(Value::Object(arguments))
}

async fn run_skills_command(args: &SkillsArgs) -> Result<()> {
    let arguments = build_skills_arguments(args)?;
    let tool = SkillsTool::new(Arc::new(WsGatewayRpcClient::default()));
    let result = tool.execute(arguments).await;
    println!("{}", result.as_text());
    if result.is_error {
        return Err(anyhow!("skills action '{}' failed", args.action));
    }
    Ok(())
}
