use clap::{Args, Parser, Subcommand};

pub(crate) const DEFAULT_SCHEMA_BIND: &str = "127.0.0.1:18790";

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "claw",
    about = "OpenClaw config schema service and gateway skills tool",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CliCommand {
    /// Serve the composed config schema over HTTP.
    Serve(ServeArgs),
    /// Compose the config schema once and print it.
    Schema(SchemaArgs),
    /// Run one skills action against the gateway.
    Skills(SkillsArgs),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct StateArgs {
    #[arg(
        long = "state-dir",
        help = "OpenClaw state directory (defaults to $OPENCLAW_STATE_DIR or ~/.openclaw)"
    )]
    pub(crate) state_dir: Option<String>,

    #[arg(
        long = "config",
        help = "Config file path (defaults to $OPENCLAW_CONFIG_PATH or <state-dir>/openclaw.json)"
    )]
    pub(crate) config: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ServeArgs {
    #[arg(
        long,
        env = "OPENCLAW_SCHEMA_BIND",
        default_value = DEFAULT_SCHEMA_BIND,
        help = "Socket address the schema server listens on"
    )]
    pub(crate) bind: String,

    #[command(flatten)]
    pub(crate) state: StateArgs,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SchemaArgs {
    #[command(flatten)]
    pub(crate) state: StateArgs,

    #[arg(long, help = "Pretty-print the schema document")]
    pub(crate) pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SkillsArgs {
    #[arg(
        long,
        value_parser = ["status", "install", "update", "bins"],
        help = "Skills action to run"
    )]
    pub(crate) action: String,

    #[arg(
        long = "gateway-url",
        env = "OPENCLAW_GATEWAY_URL",
        help = "Gateway websocket URL (defaults to ws://127.0.0.1:18789)"
    )]
    pub(crate) gateway_url: Option<String>,

    #[arg(
        long = "gateway-token",
        env = "OPENCLAW_GATEWAY_TOKEN",
        hide_env_values = true,
        help = "Gateway bearer token"
    )]
    pub(crate) gateway_token: Option<String>,

    #[arg(
        long = "timeout-ms",
        value_parser = parse_positive_u64,
        help = "Gateway call timeout in milliseconds"
    )]
    pub(crate) timeout_ms: Option<u64>,

    #[arg(
        long = "args-json",
        help = "Extra action arguments as a JSON object, e.g. '{\"skillKey\":\"weather\"}'"
    )]
    pub(crate) args_json: Option<String>,
}
