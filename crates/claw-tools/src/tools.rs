use serde_json::{Map, Value};

use claw_gateway::{GatewayCallOptions, DEFAULT_GATEWAY_CALL_TIMEOUT_MS};

mod skills_tool;

pub use skills_tool::*;

/// Trimmed, non-empty string argument; `None` when absent, mistyped or blank.
fn optional_trimmed_string(arguments: &Value, key: &str) -> Option<String> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Non-blank string argument forwarded as supplied; whitespace-only values are dropped.
fn optional_non_blank_string(arguments: &Value, key: &str) -> Option<String> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn required_trimmed_string(arguments: &Value, key: &str) -> Result<String, String> {
    let Some(value) = arguments.get(key) else {
        return Err(format!("missing required string argument '{key}'"));
    };
    let Some(raw) = value.as_str() else {
        return Err(format!("argument '{key}' must be a string"));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("argument '{key}' must be non-empty"));
    }
    Ok(trimmed.to_string())
}

/// Exact-type string lookup; empty strings are kept.
fn optional_exact_string(arguments: &Value, key: &str) -> Option<String> {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn optional_bool(arguments: &Value, key: &str) -> Option<bool> {
    arguments.get(key).and_then(Value::as_bool)
}

fn optional_finite_number(arguments: &Value, key: &str) -> Option<f64> {
    arguments
        .get(key)
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite())
}

/// Object argument; `null` counts as absent, any other non-object is rejected.
fn optional_object(arguments: &Value, key: &str) -> Result<Option<Map<String, Value>>, String> {
    match arguments.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object.clone())),
        Some(_) => Err(format!("argument '{key}' must be an object")),
    }
}

/// Resolves the remote call timeout: a finite caller value of at least 1ms, else the default.
pub fn resolve_gateway_call_timeout_ms(arguments: &Value) -> u64 {
    optional_finite_number(arguments, "timeoutMs")
        .map(f64::floor)
        .filter(|value| *value >= 1.0)
        .map(|value| value as u64)
        .unwrap_or(DEFAULT_GATEWAY_CALL_TIMEOUT_MS)
}

/// Builds fresh per-call gateway options from tool arguments.
pub fn gateway_call_options_from_arguments(arguments: &Value) -> GatewayCallOptions {
    GatewayCallOptions {
        gateway_url: optional_trimmed_string(arguments, "gatewayUrl"),
        gateway_token: optional_trimmed_string(arguments, "gatewayToken"),
        timeout_ms: resolve_gateway_call_timeout_ms(arguments),
    }
}
