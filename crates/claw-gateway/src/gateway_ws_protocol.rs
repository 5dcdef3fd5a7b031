use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const GATEWAY_RPC_REQUEST_SCHEMA_VERSION: u32 = 1;
pub const GATEWAY_RPC_RESPONSE_SCHEMA_VERSION: u32 = 1;
pub const GATEWAY_RPC_ERROR_KIND: &str = "error";
pub const GATEWAY_RPC_HEARTBEAT_KIND: &str = "gateway.heartbeat";

pub const GATEWAY_RPC_ERROR_CODE_INVALID_JSON: &str = "invalid_json";
pub const GATEWAY_RPC_ERROR_CODE_INVALID_PAYLOAD: &str = "invalid_payload";
pub const GATEWAY_RPC_ERROR_CODE_UNSUPPORTED_METHOD: &str = "unsupported_method";
pub const GATEWAY_RPC_ERROR_CODE_UNAUTHORIZED: &str = "unauthorized";
pub const GATEWAY_RPC_ERROR_CODE_INTERNAL_ERROR: &str = "internal_error";

const GATEWAY_RPC_COMPATIBLE_RESPONSE_SCHEMA_VERSIONS: [u32; 2] =
    [0, GATEWAY_RPC_RESPONSE_SCHEMA_VERSION];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayRpcRequestFrame {
    pub schema_version: u32,
    pub request_id: String,
    pub kind: String,
    pub payload: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayRpcResponseFrame {
    pub schema_version: u32,
    pub request_id: String,
    pub kind: String,
    pub payload: Value,
}

impl GatewayRpcResponseFrame {
    pub fn is_error(&self) -> bool {
        self.kind == GATEWAY_RPC_ERROR_KIND
    }
}

/// Wraps `payload` for `method`; the payload must be a JSON object.
pub fn build_gateway_rpc_request_frame(
    request_id: &str,
    method: &str,
    payload: Value,
) -> Result<GatewayRpcRequestFrame> {
    let request_id = request_id.trim();
    if request_id.is_empty() {
        bail!("gateway rpc request_id must be non-empty");
    }
    let method = method.trim();
    if method.is_empty() {
        bail!("gateway rpc method must be non-empty");
    }
    if !payload.is_object() {
        bail!("gateway rpc payload for '{method}' must be a JSON object");
    }
    Ok(GatewayRpcRequestFrame {
        schema_version: GATEWAY_RPC_REQUEST_SCHEMA_VERSION,
        request_id: request_id.to_string(),
        kind: method.to_string(),
        payload,
    })
}

pub fn parse_gateway_rpc_request_frame(raw: &str) -> Result<GatewayRpcRequestFrame> {
    let frame = serde_json::from_str::<GatewayRpcRequestFrame>(raw)
        .context("failed to parse gateway rpc frame JSON")?;
    if frame.request_id.trim().is_empty() {
        bail!("gateway rpc frame request_id must be non-empty");
    }
    if !frame.payload.is_object() {
        bail!("gateway rpc frame payload must be a JSON object");
    }
    Ok(frame)
}

pub fn parse_gateway_rpc_response_frame(raw: &str) -> Result<GatewayRpcResponseFrame> {
    let frame = serde_json::from_str::<GatewayRpcResponseFrame>(raw)
        .context("failed to parse gateway rpc response frame JSON")?;
    if !GATEWAY_RPC_COMPATIBLE_RESPONSE_SCHEMA_VERSIONS.contains(&frame.schema_version) {
        bail!(
            "unsupported gateway rpc response schema version {}",
            frame.schema_version
        );
    }
    Ok(frame)
}

pub fn build_gateway_rpc_response_frame(
    request_id: &str,
    kind: &str,
    payload: Value,
) -> GatewayRpcResponseFrame {
    GatewayRpcResponseFrame {
        schema_version: GATEWAY_RPC_RESPONSE_SCHEMA_VERSION,
        request_id: request_id.to_string(),
        kind: kind.to_string(),
        payload,
    }
}

pub fn build_gateway_rpc_error_frame(
    request_id: &str,
    code: &str,
    message: &str,
) -> GatewayRpcResponseFrame {
    build_gateway_rpc_response_frame(
        request_id,
        GATEWAY_RPC_ERROR_KIND,
        json!({
            "code": code,
            "message": message,
        }),
    )
}

/// Extracts `(code, message)` from an error frame.
pub fn gateway_rpc_error_details(frame: &GatewayRpcResponseFrame) -> Option<(String, String)> {
    if !frame.is_error() {
        return None;
    }
    let empty = Map::new();
    let payload = frame.payload.as_object().unwrap_or(&empty);
    let code = payload
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or(GATEWAY_RPC_ERROR_CODE_INTERNAL_ERROR)
        .to_string();
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| frame.payload.to_string());
    Some((code, message))
}

pub fn classify_gateway_rpc_parse_error(message: &str) -> &'static str {
    if message.contains("failed to parse gateway rpc frame JSON") {
        GATEWAY_RPC_ERROR_CODE_INVALID_JSON
    } else if message.contains("gateway rpc frame payload must be a JSON object")
        || message.contains("gateway rpc frame request_id must be non-empty")
    {
        GATEWAY_RPC_ERROR_CODE_INVALID_PAYLOAD
    } else {
        GATEWAY_RPC_ERROR_CODE_INTERNAL_ERROR
    }
}

pub fn best_effort_gateway_rpc_request_id(raw: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(raw).ok()?;
    let request_id = value
        .get("request_id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())?;
    Some(request_id.to_string())
}
