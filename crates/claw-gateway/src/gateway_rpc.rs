//! Single-shot gateway method calls over the websocket control plane.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use thiserror::Error;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        http::{header::AUTHORIZATION, HeaderValue},
        Message as WsMessage,
    },
};

use crate::gateway_ws_protocol::{
    best_effort_gateway_rpc_request_id, build_gateway_rpc_request_frame, gateway_rpc_error_details,
    parse_gateway_rpc_response_frame,
};

pub const DEFAULT_GATEWAY_URL: &str = "ws://127.0.0.1:18789";
pub const DEFAULT_GATEWAY_CALL_TIMEOUT_MS: u64 = 60_000;

/// Per-call connection settings; built fresh for every tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCallOptions {
    pub gateway_url: Option<String>,
    pub gateway_token: Option<String>,
    pub timeout_ms: u64,
}

impl Default for GatewayCallOptions {
    fn default() -> Self {
        Self {
            gateway_url: None,
            gateway_token: None,
            timeout_ms: DEFAULT_GATEWAY_CALL_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Enumerates supported `GatewayCallError` values.
pub enum GatewayCallError {
    #[error("gateway transport error: {0}")]
    Transport(String),
    #[error("gateway call '{method}' timed out after {timeout_ms}ms")]
    Timeout { method: String, timeout_ms: u64 },
    #[error("gateway error {code}: {message}")]
    Remote { code: String, message: String },
    #[error("gateway protocol error: {0}")]
    Protocol(String),
}

impl GatewayCallError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "gateway_transport_error",
            Self::Timeout { .. } => "gateway_timeout",
            Self::Remote { .. } => "gateway_remote_error",
            Self::Protocol(_) => "gateway_protocol_error",
        }
    }
}

/// Trait contract for `GatewayRpcClient` behavior.
///
/// Implementations must honour `options.timeout_ms` for the whole exchange.
#[async_trait]
pub trait GatewayRpcClient: Send + Sync {
    async fn call(
        &self,
        method: &str,
        options: &GatewayCallOptions,
        payload: Value,
    ) -> Result<Value, GatewayCallError>;
}

#[derive(Debug, Clone)]
/// Opens one websocket connection per call and waits for the matching response frame.
pub struct WsGatewayRpcClient {
    default_url: String,
    request_counter: Arc<AtomicU64>,
}

impl Default for WsGatewayRpcClient {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

impl WsGatewayRpcClient {
    pub fn new(default_url: impl Into<String>) -> Self {
        Self {
            default_url: default_url.into(),
            request_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    fn next_request_id(&self) -> String {
        let sequence = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("claw-rpc-{}-{sequence}", std::process::id())
    }

    async fn exchange(
        &self,
        url: &str,
        token: Option<&str>,
        method: &str,
        payload: Value,
    ) -> Result<Value, GatewayCallError> {
        let mut request = url.into_client_request().map_err(|error| {
            GatewayCallError::Transport(format!("invalid gateway url '{url}': {error}"))
        })?;
        if let Some(token) = token {
            let header = HeaderValue::from_str(format!("Bearer {token}").as_str()).map_err(
                |error| GatewayCallError::Transport(format!("invalid gateway token: {error}")),
            )?;
            request.headers_mut().insert(AUTHORIZATION, header);
        }
        let (mut socket, _response) = connect_async(request).await.map_err(|error| {
            GatewayCallError::Transport(format!("failed to connect to {url}: {error}"))
        })?;

        let request_id = self.next_request_id();
        let frame = build_gateway_rpc_request_frame(&request_id, method, payload)
            .map_err(|error| GatewayCallError::Protocol(format!("{error:#}")))?;
        let raw = serde_json::to_string(&frame)
            .map_err(|error| GatewayCallError::Protocol(error.to_string()))?;
        tracing::debug!(method, request_id = %request_id, url, "sending gateway rpc request");
        socket
            .send(WsMessage::Text(raw.into()))
            .await
            .map_err(|error| GatewayCallError::Transport(error.to_string()))?;

        while let Some(message) = socket.next().await {
            let message = message.map_err(|error| GatewayCallError::Transport(error.to_string()))?;
            let text = match message {
                WsMessage::Text(text) => text,
                WsMessage::Ping(payload) => {
                    socket
                        .send(WsMessage::Pong(payload))
                        .await
                        .map_err(|error| GatewayCallError::Transport(error.to_string()))?;
                    continue;
                }
                WsMessage::Close(_) => break,
                _ => continue,
            };
            let response = match parse_gateway_rpc_response_frame(text.as_str()) {
                Ok(response) => response,
                Err(error) => {
                    if best_effort_gateway_rpc_request_id(text.as_str()).as_deref()
                        == Some(request_id.as_str())
                    {
                        return Err(GatewayCallError::Protocol(format!("{error:#}")));
                    }
                    tracing::debug!(error = %error, "skipping non-response gateway frame");
                    continue;
                }
            };
            if response.request_id != request_id {
                tracing::debug!(
                    kind = %response.kind,
                    request_id = %response.request_id,
                    "skipping unrelated gateway frame"
                );
                continue;
            }
            let _ = socket.close(None).await;
            if let Some((code, message)) = gateway_rpc_error_details(&response) {
                return Err(GatewayCallError::Remote { code, message });
            }
            return Ok(response.payload);
        }

        Err(GatewayCallError::Transport(format!(
            "gateway closed the connection before answering '{method}'"
        )))
    }
}

#[async_trait]
impl GatewayRpcClient for WsGatewayRpcClient {
    async fn call(
        &self,
        method: &str,
        options: &GatewayCallOptions,
        payload: Value,
    ) -> Result<Value, GatewayCallError> {
        let url = options
            .gateway_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.default_url.as_str());
        let token = options
            .gateway_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty());
        let timeout = Duration::from_millis(options.timeout_ms.max(1));
        match tokio::time::timeout(timeout, self.exchange(url, token, method, payload)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayCallError::Timeout {
                method: method.to_string(),
                timeout_ms: options.timeout_ms,
            }),
        }
    }
}
