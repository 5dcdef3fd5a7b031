//! Ordered HTTP handler chain with a tri-state outcome per handler.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use thiserror::Error;

/// Request line and headers handed to every handler in the chain.
#[derive(Debug, Clone)]
pub struct GatewayHttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
}

impl GatewayHttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
/// Handler failure rendered as `{ "error": <message> }`.
pub struct GatewayHttpError {
    status: StatusCode,
    message: String,
}

impl GatewayHttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for GatewayHttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Result of offering a request to one handler.
pub enum HandlerOutcome {
    Handled(Response),
    NotMatched,
    Errored(GatewayHttpError),
}

impl fmt::Debug for HandlerOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handled(response) => formatter
                .debug_tuple("Handled")
                .field(&response.status())
                .finish(),
            Self::NotMatched => formatter.write_str("NotMatched"),
            Self::Errored(error) => formatter.debug_tuple("Errored").field(error).finish(),
        }
    }
}

impl HandlerOutcome {
    pub fn is_not_matched(&self) -> bool {
        matches!(self, Self::NotMatched)
    }
}

/// Trait contract for `GatewayHttpHandler` behavior.
#[async_trait]
pub trait GatewayHttpHandler: Send + Sync {
    async fn handle(&self, request: &GatewayHttpRequest) -> HandlerOutcome;
}

#[derive(Clone, Default)]
/// Offers each request to its handlers in registration order.
pub struct GatewayHandlerChain {
    handlers: Vec<Arc<dyn GatewayHttpHandler>>,
}

impl GatewayHandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, handler: Arc<dyn GatewayHttpHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns the first outcome that is not `NotMatched`.
    pub async fn dispatch(&self, request: &GatewayHttpRequest) -> HandlerOutcome {
        for handler in &self.handlers {
            match handler.handle(request).await {
                HandlerOutcome::NotMatched => continue,
                outcome => return outcome,
            }
        }
        HandlerOutcome::NotMatched
    }

    /// Mounts the chain as the router fallback; unmatched requests get 404.
    pub fn into_router(self) -> Router {
        Router::new()
            .fallback(handle_chain_request)
            .with_state(Arc::new(self))
    }
}

async fn handle_chain_request(
    State(chain): State<Arc<GatewayHandlerChain>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request = GatewayHttpRequest {
        method,
        path: uri.path().to_string(),
        headers,
    };
    match chain.dispatch(&request).await {
        HandlerOutcome::Handled(response) => response,
        HandlerOutcome::Errored(error) => {
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                status = error.status().as_u16(),
                error = %error,
                "gateway handler failed"
            );
            error.into_response()
        }
        HandlerOutcome::NotMatched => GatewayHttpError::new(StatusCode::NOT_FOUND, "not found")
            .into_response(),
    }
}
