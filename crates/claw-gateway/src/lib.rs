//! OpenClaw gateway HTTP surface and websocket RPC client.
//!
//! Hosts the chainable HTTP handler dispatch, the
//! `/openclaw.schema.json` endpoint, the server bootstrap, and the
//! request/response frame protocol used to call gateway methods.

pub mod config_schema_http;
pub mod gateway_rpc;
pub mod gateway_ws_protocol;
pub mod http_dispatch;
pub mod server_bootstrap;

pub use config_schema_http::*;
pub use gateway_rpc::*;
pub use gateway_ws_protocol::*;
pub use http_dispatch::*;
pub use server_bootstrap::*;
