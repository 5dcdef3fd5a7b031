//! Configuration model, loading, and workspace resolution for OpenClaw.
//!
//! Owns the on-disk `openclaw.json` model, the synchronous loader contract,
//! default agent/workspace resolution, and the static base JSON Schema that
//! describes the core configuration keys.

pub mod agent_workspace;
pub mod base_schema;
pub mod config_loader;
pub mod config_model;

pub use agent_workspace::*;
pub use base_schema::*;
pub use config_loader::*;
pub use config_model::*;
