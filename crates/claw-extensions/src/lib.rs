//! Plugin and channel discovery surfaces for OpenClaw.
//!
//! Discovers `openclaw.plugin.json` manifests into a plugin registry and
//! exposes the channel adapter catalog. Both produce plain descriptors that
//! downstream consumers (such as the config-schema composer) read without
//! knowing how an extension was found.

pub mod channel_catalog;
pub mod plugin_logger;
pub mod plugin_manifest;
pub mod plugin_registry;

pub use channel_catalog::*;
pub use plugin_logger::*;
pub use plugin_manifest::*;
pub use plugin_registry::*;
