//! Dynamic configuration-schema aggregation for OpenClaw.
//!
//! Plugin and channel descriptors are first flattened into
//! [`ExtensionContribution`] records, then merged with the static base
//! schema into one namespaced, collision-free JSON Schema document.

pub mod config_schema_composer;
pub mod extension_contribution;

pub use config_schema_composer::*;
pub use extension_contribution::*;
