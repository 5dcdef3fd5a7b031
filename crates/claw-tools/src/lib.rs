//! Agent tools that drive the OpenClaw gateway.
//!
//! Hosts the `skills` action router and the argument parsing helpers shared
//! by gateway-backed tools.

pub mod tools;

pub use tools::*;
