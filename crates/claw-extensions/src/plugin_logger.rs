//! Logger handle passed to plugin discovery.

/// Trait contract for `PluginLogger` behavior. Every level defaults to a no-op.
pub trait PluginLogger: Send + Sync {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

#[derive(Debug, Clone, Copy, Default)]
/// Public struct `NoopPluginLogger` used across OpenClaw components.
pub struct NoopPluginLogger;

impl PluginLogger for NoopPluginLogger {}

#[derive(Debug, Clone, Copy, Default)]
/// Forwards plugin discovery messages to `tracing`.
pub struct TracingPluginLogger;

impl PluginLogger for TracingPluginLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(component = "plugin_loader", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(component = "plugin_loader", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(component = "plugin_loader", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(component = "plugin_loader", "{message}");
    }
}
