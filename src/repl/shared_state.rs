use std::sync::{Arc, RwLock};

use crate::config::{DisplayConfig, OutputFormat};
use crate::session::Session;

/// Shared state between the REPL, the executor and the completer.
///
/// Lock discipline: the completer takes short read locks on every keystroke,
/// the executor takes a write lock per command. No lock is ever held across
/// a `read_line` call.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// The session namespace (open files and variable bindings)
    pub session: Arc<RwLock<Session>>,

    /// Output format setting
    pub output_format: Arc<RwLock<OutputFormat>>,

    /// Color output setting
    pub color_enabled: Arc<RwLock<bool>>,
}

impl SharedState {
    /// Create a new shared state with default display settings.
    pub fn new() -> Self {
        Self::with_config(&DisplayConfig::default())
    }

    /// Create a new shared state with display configuration.
    pub fn with_config(display_config: &DisplayConfig) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            output_format: Arc::new(RwLock::new(display_config.format)),
            color_enabled: Arc::new(RwLock::new(display_config.color_output)),
        }
    }

    /// Get the current output format.
    pub fn format(&self) -> OutputFormat {
        *self.output_format.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the output format.
    pub fn set_format(&self, format: OutputFormat) {
        *self.output_format.write().unwrap_or_else(|e| e.into_inner()) = format;
    }

    /// Whether colored output is enabled.
    pub fn colors(&self) -> bool {
        *self.color_enabled.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Enable or disable colored output.
    pub fn set_colors(&self, enabled: bool) {
        *self.color_enabled.write().unwrap_or_else(|e| e.into_inner()) = enabled;
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_roundtrip() {
        let state = SharedState::new();
        assert_eq!(state.format(), OutputFormat::Shell);
        state.set_format(OutputFormat::Json);
        assert_eq!(state.format(), OutputFormat::Json);
    }

    #[test]
    fn test_clones_share_session() {
        let state = SharedState::new();
        let clone = state.clone();
        state.session.write().unwrap().bind(
            "x",
            crate::session::Value::Json(serde_json::json!(1)),
        );
        assert!(clone.session.read().unwrap().lookup("x").is_some());
    }
}
