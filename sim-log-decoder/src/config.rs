//! Dispatcher configuration
//!
//! Diagnostic settings handed to the dispatcher at construction. There is
//! deliberately no global verbosity flag; callers decide how chatty each
//! dispatcher instance should be.

use serde::{Deserialize, Serialize};

/// Configuration for the message dispatcher
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Emit a trace diagnostic for every datagram outside the event-log
    /// family instead of dropping it silently
    #[serde(default)]
    pub log_ignored: bool,
}

impl DispatcherConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: enable or disable diagnostics for ignored datagrams
    pub fn with_ignored_logging(mut self, enabled: bool) -> Self {
        self.log_ignored = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = DispatcherConfig::new().with_ignored_logging(true);
        assert!(config.log_ignored);
        assert!(!DispatcherConfig::new().log_ignored);
    }
}
