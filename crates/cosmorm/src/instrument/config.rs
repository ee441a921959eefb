use std::time::Duration;
use tracing::Level;

/// Configuration for [`InstrumentedLauncher`](super::InstrumentedLauncher).
///
/// By default, logging is enabled at `DEBUG`, long query text is truncated
/// to 200 bytes and no timeout applies.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Maximum wait for a single page. `None` means no timeout (default).
    pub query_timeout: Option<Duration>,
    /// Whole-stream duration above which a slow query warning is emitted.
    pub slow_query_threshold: Option<Duration>,
    /// Whether to emit launch/completion events.
    pub logging_enabled: bool,
    /// Level of launch/completion events.
    pub level: Level,
    /// Truncate long query text (in bytes). `None` means no truncation.
    pub max_query_length: Option<usize>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            query_timeout: None,
            slow_query_threshold: None,
            logging_enabled: true,
            level: Level::DEBUG,
            max_query_length: Some(200),
        }
    }
}

impl LauncherConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-page timeout.
    ///
    /// A page not delivered within this duration ends the stream with a timeout error.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Set the slow query threshold.
    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// Override the event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum query length to log.
    pub fn max_query_length(mut self, len: usize) -> Self {
        self.max_query_length = Some(len);
        self
    }

    /// Disable query truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_query_length = None;
        self
    }

    /// Emit launch and completion events (default).
    pub fn enable_logging(mut self) -> Self {
        self.logging_enabled = true;
        self
    }

    /// Stop emitting events for launched queries, slow query warnings included.
    pub fn disable_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }

    pub(crate) fn truncate_query(&self, query: &str) -> String {
        match self.max_query_length {
            Some(max) if query.len() > max => {
                format!("{}...", super::truncate_query_bytes(query, max))
            }
            _ => query.to_string(),
        }
    }
}
