//! Logging and timeouts around any [`QueryLauncher`](crate::QueryLauncher).
//!
//! [`InstrumentedLauncher`] wraps a launcher and, per launched query:
//! - emits a `tracing` event (target `cosmorm.query`) when the query is launched
//!   and when its page stream finishes, fails or is dropped
//! - warns when the whole stream took longer than the slow query threshold
//! - fails the stream with [`OrmError::Timeout`](crate::OrmError::Timeout) when
//!   a single page takes longer than the query timeout
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmorm::{InstrumentedLauncher, LauncherConfig};
//! use std::time::Duration;
//!
//! let config = LauncherConfig::new()
//!     .with_query_timeout(Duration::from_secs(30))
//!     .with_slow_query_threshold(Duration::from_secs(2));
//!
//! let launcher = InstrumentedLauncher::new(store_launcher).with_config(config);
//! ```

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {{
        let level = $level;
        if level == tracing::Level::ERROR {
            tracing::error!($($field)*)
        } else if level == tracing::Level::WARN {
            tracing::warn!($($field)*)
        } else if level == tracing::Level::INFO {
            tracing::info!($($field)*)
        } else if level == tracing::Level::DEBUG {
            tracing::debug!($($field)*)
        } else {
            tracing::trace!($($field)*)
        }
    }};
}

mod config;
mod launcher;
mod stream;

#[cfg(test)]
mod tests;

pub use config::LauncherConfig;
pub use launcher::InstrumentedLauncher;

pub(crate) fn truncate_query_bytes(query: &str, max_bytes: usize) -> &str {
    if query.len() <= max_bytes {
        return query;
    }
    let mut end = max_bytes;
    while end > 0 && !query.is_char_boundary(end) {
        end -= 1;
    }
    &query[..end]
}
