use super::config::LauncherConfig;
use super::stream::{InstrumentedPageStream, QueryLog};
use crate::launcher::{PageStream, QueryLauncher};
use serde::de::DeserializeOwned;

/// A launcher wrapper that logs every query and enforces per-page timeouts.
#[derive(Debug)]
pub struct InstrumentedLauncher<L> {
    inner: L,
    config: LauncherConfig,
}

impl<L> InstrumentedLauncher<L> {
    /// Wrap `inner` with the default [`LauncherConfig`].
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            config: LauncherConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: LauncherConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// The wrapped launcher.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Unwrap into the wrapped launcher.
    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: QueryLauncher> QueryLauncher for InstrumentedLauncher<L> {
    fn query_pages<R>(
        &self,
        query: &str,
        container: &str,
        page_size: Option<usize>,
    ) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let log = QueryLog {
            container: container.to_string(),
            query: self.config.truncate_query(query),
            page_size,
        };

        if self.config.logging_enabled {
            emit_at_level!(
                self.config.level,
                target: "cosmorm.query",
                container = %log.container,
                page_size = ?log.page_size,
                query = %log.query,
                "query launched"
            );
        }

        let inner = self.inner.query_pages(query, container, page_size);
        PageStream::new(InstrumentedPageStream::new(inner, log, self.config.clone()))
    }
}
