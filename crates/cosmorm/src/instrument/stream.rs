use super::config::LauncherConfig;
use crate::error::{OrmError, OrmResult};
use crate::launcher::{Page, PageStream};
use futures_core::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

/// What gets logged about a launched query.
#[derive(Debug, Clone)]
pub(crate) struct QueryLog {
    pub container: String,
    /// Possibly truncated query text
    pub query: String,
    pub page_size: Option<usize>,
}

pub(crate) struct InstrumentedPageStream<R> {
    inner: PageStream<R>,
    log: QueryLog,
    config: LauncherConfig,
    /// Set on first poll
    start: Option<Instant>,
    pages: usize,
    records: usize,
    /// Deadline for the page currently being awaited
    page_timeout: Option<Pin<Box<tokio::time::Sleep>>>,
    terminated: bool,
}

impl<R> InstrumentedPageStream<R> {
    pub(crate) fn new(inner: PageStream<R>, log: QueryLog, config: LauncherConfig) -> Self {
        Self {
            inner,
            log,
            config,
            start: None,
            pages: 0,
            records: 0,
            page_timeout: None,
            terminated: false,
        }
    }

    fn finalize(&mut self, dropped: bool, err: Option<&OrmError>) {
        if !self.config.logging_enabled {
            return;
        }

        let elapsed = self.start.map(|s| s.elapsed()).unwrap_or_default();
        match err {
            Some(err) => tracing::warn!(
                target: "cosmorm.query",
                container = %self.log.container,
                pages = self.pages,
                records = self.records,
                ?elapsed,
                error = %err,
                query = %self.log.query,
                "query failed"
            ),
            None => emit_at_level!(
                self.config.level,
                target: "cosmorm.query",
                container = %self.log.container,
                pages = self.pages,
                records = self.records,
                ?elapsed,
                dropped,
                "query finished"
            ),
        }

        if let Some(threshold) = self.config.slow_query_threshold {
            if elapsed > threshold {
                tracing::warn!(
                    target: "cosmorm.query",
                    container = %self.log.container,
                    ?elapsed,
                    ?threshold,
                    query = %self.log.query,
                    "slow query"
                );
            }
        }
    }

    fn terminate(&mut self, err: Option<&OrmError>) {
        self.terminated = true;
        self.page_timeout = None;
        self.finalize(false, err);
    }
}

impl<R> Stream for InstrumentedPageStream<R> {
    type Item = OrmResult<Page<R>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.terminated {
            return Poll::Ready(None);
        }

        this.start.get_or_insert_with(Instant::now);
        if let Some(timeout) = this.config.query_timeout {
            if this.page_timeout.is_none() {
                this.page_timeout = Some(Box::pin(tokio::time::sleep(timeout)));
            }
        }

        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(page))) => {
                this.pages += 1;
                this.records += page.len();
                this.page_timeout = None;
                Poll::Ready(Some(Ok(page)))
            }
            Poll::Ready(Some(Err(e))) => {
                this.terminate(Some(&e));
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.terminate(None);
                Poll::Ready(None)
            }
            Poll::Pending => {
                let timed_out = match (this.config.query_timeout, this.page_timeout.as_mut()) {
                    (Some(timeout), Some(sleep)) => {
                        sleep.as_mut().poll(cx).is_ready().then_some(timeout)
                    }
                    _ => None,
                };
                match timed_out {
                    Some(timeout) => {
                        let err = OrmError::Timeout(timeout);
                        this.terminate(Some(&err));
                        Poll::Ready(Some(Err(err)))
                    }
                    None => Poll::Pending,
                }
            }
        }
    }
}

impl<R> Drop for InstrumentedPageStream<R> {
    fn drop(&mut self) {
        if self.terminated {
            return;
        }
        self.finalize(true, None);
    }
}
