//! Query launcher trait: the seam to whatever executes query text against a container.

use crate::error::{OrmError, OrmResult};
use futures_core::Stream;
use futures_util::StreamExt;
use futures_util::stream;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

/// Page size used by [`QueryLauncher::launch`] when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One page of results returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub results: Vec<R>,
    /// Token the store hands out to resume after this page, if any.
    pub continuation_token: Option<String>,
}

impl<R> Page<R> {
    /// A page without a continuation token.
    pub fn new(results: Vec<R>) -> Self {
        Self {
            results,
            continuation_token: None,
        }
    }

    /// Number of records on the page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A lazily produced, forward-only sequence of result pages.
#[must_use]
pub struct PageStream<R> {
    inner: Pin<Box<dyn Stream<Item = OrmResult<Page<R>>> + Send>>,
}

impl<R> PageStream<R> {
    /// Create a new `PageStream` from any compatible stream.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = OrmResult<Page<R>>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl<R> Stream for PageStream<R> {
    type Item = OrmResult<Page<R>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Name and record type of a container.
#[derive(Debug)]
pub struct ContainerInfo<C> {
    name: String,
    _record: PhantomData<fn() -> C>,
}

impl<C> ContainerInfo<C> {
    /// Describe the container called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _record: PhantomData,
        }
    }

    /// Container name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<C> Clone for ContainerInfo<C> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

/// Executes query text against a named container.
///
/// Every call returns a fresh, cold stream: nothing is sent to the store until
/// the stream is polled, and two calls with the same query run it twice.
/// Implementations report transport failures as stream items; running out of
/// pages is signalled by the end of the stream.
pub trait QueryLauncher: Send + Sync {
    /// Run `query` against `container`, `page_size` records per page
    /// (`None` lets the store pick).
    fn query_pages<R>(
        &self,
        query: &str,
        container: &str,
        page_size: Option<usize>,
    ) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static;

    /// Run `query` with the default page size.
    fn launch<R>(&self, query: &str, container: &str) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.query_pages(query, container, Some(DEFAULT_PAGE_SIZE))
    }

    /// Run `query` in pages of exactly `page_size` records (the last page may be short).
    fn launch_by_page<R>(&self, query: &str, container: &str, page_size: usize) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        self.query_pages(query, container, Some(page_size))
    }
}

impl<L: QueryLauncher> QueryLauncher for &L {
    fn query_pages<R>(
        &self,
        query: &str,
        container: &str,
        page_size: Option<usize>,
    ) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        (**self).query_pages(query, container, page_size)
    }
}

impl<L: QueryLauncher> QueryLauncher for Arc<L> {
    fn query_pages<R>(
        &self,
        query: &str,
        container: &str,
        page_size: Option<usize>,
    ) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        (**self).query_pages(query, container, page_size)
    }
}

// ── In-memory launcher ──

/// In-process launcher over JSON documents.
///
/// It does not interpret the query text: every query against a container
/// returns all of its documents, in insertion order, split into pages. An
/// empty container yields a single empty page, as a real store does. A query
/// is recorded when its stream is first polled, and every page handed out is
/// counted, so callers can assert on what was actually run.
#[derive(Debug, Default)]
pub struct MemoryLauncher {
    containers: HashMap<String, Vec<Value>>,
    failure: Option<String>,
    page_delay: Option<Duration>,
    launched: Arc<Mutex<Vec<String>>>,
    pages_served: Arc<AtomicUsize>,
}

impl MemoryLauncher {
    /// A launcher with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container holding `documents`.
    pub fn with_container<I>(mut self, name: impl Into<String>, documents: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.containers
            .entry(name.into())
            .or_default()
            .extend(documents);
        self
    }

    /// Make every launched stream fail with an executor error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Delay every page by `delay`.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    /// Query texts run so far, in the order their streams were first polled.
    pub fn launched_queries(&self) -> Vec<String> {
        self.launched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Pages handed out so far, across every stream.
    pub fn pages_served(&self) -> usize {
        self.pages_served.load(Ordering::Relaxed)
    }

    fn pages<R>(&self, container: &str, page_size: Option<usize>) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        if let Some(message) = &self.failure {
            let err = OrmError::executor(message.clone());
            return PageStream::new(stream::once(async move { Err(err) }));
        }

        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return PageStream::new(stream::once(async {
                Err(OrmError::validation("page size must be greater than zero"))
            }));
        }

        let documents = match self.containers.get(container) {
            Some(documents) => documents.clone(),
            None => {
                let err = OrmError::executor(format!("container '{container}' not found"));
                return PageStream::new(stream::once(async move { Err(err) }));
            }
        };

        let mut chunks: Vec<Vec<Value>> = documents
            .chunks(page_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        if chunks.is_empty() {
            chunks.push(Vec::new());
        }

        let page_delay = self.page_delay;
        let pages_served = Arc::clone(&self.pages_served);
        PageStream::new(stream::iter(chunks).then(move |chunk| {
            let pages_served = Arc::clone(&pages_served);
            async move {
                if let Some(delay) = page_delay {
                    tokio::time::sleep(delay).await;
                }
                let results = chunk
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<R>, _>>()?;
                pages_served.fetch_add(1, Ordering::Relaxed);
                Ok::<_, OrmError>(Page::new(results))
            }
        }))
    }
}

impl QueryLauncher for MemoryLauncher {
    fn query_pages<R>(
        &self,
        query: &str,
        container: &str,
        page_size: Option<usize>,
    ) -> PageStream<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let pages = self.pages(container, page_size);
        let launched = Arc::clone(&self.launched);
        let query = query.to_string();
        PageStream::new(
            stream::once(async move {
                launched
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .push(query);
                pages
            })
            .flatten(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    fn items(n: u32) -> impl Iterator<Item = Value> {
        (0..n).map(|id| json!({ "id": id }))
    }

    #[tokio::test]
    async fn splits_documents_into_pages() {
        let launcher = MemoryLauncher::new().with_container("items", items(25));
        let pages: Vec<Page<Item>> = launcher
            .launch_by_page("SELECT VALUE c FROM c", "items", 10)
            .try_collect()
            .await
            .unwrap();

        let sizes: Vec<usize> = pages.iter().map(Page::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(pages[2].results[0], Item { id: 20 });
        assert_eq!(launcher.launched_queries(), vec!["SELECT VALUE c FROM c"]);
    }

    #[tokio::test]
    async fn empty_container_yields_one_empty_page() {
        let launcher = MemoryLauncher::new().with_container("items", items(0));
        let pages: Vec<Page<Item>> = launcher
            .launch("SELECT VALUE c FROM c", "items")
            .try_collect()
            .await
            .unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[tokio::test]
    async fn streams_are_lazy_and_restartable() {
        let launcher = MemoryLauncher::new().with_container("items", items(3));
        let first = launcher.launch_by_page::<Item>("q", "items", 2);
        let second = launcher.launch_by_page::<Item>("q", "items", 2);
        assert!(launcher.launched_queries().is_empty());
        assert_eq!(launcher.pages_served(), 0);

        assert_eq!(first.try_collect::<Vec<_>>().await.unwrap().len(), 2);
        assert_eq!(second.try_collect::<Vec<_>>().await.unwrap().len(), 2);
        assert_eq!(launcher.launched_queries().len(), 2);
        assert_eq!(launcher.pages_served(), 4);
    }

    #[tokio::test]
    async fn unpolled_streams_are_never_recorded() {
        let launcher = MemoryLauncher::new().with_container("items", items(3));
        drop(launcher.launch::<Item>("never polled", "items"));
        let _ = launcher
            .launch::<Item>("polled", "items")
            .try_collect::<Vec<_>>()
            .await
            .unwrap();
        assert_eq!(launcher.launched_queries(), vec!["polled"]);
        assert_eq!(launcher.pages_served(), 1);
    }

    #[tokio::test]
    async fn reports_failures_as_stream_items() {
        let launcher = MemoryLauncher::new().failing("connection reset");
        let err = launcher
            .launch::<Item>("q", "items")
            .try_collect::<Vec<_>>()
            .await
            .unwrap_err();
        assert!(matches!(err, OrmError::Executor(ref m) if m == "connection reset"));

        let launcher = MemoryLauncher::new();
        let err = launcher
            .launch::<Item>("q", "missing")
            .try_collect::<Vec<_>>()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn undecodable_records_are_decode_errors() {
        let launcher =
            MemoryLauncher::new().with_container("items", [json!({ "id": "not a number" })]);
        let err = launcher
            .launch::<Item>("q", "items")
            .try_collect::<Vec<_>>()
            .await
            .unwrap_err();
        assert!(matches!(err, OrmError::Decode(_)));
    }
}
