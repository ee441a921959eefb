//! Page-at-a-time retrieval over a [`QueryLauncher`].
//!
//! [`paginate`] answers three questions for one request: what is on page N,
//! is there a page N+1, and how many records matched overall. Each answer is
//! computed from its own run of the query, and the three runs progress
//! concurrently inside the returned future. Dropping the future cancels all
//! of them.
//!
//! The total is obtained by draining the whole result set
//! ([`total_result`]), so a single-page request reads every matching record.
//! Swap in a count query (see [`count`](crate::count::count)) where that
//! matters.


use crate::criteria::Criteria;
use crate::error::{OrmError, OrmResult};
use crate::launcher::{ContainerInfo, Page, PageStream, QueryLauncher};
use futures_util::TryStreamExt;
use futures_util::future::try_join3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One page of mapped entities plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPaginated<T> {
    /// Not computed by [`paginate`]; always 0.
    pub total: usize,
    /// Number of records matched by the query across all pages.
    pub total_result: usize,
    pub has_next_page: bool,
    pub data: Vec<T>,
}

impl<T> ProjectionPaginated<T> {
    /// A projection of `data` with `total` left at 0.
    pub fn new(total_result: usize, has_next_page: bool, data: Vec<T>) -> Self {
        Self {
            total: 0,
            total_result,
            has_next_page,
            data,
        }
    }

    /// The projection returned for a page past the end of the result set.
    pub fn empty() -> Self {
        Self::new(0, false, Vec::new())
    }
}

impl<T> Default for ProjectionPaginated<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fetch page `desired_page` (0-based) of `page_size` records and map it with `to_entity`.
///
/// A page past the end of the result set yields [`ProjectionPaginated::empty`].
/// Executor errors propagate unchanged.
pub async fn paginate<L, C, E, F>(
    launcher: &L,
    criteria: &Criteria,
    desired_page: usize,
    page_size: usize,
    container: &ContainerInfo<C>,
    to_entity: F,
) -> OrmResult<ProjectionPaginated<E>>
where
    L: QueryLauncher,
    C: DeserializeOwned + Send + 'static,
    F: Fn(C) -> E,
{
    check_page_size(page_size)?;
    let query = criteria.query_text();
    let name = container.name();

    let has_next = async {
        match desired_page.checked_add(1) {
            Some(next) => has_page(launcher.launch_by_page::<C>(query, name, page_size), next).await,
            // No page index follows usize::MAX.
            None => Ok(false),
        }
    };
    let data = async {
        let pages = launcher.launch_by_page::<C>(query, name, page_size);
        let page = page_at(pages, desired_page).await?;
        Ok::<_, OrmError>(page.results.into_iter().map(&to_entity).collect::<Vec<E>>())
    };
    let total = drain_total(launcher.launch_by_page::<C>(query, name, page_size), page_size);

    match try_join3(has_next, data, total).await {
        Ok((has_next_page, data, total_result)) => {
            tracing::debug!(
                target: "cosmorm.pagination",
                container = name,
                desired_page,
                page_size,
                records = data.len(),
                has_next_page,
                total_result,
                "page fetched"
            );
            Ok(ProjectionPaginated::new(total_result, has_next_page, data))
        }
        Err(OrmError::PageOutOfRange { index, available }) => {
            tracing::trace!(
                target: "cosmorm.pagination",
                container = name,
                index,
                available,
                "requested page out of range"
            );
            Ok(ProjectionPaginated::empty())
        }
        Err(e) => Err(e),
    }
}

/// Count every record `criteria` matches by draining all of its pages.
pub async fn total_result<L, C>(
    launcher: &L,
    criteria: &Criteria,
    page_size: usize,
    container: &ContainerInfo<C>,
) -> OrmResult<usize>
where
    L: QueryLauncher,
    C: DeserializeOwned + Send + 'static,
{
    check_page_size(page_size)?;
    drain_total(
        launcher.launch_by_page::<C>(criteria.query_text(), container.name(), page_size),
        page_size,
    )
    .await
}

fn check_page_size(page_size: usize) -> OrmResult<()> {
    if page_size == 0 {
        return Err(OrmError::validation("page size must be greater than zero"));
    }
    Ok(())
}

/// Advance to page `index`, or fail with [`OrmError::PageOutOfRange`].
pub(crate) async fn page_at<R>(mut pages: PageStream<R>, index: usize) -> OrmResult<Page<R>> {
    let mut seen = 0;
    while let Some(page) = pages.try_next().await? {
        if seen == index {
            return Ok(page);
        }
        seen += 1;
    }
    Err(OrmError::PageOutOfRange {
        index,
        available: seen,
    })
}

/// Whether page `index` exists. Running out of pages is an answer, not an error.
pub(crate) async fn has_page<R>(pages: PageStream<R>, index: usize) -> OrmResult<bool> {
    match page_at(pages, index).await {
        Ok(_) => Ok(true),
        Err(OrmError::PageOutOfRange { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Full pages times `page_size`, plus whatever the final page holds.
pub(crate) async fn drain_total<R>(mut pages: PageStream<R>, page_size: usize) -> OrmResult<usize> {
    let mut count = 0;
    let mut last_len = 0;
    while let Some(page) = pages.try_next().await? {
        count += 1;
        last_len = page.len();
    }
    if count == 0 {
        return Ok(0);
    }
    Ok(page_size * (count - 1) + last_len)
}
