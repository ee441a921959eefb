//! Count queries.

use crate::criteria::Criteria;
use crate::error::{OrmError, OrmResult};
use crate::launcher::QueryLauncher;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

const NOT_A_COUNT_QUERY: &str = "the criteria provided does not have countQuery enabled, please enable it with select_count()";

/// The single record a count query returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCountResponse {
    #[serde(default = "null_id")]
    pub id: String,
    pub total_count: usize,
}

fn null_id() -> String {
    "null".to_string()
}

impl TotalCountResponse {
    /// A response carrying `total_count` and the `"null"` id.
    pub fn new(total_count: usize) -> Self {
        Self {
            id: null_id(),
            total_count,
        }
    }
}

impl Default for TotalCountResponse {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Run a count criteria against `container` and return the count record.
///
/// Fails with [`OrmError::Builder`] before anything is launched unless the
/// criteria was built with
/// [`select_count`](crate::CriteriaBuilder::select_count). When the store
/// returns no record the count is 0.
pub async fn count<L>(
    launcher: &L,
    criteria: &Criteria,
    container: &str,
) -> OrmResult<TotalCountResponse>
where
    L: QueryLauncher,
{
    if !criteria.is_count_query() {
        return Err(OrmError::builder(NOT_A_COUNT_QUERY));
    }

    let records: Vec<TotalCountResponse> = launcher
        .launch::<TotalCountResponse>(criteria.query_text(), container)
        .map_ok(|page| page.results)
        .try_concat()
        .await?;

    let response = records.into_iter().next().unwrap_or_default();
    tracing::debug!(
        target: "cosmorm.count",
        container,
        total_count = response.total_count,
        "count fetched"
    );
    Ok(response)
}
