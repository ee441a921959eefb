//! Finalized query criteria.

use std::fmt;

/// A sealed query: the finished query text plus whether it is a count query.
///
/// Only [`CriteriaBuilder::build`](crate::CriteriaBuilder::build) produces
/// values of this type, so the count flag always reflects how the criteria
/// was built rather than what its text happens to look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    query_text: String,
    count_query: bool,
}

impl Criteria {
    pub(crate) fn new(query_text: String, count_query: bool) -> Self {
        Self {
            query_text,
            count_query,
        }
    }

    /// The query text to send to the store.
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Whether this criteria was built with [`select_count`](crate::CriteriaBuilder::select_count).
    pub fn is_count_query(&self) -> bool {
        self.count_query
    }

    /// Consume the criteria and return the query text.
    pub fn into_query_text(self) -> String {
        self.query_text
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_text)
    }
}
