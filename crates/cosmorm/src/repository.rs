//! Repository over a [`QueryLauncher`].

use crate::count::{self, TotalCountResponse};
use crate::criteria::Criteria;
use crate::error::OrmResult;
use crate::launcher::{ContainerInfo, QueryLauncher};
use crate::pagination::{self, ProjectionPaginated};
use serde::de::DeserializeOwned;

/// Runs built criteria through a launcher.
///
/// Holds no state besides the launcher, so one repository can serve any
/// number of concurrent calls.
#[derive(Debug, Clone)]
pub struct CriteriaRepository<L> {
    launcher: L,
}

impl<L: QueryLauncher> CriteriaRepository<L> {
    /// Create a repository running queries through `launcher`.
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    /// The underlying launcher.
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Fetch page `desired_page` (0-based) of `criteria` mapped through `to_entity`.
    ///
    /// See [`paginate`](crate::pagination::paginate).
    pub async fn find_paginated<C, E, F>(
        &self,
        criteria: &Criteria,
        desired_page: usize,
        page_size: usize,
        container: &ContainerInfo<C>,
        to_entity: F,
    ) -> OrmResult<ProjectionPaginated<E>>
    where
        C: DeserializeOwned + Send + 'static,
        F: Fn(C) -> E,
    {
        pagination::paginate(
            &self.launcher,
            criteria,
            desired_page,
            page_size,
            container,
            to_entity,
        )
        .await
    }

    /// Count the records `criteria` matches by reading all of them.
    pub async fn total_result<C>(
        &self,
        criteria: &Criteria,
        page_size: usize,
        container: &ContainerInfo<C>,
    ) -> OrmResult<usize>
    where
        C: DeserializeOwned + Send + 'static,
    {
        pagination::total_result(&self.launcher, criteria, page_size, container).await
    }

    /// Run a count criteria built with [`select_count`](crate::CriteriaBuilder::select_count).
    pub async fn count(&self, criteria: &Criteria, container: &str) -> OrmResult<TotalCountResponse> {
        count::count(&self.launcher, criteria, container).await
    }
}
