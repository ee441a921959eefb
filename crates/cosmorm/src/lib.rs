//! # cosmorm
//!
//! Criteria building and pagination for a document store queried with a
//! SQL-like dialect (`SELECT VALUE c FROM c WHERE ...`).
//!
//! ## Features
//!
//! - **Criteria builder**: accumulate comparisons, OR blocks and parentheses
//!   into query text, with typed per-document wrappers via [`DocumentCriteria`]
//! - **Pluggable executor**: anything implementing [`QueryLauncher`] can run
//!   the query and hand back a lazy stream of pages
//! - **Pagination**: page data, next-page probe and total count computed
//!   concurrently over the page stream
//! - **Count queries**: `SELECT COUNT(1)` criteria reduced to a single total
//! - **Query monitoring**: [`InstrumentedLauncher`] adds logging, slow query
//!   warnings and per-page timeouts to any launcher
//!
//! ## Example
//!
//! ```ignore
//! use cosmorm::prelude::*;
//!
//! let mut b = CriteriaBuilder::new();
//! b.condition(Op::Equals, "status", ["active"]);
//! b.order_by("createdAt", Order::Desc);
//! let criteria = b.build()?;
//!
//! let repo = CriteriaRepository::new(launcher);
//! let page = repo
//!     .find_paginated(&criteria, 0, 20, &ContainerInfo::<User>::new("users"), UserView::from)
//!     .await?;
//! ```

pub mod builder;
pub mod count;
pub mod criteria;
pub mod error;
pub mod instrument;
pub mod launcher;
pub mod operator;
pub mod pagination;
pub mod prelude;
pub mod repository;

pub use builder::{CriteriaBuilder, DocumentCriteria};
pub use count::{TotalCountResponse, count};
pub use criteria::Criteria;
pub use error::{OrmError, OrmResult};
pub use instrument::{InstrumentedLauncher, LauncherConfig};
pub use launcher::{
    ContainerInfo, DEFAULT_PAGE_SIZE, MemoryLauncher, Page, PageStream, QueryLauncher,
};
pub use operator::{NullOp, Op, Order};
pub use pagination::{ProjectionPaginated, paginate, total_result};
pub use repository::CriteriaRepository;
