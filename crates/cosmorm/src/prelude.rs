//! Convenient imports for typical `cosmorm` usage.
//!
//! ```ignore
//! use cosmorm::prelude::*;
//! ```

pub use crate::{
    ContainerInfo, Criteria, CriteriaBuilder, CriteriaRepository, DocumentCriteria, OrmError,
    OrmResult, NullOp, Op, Order, ProjectionPaginated, QueryLauncher, TotalCountResponse,
};
pub use crate::criteria_columns;
