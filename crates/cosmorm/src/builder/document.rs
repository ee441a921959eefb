//! Typed criteria for a single document type, built by composition.
//!
//! A document type wraps a [`CriteriaBuilder`] and exposes one method per
//! column. The logical operations come from [`DocumentCriteria`]; column
//! methods are written by hand or generated with
//! [`criteria_columns!`](crate::criteria_columns).
//!
//! ```ignore
//! use cosmorm::{CriteriaBuilder, DocumentCriteria, Op, criteria_columns};
//!
//! #[derive(Default)]
//! struct UserCriteria(CriteriaBuilder);
//!
//! impl DocumentCriteria for UserCriteria {
//!     fn criteria(&mut self) -> &mut CriteriaBuilder { &mut self.0 }
//!     fn criteria_ref(&self) -> &CriteriaBuilder { &self.0 }
//!     fn into_criteria(self) -> CriteriaBuilder { self.0 }
//! }
//!
//! criteria_columns! {
//!     UserCriteria {
//!         status => "status",
//!         [role_names] => "roles.name",
//!     }
//! }
//!
//! let mut users = UserCriteria::default();
//! users.status(Op::Equals, ["active"]).role_names(Op::Contains, ["admin", "owner"]);
//! let criteria = users.build()?;
//! ```

use super::CriteriaBuilder;
use crate::criteria::Criteria;
use crate::error::OrmResult;
use crate::operator::{NullOp, Order};

/// Access to the shared criteria engine behind a typed, per-document builder.
pub trait DocumentCriteria: Sized {
    /// Mutable access to the underlying engine.
    fn criteria(&mut self) -> &mut CriteriaBuilder;

    /// Shared access to the underlying engine.
    fn criteria_ref(&self) -> &CriteriaBuilder;

    /// Unwrap into the underlying engine.
    fn into_criteria(self) -> CriteriaBuilder;

    /// See [`CriteriaBuilder::select_count`].
    fn select_count(&mut self) -> &mut Self {
        self.criteria().select_count();
        self
    }

    /// See [`CriteriaBuilder::order_by`].
    fn order_by(&mut self, column: &str, order: Order) -> &mut Self {
        self.criteria().order_by(column, order);
        self
    }

    /// Switch to manual connective mode.
    fn ignore_auto_generated_first_conditional(&mut self) -> &mut Self {
        self.criteria().ignore_auto_generated_first_conditional();
        self
    }

    /// Switch back to automatic connective mode.
    fn enable_auto_generated_first_conditional(&mut self) -> &mut Self {
        self.criteria().enable_auto_generated_first_conditional();
        self
    }

    /// Push `AND` (manual mode only).
    fn and(&mut self) -> OrmResult<&mut Self> {
        self.criteria().and()?;
        Ok(self)
    }

    /// Push `OR` (manual mode only).
    fn or(&mut self) -> OrmResult<&mut Self> {
        self.criteria().or()?;
        Ok(self)
    }

    /// Push `(` (manual mode only).
    fn open_parenthesis(&mut self) -> OrmResult<&mut Self> {
        self.criteria().open_parenthesis()?;
        Ok(self)
    }

    /// Push `)` (manual mode only).
    fn close_parenthesis(&mut self) -> OrmResult<&mut Self> {
        self.criteria().close_parenthesis()?;
        Ok(self)
    }

    /// Open an OR block (automatic mode only).
    fn or_start(&mut self) -> OrmResult<&mut Self> {
        self.criteria().or_start()?;
        Ok(self)
    }

    /// Close the current OR block.
    fn or_end(&mut self) -> OrmResult<&mut Self> {
        self.criteria().or_end()?;
        Ok(self)
    }

    /// `c.<column> = null`
    fn where_null(&mut self, column: &str) -> &mut Self {
        self.criteria().null_condition(NullOp::Null, column);
        self
    }

    /// `c.<column> != null`
    fn where_not_null(&mut self, column: &str) -> &mut Self {
        self.criteria().null_condition(NullOp::NotNull, column);
        self
    }

    /// True until a condition has been emitted.
    fn is_empty(&self) -> bool {
        self.criteria_ref().is_empty()
    }

    /// Finalize into a sealed [`Criteria`].
    fn build(self) -> OrmResult<Criteria> {
        self.into_criteria().build()
    }
}

/// Generate typed column methods on a [`DocumentCriteria`] implementor.
///
/// `method => "path"` compares `c.path`; `[method] => "array.field"` compares a
/// field nested in an array through an `EXISTS` sub-query. Every generated
/// method takes an [`Op`](crate::Op) and the values to compare against.
#[macro_export]
macro_rules! criteria_columns {
    (@methods) => {};

    (@methods $(#[$meta:meta])* [$method:ident] => $column:literal $(, $($rest:tt)*)?) => {
        $(#[$meta])*
        pub fn $method<I>(&mut self, op: $crate::Op, values: I) -> &mut Self
        where
            I: ::std::iter::IntoIterator,
            I::Item: ::std::string::ToString,
        {
            <Self as $crate::DocumentCriteria>::criteria(self)
                .condition_against_array(op, $column, values);
            self
        }

        $crate::criteria_columns!(@methods $($($rest)*)?);
    };

    (@methods $(#[$meta:meta])* $method:ident => $column:literal $(, $($rest:tt)*)?) => {
        $(#[$meta])*
        pub fn $method<I>(&mut self, op: $crate::Op, values: I) -> &mut Self
        where
            I: ::std::iter::IntoIterator,
            I::Item: ::std::string::ToString,
        {
            <Self as $crate::DocumentCriteria>::criteria(self).condition(op, $column, values);
            self
        }

        $crate::criteria_columns!(@methods $($($rest)*)?);
    };

    ($ty:ty { $($body:tt)* }) => {
        impl $ty {
            $crate::criteria_columns!(@methods $($body)*);
        }
    };
}
