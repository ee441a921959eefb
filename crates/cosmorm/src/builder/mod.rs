//! Criteria builder: assembles WHERE / ORDER BY text for the document-store dialect.
//!
//! The builder runs in one of two connective modes:
//!
//! - **automatic** (default): every condition is prefixed with `AND`, or with
//!   `OR` inside an [`or_start`](CriteriaBuilder::or_start) /
//!   [`or_end`](CriteriaBuilder::or_end) block.
//! - **manual**: entered with
//!   [`ignore_auto_generated_first_conditional`](CriteriaBuilder::ignore_auto_generated_first_conditional).
//!   No connective is generated; the caller pushes `and()` / `or()` and
//!   parentheses explicitly.
//!
//! Values are interpolated into the query text verbatim (single-quoted, no
//! escaping). Only pass trusted values.
//!
//! # Example
//!
//! ```ignore
//! use cosmorm::{CriteriaBuilder, Op, Order};
//!
//! let mut b = CriteriaBuilder::new();
//! b.condition(Op::Equals, "status", ["active"]);
//! b.or_start()?;
//! b.condition(Op::Like, "name", ["john smith"]);
//! b.condition(Op::Like, "email", ["john"]);
//! b.or_end()?;
//! b.order_by("createdAt", Order::Desc);
//! let criteria = b.build()?;
//! ```

mod condition;
mod document;


pub use document::DocumentCriteria;

use crate::criteria::Criteria;
use crate::error::{OrmError, OrmResult};
use crate::operator::{NullOp, Op, Order};
use condition::Condition;

const SELECT_SENTENCE: &str = "SELECT VALUE c FROM c ";
const SELECT_COUNT_SENTENCE: &str = "SELECT COUNT(1) AS totalCount FROM c ";
const WHERE_SENTENCE: &str = "WHERE 1=1 ";
/// Value handed to null-type operators, which never render it.
const NULL_PLACEHOLDER: &str = "nullValue";

const MANUAL_MODE_REQUIRED: &str =
    "Invalid operation with ignoreAutoGeneratedFirstConditional flag disabled";
const AUTOMATIC_MODE_REQUIRED: &str =
    "Invalid operation with ignoreAutoGeneratedFirstConditional flag enabled";

/// Stateful, single-owner criteria builder.
#[derive(Debug, Clone)]
pub struct CriteriaBuilder {
    /// WHERE fragments, appended in call order
    wheres: String,
    /// ORDER BY fragment (last call wins)
    order_by: String,
    count_query: bool,
    or_active: bool,
    or_just_started: bool,
    parenthesis_open: bool,
    empty: bool,
    /// Manual connective mode
    ignore_auto_generated_first_conditional: bool,
}

impl CriteriaBuilder {
    /// Create an empty builder for `SELECT VALUE c FROM c`.
    pub fn new() -> Self {
        Self {
            wheres: String::new(),
            order_by: String::new(),
            count_query: false,
            or_active: false,
            or_just_started: false,
            parenthesis_open: false,
            empty: true,
            ignore_auto_generated_first_conditional: false,
        }
    }

    // ==================== Query shape ====================

    /// Turn this into a count query (`SELECT COUNT(1) AS totalCount FROM c`).
    ///
    /// Count criteria skip the ORDER BY fragment.
    pub fn select_count(&mut self) -> &mut Self {
        self.count_query = true;
        self
    }

    /// Whether [`select_count`](Self::select_count) was called.
    pub fn is_count_query(&self) -> bool {
        self.count_query
    }

    /// Set `ORDER BY c.<column> <ASC|DESC>`, replacing any previous ordering.
    pub fn order_by(&mut self, column: &str, order: Order) -> &mut Self {
        self.order_by = format!("ORDER BY c.{} {}", column, order.as_str());
        self
    }

    // ==================== Connective mode ====================

    /// Switch to manual connective mode.
    ///
    /// Appends a mandatory leading `AND`; from here on every `AND` / `OR` and
    /// parenthesis has to be pushed explicitly.
    pub fn ignore_auto_generated_first_conditional(&mut self) -> &mut Self {
        self.ignore_auto_generated_first_conditional = true;
        self.wheres.push_str("AND ");
        self
    }

    /// Switch back to automatic connective mode.
    pub fn enable_auto_generated_first_conditional(&mut self) -> &mut Self {
        self.ignore_auto_generated_first_conditional = false;
        self
    }

    fn require_manual_mode(&self) -> OrmResult<()> {
        if self.ignore_auto_generated_first_conditional {
            Ok(())
        } else {
            Err(OrmError::builder(MANUAL_MODE_REQUIRED))
        }
    }

    fn require_automatic_mode(&self) -> OrmResult<()> {
        if self.ignore_auto_generated_first_conditional {
            Err(OrmError::builder(AUTOMATIC_MODE_REQUIRED))
        } else {
            Ok(())
        }
    }

    /// Push a literal `OR` (manual mode only).
    pub fn or(&mut self) -> OrmResult<&mut Self> {
        self.require_manual_mode()?;
        self.wheres.push_str("OR ");
        Ok(self)
    }

    /// Push a literal `AND` (manual mode only).
    pub fn and(&mut self) -> OrmResult<&mut Self> {
        self.require_manual_mode()?;
        self.wheres.push_str("AND ");
        Ok(self)
    }

    /// Push `(` (manual mode only). A single level of nesting is supported.
    pub fn open_parenthesis(&mut self) -> OrmResult<&mut Self> {
        self.require_manual_mode()?;
        if self.parenthesis_open {
            return Err(OrmError::builder(
                "malformed sentence, closeParenthesis forgotten before adding another openParenthesis",
            ));
        }
        self.parenthesis_open = true;
        self.wheres.push_str("( ");
        Ok(self)
    }

    /// Push `)` (manual mode only).
    pub fn close_parenthesis(&mut self) -> OrmResult<&mut Self> {
        self.require_manual_mode()?;
        if !self.parenthesis_open {
            return Err(OrmError::builder(
                "malformed sentence, openParenthesis forgotten before closeParenthesis",
            ));
        }
        self.parenthesis_open = false;
        self.wheres.push_str(") ");
        Ok(self)
    }

    /// Open an OR block (automatic mode only): conditions until
    /// [`or_end`](Self::or_end) are joined with `OR`.
    pub fn or_start(&mut self) -> OrmResult<&mut Self> {
        self.require_automatic_mode()?;
        self.or_active = true;
        self.or_just_started = true;
        self.wheres.push_str("AND ( ");
        Ok(self)
    }

    /// Close the OR block opened by [`or_start`](Self::or_start).
    pub fn or_end(&mut self) -> OrmResult<&mut Self> {
        self.require_automatic_mode()?;
        if !self.or_active {
            return Err(OrmError::builder(
                "malformed sentence, or_start forgotten before or_end",
            ));
        }
        self.or_active = false;
        self.or_just_started = false;
        self.wheres.push_str(") ");
        Ok(self)
    }

    // ==================== Conditions ====================

    /// True until a condition has been emitted.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Compare `c.<column>` against `values`.
    ///
    /// An empty `values` emits nothing, so unset optional filters can be
    /// passed straight through. Returns the emitted fragment.
    pub fn condition<I>(&mut self, op: Op, column: &str, values: I) -> String
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        self.push_condition(op, column, &values, false)
    }

    /// Compare a field nested in an array (`tags.name`) through an `EXISTS` sub-query.
    pub fn condition_against_array<I>(&mut self, op: Op, column: &str, values: I) -> String
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        self.push_condition(op, column, &values, true)
    }

    /// Emit a `NULL` / `NOT_NULL` check on `c.<column>`.
    pub fn null_condition(&mut self, op: NullOp, column: &str) -> String {
        self.push_condition(op.into(), column, &[NULL_PLACEHOLDER.to_string()], false)
    }

    fn first_conditional(&self) -> &'static str {
        if self.ignore_auto_generated_first_conditional || self.or_just_started {
            ""
        } else if self.or_active {
            "OR"
        } else {
            "AND"
        }
    }

    fn push_condition(
        &mut self,
        op: Op,
        column: &str,
        values: &[String],
        against_array: bool,
    ) -> String {
        if values.is_empty() {
            return String::new();
        }

        self.empty = false;
        let connective = self.first_conditional();
        self.or_just_started = false;

        let fragment = Condition {
            op,
            column,
            values,
            against_array,
        }
        .render(connective);
        self.wheres.push_str(&fragment);
        fragment
    }

    // ==================== Finalize ====================

    /// Current query text, without validation.
    pub fn to_sql(&self) -> String {
        let select = if self.count_query {
            SELECT_COUNT_SENTENCE
        } else {
            SELECT_SENTENCE
        };
        let order_by = if self.count_query {
            ""
        } else {
            self.order_by.as_str()
        };
        format!("{select}{WHERE_SENTENCE}{}{order_by}", self.wheres)
    }

    /// Validate builder state before finalizing.
    pub fn validate(&self) -> OrmResult<()> {
        if self.or_active {
            return Err(OrmError::builder(
                "malformed query sentence, or_end forgotten",
            ));
        }
        if self.parenthesis_open {
            return Err(OrmError::builder(
                "malformed query sentence, closeParenthesis forgotten",
            ));
        }
        Ok(())
    }

    /// Finalize into a sealed [`Criteria`].
    pub fn build(self) -> OrmResult<Criteria> {
        self.validate()?;
        let query = self.to_sql();
        tracing::trace!(
            target: "cosmorm.criteria",
            count_query = self.count_query,
            query = %query,
            "criteria built"
        );
        Ok(Criteria::new(query, self.count_query))
    }
}

impl Default for CriteriaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
