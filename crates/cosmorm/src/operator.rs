//! Comparison operators and sort directions understood by the criteria builder.
//!
//! [`Op`] is the closed operator catalog. Every operator carries a stable
//! identifier (used for serialization and lookups from external filter
//! input) and the symbol or keyword it renders to in the query dialect.

use crate::error::{OrmError, OrmResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator for criteria conditions.
///
/// # Example
/// ```ignore
/// use cosmorm::Op;
///
/// assert_eq!(Op::MoreOrEqualsThan.symbol(), ">=");
/// assert_eq!("NOT_NULL".parse::<Op>()?, Op::NotNull);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Op {
    /// Equal: `=` for one value, `IN (...)` for several
    Equals,
    /// Equal with an exact array length guard
    EqualsStrict,
    /// Not equal with an array length guard
    NotEqualsStrict,
    /// `IN (...)`
    Contains,
    /// `NOT IN (...)`
    NotContains,
    /// Not equal: `!=` for one value, `NOT IN (...)` for several
    NotEquals,
    /// Case-insensitive LIKE, multi-word values become wildcard separated
    Like,
    /// `>`
    MoreThan,
    /// `>=`
    MoreOrEqualsThan,
    /// `<`
    LessThan,
    /// `<=`
    LessOrEqualsThan,
    /// Case-insensitive LIKE with the value kept verbatim
    LikeStrict,
    /// `!= null`
    NotNull,
    /// `= null`
    Null,
}

impl Op {
    /// Every operator in the catalog.
    pub const ALL: [Op; 14] = [
        Op::Equals,
        Op::EqualsStrict,
        Op::NotEqualsStrict,
        Op::Contains,
        Op::NotContains,
        Op::NotEquals,
        Op::Like,
        Op::MoreThan,
        Op::MoreOrEqualsThan,
        Op::LessThan,
        Op::LessOrEqualsThan,
        Op::LikeStrict,
        Op::NotNull,
        Op::Null,
    ];

    /// Stable identifier of the operator.
    pub const fn id(self) -> &'static str {
        match self {
            Op::Equals => "EQUALS",
            Op::EqualsStrict => "EQUALS_STRICT",
            Op::NotEqualsStrict => "NOT_EQUALS_STRICT",
            Op::Contains => "CONTAINS",
            Op::NotContains => "NOT_CONTAINS",
            Op::NotEquals => "NOT_EQUALS",
            Op::Like => "LIKE",
            Op::MoreThan => "MORE_THAN",
            Op::MoreOrEqualsThan => "MORE_OR_EQUALS_THAN",
            Op::LessThan => "LESS_THAN",
            Op::LessOrEqualsThan => "LESS_OR_EQUALS_THAN",
            Op::LikeStrict => "LIKE_STRICT",
            Op::NotNull => "NOT_NULL",
            Op::Null => "NULL",
        }
    }

    /// Symbol or keyword rendered into the query text.
    pub const fn symbol(self) -> &'static str {
        match self {
            Op::Equals | Op::EqualsStrict => "=",
            Op::NotEqualsStrict | Op::NotEquals => "!=",
            Op::Contains => "IN",
            Op::NotContains => "NOT IN",
            Op::Like | Op::LikeStrict => "LIKE",
            Op::MoreThan => ">",
            Op::MoreOrEqualsThan => ">=",
            Op::LessThan => "<",
            Op::LessOrEqualsThan => "<=",
            Op::NotNull => "!= null",
            Op::Null => "= null",
        }
    }

    /// Look an operator up by its identifier.
    pub fn from_id(id: &str) -> OrmResult<Self> {
        Op::ALL
            .into_iter()
            .find(|op| op.id() == id)
            .ok_or_else(|| OrmError::builder(format!("Invalid operator '{id}'")))
    }

    /// `NULL` / `NOT_NULL`: rendered without a value.
    pub const fn is_null_type(self) -> bool {
        matches!(self, Op::NotNull | Op::Null)
    }

    /// `LIKE` / `LIKE_STRICT`.
    pub const fn is_like_type(self) -> bool {
        matches!(self, Op::Like | Op::LikeStrict)
    }

    /// Plain comparison operators, when compared against at most one value.
    pub const fn is_single_value_comparison(self, value_count: usize) -> bool {
        value_count <= 1
            && matches!(
                self,
                Op::Equals
                    | Op::NotEquals
                    | Op::MoreThan
                    | Op::MoreOrEqualsThan
                    | Op::LessThan
                    | Op::LessOrEqualsThan
            )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Op {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::from_id(s)
    }
}

/// The two operators that compare against `null` instead of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullOp {
    /// `= null`
    Null,
    /// `!= null`
    NotNull,
}

impl From<NullOp> for Op {
    fn from(op: NullOp) -> Self {
        match op {
            NullOp::Null => Op::Null,
            NullOp::NotNull => Op::NotNull,
        }
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Order {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Order {
    /// `ASC` or `DESC`, as rendered in `ORDER BY`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(Order::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(Order::Desc)
        } else {
            Err(OrmError::builder(format!("Invalid order direction '{s}'")))
        }
    }
}
