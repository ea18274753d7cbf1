//! Common types shared across the fragment-building methods

use std::fmt;

use indexmap::IndexMap;

use crate::{IntoOperator, Operator, Value};

/// A single comparison consumed by `where_`, `and` and `or`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub key: String,
    pub operator: Operator,
    pub value: Value,
}

impl Condition {
    pub fn new(key: impl Into<String>, operator: impl IntoOperator, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            operator: operator.into_operator(),
            value: value.into(),
        }
    }

    /// `<key> IS NULL`
    pub fn is_null(key: impl Into<String>) -> Self {
        Self::new(key, Operator::IsNull, Value::Null)
    }

    /// `<key> IS NOT NULL`
    pub fn is_not_null(key: impl Into<String>) -> Self {
        Self::new(key, Operator::IsNotNull, Value::Null)
    }
}

/// Trait for conditions that can be used in WHERE clauses
pub trait IntoCondition {
    fn into_condition(self) -> Condition;
}

impl IntoCondition for Condition {
    fn into_condition(self) -> Condition {
        self
    }
}

// Implementation for shorthand equality: where_(("age", 18))
impl<T> IntoCondition for (&str, T)
where
    T: Into<Value>,
{
    fn into_condition(self) -> Condition {
        Condition::new(self.0, Operator::Eq, self.1)
    }
}

// Implementation for explicit operators: where_(("age", op::GT, 18)) or where_(("age", ">", 18))
impl<T, O> IntoCondition for (&str, O, T)
where
    T: Into<Value>,
    O: IntoOperator,
{
    fn into_condition(self) -> Condition {
        Condition::new(self.0, self.1, self.2)
    }
}

/// Keyword that introduces a condition fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereConnector {
    Where,
    And,
    Or,
}

impl fmt::Display for WhereConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhereConnector::Where => write!(f, "WHERE"),
            WhereConnector::And => write!(f, "AND"),
            WhereConnector::Or => write!(f, "OR"),
        }
    }
}

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Per-column options of a mapped SELECT list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectOption {
    pub distinct: bool,
}

impl SelectOption {
    pub fn plain() -> Self {
        Self { distinct: false }
    }

    pub fn distinct() -> Self {
        Self { distinct: true }
    }
}

/// Columns of a SELECT
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectColumns {
    /// `*`
    #[default]
    All,
    /// Bare column names
    List(Vec<String>),
    /// Column names with per-column options, in insertion order
    Mapping(IndexMap<String, SelectOption>),
}

impl SelectColumns {
    /// Build a mapped column list from `(name, option)` pairs
    pub fn mapping<K, I>(columns: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SelectOption)>,
    {
        SelectColumns::Mapping(columns.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub(crate) fn render(&self) -> String {
        match self {
            SelectColumns::All => "*".to_string(),
            SelectColumns::List(columns) => columns.join(", "),
            SelectColumns::Mapping(columns) => columns
                .iter()
                .map(|(name, option)| {
                    if option.distinct {
                        format!("DISTINCT {name}")
                    } else {
                        name.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// `()` selects `*`
impl From<()> for SelectColumns {
    fn from(_: ()) -> Self {
        SelectColumns::All
    }
}

impl From<Vec<String>> for SelectColumns {
    fn from(columns: Vec<String>) -> Self {
        SelectColumns::List(columns)
    }
}

impl From<Vec<&str>> for SelectColumns {
    fn from(columns: Vec<&str>) -> Self {
        SelectColumns::List(columns.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SelectColumns {
    fn from(columns: [&str; N]) -> Self {
        SelectColumns::List(columns.into_iter().map(str::to_string).collect())
    }
}

impl From<IndexMap<String, SelectOption>> for SelectColumns {
    fn from(columns: IndexMap<String, SelectOption>) -> Self {
        SelectColumns::Mapping(columns)
    }
}

impl<const N: usize> From<[(&str, SelectOption); N]> for SelectColumns {
    fn from(columns: [(&str, SelectOption); N]) -> Self {
        SelectColumns::mapping(columns)
    }
}

/// Columns of a RETURNING clause
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReturningColumns {
    /// `RETURNING *`
    #[default]
    All,
    /// `RETURNING ( a, b )`
    List(Vec<String>),
}

impl ReturningColumns {
    pub(crate) fn render(&self) -> String {
        match self {
            ReturningColumns::All => "*".to_string(),
            ReturningColumns::List(columns) => format!("( {} )", columns.join(", ")),
        }
    }
}

/// `()` returns `*`
impl From<()> for ReturningColumns {
    fn from(_: ()) -> Self {
        ReturningColumns::All
    }
}

impl From<Vec<String>> for ReturningColumns {
    fn from(columns: Vec<String>) -> Self {
        ReturningColumns::List(columns)
    }
}

impl From<Vec<&str>> for ReturningColumns {
    fn from(columns: Vec<&str>) -> Self {
        ReturningColumns::List(columns.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ReturningColumns {
    fn from(columns: [&str; N]) -> Self {
        ReturningColumns::List(columns.into_iter().map(str::to_string).collect())
    }
}

/// Only the keys of a mapping are used
impl<V> From<IndexMap<String, V>> for ReturningColumns {
    fn from(columns: IndexMap<String, V>) -> Self {
        ReturningColumns::List(columns.into_keys().collect())
    }
}
