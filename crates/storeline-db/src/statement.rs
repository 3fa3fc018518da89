//! # Statements and Result Tables
//!
//! Every value that originates from user input travels as a bound
//! parameter. Statement text is fixed at the call site; only the number of
//! `$n` markers in an `IN (...)` list may vary, built with [`placeholders`].
//!
//! Query results come back as a [`Table`]: column names plus rows of
//! text-rendered values, the shape the console prints.

use std::fmt;
use std::str::FromStr;

use sqlx::any::AnyArguments;
use sqlx::query::Query;
use sqlx::Any;

use crate::error::{DbError, DbResult};

/// Text rendered for SQL NULL.
pub const NULL_TEXT: &str = "null";

// =============================================================================
// Parameters
// =============================================================================

/// A single bound parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// Statement text plus its positional parameters.
///
/// ## Example
/// ```rust
/// use storeline_db::Statement;
///
/// let stmt = Statement::new("SELECT * FROM Product WHERE storeID = $1 AND productName = $2")
///     .bind(3_i64)
///     .bind("Bread");
/// assert_eq!(stmt.params().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Statement {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends the next positional parameter.
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Builds the sqlx query with every parameter bound in order.
    pub(crate) fn to_query(&self) -> Query<'_, Any, AnyArguments<'_>> {
        self.params
            .iter()
            .fold(sqlx::query(&self.sql), |query, param| match param {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Real(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            })
    }
}

/// Returns `count` comma-separated markers starting at `$first`.
///
/// ```rust
/// assert_eq!(storeline_db::placeholders(2, 3), "$2, $3, $4");
/// ```
pub fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Result Tables
// =============================================================================

/// One result row, every value rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row(Vec<String>);

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Row(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Raw text of column `index`.
    pub fn text(&self, index: usize) -> DbResult<&str> {
        self.0
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| DbError::Decode {
                column: index,
                value: String::new(),
                reason: format!("row has {} column(s)", self.0.len()),
            })
    }

    /// Parses column `index`. NULL is an error.
    pub fn parse<T>(&self, index: usize) -> DbResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let text = self.text(index)?;
        text.trim().parse().map_err(|e: T::Err| DbError::Decode {
            column: index,
            value: text.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Column names plus rows, in the order the database returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
