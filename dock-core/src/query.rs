use crate::{Value, truncate_long};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

/// SQL text with its positional parameters.
///
/// Placeholders and parameters are only ever appended together through [`Query::bind`],
/// so the n-th `?` always refers to the n-th parameter.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Query {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sql: String::with_capacity(capacity),
            params: Vec::new(),
        }
    }
    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }
    pub fn push_str(&mut self, value: &str) {
        self.sql.push_str(value);
    }
    /// Append a `?` placeholder and its parameter.
    pub fn bind(&mut self, value: Value) {
        self.sql.push('?');
        self.params.push(value);
    }
    pub fn is_parameterized(&self) -> bool {
        !self.params.is_empty()
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query {
            sql: value.into(),
            params: Vec::new(),
        }
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Query {
            sql: value,
            params: Vec::new(),
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&truncate_long!(self.sql))
    }
}

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values()[i])
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}
