use crate::{AdapterError, Error, Result, Value};
use indexmap::IndexMap;
use std::str::FromStr;

/// Column name to value pairs, used for create/update input.
pub type Record = IndexMap<String, Value>;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("asc") || v == "1" => Ok(Order::Asc),
            v if v.eq_ignore_ascii_case("desc") || v == "-1" => Ok(Order::Desc),
            v => Err(AdapterError::InvalidOptions(format!("`{}` is not a sort direction", v)).into()),
        }
    }
}

/// Options of a single operation.
///
/// Filtering is equality only: every `filter` pair becomes `column = ?` and the pairs are
/// AND-joined. Keys that are not columns of the schema are ignored, the same holds for
/// `sort` and `select`.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Options {
    pub filter: IndexMap<String, Value>,
    pub sort: IndexMap<String, Order>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub distinct: bool,
    pub select: Option<Vec<String>>,
}

impl Options {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(column.into(), value.into());
        self
    }
    pub fn sort(mut self, column: impl Into<String>, order: Order) -> Self {
        self.sort.insert(column.into(), order);
        self
    }
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
    pub fn select<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.select = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Limit, zero meaning no limit.
    pub fn effective_limit(&self) -> Option<u64> {
        self.limit.filter(|v| *v > 0)
    }

    pub fn effective_skip(&self) -> Option<u64> {
        self.skip.filter(|v| *v > 0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.effective_skip().is_some() && self.effective_limit().is_none() {
            return Err(AdapterError::InvalidOptions("Cannot specify skip without limit".into()).into());
        }
        Ok(())
    }
}
