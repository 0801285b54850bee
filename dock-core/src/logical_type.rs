use crate::{AdapterError, Error};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Portable column type, independent of the native type names of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    String,
    Integer,
    Float,
    Text,
    Binary,
    Datetime,
    Date,
    Time,
}

impl LogicalType {
    pub const ALL: [LogicalType; 8] = [
        LogicalType::String,
        LogicalType::Integer,
        LogicalType::Float,
        LogicalType::Text,
        LogicalType::Binary,
        LogicalType::Datetime,
        LogicalType::Date,
        LogicalType::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::String => "string",
            LogicalType::Integer => "integer",
            LogicalType::Float => "float",
            LogicalType::Text => "text",
            LogicalType::Binary => "binary",
            LogicalType::Datetime => "datetime",
            LogicalType::Date => "date",
            LogicalType::Time => "time",
        }
    }
}

impl Display for LogicalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogicalType::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AdapterError::InvalidOptions(format!("`{}` is not a logical type", s)).into()
            })
    }
}
