use dock_core::LogicalType;

/// Native type names understood when reading the catalog.
pub const NATIVE_TYPES: &[(&str, LogicalType)] = &[
    ("TIMESTAMP", LogicalType::Datetime),
    ("TIME", LogicalType::Time),
    ("DATE", LogicalType::Date),
    ("BINARY", LogicalType::Binary),
    ("VARBINARY", LogicalType::Binary),
    ("BLOB", LogicalType::Binary),
    ("GRAPHIC", LogicalType::Binary),
    ("VARGRAPHIC", LogicalType::Binary),
    ("CHARACTER", LogicalType::String),
    ("CHAR", LogicalType::String),
    ("VARCHAR", LogicalType::String),
    ("SMALLINT", LogicalType::Integer),
    ("INTEGER", LogicalType::Integer),
    ("INT", LogicalType::Integer),
    ("BIGINT", LogicalType::Integer),
    ("DECIMAL", LogicalType::Float),
    ("NUMERIC", LogicalType::Float),
    ("DECFLOAT", LogicalType::Float),
    ("REAL", LogicalType::Float),
    ("DOUBLE", LogicalType::Float),
    ("CLOB", LogicalType::Text),
    ("DBCLOB", LogicalType::Text),
    ("XML", LogicalType::Text),
];

/// Lengths written for types declared without one.
pub const DEFAULT_LENGTHS: &[(&str, u32)] = &[
    ("GRAPHIC", 1),
    ("CHAR", 1),
    ("CHARACTER", 1),
    ("BINARY", 1),
    ("VARCHAR", 32704),
    ("VARBINARY", 32704),
    ("CLOB", 2147483647),
    ("BLOB", 1024),
    ("DBCLOB", 512),
];

/// Catalog type names come padded, case is not significant.
pub fn to_logical(native: &str) -> Option<LogicalType> {
    let native = native.trim();
    NATIVE_TYPES
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(native))
        .map(|(_, v)| *v)
}

pub fn to_native(ty: LogicalType) -> &'static str {
    match ty {
        LogicalType::String => "VARCHAR",
        LogicalType::Integer => "INTEGER",
        LogicalType::Float => "DOUBLE",
        LogicalType::Text => "CLOB",
        LogicalType::Binary => "VARBINARY",
        LogicalType::Datetime => "TIMESTAMP",
        LogicalType::Time => "TIME",
        LogicalType::Date => "DATE",
    }
}

pub fn default_length(native: &str) -> Option<u32> {
    let native = native.trim();
    DEFAULT_LENGTHS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(native))
        .map(|(_, v)| *v)
}
