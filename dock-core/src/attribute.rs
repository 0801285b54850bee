use crate::LogicalType;
use indexmap::IndexMap;

/// Portable description of one column.
///
/// `ty` is `None` when the column was read from the catalog with a native type that has no
/// logical counterpart; whether that is fatal is up to the caller.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ty: Option<LogicalType>,
    pub length: Option<u32>,
    pub required: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
}

impl Attribute {
    pub fn new(ty: LogicalType) -> Self {
        Self {
            ty: Some(ty),
            ..Default::default()
        }
    }
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
    /// Identity column, always a primary key as well.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self.primary_key = true;
        self
    }
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// Table name plus its attributes, in the order they were supplied.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub table_name: String,
    pub attributes: IndexMap<String, Attribute>,
}

impl Schema {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + Clone {
        self.attributes.keys().map(String::as_str)
    }

    /// Every attribute resolved to a logical type.
    pub fn is_complete(&self) -> bool {
        self.attributes.values().all(|v| v.ty.is_some())
    }
}
