use crate::{
    AdapterError, Attribute, Context, Options, Order, Query, Record, Result, Schema, SqlWriter,
    Value,
};
use indexmap::IndexMap;

/// A clause tree that a [`SqlWriter`] renders into a [`Query`].
pub trait Statement {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query);
}

/// Equality terms, AND-joined. Only columns known to the schema are kept.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Filter<'s> {
    pub terms: Vec<(&'s str, &'s Value)>,
}

impl<'s> Filter<'s> {
    pub fn new(schema: &Schema, filter: &'s IndexMap<String, Value>) -> Self {
        Self {
            terms: known_columns(schema, filter).collect(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn known_columns<'s, V>(
    schema: &Schema,
    values: &'s IndexMap<String, V>,
) -> impl Iterator<Item = (&'s str, &'s V)> {
    values.iter().filter_map(|(k, v)| {
        if schema.contains(k) {
            Some((k.as_str(), v))
        } else {
            log::trace!("Ignoring `{}`, it is not a column of `{}`", k, schema.table_name);
            None
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection<'s> {
    Columns(Vec<&'s str>),
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select<'s> {
    pub table: &'s str,
    pub distinct: bool,
    pub projection: Projection<'s>,
    pub filter: Filter<'s>,
    pub order: Vec<(&'s str, Order)>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl<'s> Select<'s> {
    pub fn new(schema: &'s Schema, options: &'s Options) -> Result<Self> {
        options.validate()?;
        let mut columns: Vec<&str> = options
            .select
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|v| schema.contains(v))
            .collect();
        if columns.is_empty() {
            columns = schema.column_names().collect();
        }
        Ok(Self {
            table: &schema.table_name,
            distinct: options.distinct,
            projection: Projection::Columns(columns),
            filter: Filter::new(schema, &options.filter),
            order: known_columns(schema, &options.sort)
                .map(|(k, v)| (k, *v))
                .collect(),
            limit: options.effective_limit(),
            skip: options.effective_skip(),
        })
    }

    /// Counting select, ordering is dropped as it is meaningless for an aggregate.
    pub fn count(schema: &'s Schema, options: &'s Options) -> Result<Self> {
        if options.select.is_some() {
            return Err(
                AdapterError::InvalidOptions("Cannot specify select when counting".into()).into(),
            );
        }
        let mut select = Self::new(schema, options)?;
        select.projection = Projection::Count;
        select.distinct = false;
        select.order.clear();
        Ok(select)
    }
}

impl Statement for Select<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_select(context, out, self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insert<'s> {
    pub table: &'s str,
    pub values: Vec<(&'s str, &'s Value)>,
    /// Columns of the inserted row to read back.
    pub returning: Vec<&'s str>,
}

impl<'s> Insert<'s> {
    pub fn new(schema: &'s Schema, record: &'s Record) -> Result<Self> {
        let values: Vec<_> = known_columns(schema, record).collect();
        if values.is_empty() {
            return Err(AdapterError::InvalidOptions(format!(
                "No column of `{}` to insert",
                schema.table_name
            ))
            .into());
        }
        Ok(Self {
            table: &schema.table_name,
            values,
            returning: schema.column_names().collect(),
        })
    }
}

impl Statement for Insert<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_insert(context, out, self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update<'s> {
    pub table: &'s str,
    pub set: Vec<(&'s str, &'s Value)>,
    pub filter: Filter<'s>,
    pub limit: Option<u64>,
    pub returning: Vec<&'s str>,
}

impl<'s> Update<'s> {
    /// Identity columns are never assigned, even when present in `record`.
    pub fn new(schema: &'s Schema, options: &'s Options, record: &'s Record) -> Result<Self> {
        options.validate()?;
        let set: Vec<_> = known_columns(schema, record)
            .filter(|(k, _)| !schema.get(k).is_some_and(|v| v.auto_increment))
            .collect();
        if set.is_empty() {
            return Err(AdapterError::InvalidOptions(format!(
                "No updatable column of `{}` was given",
                schema.table_name
            ))
            .into());
        }
        Ok(Self {
            table: &schema.table_name,
            set,
            filter: Filter::new(schema, &options.filter),
            limit: options.effective_limit(),
            returning: schema.column_names().collect(),
        })
    }
}

impl Statement for Update<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_update(context, out, self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete<'s> {
    pub table: &'s str,
    pub filter: Filter<'s>,
    pub limit: Option<u64>,
}

impl<'s> Delete<'s> {
    pub fn new(schema: &'s Schema, options: &'s Options) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            table: &schema.table_name,
            filter: Filter::new(schema, &options.filter),
            limit: options.effective_limit(),
        })
    }
}

impl Statement for Delete<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_delete(context, out, self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncate<'s> {
    pub table: &'s str,
}

impl Statement for Truncate<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_truncate(context, out, self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTable<'s> {
    pub table: &'s str,
}

impl Statement for DropTable<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_drop_table(context, out, self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable<'s> {
    pub table: &'s str,
    pub columns: Vec<(&'s str, &'s Attribute)>,
    /// Native type of primary key and identity columns.
    pub primary_key_type: &'s str,
}

impl<'s> CreateTable<'s> {
    pub fn new(schema: &'s Schema, primary_key_type: &'s str) -> Self {
        Self {
            table: &schema.table_name,
            columns: schema
                .attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v))
                .collect(),
            primary_key_type,
        }
    }
}

impl Statement for CreateTable<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_create_table(context, out, self);
    }
}

/// Catalog lookup of the columns of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Describe<'s> {
    pub table: &'s str,
}

impl Statement for Describe<'_> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut Query) {
        writer.write_describe(context, out, self);
    }
}
