use crate::to_logical;
use dock_core::{Attribute, Error, Result, RowLabeled, Schema, Value};

pub const CATALOG_COLUMNS: [&str; 6] = [
    "COLNAME", "TYPENAME", "LENGTH", "NULLS", "DEFAULT", "IDENTITY",
];

/// Schema of `table` out of its `SYSCAT.COLUMNS` rows, `None` when there are no rows.
///
/// A column is required when it is not nullable and its default is either absent,
/// non-numeric or zero. Identity columns are primary keys, auto increment and unique.
/// Keys spanning several columns are not detected.
pub fn read_catalog_rows(table: &str, rows: &[RowLabeled]) -> Result<Option<Schema>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let mut schema = Schema::new(table);
    for row in rows {
        let name = text(row, "COLNAME")?
            .ok_or_else(|| Error::msg(format!("Catalog row of `{}` without a column name", table)))?;
        let native = text(row, "TYPENAME")?.unwrap_or_default();
        let ty = to_logical(&native);
        if ty.is_none() {
            log::warn!(
                "Column `{}.{}` has type `{}` which has no logical counterpart",
                table,
                name,
                native.trim()
            );
        }
        let length = column(row, "LENGTH")?
            .as_i64()
            .and_then(|v| u32::try_from(v).ok());
        let nullable = text(row, "NULLS")?.is_none_or(|v| v.trim() != "N");
        let default = column(row, "DEFAULT")?;
        let required = !nullable && default.as_f64().is_none_or(|v| v == 0.0);
        let identity = text(row, "IDENTITY")?.is_some_and(|v| v.trim() == "Y");
        schema.attributes.insert(
            name.trim().to_string(),
            Attribute {
                ty,
                length,
                required,
                primary_key: identity,
                auto_increment: identity,
                unique: identity,
            },
        );
    }
    Ok(Some(schema))
}

fn column<'r>(row: &'r RowLabeled, name: &str) -> Result<&'r Value> {
    row.get_column(name)
        .ok_or_else(|| Error::msg(format!("Catalog row without the `{}` column", name)))
}

fn text(row: &RowLabeled, name: &str) -> Result<Option<String>> {
    match column(row, name)? {
        Value::Varchar(v) => Ok(v.clone()),
        v if v.is_null() => Ok(None),
        v => Err(Error::msg(format!(
            "Catalog column `{}` holds {:?}, expected text",
            name, v
        ))),
    }
}
