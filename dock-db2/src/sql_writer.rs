use crate::{CATALOG_COLUMNS, default_length, read_catalog_rows, to_logical, to_native};
use dock_core::{
    Context, Describe, LogicalType, Query, Result, RowLabeled, Schema, SqlWriter,
    Truncate, possibly_parenthesized, separated_by,
};

#[derive(Default, Debug, Clone, Copy)]
pub struct Db2SqlWriter {}

impl SqlWriter for Db2SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }

    fn native_type(&self, ty: LogicalType) -> &'static str {
        to_native(ty)
    }

    fn logical_type(&self, native: &str) -> Option<LogicalType> {
        to_logical(native)
    }

    fn default_length(&self, native: &str) -> Option<u32> {
        default_length(native)
    }

    fn write_column_nullability(&self, _context: &mut Context, out: &mut Query, required: bool) {
        out.push_str(if required {
            " NOT NULL"
        } else {
            " WITH DEFAULT"
        });
    }

    fn write_truncate(&self, context: &mut Context, out: &mut Query, value: &Truncate) {
        out.push_str("TRUNCATE TABLE ");
        self.write_table_name(context, out, value.table);
        out.push_str(" IMMEDIATE");
    }

    fn write_describe(&self, context: &mut Context, out: &mut Query, value: &Describe) {
        out.push_str("SELECT ");
        out.push_str(&CATALOG_COLUMNS.join(", "));
        out.push_str(
            " FROM SYSCAT.COLUMNS WHERE TABSCHEMA = (CURRENT SCHEMA) AND TABNAME = ",
        );
        // The catalog stores ordinary identifiers folded to upper case
        if context.quote_table_names {
            self.write_literal(context, out, value.table);
        } else {
            self.write_literal(context, out, &value.table.to_uppercase());
        }
        out.push_str(" ORDER BY COLNO");
    }

    fn read_schema(&self, table: &str, rows: &[RowLabeled]) -> Result<Option<Schema>> {
        read_catalog_rows(table, rows)
    }

    /// Data change statements are wrapped in `SELECT ... FROM FINAL TABLE (...)`, the
    /// engine returns the affected rows as they are after the change.
    fn write_data_change_returning(
        &self,
        context: &mut Context,
        out: &mut Query,
        returning: &[&str],
        body: &dyn Fn(&mut Context, &mut Query),
    ) {
        let wrap = !returning.is_empty();
        if wrap {
            out.push_str("SELECT ");
            separated_by(
                out,
                returning,
                |out, v| self.write_column_name(context, out, v),
                ",",
            );
            out.push_str(" FROM FINAL TABLE ");
        }
        possibly_parenthesized!(out, wrap, body(context, out));
    }
}
