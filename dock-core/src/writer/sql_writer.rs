use crate::{
    Attribute, Context, CreateTable, Delete, Describe, DropTable, Filter, Fragment, Insert,
    LogicalType, Order, Projection, Query, Result, RowLabeled, Schema, Select, Statement, Truncate,
    Update, Value, separated_by,
};
use std::fmt::Write;

/// Dialect printer converting statements into concrete SQL and parameters.
///
/// Every value coming from the caller is written as a `?` placeholder, only identifiers and
/// catalog lookups end up in the text itself.
pub trait SqlWriter: Send + Sync {
    fn as_dyn(&self) -> &dyn SqlWriter;

    /// Render a complete statement into a fresh query.
    fn build(&self, mut context: Context, statement: &dyn Statement) -> Query {
        let mut out = Query::with_capacity(128);
        statement.write_query(self.as_dyn(), &mut context, &mut out);
        out
    }

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(
        &self,
        _context: &mut Context,
        out: &mut Query,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Single quoted string literal, inner quotes doubled.
    fn write_literal(&self, context: &mut Context, out: &mut Query, value: &str) {
        out.push('\'');
        self.write_escaped(context, out, value, '\'', "''");
        out.push('\'');
    }

    /// Table name, delimited only when the context asks for it.
    fn write_table_name(&self, context: &mut Context, out: &mut Query, value: &str) {
        if context.quote_table_names {
            out.push('"');
            self.write_escaped(context, out, value, '"', "\"\"");
            out.push('"');
        } else {
            out.push_str(value);
        }
    }

    fn write_column_name(&self, _context: &mut Context, out: &mut Query, value: &str) {
        out.push_str(value);
    }

    /// Placeholder for a caller supplied value.
    fn write_value_placeholder(&self, _context: &mut Context, out: &mut Query, value: &Value) {
        out.bind(value.clone());
    }

    /// Native type used to store a logical type.
    fn native_type(&self, ty: LogicalType) -> &'static str;

    /// Logical type of a native type name, `None` when there is no counterpart.
    fn logical_type(&self, native: &str) -> Option<LogicalType>;

    /// Length written when a column does not specify one.
    fn default_length(&self, _native: &str) -> Option<u32> {
        None
    }

    fn write_column_type(&self, _context: &mut Context, out: &mut Query, attribute: &Attribute) {
        let Some(ty) = attribute.ty else {
            log::error!("Cannot write the type of a column without a logical type");
            return;
        };
        let native = self.native_type(ty);
        out.push_str(native);
        if let Some(length) = attribute
            .length
            .filter(|v| *v > 0)
            .or_else(|| self.default_length(native))
        {
            let _ = write!(out.sql, "({})", length);
        }
    }

    fn write_column_nullability(&self, _context: &mut Context, out: &mut Query, required: bool) {
        if required {
            out.push_str(" NOT NULL");
        }
    }

    fn write_create_table(&self, context: &mut Context, out: &mut Query, value: &CreateTable) {
        out.push_str("CREATE TABLE ");
        self.write_table_name(context, out, value.table);
        out.push_str(" (");
        separated_by(
            out,
            &value.columns,
            |out, (name, attribute)| {
                self.write_create_table_column(
                    context,
                    out,
                    name,
                    attribute,
                    value.primary_key_type,
                );
            },
            ",",
        );
        out.push(')');
    }

    fn write_create_table_column(
        &self,
        context: &mut Context,
        out: &mut Query,
        name: &str,
        attribute: &Attribute,
        primary_key_type: &str,
    ) {
        self.write_column_name(context, out, name);
        out.push(' ');
        if attribute.auto_increment {
            out.push_str(primary_key_type);
            out.push_str(" GENERATED ALWAYS AS IDENTITY PRIMARY KEY");
        } else if attribute.primary_key {
            out.push_str(primary_key_type);
            out.push_str(" NOT NULL PRIMARY KEY");
        } else {
            self.write_column_type(context, out, attribute);
            self.write_column_nullability(context, out, attribute.required);
        }
    }

    fn write_drop_table(&self, context: &mut Context, out: &mut Query, value: &DropTable) {
        out.push_str("DROP TABLE ");
        self.write_table_name(context, out, value.table);
    }

    fn write_truncate(&self, context: &mut Context, out: &mut Query, value: &Truncate) {
        out.push_str("TRUNCATE TABLE ");
        self.write_table_name(context, out, value.table);
    }

    /// Catalog query listing the columns of a table, one row per column.
    fn write_describe(&self, context: &mut Context, out: &mut Query, value: &Describe);

    /// Schema out of the rows returned by the [`SqlWriter::write_describe`] query, `None`
    /// when the table does not exist.
    fn read_schema(&self, table: &str, rows: &[RowLabeled]) -> Result<Option<Schema>>;

    fn write_select(&self, context: &mut Context, out: &mut Query, value: &Select) {
        let mut context = context.switch_fragment(Fragment::SqlSelect);
        out.push_str("SELECT ");
        if value.distinct {
            out.push_str("DISTINCT ");
        }
        self.write_projection(&mut context, out, &value.projection);
        out.push_str(" FROM ");
        self.write_table_name(&mut context, out, value.table);
        self.write_filter(&mut context, out, &value.filter);
        self.write_order_by(&mut context, out, &value.order);
        self.write_limit(&mut context, out, value.limit, value.skip);
    }

    fn write_projection(&self, context: &mut Context, out: &mut Query, value: &Projection) {
        match value {
            Projection::Columns(columns) => separated_by(
                out,
                columns,
                |out, v| self.write_column_name(context, out, v),
                ",",
            ),
            Projection::Count => out.push_str("COUNT(*)"),
        }
    }

    fn write_filter(&self, context: &mut Context, out: &mut Query, value: &Filter) {
        if value.is_empty() {
            return;
        }
        out.push_str(" WHERE ");
        separated_by(
            out,
            &value.terms,
            |out, (name, value)| {
                self.write_column_name(context, out, name);
                out.push_str(" = ");
                self.write_value_placeholder(context, out, value);
            },
            " AND ",
        );
    }

    fn write_order_by(&self, context: &mut Context, out: &mut Query, value: &[(&str, Order)]) {
        if value.is_empty() {
            return;
        }
        out.push_str(" ORDER BY ");
        separated_by(
            out,
            value,
            |out, (name, order)| {
                self.write_column_name(context, out, name);
                out.push(' ');
                out.push_str(order.as_str());
            },
            ", ",
        );
    }

    /// Row limit. Selects page with `LIMIT`/`OFFSET`, data change statements are capped with
    /// `FETCH FIRST`.
    fn write_limit(
        &self,
        context: &mut Context,
        out: &mut Query,
        limit: Option<u64>,
        skip: Option<u64>,
    ) {
        let Some(limit) = limit else {
            return;
        };
        match context.fragment {
            Fragment::SqlSelect => {
                let _ = write!(out.sql, " LIMIT {}", limit);
                if let Some(skip) = skip {
                    let _ = write!(out.sql, " OFFSET {}", skip);
                }
            }
            Fragment::SqlDataChange | Fragment::None => {
                let _ = write!(out.sql, " FETCH FIRST {} ROWS ONLY", limit);
            }
        }
    }

    /// Wraps a data change statement written by `body` so that it returns the `returning`
    /// columns of the affected rows.
    fn write_data_change_returning(
        &self,
        context: &mut Context,
        out: &mut Query,
        returning: &[&str],
        body: &dyn Fn(&mut Context, &mut Query),
    ) {
        body(context, out);
        if !returning.is_empty() {
            out.push_str(" RETURNING ");
            separated_by(
                out,
                returning,
                |out, v| self.write_column_name(context, out, v),
                ",",
            );
        }
    }

    fn write_insert(&self, context: &mut Context, out: &mut Query, value: &Insert) {
        self.write_data_change_returning(
            context,
            out,
            &value.returning,
            &|context, out| {
                out.push_str("INSERT INTO ");
                self.write_table_name(context, out, value.table);
                out.push_str(" (");
                separated_by(
                    out,
                    &value.values,
                    |out, (name, _)| self.write_column_name(context, out, name),
                    ",",
                );
                out.push_str(") VALUES (");
                separated_by(
                    out,
                    &value.values,
                    |out, (_, v)| self.write_value_placeholder(context, out, v),
                    ",",
                );
                out.push(')');
            },
        );
    }

    fn write_update(&self, context: &mut Context, out: &mut Query, value: &Update) {
        let mut context = context.switch_fragment(Fragment::SqlDataChange);
        self.write_data_change_returning(
            &mut context,
            out,
            &value.returning,
            &|context, out| {
                out.push_str("UPDATE ");
                self.write_table_name(context, out, value.table);
                out.push_str(" SET ");
                separated_by(
                    out,
                    &value.set,
                    |out, (name, v)| {
                        self.write_column_name(context, out, name);
                        out.push_str(" = ");
                        self.write_value_placeholder(context, out, v);
                    },
                    ",",
                );
                self.write_filter(context, out, &value.filter);
                self.write_limit(context, out, value.limit, None);
            },
        );
    }

    fn write_delete(&self, context: &mut Context, out: &mut Query, value: &Delete) {
        let mut context = context.switch_fragment(Fragment::SqlDataChange);
        out.push_str("DELETE FROM ");
        self.write_table_name(&mut context, out, value.table);
        self.write_filter(&mut context, out, &value.filter);
        self.write_limit(&mut context, out, value.limit, None);
    }
}
