use crate::Query;

/// Calls `f` for every value, writing `separator` between the values that produced output.
pub fn separated_by<T, F>(
    out: &mut Query,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut Query, T),
{
    let mut len = out.sql.len();
    for v in values {
        if out.sql.len() > len {
            out.push_str(separator);
        }
        len = out.sql.len();
        f(out, v);
    }
}

#[macro_export]
macro_rules! possibly_parenthesized {
    ($buff:ident, $cond:expr, $v:expr) => {
        if $cond {
            $buff.push('(');
            $v;
            $buff.push(')');
        } else {
            $v;
        }
    };
}

/// Shortens a query to at most 497 bytes (on a char boundary) for log messages.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {{
        let query: &str = &$query;
        let end = (0..=::std::cmp::min(query.len(), 497))
            .rev()
            .find(|i| query.is_char_boundary(*i))
            .unwrap_or(0);
        format!(
            "{}{}",
            query[..end].trim_end(),
            if query.len() > end { "..." } else { "" }
        )
    }};
}
