use crate::{Argument, Fragment, Query, Result, SqlWriter, process_positional, resolve_named};

/// Merge the fragments into one statement for the `writer` dialect.
///
/// Fragments without arguments are copied verbatim. A fragment whose only
/// argument is an aggregate has its named tokens resolved first, then every
/// fragment with arguments goes through the positional processor. Fragments
/// are joined by a single space and the statement is terminated.
pub fn compile<'a, W>(fragments: impl IntoIterator<Item = &'a Fragment>, writer: &W) -> Result<Query>
where
    W: SqlWriter + ?Sized,
{
    let rules = writer.collection_rewrites();
    let mut text = String::new();
    let mut placeholders = Vec::new();
    let mut args = Vec::new();
    for fragment in fragments {
        if !text.is_empty() {
            text.push(' ');
        }
        if fragment.arguments.is_empty() {
            text.push_str(&fragment.text);
            continue;
        }
        let processed = match fragment.arguments.as_slice() {
            [Argument::Aggregate(aggregate)] => {
                let (resolved, values) = resolve_named(&fragment.text, aggregate.clone());
                process_positional(
                    &resolved,
                    values.into_iter().map(Argument::Value).collect(),
                    rules,
                )?
            }
            _ => process_positional(&fragment.text, fragment.arguments.clone(), rules)?,
        };
        let offset = text.len();
        placeholders.extend(processed.placeholders.into_iter().map(|v| v + offset));
        text.push_str(&processed.text);
        args.extend(processed.values);
    }
    let mut sql = String::with_capacity(text.len() + placeholders.len() * 2 + 1);
    let mut cursor = 0;
    for (i, position) in placeholders.into_iter().enumerate() {
        sql.push_str(&text[cursor..position]);
        writer.write_placeholder(&mut sql, i + 1);
        cursor = position + 1;
    }
    sql.push_str(&text[cursor..]);
    let terminator = writer.statement_terminator();
    sql.truncate(sql.trim_end().len());
    if !sql.ends_with(terminator) {
        sql.push(terminator);
    }
    Ok(Query { sql, args })
}
