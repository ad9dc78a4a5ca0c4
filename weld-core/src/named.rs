use crate::{Aggregate, Value, is_identifier_char};

/// Introduces a named token (`@name`).
pub const PARAM_PREFIX: char = '@';
/// Dialect independent placeholder emitted by the processors.
pub const PLACEHOLDER: char = '?';

/// Replace the named tokens of `text` with placeholders.
///
/// Each aggregate entry claims the first occurrence of its token that is not
/// followed by an identifier character and does not overlap an occurrence
/// claimed by another entry. Values are returned in the order their tokens
/// appear in the text, entries without a valid occurrence are skipped.
pub fn resolve_named(text: &str, aggregate: Aggregate) -> (String, Vec<Value>) {
    let mut claimed: Vec<(usize, usize, Value)> = Vec::new();
    for entry in aggregate.into_entries() {
        if entry.name.is_empty() {
            continue;
        }
        let token = format!("{PARAM_PREFIX}{}", entry.name);
        let found = text.match_indices(&token).map(|(i, _)| i).find(|&start| {
            let end = start + token.len();
            let boundary = text[end..]
                .chars()
                .next()
                .is_none_or(|c| !is_identifier_char(c));
            boundary && !claimed.iter().any(|(s, e, _)| start < *e && *s < end)
        });
        if let Some(start) = found {
            claimed.push((start, start + token.len(), entry.value));
        }
    }
    claimed.sort_by_key(|(start, ..)| *start);
    let mut result = String::with_capacity(text.len());
    let mut values = Vec::with_capacity(claimed.len());
    let mut cursor = 0;
    for (start, end, value) in claimed {
        result.push_str(&text[cursor..start]);
        result.push(PLACEHOLDER);
        values.push(value);
        cursor = end;
    }
    result.push_str(&text[cursor..]);
    (result, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_not_a_prefix_match() {
        let aggregate = Aggregate::new().with("identity", 2).with("id", 1);
        let (text, values) = resolve_named("SET a=@id, b=@identity", aggregate);
        assert_eq!(text, "SET a=?, b=?");
        assert_eq!(values, vec![Value::Int32(Some(1)), Value::Int32(Some(2))]);
    }

    #[test]
    fn values_follow_text_order() {
        let aggregate = Aggregate::new()
            .with("c", "third")
            .with("a", "first")
            .with("b", "second");
        let (text, values) = resolve_named("VALUES (@a, @b, @c)", aggregate);
        assert_eq!(text, "VALUES (?, ?, ?)");
        assert_eq!(
            values,
            vec![
                Value::Varchar(Some("first".into())),
                Value::Varchar(Some("second".into())),
                Value::Varchar(Some("third".into())),
            ]
        );
    }

    #[test]
    fn unmatched_entries_are_skipped() {
        let aggregate = Aggregate::new().with("missing", 1).with("name", "x");
        let (text, values) = resolve_named("WHERE name = @name AND @names_other", aggregate);
        assert_eq!(text, "WHERE name = ? AND @names_other");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn only_the_first_occurrence_is_replaced() {
        let aggregate = Aggregate::new().with("x", 5);
        let (text, values) = resolve_named("@x + @x", aggregate);
        assert_eq!(text, "? + @x");
        assert_eq!(values, vec![Value::Int32(Some(5))]);
    }
}
