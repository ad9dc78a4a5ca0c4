//! Postgres full text search expressions, produced as literals.
//!
//! The input is normalized so that it never contains quotes, which makes the
//! resulting literal safe to splice into the statement.

use crate::Literal;
use std::fmt::Display;

/// Lowercase, replace everything that is not alphanumeric with a space and
/// collapse the whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `to_tsvector('simple', '...')` over the normalized values.
pub fn ts_vector<T: Display>(values: impl IntoIterator<Item = T>) -> Literal {
    let words = values
        .into_iter()
        .map(|v| normalize(&v.to_string()))
        .collect::<Vec<_>>()
        .join(" ");
    Literal::new(format_args!("to_tsvector('simple', '{words}')"))
}

/// Prefix query matching every word of `text`.
///
/// Words longer than one character lose the last one, so that `walker` also
/// matches `walked`.
pub fn ts_query(text: &str) -> Literal {
    let terms = normalize(text)
        .split(' ')
        .filter(|v| !v.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            if word.chars().count() > 1 {
                chars.next_back();
            }
            format!("{}:*", chars.as_str())
        })
        .collect::<Vec<_>>()
        .join(" & ");
    Literal::new(format_args!("to_tsquery('simple', '{terms}')"))
}

/// The values of `map` joined by a space, the input of [`ts_vector`].
pub fn map_to_ts_vector_value<'a, K, V>(map: impl IntoIterator<Item = (&'a K, &'a V)>) -> String
where
    K: 'a,
    V: Display + 'a,
{
    map.into_iter()
        .map(|(_, v)| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn normalize_text() {
        assert_eq!(normalize("  Daar's   WALKER-2\n"), "daar s walker 2");
        assert_eq!(normalize("!!"), "");
    }

    #[test]
    fn vector_and_query() {
        assert_eq!(
            ts_vector(["Daar", "Walker O'Neil"]).as_str(),
            "to_tsvector('simple', 'daar walker o neil')"
        );
        assert_eq!(
            ts_query("Walker a").as_str(),
            "to_tsquery('simple', 'walke:* & a:*')"
        );
    }

    #[test]
    fn map_values() {
        let map = BTreeMap::from([("a", "one"), ("b", "two")]);
        assert_eq!(map_to_ts_vector_value(&map), "one two");
        assert_eq!(map_to_ts_vector_value(&HashMap::<String, i32>::new()), "");
    }
}
