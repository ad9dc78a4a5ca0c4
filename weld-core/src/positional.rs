use crate::{
    Argument, ArgumentCountMismatch, Error, PLACEHOLDER, Result, Value, ends_with_ignore_case,
    starts_with_ignore_case,
};

/// Text rewrite applied around a placeholder bound to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteRule {
    /// Replaces `pattern` when it precedes the placeholder, separated from it
    /// only by whitespace and opening parentheses. Matching ignores case.
    Preceding {
        pattern: &'static str,
        replacement: &'static str,
    },
    /// `pattern` and `replacement` both contain exactly one placeholder, the
    /// text surrounding the placeholder is replaced when it matches.
    Enclosing {
        pattern: &'static str,
        replacement: &'static str,
    },
}

/// Output of [`process_positional`].
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub text: String,
    /// Byte offsets in `text` of the placeholders bound to `values`.
    pub placeholders: Vec<usize>,
    pub values: Vec<Value>,
}

/// Bind `args` to the placeholders of `text`, left to right.
///
/// Literals are spliced inline, collections get the `rules` applied around
/// their placeholder, everything else is bound unchanged.
pub fn process_positional(
    text: &str,
    args: Vec<Argument>,
    rules: &[RewriteRule],
) -> Result<Processed> {
    let placeholders = text.matches(PLACEHOLDER).count();
    if placeholders != args.len() {
        return Err(ArgumentCountMismatch {
            fragment: text.to_string(),
            placeholders,
            arguments: args.len(),
        }
        .into());
    }
    let mut pieces = text.split(PLACEHOLDER);
    let mut result = Processed {
        text: pieces.next().unwrap_or_default().to_string(),
        placeholders: Vec::with_capacity(args.len()),
        values: Vec::with_capacity(args.len()),
    };
    for (arg, mut following) in args.into_iter().zip(pieces) {
        match arg {
            Argument::Literal(literal) => result.text.push_str(literal.as_str()),
            Argument::Value(value) => {
                let mut closing = "";
                if value.is_collection() {
                    closing = apply_rules(&mut result.text, &mut following, rules);
                }
                result.placeholders.push(result.text.len());
                result.text.push(PLACEHOLDER);
                result.text.push_str(closing);
                result.values.push(value);
            }
            Argument::Aggregate(..) => {
                return Err(Error::msg(format!(
                    "Aggregate arguments can only be bound to named parameters, found one in `{text}`"
                )));
            }
        }
        result.text.push_str(following);
    }
    Ok(result)
}

/// Returns the text to write right after the placeholder.
fn apply_rules(out: &mut String, following: &mut &str, rules: &[RewriteRule]) -> &'static str {
    let mut closing = "";
    for rule in rules {
        match *rule {
            RewriteRule::Preceding {
                pattern,
                replacement,
            } => {
                let end = out
                    .trim_end_matches(|c: char| c.is_whitespace() || c == '(')
                    .len();
                let pattern = pattern.trim_end();
                let keyword = pattern.trim_start();
                if !ends_with_ignore_case(&out[..end], keyword) {
                    continue;
                }
                let start = end - keyword.len();
                // A leading space in the pattern matches any whitespace
                if keyword.len() == pattern.len() {
                    out.replace_range(start..end, replacement.trim_end());
                } else if out[..start].ends_with(char::is_whitespace) {
                    out.replace_range(start..end, replacement.trim());
                }
            }
            RewriteRule::Enclosing {
                pattern,
                replacement,
            } => {
                let Some((before, after)) = pattern.split_once(PLACEHOLDER) else {
                    continue;
                };
                let Some((open, close)) = replacement.split_once(PLACEHOLDER) else {
                    continue;
                };
                if ends_with_ignore_case(out, before) && starts_with_ignore_case(following, after)
                {
                    out.truncate(out.len() - before.len());
                    out.push_str(open);
                    *following = &following[after.len()..];
                    closing = close;
                }
            }
        }
    }
    closing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AsValue, DEFAULT_REWRITES, Literal};

    #[test]
    fn count_mismatch() {
        let error = process_positional("a = ? AND b = ?", vec![1.into()], DEFAULT_REWRITES)
            .unwrap_err();
        let mismatch = error.downcast_ref::<ArgumentCountMismatch>().unwrap();
        assert_eq!(mismatch.placeholders, 2);
        assert_eq!(mismatch.arguments, 1);
    }

    #[test]
    fn collections_are_rewritten() {
        let processed = process_positional(
            "WHERE id IN (?) AND kind = ?",
            vec![vec![1, 2, 3].into(), "a".into()],
            DEFAULT_REWRITES,
        )
        .unwrap();
        assert_eq!(processed.text, "WHERE id = ANY(?) AND kind = ?");
        assert_eq!(processed.placeholders, vec![15, 29]);
        assert_eq!(processed.values[0], vec![1, 2, 3].as_value());
    }

    #[test]
    fn scalars_are_not_rewritten() {
        let processed =
            process_positional("WHERE id IN (?)", vec![4.into()], DEFAULT_REWRITES).unwrap();
        assert_eq!(processed.text, "WHERE id IN (?)");
    }

    #[test]
    fn literals_are_spliced() {
        let processed = process_positional(
            "WHERE v @@ ? AND x = ?",
            vec![Literal::new("to_tsquery('a?')").into(), 3.into()],
            DEFAULT_REWRITES,
        )
        .unwrap();
        assert_eq!(processed.text, "WHERE v @@ to_tsquery('a?') AND x = ?");
        assert_eq!(processed.placeholders, vec![36]);
        assert_eq!(processed.values, vec![Value::Int32(Some(3))]);
    }

    #[test]
    fn only_the_matched_region_changes_case() {
        let processed = process_positional(
            "SELECT Name FROM T WHERE Id in(?)",
            vec![vec!["a".to_string()].into()],
            DEFAULT_REWRITES,
        )
        .unwrap();
        assert_eq!(processed.text, "SELECT Name FROM T WHERE Id =ANY(?)");
    }

    #[test]
    fn any_whitespace_before_the_keyword() {
        let processed = process_positional(
            "WHERE id\nIN (?) AND kind\tin (?)",
            vec![vec![1].into(), vec!["a".to_string()].into()],
            DEFAULT_REWRITES,
        )
        .unwrap();
        assert_eq!(processed.text, "WHERE id\n= ANY(?) AND kind\t= ANY(?)");
        let processed =
            process_positional("WHERE pin (?)", vec![vec![1].into()], DEFAULT_REWRITES).unwrap();
        assert_eq!(processed.text, "WHERE pin ANY(?)");
    }
}
