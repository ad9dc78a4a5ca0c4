use convert_case::{Case, Casing};

/// True when `c` can continue an identifier, a named token ends before the
/// first character for which this is false.
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Snake case of a map key, already lowercase keys are kept as they are.
pub fn snake_case(name: &str) -> String {
    if name.chars().any(|c| c.is_uppercase() || c == '-' || c == ' ') {
        name.to_case(Case::Snake)
    } else {
        name.to_string()
    }
}

pub fn ends_with_ignore_case(haystack: &str, suffix: &str) -> bool {
    haystack.len() >= suffix.len()
        && haystack.is_char_boundary(haystack.len() - suffix.len())
        && haystack[haystack.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

pub fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.is_char_boundary(prefix.len())
        && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Largest char boundary not past the preview limit of [`truncate_long!`].
pub fn truncated_len(text: &str) -> usize {
    (0..=text.len().min(497))
        .rev()
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or_default()
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            &$query[..$crate::truncated_len(&$query)].trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affixes() {
        assert!(ends_with_ignore_case("WHERE id IN", " in"));
        assert!(!ends_with_ignore_case("in", " in"));
        assert!(starts_with_ignore_case(") AND x", ")"));
        assert!(!starts_with_ignore_case("é", "e"));
    }

    #[test]
    fn snake_case_keys() {
        assert_eq!(snake_case("userName"), "user_name");
        assert_eq!(snake_case("LastName"), "last_name");
        assert_eq!(snake_case("id2"), "id2");
    }

    #[test]
    fn long_text_is_cut_on_a_char_boundary() {
        let text = "è".repeat(300);
        let preview = format!("{}", truncate_long!(text));
        assert!(preview.ends_with("..."));
        assert_eq!(truncated_len(&text), 496);
        assert_eq!(format!("{}", truncate_long!("short ")), "short");
    }
}
