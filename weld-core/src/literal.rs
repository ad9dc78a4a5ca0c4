use std::fmt::{self, Display};

/// Raw SQL spliced into the statement text in place of a placeholder.
///
/// A `Literal` is never bound as an argument: whatever it wraps ends up in the
/// query verbatim. Only build it from trusted or already escaped input, the
/// full text search helpers in this crate are the intended producers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(pub String);

impl Literal {
    pub fn new(value: impl Display) -> Self {
        Self(value.to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
