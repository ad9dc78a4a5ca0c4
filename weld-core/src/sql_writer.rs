use crate::RewriteRule;

/// Rewrites applied around a collection argument by the default dialects.
pub const DEFAULT_REWRITES: &[RewriteRule] = &[
    RewriteRule::Preceding {
        pattern: " in ",
        replacement: " = ",
    },
    RewriteRule::Enclosing {
        pattern: "(?)",
        replacement: "ANY(?)",
    },
];

/// Dialect specific pieces of the compiled SQL.
pub trait SqlWriter {
    /// Write the placeholder bound to the `index`-th argument, counted from 1.
    fn write_placeholder(&self, out: &mut String, index: usize) {
        let _ = index;
        out.push('?');
    }

    /// Rules applied, in order, around placeholders bound to collections.
    fn collection_rewrites(&self) -> &[RewriteRule] {
        DEFAULT_REWRITES
    }

    fn statement_terminator(&self) -> char {
        ';'
    }
}

/// Dialect writing unnumbered `?` placeholders.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SqlWriter for GenericSqlWriter {}
