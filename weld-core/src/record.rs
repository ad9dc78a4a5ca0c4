use crate::{NamedValue, Result, Value};

/// Static description of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust field name, also the named token (`@name`) it binds to.
    pub name: &'static str,
    /// Result column decoded into this field.
    pub column: &'static str,
}

/// A struct that binds its fields to named tokens and is populated from rows.
///
/// Implemented through `#[derive(Record)]`.
pub trait Record {
    fn fields() -> &'static [FieldDef]
    where
        Self: Sized;

    /// Field values keyed by field name.
    fn bindings(&self) -> Vec<NamedValue>;

    /// Decode `value` into the field mapped to `column`.
    ///
    /// Returns `Ok(false)` when no field maps to the column.
    fn set_column(&mut self, column: &str, value: Value) -> Result<bool>;
}
