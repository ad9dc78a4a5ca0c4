use std::fmt::Write;
use weld_core::SqlWriter;

/// Numbered `$n` placeholders, collections are bound as arrays through `= ANY($n)`.
#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresSqlWriter {}

impl SqlWriter for PostgresSqlWriter {
    fn write_placeholder(&self, out: &mut String, index: usize) {
        let _ = write!(out, "${index}");
    }
}
