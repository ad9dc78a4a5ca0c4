use thiserror::Error;

/// A fragment does not contain one placeholder per positional argument.
///
/// Raised while compiling, before anything is sent to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "The fragment `{fragment}` contains {placeholders} placeholders but {arguments} arguments were supplied"
)]
pub struct ArgumentCountMismatch {
    pub fragment: String,
    pub placeholders: usize,
    pub arguments: usize,
}

/// A returned value does not fit the destination it was meant for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot decode {target}: {reason}")]
pub struct DecodeError {
    /// Either a column (`column \`name\``) or the row as a whole.
    pub target: String,
    pub reason: String,
}

impl DecodeError {
    pub fn column(name: &str, reason: impl Into<String>) -> Self {
        Self {
            target: format!("column `{name}`"),
            reason: reason.into(),
        }
    }
    pub fn row(reason: impl Into<String>) -> Self {
        Self {
            target: "row".into(),
            reason: reason.into(),
        }
    }
}
