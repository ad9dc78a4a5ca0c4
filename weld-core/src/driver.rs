use crate::{Connection, SqlWriter};

/// Names a database backend and the SQL dialect it speaks.
pub trait Driver {
    type Connection: Connection;
    type SqlWriter: SqlWriter;

    /// Also the URL scheme accepted by `Connection::connect`.
    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
