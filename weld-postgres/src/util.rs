use crate::ValueHolder;
use weld_core::{DecodeError, Row};

pub(crate) fn row_to_weld_row(row: tokio_postgres::Row) -> weld_core::Result<Row> {
    (0..row.len())
        .map(|i| match row.try_get::<_, ValueHolder>(i) {
            Ok(v) => Ok(v.0),
            Err(e) => {
                let col = &row.columns()[i];
                Err(DecodeError::column(
                    col.name(),
                    format!("cannot read a value of type {}: {e}", col.type_()),
                )
                .into())
            }
        })
        .collect()
}
