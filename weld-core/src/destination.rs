use crate::{
    AsValue, DecodeError, Record, Result, RowLabeled, Value,
    stream::{Stream, TryStreamExt},
};
use rust_decimal::Decimal;
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
    pin::pin,
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Caller owned target populated from the rows of a query.
pub trait Destination {
    /// Decode the `index`-th row (counting from zero) into `self`.
    fn decode_row(&mut self, index: usize, row: RowLabeled) -> Result<()>;
}

/// Every shape accepted by `Statement::exec` as the receiver of the rows.
///
/// `()` executes without decoding, `&mut D` decodes into one destination and
/// tuples of `&mut T` bind the columns of a single row, one per element.
pub trait Destinations {
    fn is_empty(&self) -> bool {
        false
    }
    fn accept(&mut self, index: usize, row: RowLabeled) -> Result<()>;
}

pub(crate) fn decode_value<T: AsValue>(name: &str, value: Value) -> Result<T> {
    T::try_from_value(value).map_err(|e| DecodeError::column(name, format!("{e:#}")).into())
}

/// Value of the only column of `row`, `None` when the row has no columns.
fn decode_single<T: AsValue>(row: RowLabeled) -> Result<Option<T>> {
    let RowLabeled { labels, values } = row;
    let mut values = Vec::from(values);
    match values.len() {
        0 => Ok(None),
        1 => {
            let value = values.pop().unwrap_or_default();
            decode_value(labels.first().map(String::as_str).unwrap_or_default(), value).map(Some)
        }
        n => Err(DecodeError::row(format!(
            "a scalar destination accepts exactly one column, the row has {n}"
        ))
        .into()),
    }
}

fn decode_scalar<T: AsValue>(target: &mut T, index: usize, row: RowLabeled) -> Result<()> {
    if index > 0 {
        return Ok(());
    }
    if let Some(value) = decode_single(row)? {
        *target = value;
    }
    Ok(())
}

fn decode_record<R: Record + ?Sized>(target: &mut R, row: RowLabeled) -> Result<()> {
    let RowLabeled { labels, values } = row;
    for (name, value) in labels.iter().zip(values) {
        target
            .set_column(name, value)
            .map_err(|e| DecodeError::column(name, format!("{e:#}")))?;
    }
    Ok(())
}

macro_rules! impl_destination_scalar {
    ($($T:ty),+ $(,)?) => {
        $(
            impl Destination for $T {
                fn decode_row(&mut self, index: usize, row: RowLabeled) -> Result<()> {
                    decode_scalar(self, index, row)
                }
            }
            /// One value per row, in cursor order.
            impl Destination for Vec<$T> {
                fn decode_row(&mut self, _index: usize, row: RowLabeled) -> Result<()> {
                    if let Some(value) = decode_single(row)? {
                        self.push(value);
                    }
                    Ok(())
                }
            }
        )+
    };
}
impl_destination_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    Decimal,
    String,
    Cow<'static, str>,
    Box<[u8]>,
    Date,
    Time,
    PrimitiveDateTime,
    OffsetDateTime,
    Uuid,
    serde_json::Value,
);

impl<T: AsValue> Destination for Option<T> {
    fn decode_row(&mut self, index: usize, row: RowLabeled) -> Result<()> {
        decode_scalar(self, index, row)
    }
}

/// First row only, later rows are drained and ignored.
impl<R: Record> Destination for R {
    fn decode_row(&mut self, index: usize, row: RowLabeled) -> Result<()> {
        if index > 0 {
            return Ok(());
        }
        decode_record(self, row)
    }
}

/// One fresh record per row, in cursor order.
impl<R: Record + Default> Destination for Vec<R> {
    fn decode_row(&mut self, _index: usize, row: RowLabeled) -> Result<()> {
        let mut record = R::default();
        decode_record(&mut record, row)?;
        self.push(record);
        Ok(())
    }
}

/// Holds the columns of the last row.
impl<V: AsValue, S: BuildHasher> Destination for HashMap<String, V, S> {
    fn decode_row(&mut self, _index: usize, row: RowLabeled) -> Result<()> {
        self.clear();
        let RowLabeled { labels, values } = row;
        for (name, value) in labels.iter().zip(values) {
            self.insert(name.clone(), decode_value(name, value)?);
        }
        Ok(())
    }
}

impl<V: AsValue> Destination for BTreeMap<String, V> {
    fn decode_row(&mut self, _index: usize, row: RowLabeled) -> Result<()> {
        self.clear();
        let RowLabeled { labels, values } = row;
        for (name, value) in labels.iter().zip(values) {
            self.insert(name.clone(), decode_value(name, value)?);
        }
        Ok(())
    }
}

impl Destination for HashMap<String, Value> {
    fn decode_row(&mut self, _index: usize, row: RowLabeled) -> Result<()> {
        self.clear();
        self.extend(row.labels.iter().cloned().zip(row.values));
        Ok(())
    }
}

impl Destinations for () {
    fn is_empty(&self) -> bool {
        true
    }
    fn accept(&mut self, _index: usize, _row: RowLabeled) -> Result<()> {
        Ok(())
    }
}

impl<D: Destination + ?Sized> Destinations for &mut D {
    fn accept(&mut self, index: usize, row: RowLabeled) -> Result<()> {
        (**self).decode_row(index, row)
    }
}

macro_rules! impl_destinations_tuple {
    ($len:literal; $($T:ident $i:tt),+) => {
        impl<$($T: AsValue),+> Destinations for ($(&mut $T,)+) {
            fn accept(&mut self, index: usize, row: RowLabeled) -> Result<()> {
                if index > 0 {
                    return Err(DecodeError::row(format!(
                        "{} destinations bind a single row, the query returned more",
                        $len
                    ))
                    .into());
                }
                let RowLabeled { labels, values } = row;
                if values.len() != $len {
                    return Err(DecodeError::row(format!(
                        "expected {} columns, the row has {}",
                        $len,
                        values.len()
                    ))
                    .into());
                }
                let mut values = Vec::from(values).into_iter();
                let decoded = ($(
                    decode_value::<$T>(&labels[$i], values.next().unwrap_or_default())?,
                )+);
                $(*self.$i = decoded.$i;)+
                Ok(())
            }
        }
    };
}
impl_destinations_tuple!(2; A 0, B 1);
impl_destinations_tuple!(3; A 0, B 1, C 2);
impl_destinations_tuple!(4; A 0, B 1, C 2, D 3);
impl_destinations_tuple!(5; A 0, B 1, C 2, D 3, E 4);
impl_destinations_tuple!(6; A 0, B 1, C 2, D 3, E 4, F 5);
impl_destinations_tuple!(7; A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_destinations_tuple!(8; A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Feed every row of the stream to the destinations, in cursor order.
///
/// Rows without columns are skipped, so a statement returning no columns
/// leaves the destinations untouched. The stream is consumed to the end unless
/// a row fails to decode.
pub async fn map_rows<S, D>(rows: S, mut destinations: D) -> Result<()>
where
    S: Stream<Item = Result<RowLabeled>>,
    D: Destinations,
{
    let mut rows = pin!(rows);
    let mut index = 0;
    while let Some(row) = rows.try_next().await? {
        if row.values().is_empty() {
            continue;
        }
        destinations.accept(index, row)?;
        index += 1;
    }
    Ok(())
}
