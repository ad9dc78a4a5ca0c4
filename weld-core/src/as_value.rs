use crate::{Error, Result, Value};
use anyhow::Context;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::{any, borrow::Cow, fmt::Display, str::FromStr};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`]
/// that backs bound arguments and decoded columns.
///
/// # Conversion contract
/// - `as_value` wraps the value into its canonical variant (collections into
///   `List`), it never performs lossy transformations.
/// - `try_from_value` accepts the canonical variant and, for numbers, any other
///   width as long as the value is in range. Textual `Unknown` values are parsed.
/// - Mismatches are reported as errors mentioning the value and target type,
///   they never fall back to a default.
///
/// # Examples
/// ```rust
/// use weld_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Typed NULL for this type. Used as the element type of empty collections
    /// and to represent absent optional data.
    fn as_empty_value() -> Value;
    /// Convert this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>(),
    ))
}

fn parse_unknown<T>(input: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    input
        .trim()
        .parse::<T>()
        .with_context(|| format!("Cannot parse `{input}` as {}", any::type_name::<T>()))
}

fn parse_bool(input: &str) -> Result<bool> {
    match input.trim() {
        x if x.eq_ignore_ascii_case("true") || x.eq_ignore_ascii_case("t") || x == "1" => Ok(true),
        x if x.eq_ignore_ascii_case("false") || x.eq_ignore_ascii_case("f") || x == "0" => {
            Ok(false)
        }
        _ => Err(Error::msg(format!("Cannot parse boolean from '{input}'"))),
    }
}

fn integer_in_range<S, T>(v: S) -> Result<T>
where
    S: Copy + Display,
    T: TryFrom<S>,
{
    T::try_from(v).map_err(|_| {
        Error::msg(format!(
            "Value {v} is out of range for {}",
            any::type_name::<T>(),
        ))
    })
}

fn integer_from_decimal<T: TryFrom<i128>>(v: Decimal) -> Result<T> {
    let error = || {
        Error::msg(format!(
            "Value {v}: Decimal does not fit into {}",
            any::type_name::<T>()
        ))
    };
    if !v.is_integer() {
        return Err(error().context("The value is not a integer"));
    }
    v.to_i128()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(error)
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            #[allow(unreachable_patterns)]
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v), ..) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    };
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl_as_value!(
            $source,
            $destination,
            Value::Int8(Some(v)) => integer_in_range(v),
            Value::Int16(Some(v)) => integer_in_range(v),
            Value::Int32(Some(v)) => integer_in_range(v),
            Value::Int64(Some(v)) => integer_in_range(v),
            Value::UInt8(Some(v)) => integer_in_range(v),
            Value::UInt16(Some(v)) => integer_in_range(v),
            Value::UInt32(Some(v)) => integer_in_range(v),
            Value::UInt64(Some(v)) => integer_in_range(v),
            Value::Decimal(Some(v)) => integer_from_decimal(v),
            Value::Unknown(Some(ref v)) => parse_unknown(v),
        );
    };
}
impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

macro_rules! impl_as_value_float {
    ($source:ty, $destination:path, $other:ident, $from_decimal:ident) => {
        impl_as_value!(
            $source,
            $destination,
            Value::$other(Some(v)) => Ok(v as _),
            Value::Int8(Some(v)) => Ok(v as _),
            Value::Int16(Some(v)) => Ok(v as _),
            Value::Int32(Some(v)) => Ok(v as _),
            Value::Int64(Some(v)) => Ok(v as _),
            Value::UInt8(Some(v)) => Ok(v as _),
            Value::UInt16(Some(v)) => Ok(v as _),
            Value::UInt32(Some(v)) => Ok(v as _),
            Value::UInt64(Some(v)) => Ok(v as _),
            Value::Decimal(Some(v)) => v.$from_decimal().ok_or_else(|| {
                Error::msg(format!("Value {v}: Decimal does not fit into {}", any::type_name::<Self>()))
            }),
            Value::Unknown(Some(ref v)) => parse_unknown(v),
        );
    };
}
impl_as_value_float!(f32, Value::Float32, Float64, to_f32);
impl_as_value_float!(f64, Value::Float64, Float32, to_f64);

impl_as_value!(
    bool,
    Value::Boolean,
    Value::Int8(Some(v)) => Ok(v != 0),
    Value::Int16(Some(v)) => Ok(v != 0),
    Value::Int32(Some(v)) => Ok(v != 0),
    Value::Int64(Some(v)) => Ok(v != 0),
    Value::UInt8(Some(v)) => Ok(v != 0),
    Value::UInt16(Some(v)) => Ok(v != 0),
    Value::UInt32(Some(v)) => Ok(v != 0),
    Value::UInt64(Some(v)) => Ok(v != 0),
    Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => parse_bool(v),
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Unknown(Some(v)) => Ok(v),
    Value::Json(Some(v)) => Ok(v.to_string()),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Int8(Some(v)) => Ok(v.into()),
    Value::Int16(Some(v)) => Ok(v.into()),
    Value::Int32(Some(v)) => Ok(v.into()),
    Value::Int64(Some(v)) => Ok(v.into()),
    Value::UInt8(Some(v)) => Ok(v.into()),
    Value::UInt16(Some(v)) => Ok(v.into()),
    Value::UInt32(Some(v)) => Ok(v.into()),
    Value::UInt64(Some(v)) => Ok(v.into()),
    Value::Float32(Some(v)) => Decimal::from_f32(v)
        .ok_or_else(|| Error::msg(format!("Value {v}: f32 does not fit into Decimal"))),
    Value::Float64(Some(v)) => Decimal::from_f64(v)
        .ok_or_else(|| Error::msg(format!("Value {v}: f64 does not fit into Decimal"))),
    Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => parse_unknown(v),
);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(
    Date,
    Value::Date,
    Value::Timestamp(Some(v)) => Ok(v.date()),
);
impl_as_value!(Time, Value::Time);
impl_as_value!(
    PrimitiveDateTime,
    Value::Timestamp,
    Value::Date(Some(v)) => Ok(v.midnight()),
);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(
    Uuid,
    Value::Uuid,
    Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => parse_unknown(v),
);
impl_as_value!(
    serde_json::Value,
    Value::Json,
    Value::Varchar(Some(ref v)) | Value::Unknown(Some(ref v)) => parse_unknown(v),
);

impl AsValue for Cow<'static, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        String::try_from_value(value).map(Into::into)
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_empty_value() -> Value {
        Value::List(None, Box::new(T::as_empty_value()))
    }
    fn as_value(self) -> Value {
        Value::List(
            Some(self.into_iter().map(AsValue::as_value).collect()),
            Box::new(T::as_empty_value()),
        )
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(Some(v), ..) => v
                .into_iter()
                .map(<T as AsValue>::try_from_value)
                .collect::<Result<_>>(),
            Value::List(None, ..) | Value::Null => Ok(Vec::new()),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(<T as AsValue>::try_from_value(value)?)
        })
    }
}

impl<T: AsValue> AsValue for Box<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        (*self).as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(Self::new(<T as AsValue>::try_from_value(value)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_convert_across_widths() {
        assert_eq!(i64::try_from_value(Value::Int32(Some(7))).unwrap(), 7);
        assert_eq!(i32::try_from_value(Value::Int64(Some(-3))).unwrap(), -3);
        assert_eq!(u8::try_from_value(Value::Int16(Some(255))).unwrap(), 255);
        assert!(i8::try_from_value(Value::Int64(Some(300))).is_err());
        assert!(u32::try_from_value(Value::Int32(Some(-1))).is_err());
    }

    #[test]
    fn decimals_must_be_integers() {
        assert_eq!(
            i64::try_from_value(Value::Decimal(Some(Decimal::new(4200, 2)))).unwrap(),
            42
        );
        assert!(i64::try_from_value(Value::Decimal(Some(Decimal::new(4201, 2)))).is_err());
    }

    #[test]
    fn unknown_is_parsed() {
        assert_eq!(i32::try_from_value(Value::Unknown(Some("12".into()))).unwrap(), 12);
        assert!(bool::try_from_value(Value::Unknown(Some("t".into()))).unwrap());
        assert!(f64::try_from_value(Value::Unknown(Some("abc".into()))).is_err());
    }

    #[test]
    fn mismatch_is_an_error() {
        let error = i32::try_from_value(Value::Varchar(Some("seven".into()))).unwrap_err();
        assert!(error.to_string().contains("Cannot convert"));
        assert!(String::try_from_value(Value::Boolean(Some(true))).is_err());
    }

    #[test]
    fn options_and_lists() {
        assert_eq!(Option::<i32>::try_from_value(Value::Int32(None)).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(None::<String>.as_value(), Value::Varchar(None));
        let list = vec!["a".to_string(), "b".to_string()].as_value();
        assert!(list.is_collection());
        assert_eq!(
            Vec::<String>::try_from_value(list).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            Vec::<i64>::try_from_value(vec![1i32, 2].as_value()).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn json_from_text() {
        let json = serde_json::Value::try_from_value(Value::Varchar(Some(r#"{"a": [1, 2]}"#.into())))
            .unwrap();
        assert_eq!(json["a"][1], 2);
        assert_eq!(
            String::try_from_value(json.as_value()).unwrap(),
            r#"{"a":[1,2]}"#
        );
        assert!(serde_json::Value::try_from_value(Value::Varchar(Some("{".into()))).is_err());
    }
}
