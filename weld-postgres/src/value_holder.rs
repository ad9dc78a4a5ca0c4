use bytes::BytesMut;
use postgres_types::{FromSql, IsNull, Kind, ToSql, Type, to_sql_checked};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::{error::Error, io::Read};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;
use weld_core::{AsValue, Value};

/// Bridges [`Value`] and the Postgres binary protocol.
#[derive(Debug)]
pub(crate) struct ValueHolder(pub(crate) Value);

impl From<Value> for ValueHolder {
    fn from(value: Value) -> Self {
        ValueHolder(value)
    }
}

impl<'a> FromSql<'a> for ValueHolder {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, Some(raw))
    }
    fn from_sql_null(ty: &Type) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Self::from_sql_nullable(ty, None)
    }
    fn from_sql_nullable(
        ty: &Type,
        raw: Option<&'a [u8]>,
    ) -> Result<Self, Box<dyn Error + Sync + Send>> {
        macro_rules! to_value {
            ($ty_var:ident, $raw:ident, $($($ty:path)|+ => ( $value:path, $source:ty $(, $additional:expr)* ) ,)+) => {
                match *$ty_var {
                    $($($ty)|+ => $value(match $raw { Some($raw) => Some(<$source>::from_sql($ty_var, $raw)?.into()), None => None } $(, $additional)*),)+
                    _ => {
                        if let Some(mut raw) = $raw {
                            let mut buf = String::new();
                            let _ = raw.read_to_string(&mut buf);
                            return Err(weld_core::Error::msg(format!("Cannot decode sql type: `{}`, value: `{}`", $ty_var, buf)).into());
                        }
                        Value::Null
                    }
                }
            };
        }
        let value = to_value!(ty, raw,
            Type::BOOL => (Value::Boolean, bool),
            Type::CHAR => (Value::Int8, i8),
            Type::INT2 => (Value::Int16, i16),
            Type::INT4 => (Value::Int32, i32),
            Type::INT8 => (Value::Int64, i64),
            Type::FLOAT4 => (Value::Float32, f32),
            Type::FLOAT8 => (Value::Float64, f64),
            Type::NUMERIC => (Value::Decimal, Decimal),
            Type::OID => (Value::UInt32, u32),
            Type::VARCHAR
            | Type::TEXT
            | Type::NAME
            | Type::BPCHAR
            | Type::XML => (Value::Varchar, String),
            Type::JSON | Type::JSONB => (Value::Json, serde_json::Value),
            Type::BYTEA => (Value::Blob, Vec<u8>),
            Type::DATE => (Value::Date, Date),
            Type::TIME => (Value::Time, Time),
            Type::TIMESTAMP => (Value::Timestamp, PrimitiveDateTime),
            Type::TIMESTAMPTZ => (Value::TimestampWithTimezone, OffsetDateTime),
            Type::UUID => (Value::Uuid, Uuid),
            Type::BOOL_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Boolean(None))),
            Type::INT2_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Int16(None))),
            Type::INT4_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Int32(None))),
            Type::INT8_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Int64(None))),
            Type::FLOAT4_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Float32(None))),
            Type::FLOAT8_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Float64(None))),
            Type::NUMERIC_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Decimal(None))),
            Type::TEXT_ARRAY
            | Type::VARCHAR_ARRAY
            | Type::BPCHAR_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Varchar(None))),
            Type::BYTEA_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Blob(None))),
            Type::DATE_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Date(None))),
            Type::TIMESTAMP_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Timestamp(None))),
            Type::TIMESTAMPTZ_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::TimestampWithTimezone(None))),
            Type::UUID_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Uuid(None))),
            Type::JSON_ARRAY
            | Type::JSONB_ARRAY => (Value::List, VecWrap<ValueHolder>, Box::new(Value::Json(None))),
            Type::UNKNOWN => (Value::Unknown, String),
        );
        Ok(value.into())
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Convert the value to the Rust type matching the parameter type inferred by
/// the server, then encode it.
fn write_as<T>(value: &Value, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>>
where
    T: AsValue + ToSql,
{
    if value.is_null() {
        return Ok(IsNull::Yes);
    }
    T::try_from_value(value.clone())?.to_sql(ty, out)
}

impl ToSql for ValueHolder {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>>
    where
        Self: Sized,
    {
        let value = &self.0;
        match *ty {
            Type::BOOL => return write_as::<bool>(value, ty, out),
            Type::CHAR => return write_as::<i8>(value, ty, out),
            Type::INT2 => return write_as::<i16>(value, ty, out),
            Type::INT4 => return write_as::<i32>(value, ty, out),
            Type::INT8 => return write_as::<i64>(value, ty, out),
            Type::OID => return write_as::<u32>(value, ty, out),
            Type::FLOAT4 => return write_as::<f32>(value, ty, out),
            Type::FLOAT8 => return write_as::<f64>(value, ty, out),
            Type::NUMERIC => return write_as::<Decimal>(value, ty, out),
            Type::VARCHAR | Type::TEXT | Type::NAME | Type::BPCHAR => {
                return write_as::<String>(value, ty, out);
            }
            Type::DATE => return write_as::<Date>(value, ty, out),
            Type::TIME => return write_as::<Time>(value, ty, out),
            Type::TIMESTAMP => return write_as::<PrimitiveDateTime>(value, ty, out),
            Type::TIMESTAMPTZ => return write_as::<OffsetDateTime>(value, ty, out),
            Type::UUID => return write_as::<Uuid>(value, ty, out),
            Type::JSON | Type::JSONB => return write_as::<serde_json::Value>(value, ty, out),
            _ => {}
        }
        match value {
            Value::Null => None::<String>.to_sql(ty, out),
            Value::Boolean(v) => v.to_sql(ty, out),
            Value::Int8(v) => v.to_sql(ty, out),
            Value::Int16(v) => v.to_sql(ty, out),
            Value::Int32(v) => v.to_sql(ty, out),
            Value::Int64(v) => v.to_sql(ty, out),
            Value::UInt8(v) => v.map(|v| v as i16).to_sql(ty, out),
            Value::UInt16(v) => v.map(|v| v as i32).to_sql(ty, out),
            Value::UInt32(v) => v.to_sql(ty, out),
            Value::UInt64(v) => v.and_then(Decimal::from_u64).to_sql(ty, out),
            Value::Float32(v) => v.to_sql(ty, out),
            Value::Float64(v) => v.to_sql(ty, out),
            Value::Decimal(v) => v.to_sql(ty, out),
            Value::Varchar(v) | Value::Unknown(v) => v.to_sql(ty, out),
            Value::Blob(v) => v.as_deref().to_sql(ty, out),
            Value::Date(v) => v.to_sql(ty, out),
            Value::Time(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
            Value::TimestampWithTimezone(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
            Value::List(v, ..) => {
                let Kind::Array(..) = ty.kind() else {
                    return Err(weld_core::Error::msg(format!(
                        "A list can only be bound to an array parameter, found `{}`",
                        ty
                    ))
                    .into());
                };
                v.as_ref()
                    .map(|v| v.iter().cloned().map(ValueHolder).collect::<Vec<_>>())
                    .to_sql(ty, out)
            }
        }
    }

    fn accepts(_ty: &Type) -> bool
    where
        Self: Sized,
    {
        true
    }

    to_sql_checked!();
}

struct VecWrap<T>(pub Vec<T>);

impl<'a, T: FromSql<'a>> FromSql<'a> for VecWrap<T> {
    fn from_sql_null(ty: &Type) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Vec::<T>::from_sql_null(ty).map(VecWrap)
    }
    fn from_sql_nullable(
        ty: &Type,
        raw: Option<&'a [u8]>,
    ) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Vec::<T>::from_sql_nullable(ty, raw).map(VecWrap)
    }
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Vec::<T>::from_sql(ty, raw).map(VecWrap)
    }
    fn accepts(ty: &Type) -> bool {
        Vec::<T>::accepts(ty)
    }
}

impl From<VecWrap<ValueHolder>> for Vec<Value> {
    fn from(value: VecWrap<ValueHolder>) -> Self {
        value.0.into_iter().map(|v| v.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_follow_the_parameter_type() {
        let mut out = BytesMut::new();
        let result = ValueHolder(Value::Int32(Some(7)))
            .to_sql(&Type::INT8, &mut out)
            .unwrap();
        assert!(matches!(result, IsNull::No));
        assert_eq!(&out[..], &7i64.to_be_bytes());
    }

    #[test]
    fn nulls_are_written_as_null() {
        let mut out = BytesMut::new();
        let result = ValueHolder(Value::Varchar(None))
            .to_sql(&Type::TEXT, &mut out)
            .unwrap();
        assert!(matches!(result, IsNull::Yes));
    }

    #[test]
    fn decode_int_and_text() {
        let value = ValueHolder::from_sql(&Type::INT4, &42i32.to_be_bytes()).unwrap();
        assert_eq!(value.0, Value::Int32(Some(42)));
        let value = ValueHolder::from_sql(&Type::TEXT, b"abc").unwrap();
        assert_eq!(value.0, Value::Varchar(Some("abc".into())));
        let value = ValueHolder::from_sql_null(&Type::INT8).unwrap();
        assert_eq!(value.0, Value::Int64(None));
    }

    #[test]
    fn jsonb_carries_the_version_byte() {
        let mut out = BytesMut::new();
        ValueHolder(Value::Varchar(Some(r#"{"a":1}"#.into())))
            .to_sql(&Type::JSONB, &mut out)
            .unwrap();
        assert_eq!(&out[..], b"\x01{\"a\":1}");
        let value = ValueHolder::from_sql(&Type::JSONB, &out).unwrap();
        assert_eq!(value.0, Value::Json(Some(serde_json::json!({ "a": 1 }))));
        let value = ValueHolder::from_sql(&Type::JSON, br#"[1,2]"#).unwrap();
        assert_eq!(value.0, Value::Json(Some(serde_json::json!([1, 2]))));
    }

    #[test]
    fn lists_need_an_array_parameter() {
        let mut out = BytesMut::new();
        assert!(
            ValueHolder(vec![1i32, 2].as_value())
                .to_sql(&Type::INT4, &mut out)
                .is_err()
        );
    }
}
