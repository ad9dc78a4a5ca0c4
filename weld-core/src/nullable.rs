use time::{OffsetDateTime, PrimitiveDateTime, macros::datetime};

/// `None` when `value` is the default of its type, so that zero values are
/// stored as NULL.
pub fn zero_as_null<T: Default + PartialEq>(value: T) -> Option<T> {
    if value == T::default() {
        None
    } else {
        Some(value)
    }
}

pub fn null_bool(value: bool) -> Option<bool> {
    zero_as_null(value)
}

pub fn null_string(value: impl Into<String>) -> Option<String> {
    zero_as_null(value.into())
}

pub fn null_int(value: i64) -> Option<i64> {
    zero_as_null(value)
}

pub fn null_i16(value: i16) -> Option<i16> {
    zero_as_null(value)
}

pub fn null_i32(value: i32) -> Option<i32> {
    zero_as_null(value)
}

pub fn null_i64(value: i64) -> Option<i64> {
    zero_as_null(value)
}

pub fn null_f64(value: f64) -> Option<f64> {
    zero_as_null(value)
}

pub fn null_u8(value: u8) -> Option<u8> {
    zero_as_null(value)
}

/// `None` for the zero instant, `0001-01-01 00:00:00 UTC`.
pub fn null_time(value: OffsetDateTime) -> Option<OffsetDateTime> {
    (value != datetime!(0001-01-01 0:00 UTC)).then_some(value)
}

/// `None` for `0001-01-01 00:00:00`.
pub fn null_timestamp(value: PrimitiveDateTime) -> Option<PrimitiveDateTime> {
    (value != datetime!(0001-01-01 0:00)).then_some(value)
}
