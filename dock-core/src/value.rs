use rust_decimal::{Decimal, prelude::ToPrimitive};
use time::{Date, PrimitiveDateTime, Time};

/// A single column value, either bound as a query parameter or read back from a row.
///
/// Every variant carries an `Option` so that a typed `NULL` can still be bound with the
/// right parameter type.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Varchar(Some(v)) => Some(v),
            _ => None,
        }
    }

    /// Integer view of the value, accepting integral text as drivers often return it.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int16(Some(v)) => Some(*v as i64),
            Value::Int32(Some(v)) => Some(*v as i64),
            Value::Int64(Some(v)) => Some(*v),
            Value::Decimal(Some(v)) if v.fract().is_zero() => v.to_i64(),
            Value::Varchar(Some(v)) => v.trim().parse().ok(),
            _ => None,
        }
    }

    /// Numeric view of the value; `None` for nulls and non-numeric text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int16(Some(v)) => Some(*v as f64),
            Value::Int32(Some(v)) => Some(*v as f64),
            Value::Int64(Some(v)) => Some(*v as f64),
            Value::Float32(Some(v)) => Some(*v as f64),
            Value::Float64(Some(v)) => Some(*v),
            Value::Decimal(Some(v)) => v.to_f64(),
            Value::Varchar(Some(v)) => v.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

macro_rules! impl_from_value {
    ($source:ty, $variant:ident) => {
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                Value::$variant(Some(value.into()))
            }
        }
        impl From<Option<$source>> for Value {
            fn from(value: Option<$source>) -> Self {
                Value::$variant(value.map(Into::into))
            }
        }
    };
}

impl_from_value!(bool, Boolean);
impl_from_value!(i16, Int16);
impl_from_value!(i32, Int32);
impl_from_value!(i64, Int64);
impl_from_value!(f32, Float32);
impl_from_value!(f64, Float64);
impl_from_value!(Decimal, Decimal);
impl_from_value!(String, Varchar);
impl_from_value!(&str, Varchar);
impl_from_value!(Vec<u8>, Blob);
impl_from_value!(&[u8], Blob);
impl_from_value!(Date, Date);
impl_from_value!(Time, Time);
impl_from_value!(PrimitiveDateTime, Timestamp);
