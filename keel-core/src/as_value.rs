use crate::{Error, Result, Value};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::any;
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`]
/// representation that backs command parameters and row materialization.
///
/// Conversions are never silently lossy: a narrowing that would truncate or
/// overflow returns an error naming the offending value and the target type.
pub trait AsValue {
    /// A NULL-like value of this type's category, usable as a prototype.
    fn as_empty_value() -> Value;
    /// Wrap this value into its [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`, accepting
    /// alternate widths of the same family with a range check.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Blob(Some(value.into()))
    }
}

macro_rules! out_of_range {
    ($value:expr, $target:ty) => {
        Error::msg(format!(
            "Value {} is out of range for {}",
            $value,
            any::type_name::<$target>(),
        ))
    };
}

macro_rules! mismatch {
    ($value:expr, $target:ty) => {
        Error::msg(format!(
            "Cannot convert {} value into {}",
            $value.kind(),
            any::type_name::<$target>(),
        ))
    };
}

/// Integer conversion across widths, erroring instead of truncating.
fn narrow<S, T>(value: S) -> Result<T>
where
    T: TryFrom<S>,
    S: std::fmt::Display + Copy,
{
    T::try_from(value).map_err(|_| out_of_range!(value, T))
}

macro_rules! impl_integer_as_value {
    ($source:ty, $variant:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $variant(None)
            }
            fn as_value(self) -> Value {
                $variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                #[allow(unreachable_patterns)]
                match value {
                    $variant(Some(v)) => Ok(v),
                    Value::Int8(Some(v)) => narrow(v),
                    Value::Int16(Some(v)) => narrow(v),
                    Value::Int32(Some(v)) => narrow(v),
                    Value::Int64(Some(v)) => narrow(v),
                    Value::UInt8(Some(v)) => narrow(v),
                    Value::UInt16(Some(v)) => narrow(v),
                    Value::UInt32(Some(v)) => narrow(v),
                    Value::UInt64(Some(v)) => narrow(v),
                    v => Err(mismatch!(v, $source)),
                }
            }
        }
    };
}

impl_integer_as_value!(i8, Value::Int8);
impl_integer_as_value!(i16, Value::Int16);
impl_integer_as_value!(i32, Value::Int32);
impl_integer_as_value!(i64, Value::Int64);
impl_integer_as_value!(u8, Value::UInt8);
impl_integer_as_value!(u16, Value::UInt16);
impl_integer_as_value!(u32, Value::UInt32);
impl_integer_as_value!(u64, Value::UInt64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            Value::Int8(Some(v)) => Ok(v != 0),
            Value::Int16(Some(v)) => Ok(v != 0),
            Value::Int32(Some(v)) => Ok(v != 0),
            Value::Int64(Some(v)) => Ok(v != 0),
            Value::UInt8(Some(v)) => Ok(v != 0),
            Value::UInt16(Some(v)) => Ok(v != 0),
            Value::UInt32(Some(v)) => Ok(v != 0),
            Value::UInt64(Some(v)) => Ok(v != 0),
            v => Err(mismatch!(v, bool)),
        }
    }
}

impl AsValue for f32 {
    fn as_empty_value() -> Value {
        Value::Float32(None)
    }
    fn as_value(self) -> Value {
        Value::Float32(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float32(Some(v)) => Ok(v),
            Value::Float64(Some(v)) => {
                let narrowed = v as f32;
                if narrowed as f64 != v && v.is_finite() {
                    return Err(out_of_range!(v, f32));
                }
                Ok(narrowed)
            }
            v => Err(mismatch!(v, f32)),
        }
    }
}

impl AsValue for f64 {
    fn as_empty_value() -> Value {
        Value::Float64(None)
    }
    fn as_value(self) -> Value {
        Value::Float64(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(Some(v)) => Ok(v),
            Value::Float32(Some(v)) => Ok(v as f64),
            v => Err(mismatch!(v, f64)),
        }
    }
}

impl AsValue for Decimal {
    fn as_empty_value() -> Value {
        Value::Decimal(None, 0, 0)
    }
    fn as_value(self) -> Value {
        Value::Decimal(Some(self), 0, 0)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(Some(v), ..) => Ok(v),
            Value::Int8(Some(v)) => Ok(v.into()),
            Value::Int16(Some(v)) => Ok(v.into()),
            Value::Int32(Some(v)) => Ok(v.into()),
            Value::Int64(Some(v)) => Ok(v.into()),
            Value::UInt8(Some(v)) => Ok(v.into()),
            Value::UInt16(Some(v)) => Ok(v.into()),
            Value::UInt32(Some(v)) => Ok(v.into()),
            Value::UInt64(Some(v)) => Ok(v.into()),
            Value::Float32(Some(v)) => {
                Decimal::from_f32(v).ok_or_else(|| out_of_range!(v, Decimal))
            }
            Value::Float64(Some(v)) => {
                Decimal::from_f64(v).ok_or_else(|| out_of_range!(v, Decimal))
            }
            v => Err(mismatch!(v, Decimal)),
        }
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            v => Err(mismatch!(v, String)),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v),
            v => Err(mismatch!(v, Box<[u8]>)),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Box::<[u8]>::try_from_value(value).map(Into::into)
    }
}

impl AsValue for Uuid {
    fn as_empty_value() -> Value {
        Value::Uuid(None)
    }
    fn as_value(self) -> Value {
        Value::Uuid(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(Some(v)) => Ok(v),
            Value::Varchar(Some(v)) => Uuid::parse_str(&v)
                .map_err(|e| Error::msg(format!("Cannot parse `{v}` as a UUID: {e}"))),
            v => Err(mismatch!(v, Uuid)),
        }
    }
}

impl AsValue for serde_json::Value {
    fn as_empty_value() -> Value {
        Value::Json(None)
    }
    fn as_value(self) -> Value {
        Value::Json(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Json(Some(v)) => Ok(v),
            Value::Varchar(Some(v)) => serde_json::from_str(&v)
                .map_err(|e| Error::msg(format!("Cannot parse string as JSON: {e}"))),
            v => Err(mismatch!(v, serde_json::Value)),
        }
    }
}

macro_rules! impl_temporal_as_value {
    ($source:ty, $variant:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $variant(None)
            }
            fn as_value(self) -> Value {
                $variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $variant(Some(v)) => Ok(v),
                    v => Err(mismatch!(v, $source)),
                }
            }
        }
    };
}

impl_temporal_as_value!(time::Date, Value::Date);
impl_temporal_as_value!(time::Time, Value::Time);
impl_temporal_as_value!(time::PrimitiveDateTime, Value::Timestamp);
impl_temporal_as_value!(time::OffsetDateTime, Value::TimestampWithTimezone);

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
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
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
        T::try_from_value(value).map(Box::new)
    }
}

impl Value {
    /// Convert this value into the category described by `prototype`.
    ///
    /// Nulls propagate as the prototype's empty value. Same-category values
    /// pass through untouched; numeric values cross widths with a range
    /// check. Anything else is a conversion error.
    pub fn coerce_to(self, prototype: &Value) -> Result<Value> {
        if self.is_null() {
            return Ok(prototype.as_empty());
        }
        if self.same_type(prototype) {
            return Ok(self);
        }
        Ok(match prototype {
            Value::Boolean(..) => bool::try_from_value(self)?.as_value(),
            Value::Int8(..) => i8::try_from_value(self)?.as_value(),
            Value::Int16(..) => i16::try_from_value(self)?.as_value(),
            Value::Int32(..) => i32::try_from_value(self)?.as_value(),
            Value::Int64(..) => i64::try_from_value(self)?.as_value(),
            Value::UInt8(..) => u8::try_from_value(self)?.as_value(),
            Value::UInt16(..) => u16::try_from_value(self)?.as_value(),
            Value::UInt32(..) => u32::try_from_value(self)?.as_value(),
            Value::UInt64(..) => u64::try_from_value(self)?.as_value(),
            Value::Float32(..) => f32::try_from_value(self)?.as_value(),
            Value::Float64(..) => f64::try_from_value(self)?.as_value(),
            Value::Decimal(.., prec, scale) => {
                Value::Decimal(Some(Decimal::try_from_value(self)?), *prec, *scale)
            }
            Value::Varchar(..) => String::try_from_value(self)?.as_value(),
            Value::Blob(..) => Box::<[u8]>::try_from_value(self)?.as_value(),
            Value::Date(..) => time::Date::try_from_value(self)?.as_value(),
            Value::Time(..) => time::Time::try_from_value(self)?.as_value(),
            Value::Timestamp(..) => time::PrimitiveDateTime::try_from_value(self)?.as_value(),
            Value::TimestampWithTimezone(..) => {
                time::OffsetDateTime::try_from_value(self)?.as_value()
            }
            Value::Uuid(..) => Uuid::try_from_value(self)?.as_value(),
            Value::Json(..) => serde_json::Value::try_from_value(self)?.as_value(),
            Value::Null => {
                return Err(Error::msg(format!(
                    "Cannot coerce a {} value to the null category",
                    self.kind(),
                )));
            }
        })
    }
}
