use keel_core::{AsValue, Value};
use rust_decimal::Decimal;
use time::macros::{date, datetime, time};
use uuid::Uuid;

#[test]
fn value_null() {
    assert_eq!(Value::Null, Value::Null);
    assert!(Value::Null.is_null());
    assert!(Value::Int32(None).is_null());
    assert!(!Value::Int32(Some(0)).is_null());
    assert_ne!(Value::Float32(Some(1.0)), Value::Null);
}

#[test]
fn value_bool() {
    let val: Value = true.into();
    assert_eq!(val, Value::Boolean(Some(true)));
    assert_ne!(val, Value::Boolean(Some(false)));
    assert_ne!(val, Value::Boolean(None));
    assert_ne!(val, Value::Varchar(Some("true".into())));
    let var: bool = AsValue::try_from_value(val).unwrap();
    assert!(var);
    assert!(bool::try_from_value(1i8.into()).unwrap());
    assert!(bool::try_from_value(8i16.into()).unwrap());
    assert!(!bool::try_from_value(0i32.into()).unwrap());
    assert!(!bool::try_from_value(0u64.into()).unwrap());
    assert!(bool::try_from_value(2u8.into()).unwrap());
    assert!(bool::try_from_value(0.5f32.into()).is_err());
}

#[test]
fn value_integers_widen() {
    assert_eq!(i64::try_from_value(127i8.into()).unwrap(), 127);
    assert_eq!(i32::try_from_value(99u8.into()).unwrap(), 99);
    assert_eq!(u64::try_from_value(42i32.into()).unwrap(), 42);
    assert_eq!(i16::try_from_value(1000i32.into()).unwrap(), 1000);
}

#[test]
fn value_integers_narrow_with_range_check() {
    assert_eq!(i8::try_from_value(127i32.into()).unwrap(), 127);
    assert!(i8::try_from_value(128i32.into()).is_err());
    assert!(u8::try_from_value((-1i32).into()).is_err());
    assert!(u32::try_from_value((-5i64).into()).is_err());
    assert!(i32::try_from_value(u64::MAX.into()).is_err());
    assert!(i64::try_from_value(0.1f64.into()).is_err());
}

#[test]
fn value_floats() {
    let val: Value = 1.5f32.into();
    assert_eq!(val, Value::Float32(Some(1.5)));
    assert_eq!(f64::try_from_value(val).unwrap(), 1.5);
    assert_eq!(f32::try_from_value(2.25f64.into()).unwrap(), 2.25);
    assert!(f32::try_from_value(1e300f64.into()).is_err());
    assert!(f32::try_from_value(7i32.into()).is_err());
}

#[test]
fn value_decimal() {
    let var = Decimal::new(12345, 2);
    let val: Value = var.into();
    assert_eq!(val, Value::Decimal(Some(var), 0, 0));
    assert_eq!(Decimal::try_from_value(val).unwrap(), var);
    assert_eq!(
        Decimal::try_from_value(10i32.into()).unwrap(),
        Decimal::from(10)
    );
    assert_eq!(
        Decimal::try_from_value(0.5f64.into()).unwrap(),
        Decimal::new(5, 1)
    );
    assert!(Decimal::try_from_value(f64::NAN.into()).is_err());
}

#[test]
fn value_string() {
    let val: Value = "hello".into();
    assert_eq!(val, Value::Varchar(Some("hello".into())));
    assert_eq!(String::try_from_value(val).unwrap(), "hello");
    assert!(String::try_from_value(1i32.into()).is_err());
}

#[test]
fn value_blob() {
    let var: Vec<u8> = vec![1, 2, 3];
    let val: Value = var.clone().into();
    assert_eq!(val, Value::Blob(Some(vec![1, 2, 3].into())));
    assert_eq!(Vec::<u8>::try_from_value(val).unwrap(), var);
    assert!(Vec::<u8>::try_from_value("abc".into()).is_err());
}

#[test]
fn value_temporal() {
    let d = date!(2024 - 02 - 29);
    assert_eq!(time::Date::try_from_value(d.into()).unwrap(), d);
    let t = time!(23:59:58.5);
    assert_eq!(time::Time::try_from_value(t.into()).unwrap(), t);
    let ts = datetime!(2024-02-29 12:00:00);
    assert_eq!(
        time::PrimitiveDateTime::try_from_value(ts.into()).unwrap(),
        ts
    );
    assert!(time::Date::try_from_value(t.into()).is_err());
}

#[test]
fn value_uuid() {
    let var = Uuid::new_v4();
    let val: Value = var.into();
    assert_eq!(Uuid::try_from_value(val).unwrap(), var);
    assert_eq!(
        Uuid::try_from_value(var.to_string().into()).unwrap(),
        var
    );
    assert!(Uuid::try_from_value("not a uuid".into()).is_err());
}

#[test]
fn value_json() {
    let var = serde_json::json!({"a": [1, 2], "b": "x"});
    let val: Value = var.clone().into();
    assert_eq!(val, Value::Json(Some(var.clone())));
    assert_eq!(serde_json::Value::try_from_value(val).unwrap(), var);
    assert_eq!(
        serde_json::Value::try_from_value(r#"{"a":1}"#.into()).unwrap(),
        serde_json::json!({"a": 1})
    );
    assert!(serde_json::Value::try_from_value("{oops".into()).is_err());
}

#[test]
fn value_option() {
    let val = Option::<i32>::None.as_value();
    assert_eq!(val, Value::Int32(None));
    assert_eq!(Option::<i32>::try_from_value(val).unwrap(), None);
    assert_eq!(
        Option::<i32>::try_from_value(5i32.into()).unwrap(),
        Some(5)
    );
}

#[test]
fn coerce_null_propagates() {
    let coerced = Value::Null.coerce_to(&Value::Varchar(None)).unwrap();
    assert_eq!(coerced, Value::Varchar(None));
    let coerced = Value::Int32(None).coerce_to(&Value::Int64(None)).unwrap();
    assert_eq!(coerced, Value::Int64(None));
}

#[test]
fn coerce_same_type_passes_through() {
    let coerced = Value::Int32(Some(7)).coerce_to(&Value::Int32(None)).unwrap();
    assert_eq!(coerced, Value::Int32(Some(7)));
}

#[test]
fn coerce_crosses_numeric_widths() {
    let coerced = Value::Int8(Some(4)).coerce_to(&Value::Int64(None)).unwrap();
    assert_eq!(coerced, Value::Int64(Some(4)));
    assert!(
        Value::Int64(Some(i64::MAX))
            .coerce_to(&Value::Int16(None))
            .is_err()
    );
    assert!(
        Value::Varchar(Some("x".into()))
            .coerce_to(&Value::Int32(None))
            .is_err()
    );
}
