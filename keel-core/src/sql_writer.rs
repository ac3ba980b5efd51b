use crate::{CommandError, Result, Value};
use std::fmt::Write;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($this:ident, $out:ident, $value:expr) => {{
        if $value.is_infinite() {
            $this.write_infinity($out, $value.is_sign_negative());
        } else if $value.is_nan() {
            $this.write_nan($out);
        } else {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format($value));
        }
    }};
}

/// Renders [`Value`]s as SQL literals.
///
/// The default methods produce ANSI-flavored output; providers override the
/// pieces where their dialect differs. JSON rendering has no base
/// implementation: without a provider override it is a
/// [`CommandError::ProviderGap`] failure, signaling an integration gap
/// rather than a data error.
pub trait LiteralWriter {
    /// Render a concrete value, dispatching to the per-category methods.
    fn write_value(&self, out: &mut String, value: &Value) -> Result<()> {
        match value {
            v if v.is_null() => self.write_null(out),
            Value::Boolean(Some(v)) => self.write_bool(out, *v),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(self, out, *v),
            Value::Float64(Some(v)) => write_float!(self, out, *v),
            Value::Decimal(Some(v), ..) => drop(write!(out, "{}", v)),
            Value::Varchar(Some(v)) => self.write_string(out, v),
            Value::Blob(Some(v)) => self.write_blob(out, v),
            Value::Date(Some(v)) => self.write_date(out, v),
            Value::Time(Some(v)) => self.write_time(out, v),
            Value::Timestamp(Some(v)) => self.write_timestamp(out, v),
            Value::TimestampWithTimezone(Some(v)) => self.write_timestamptz(out, v),
            Value::Uuid(Some(v)) => self.write_uuid(out, v),
            Value::Json(Some(v)) => return self.write_json(out, v),
            _ => log::error!("Cannot write {:?} as a literal", value),
        }
        Ok(())
    }

    /// Render NULL.
    fn write_null(&self, out: &mut String) {
        out.push_str("NULL");
    }

    fn write_bool(&self, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize]);
    }

    /// Render +/- infinity; ANSI has no literal so CAST from text.
    fn write_infinity(&self, out: &mut String, negative: bool) {
        out.push_str(if negative {
            "CAST('-Infinity' AS DOUBLE PRECISION)"
        } else {
            "CAST('Infinity' AS DOUBLE PRECISION)"
        });
    }

    fn write_nan(&self, out: &mut String) {
        out.push_str("CAST('NaN' AS DOUBLE PRECISION)");
    }

    /// Escape occurrences of `search` with `replace` while copying into the
    /// buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
    }

    /// Render a string literal, doubling inner single quotes.
    fn write_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(out, value, '\'', "''");
        out.push('\'');
    }

    /// Render a binary literal as uppercase hex.
    fn write_blob(&self, out: &mut String, value: &[u8]) {
        out.push_str("X'");
        out.push_str(&hex::encode_upper(value));
        out.push('\'');
    }

    fn write_date(&self, out: &mut String, value: &Date) {
        let _ = write!(
            out,
            "'{:04}-{:02}-{:02}'",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    fn write_time(&self, out: &mut String, value: &Time) {
        out.push('\'');
        self.write_time_inner(out, value);
        out.push('\'');
    }

    fn write_time_inner(&self, out: &mut String, value: &Time) {
        let mut subsecond = value.nanosecond();
        let mut width = 9;
        while width > 1 && subsecond % 10 == 0 {
            subsecond /= 10;
            width -= 1;
        }
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}.{:0width$}",
            value.hour(),
            value.minute(),
            value.second(),
            subsecond,
        );
    }

    fn write_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        let _ = write!(
            out,
            "'{:04}-{:02}-{:02} ",
            value.year(),
            value.month() as u8,
            value.day()
        );
        self.write_time_inner(out, &value.time());
        out.push('\'');
    }

    fn write_timestamptz(&self, out: &mut String, value: &OffsetDateTime) {
        let _ = write!(
            out,
            "'{:04}-{:02}-{:02} ",
            value.year(),
            value.month() as u8,
            value.day()
        );
        self.write_time_inner(out, &value.time());
        let offset = value.offset();
        let _ = write!(
            out,
            "{}{:02}:{:02}'",
            if offset.is_negative() { '-' } else { '+' },
            offset.whole_hours().unsigned_abs(),
            offset.minutes_past_hour().unsigned_abs(),
        );
    }

    fn write_uuid(&self, out: &mut String, value: &Uuid) {
        let _ = write!(out, "'{}'", value);
    }

    /// JSON literals are provider territory.
    fn write_json(&self, _out: &mut String, _value: &serde_json::Value) -> Result<()> {
        Err(CommandError::ProviderGap {
            feature: "JSON literal rendering",
        }
        .into())
    }
}

/// The plain ANSI renderer, made of nothing but the trait defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiLiteralWriter;

impl LiteralWriter for AnsiLiteralWriter {}
