use keel_core::{MappingProfile, Value};

/// SQL Server store type profile: wide (`n`-prefixed) and narrow text types
/// with their 4000/8000 bounded capacities, 450/900 byte key-safe lengths,
/// and the 8 byte `rowversion` concurrency token.
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDialect;

impl MssqlDialect {
    pub const fn new() -> Self {
        Self {}
    }
}

impl MappingProfile for MssqlDialect {
    fn text_type(&self, unicode: bool, fixed: bool) -> &'static str {
        match (unicode, fixed) {
            (true, false) => "nvarchar",
            (true, true) => "nchar",
            (false, false) => "varchar",
            (false, true) => "char",
        }
    }

    fn unbounded_text_type(&self, unicode: bool) -> &'static str {
        if unicode { "nvarchar(max)" } else { "varchar(max)" }
    }

    fn text_capacity(&self, unicode: bool) -> usize {
        if unicode { 4000 } else { 8000 }
    }

    fn key_text_length(&self, unicode: bool) -> usize {
        // Key columns must fit in a 900 byte index entry; unicode characters
        // take two bytes each.
        if unicode { 450 } else { 900 }
    }

    fn binary_type(&self, fixed: bool) -> &'static str {
        if fixed { "binary" } else { "varbinary" }
    }

    fn unbounded_binary_type(&self) -> &'static str {
        "varbinary(max)"
    }

    fn binary_capacity(&self) -> usize {
        8000
    }

    fn key_binary_length(&self) -> usize {
        900
    }

    fn row_version_type(&self) -> &'static str {
        "rowversion"
    }

    fn row_version_width(&self) -> usize {
        8
    }

    fn simple_type(&self, category: &Value) -> Option<&'static str> {
        Some(match category {
            Value::Boolean(..) => "bit",
            Value::Int8(..) => "smallint",
            Value::Int16(..) => "smallint",
            Value::Int32(..) => "int",
            Value::Int64(..) => "bigint",
            Value::UInt8(..) => "tinyint",
            Value::UInt16(..) => "int",
            Value::UInt32(..) => "bigint",
            Value::UInt64(..) => "decimal(20,0)",
            Value::Float32(..) => "real",
            Value::Float64(..) => "float",
            Value::Date(..) => "date",
            Value::Time(..) => "time",
            Value::Timestamp(..) => "datetime2",
            Value::TimestampWithTimezone(..) => "datetimeoffset",
            Value::Uuid(..) => "uniqueidentifier",
            Value::Json(..) => "nvarchar(max)",
            _ => return None,
        })
    }
}
