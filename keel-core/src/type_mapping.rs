use crate::{CommandError, DbParameter, DbType, LiteralWriter, Result, Value};

/// Configuration bundle used to construct a [`TypeMapping`]. Passed by
/// value, never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMappingParameters {
    pub store_type: String,
    pub category: Value,
    pub db_type: Option<DbType>,
    pub size: Option<usize>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    pub unicode: bool,
    pub fixed_length: bool,
}

impl TypeMappingParameters {
    pub fn new(store_type: impl Into<String>, category: Value) -> Self {
        Self {
            store_type: store_type.into(),
            category,
            db_type: None,
            size: None,
            precision: None,
            scale: None,
            unicode: false,
            fixed_length: false,
        }
    }

    pub fn with_db_type(mut self, db_type: DbType) -> Self {
        self.db_type = Some(db_type);
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_precision_scale(mut self, precision: u8, scale: u8) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    pub fn fixed_length(mut self, fixed_length: bool) -> Self {
        self.fixed_length = fixed_length;
        self
    }
}

/// Immutable descriptor binding an application value category to a database
/// storage type, with the rules for bridging to the driver's parameter and
/// reader primitives.
///
/// A mapping instance holds no mutable state and is safe to share across any
/// number of concurrent commands, typically behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMapping {
    store_type: String,
    category: Value,
    db_type: Option<DbType>,
    size: Option<usize>,
    precision: Option<u8>,
    scale: Option<u8>,
    unicode: bool,
    fixed_length: bool,
}

impl TypeMapping {
    pub fn new(parameters: TypeMappingParameters) -> Result<Self> {
        if parameters.store_type.is_empty() {
            return Err(CommandError::EmptyStoreType.into());
        }
        Ok(Self {
            store_type: parameters.store_type,
            category: parameters.category.as_empty(),
            db_type: parameters.db_type,
            size: parameters.size,
            precision: parameters.precision,
            scale: parameters.scale,
            unicode: parameters.unicode,
            fixed_length: parameters.fixed_length,
        })
    }

    pub fn store_type(&self) -> &str {
        &self.store_type
    }

    /// The category prototype this mapping binds (payload-less [`Value`]).
    pub fn category(&self) -> &Value {
        &self.category
    }

    pub fn db_type(&self) -> Option<DbType> {
        self.db_type
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn precision(&self) -> Option<u8> {
        self.precision
    }

    pub fn scale(&self) -> Option<u8> {
        self.scale
    }

    pub fn is_unicode(&self) -> bool {
        self.unicode
    }

    pub fn is_fixed_length(&self) -> bool {
        self.fixed_length
    }

    /// Build a driver parameter carrying `value` coerced into this mapping's
    /// category. An absent value binds the database null of the category.
    ///
    /// A bound size is dropped when the value outgrows it, falling back to
    /// the unbounded form rather than truncating.
    pub fn create_db_parameter(&self, name: impl Into<String>, value: Option<&Value>) -> Result<DbParameter> {
        let value = match value {
            None => self.category.as_empty(),
            Some(v) => v.clone().coerce_to(&self.category)?,
        };
        let size = match (self.size, &value) {
            (Some(limit), Value::Varchar(Some(v))) if v.chars().count() > limit => None,
            (Some(limit), Value::Blob(Some(v))) if v.len() > limit => None,
            (size, _) => size,
        };
        Ok(DbParameter {
            name: name.into(),
            value,
            db_type: self.db_type,
            size,
            precision: self.precision,
            scale: self.scale,
        })
    }

    /// Render `value` as a literal of this mapping's category through the
    /// given writer.
    pub fn write_literal(
        &self,
        writer: &dyn LiteralWriter,
        out: &mut String,
        value: &Value,
    ) -> Result<()> {
        let value = value.clone().coerce_to(&self.category)?;
        writer.write_value(out, &value)
    }
}
