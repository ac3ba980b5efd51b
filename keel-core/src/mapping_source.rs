use crate::{CommandError, DbType, Result, TypeMapping, TypeMappingParameters, Value};
use std::{fmt::Write, sync::Arc};

/// Constraint metadata accompanying a value category when a mapping is
/// requested: the semantic shape of a property as the caller knows it.
#[derive(Debug, Clone, Default)]
pub struct MappingHints {
    /// Category prototype (payload-less [`Value`]).
    pub category: Value,
    /// Explicit user-configured store type; wins unconditionally.
    pub store_type: Option<String>,
    /// Declared maximum length for text/binary categories.
    pub size: Option<usize>,
    /// `None` defers to the provider default.
    pub unicode: Option<bool>,
    pub fixed_length: Option<bool>,
    /// The property participates in a key or index.
    pub key_or_index: bool,
    /// The property is an optimistic-concurrency row version.
    pub row_version: bool,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
}

impl MappingHints {
    pub fn for_category(category: Value) -> Self {
        Self {
            category,
            ..Default::default()
        }
    }
}

/// Resolves the [`TypeMapping`] for a value category plus constraints.
///
/// Implementations are process-wide singletons: no session state, safe for
/// concurrent invocation. Resolution is deterministic — identical hints
/// always produce a mapping with the same store type.
pub trait TypeMappingSource: Send + Sync {
    fn resolve(&self, hints: &MappingHints) -> Result<Arc<TypeMapping>>;
}

/// Provider seam feeding [`RelationalTypeMappingSource`] the store type
/// names, bounded-type thresholds and canonical widths of one database.
pub trait MappingProfile: Send + Sync {
    /// Whether string properties are unicode when the caller does not say.
    fn default_unicode(&self) -> bool {
        true
    }
    /// Base name of the text type, e.g. `nvarchar`/`varchar`/`nchar`/`char`.
    fn text_type(&self, unicode: bool, fixed: bool) -> &'static str;
    /// Spelling of the unbounded text type, e.g. `nvarchar(max)` or `text`.
    fn unbounded_text_type(&self, unicode: bool) -> &'static str;
    /// Largest length the bounded text type supports.
    fn text_capacity(&self, unicode: bool) -> usize;
    /// Length used for key/index text columns declared without one.
    fn key_text_length(&self, unicode: bool) -> usize;
    /// Base name of the binary type, e.g. `varbinary`/`binary`.
    fn binary_type(&self, fixed: bool) -> &'static str;
    fn unbounded_binary_type(&self) -> &'static str;
    fn binary_capacity(&self) -> usize;
    fn key_binary_length(&self) -> usize;
    /// Store type of the optimistic-concurrency token.
    fn row_version_type(&self) -> &'static str;
    /// Canonical row-version width in bytes.
    fn row_version_width(&self) -> usize;
    fn default_decimal_precision_scale(&self) -> (u8, u8) {
        (18, 2)
    }
    fn decimal_type(&self, precision: u8, scale: u8) -> String {
        format!("decimal({precision},{scale})")
    }
    /// Store type for categories with no length/precision facets; `None`
    /// marks the category unsupported by this provider.
    fn simple_type(&self, category: &Value) -> Option<&'static str>;
}

/// The unified mapping source: resolves every category through one provider
/// profile with the precedence described on [`resolve`](TypeMappingSource::resolve).
#[derive(Debug, Clone)]
pub struct RelationalTypeMappingSource<P: MappingProfile> {
    profile: P,
}

impl<P: MappingProfile> RelationalTypeMappingSource<P> {
    pub fn new(profile: P) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &P {
        &self.profile
    }
}

impl<P: MappingProfile> TypeMappingSource for RelationalTypeMappingSource<P> {
    fn resolve(&self, hints: &MappingHints) -> Result<Arc<TypeMapping>> {
        if let Some(store_type) = &hints.store_type {
            let parameters = TypeMappingParameters {
                store_type: store_type.clone(),
                category: hints.category.as_empty(),
                db_type: db_type_for(&hints.category, hints.unicode, hints.fixed_length),
                size: hints.size,
                precision: hints.precision,
                scale: hints.scale,
                unicode: hints.unicode.unwrap_or(false),
                fixed_length: hints.fixed_length.unwrap_or(false),
            };
            return Ok(Arc::new(TypeMapping::new(parameters)?));
        }
        match &hints.category {
            Value::Varchar(..) => resolve_string(&self.profile, hints).map(Arc::new),
            Value::Blob(..) => resolve_binary(&self.profile, hints).map(Arc::new),
            Value::Decimal(..) => {
                let (default_precision, default_scale) =
                    self.profile.default_decimal_precision_scale();
                let precision = hints.precision.unwrap_or(default_precision);
                let scale = hints.scale.unwrap_or(default_scale);
                let parameters = TypeMappingParameters::new(
                    self.profile.decimal_type(precision, scale),
                    Value::Decimal(None, precision, scale),
                )
                .with_db_type(DbType::Decimal)
                .with_precision_scale(precision, scale);
                Ok(Arc::new(TypeMapping::new(parameters)?))
            }
            category => {
                let store_type = self.profile.simple_type(category).ok_or(
                    CommandError::UnsupportedType {
                        category: category.kind(),
                    },
                )?;
                let parameters = TypeMappingParameters::new(store_type, category.as_empty())
                    .with_db_type(
                        db_type_for(category, hints.unicode, hints.fixed_length).ok_or(
                            CommandError::UnsupportedType {
                                category: category.kind(),
                            },
                        )?,
                    );
                Ok(Arc::new(TypeMapping::new(parameters)?))
            }
        }
    }
}

/// String resolution shared between the unified source and the legacy
/// string-only mapper so the two cannot drift apart.
fn resolve_string<P: MappingProfile>(profile: &P, hints: &MappingHints) -> Result<TypeMapping> {
    let unicode = hints.unicode.unwrap_or(profile.default_unicode());
    let capacity = profile.text_capacity(unicode);
    // Fixed length needs an explicit size to pad to.
    let fixed = hints.fixed_length.unwrap_or(false) && hints.size.is_some();
    let size = hints
        .size
        .or_else(|| hints.key_or_index.then(|| profile.key_text_length(unicode)));
    let db_type = match (unicode, fixed) {
        (true, false) => DbType::String,
        (true, true) => DbType::StringFixedLength,
        (false, false) => DbType::AnsiString,
        (false, true) => DbType::AnsiStringFixedLength,
    };
    let parameters = match size {
        Some(n) if n <= capacity => {
            let mut store_type = String::from(profile.text_type(unicode, fixed));
            let _ = write!(store_type, "({n})");
            TypeMappingParameters::new(store_type, Value::Varchar(None))
                .with_db_type(db_type)
                .with_size(n)
                .unicode(unicode)
                .fixed_length(fixed)
        }
        // Over capacity, or no declared length: unbounded, size facet dropped.
        _ => TypeMappingParameters::new(profile.unbounded_text_type(unicode), Value::Varchar(None))
            .with_db_type(if unicode {
                DbType::String
            } else {
                DbType::AnsiString
            })
            .unicode(unicode),
    };
    TypeMapping::new(parameters)
}

/// Byte-array resolution shared with the legacy byte-array-only mapper.
fn resolve_binary<P: MappingProfile>(profile: &P, hints: &MappingHints) -> Result<TypeMapping> {
    if hints.row_version {
        // Row versions have the provider's canonical width no matter what
        // length was declared.
        let parameters =
            TypeMappingParameters::new(profile.row_version_type(), Value::Blob(None))
                .with_db_type(DbType::Binary)
                .with_size(profile.row_version_width());
        return TypeMapping::new(parameters);
    }
    let fixed = hints.fixed_length.unwrap_or(false) && hints.size.is_some();
    // Key and index columns declared without a length get the provider's
    // key length instead of the unbounded type.
    let size = hints
        .size
        .or_else(|| hints.key_or_index.then(|| profile.key_binary_length()));
    let parameters = match size {
        Some(n) if n <= profile.binary_capacity() => {
            let mut store_type = String::from(profile.binary_type(fixed));
            let _ = write!(store_type, "({n})");
            TypeMappingParameters::new(store_type, Value::Blob(None))
                .with_db_type(DbType::Binary)
                .with_size(n)
                .fixed_length(fixed)
        }
        _ => TypeMappingParameters::new(profile.unbounded_binary_type(), Value::Blob(None))
            .with_db_type(DbType::Binary),
    };
    TypeMapping::new(parameters)
}

fn db_type_for(
    category: &Value,
    unicode: Option<bool>,
    fixed_length: Option<bool>,
) -> Option<DbType> {
    Some(match category {
        Value::Boolean(..) => DbType::Boolean,
        Value::Int8(..) => DbType::Int8,
        Value::Int16(..) => DbType::Int16,
        Value::Int32(..) => DbType::Int32,
        Value::Int64(..) => DbType::Int64,
        Value::UInt8(..) => DbType::UInt8,
        Value::UInt16(..) => DbType::UInt16,
        Value::UInt32(..) => DbType::UInt32,
        Value::UInt64(..) => DbType::UInt64,
        Value::Float32(..) => DbType::Float32,
        Value::Float64(..) => DbType::Float64,
        Value::Decimal(..) => DbType::Decimal,
        Value::Varchar(..) => match (unicode.unwrap_or(true), fixed_length.unwrap_or(false)) {
            (true, false) => DbType::String,
            (true, true) => DbType::StringFixedLength,
            (false, false) => DbType::AnsiString,
            (false, true) => DbType::AnsiStringFixedLength,
        },
        Value::Blob(..) => DbType::Binary,
        Value::Date(..) => DbType::Date,
        Value::Time(..) => DbType::Time,
        Value::Timestamp(..) => DbType::DateTime,
        Value::TimestampWithTimezone(..) => DbType::DateTimeOffset,
        Value::Uuid(..) => DbType::Guid,
        Value::Json(..) => DbType::Json,
        Value::Null => return None,
    })
}

/// String-only resolver kept for compatibility; delegates to the same rules
/// as [`RelationalTypeMappingSource`].
#[deprecated(note = "use RelationalTypeMappingSource, which covers every category")]
#[derive(Debug, Clone)]
pub struct StringTypeMapper<P: MappingProfile> {
    profile: P,
}

#[allow(deprecated)]
impl<P: MappingProfile> StringTypeMapper<P> {
    pub fn new(profile: P) -> Self {
        Self { profile }
    }

    pub fn map(&self, hints: &MappingHints) -> Result<Arc<TypeMapping>> {
        resolve_string(&self.profile, hints).map(Arc::new)
    }
}

/// Byte-array-only resolver kept for compatibility; delegates to the same
/// rules as [`RelationalTypeMappingSource`].
#[deprecated(note = "use RelationalTypeMappingSource, which covers every category")]
#[derive(Debug, Clone)]
pub struct ByteArrayTypeMapper<P: MappingProfile> {
    profile: P,
}

#[allow(deprecated)]
impl<P: MappingProfile> ByteArrayTypeMapper<P> {
    pub fn new(profile: P) -> Self {
        Self { profile }
    }

    pub fn map(&self, hints: &MappingHints) -> Result<Arc<TypeMapping>> {
        resolve_binary(&self.profile, hints).map(Arc::new)
    }
}
