use crate::{CommandError, Result, Value};
use std::{
    collections::HashMap,
    fmt::Write,
    sync::{Arc, RwLock},
};

/// Immutable, ordered, typed materialization of one result row.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBuffer {
    values: Box<[Value]>,
}

impl ValueBuffer {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Box<[Value]> {
        self.values
    }
}

/// The ordered list of expected column categories a buffer factory is bound
/// to. Cheap to clone; identity is the ordered sequence of categories.
#[derive(Debug, Clone)]
pub struct ResultShape {
    columns: Arc<[Value]>,
}

impl ResultShape {
    pub fn new(columns: impl IntoIterator<Item = Value>) -> Self {
        Self {
            columns: columns.into_iter().map(|c| c.as_empty()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Value] {
        &self.columns
    }

    /// Stable identity of this shape, used as the factory cache key.
    pub fn cache_key(&self) -> String {
        let mut key = String::new();
        for column in self.columns.iter() {
            if !key.is_empty() {
                key.push(',');
            }
            key.push_str(column.kind());
            if let Value::Decimal(.., prec, scale) = column {
                let _ = write!(key, "({prec},{scale})");
            }
        }
        key
    }
}

/// Materializes raw driver rows into typed [`ValueBuffer`]s for exactly one
/// result shape.
///
/// Reads only the positions the shape declares and never substitutes a
/// default for a mismatched column: a mismatch is a materialization failure
/// naming the offending position and the expected vs. actual category.
#[derive(Debug, Clone)]
pub struct TypedValueBufferFactory {
    shape: ResultShape,
}

impl TypedValueBufferFactory {
    pub fn new(shape: ResultShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> &ResultShape {
        &self.shape
    }

    pub fn create(&self, row: &[Value]) -> Result<ValueBuffer> {
        if row.len() < self.shape.len() {
            return Err(CommandError::RowWidthMismatch {
                expected: self.shape.len(),
                actual: row.len(),
            }
            .into());
        }
        let mut values = Vec::with_capacity(self.shape.len());
        for (position, prototype) in self.shape.columns().iter().enumerate() {
            let raw = &row[position];
            let value = raw.clone().coerce_to(prototype).map_err(|_| {
                CommandError::Materialization {
                    position,
                    expected: prototype.kind(),
                    actual: raw.kind().to_string(),
                }
            })?;
            values.push(value);
        }
        Ok(ValueBuffer {
            values: values.into(),
        })
    }
}

/// Factory-of-factories: hands out one cached [`TypedValueBufferFactory`]
/// per distinct result shape.
///
/// Population is race-safe; a concurrent first request for the same shape
/// may build twice, but callers always observe a factory with identical
/// extraction behavior.
#[derive(Debug, Default)]
pub struct ValueBufferFactorySource {
    factories: RwLock<HashMap<String, Arc<TypedValueBufferFactory>>>,
}

impl ValueBufferFactorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_factory(&self, shape: &ResultShape) -> Arc<TypedValueBufferFactory> {
        let key = shape.cache_key();
        if let Some(factory) = self
            .factories
            .read()
            .expect("factory cache lock poisoned")
            .get(&key)
        {
            return factory.clone();
        }
        let mut factories = self.factories.write().expect("factory cache lock poisoned");
        factories
            .entry(key)
            .or_insert_with(|| Arc::new(TypedValueBufferFactory::new(shape.clone())))
            .clone()
    }
}
