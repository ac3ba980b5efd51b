use thiserror::Error;

/// Classified failures raised while building commands, resolving type
/// mappings, or materializing rows.
///
/// All variants are local, synchronous failures surfaced to the immediate
/// caller, wrapped into the crate-wide [`anyhow`] error. Callers that need
/// the classification downcast with [`anyhow::Error::downcast_ref`].
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandError {
    /// No type mapping could be resolved for a value category.
    #[error("no type mapping could be resolved for the {category} category")]
    UnsupportedType { category: &'static str },

    /// A named parameter was absent from the supplied value map.
    #[error("missing value for required parameter `{name}`")]
    MissingParameterValue { name: String },

    /// Positional placeholder count does not match the supplied values.
    #[error("query text has {placeholders} placeholder(s) but {values} value(s) were supplied")]
    PlaceholderCountMismatch { placeholders: usize, values: usize },

    /// A relational-only operation was requested while the active store does
    /// not expose relational features.
    #[error("relational features are not in use for the active transaction")]
    RelationalNotInUse,

    /// Functionality intentionally left to the provider.
    #[error("{feature} must be implemented by the provider")]
    ProviderGap { feature: &'static str },

    /// A fetched row does not match the result shape its factory was built
    /// for.
    #[error("column {position}: expected a {expected} value, found {actual}")]
    Materialization {
        position: usize,
        expected: &'static str,
        actual: String,
    },

    /// The fetched row is narrower than the declared result shape.
    #[error("row has {actual} column(s) but the result shape declares {expected}")]
    RowWidthMismatch { expected: usize, actual: usize },

    /// A type mapping was configured without a store type name.
    #[error("a type mapping requires a non-empty store type name")]
    EmptyStoreType,
}
