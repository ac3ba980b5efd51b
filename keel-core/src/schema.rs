use crate::Result;
use std::future::{self, Future};

/// Existence/create/delete operations for the database-level schema,
/// implemented by provider crates and consumed by higher layers.
///
/// The async variants are cancelled by dropping the returned future;
/// implementations must leave the schema either fully created/deleted or
/// unchanged when that happens. Create and delete are idempotent at the
/// contract level: implementations decide whether re-creating an existing
/// schema is a no-op or an error, but must document it.
pub trait SchemaCreator {
    fn exists(&self) -> Result<bool>;
    fn create(&mut self) -> Result<()>;
    fn delete(&mut self) -> Result<()>;

    fn exists_async(&self) -> impl Future<Output = Result<bool>> + Send {
        future::ready(self.exists())
    }

    fn delete_async(&mut self) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.delete())
    }
}
