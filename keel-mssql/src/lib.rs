mod dialect;
mod sql_writer;

pub use dialect::*;
pub use sql_writer::*;

use keel_core::RelationalTypeMappingSource;

/// The unified mapping source configured for SQL Server.
pub fn type_mapping_source() -> RelationalTypeMappingSource<MssqlDialect> {
    RelationalTypeMappingSource::new(MssqlDialect::new())
}
