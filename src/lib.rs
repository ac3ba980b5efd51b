//! Keel builds reusable, parameterized relational commands and translates
//! between application values and database column types in both directions.
//!
//! This facade re-exports the whole of `keel-core`. Providers such as
//! `keel-mssql` plug their own store type names, thresholds and literal
//! syntax into the core's protocol.

pub use keel_core::*;
