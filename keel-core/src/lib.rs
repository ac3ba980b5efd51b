mod as_value;
mod buffer;
mod command;
mod db;
mod error;
mod mapping_source;
mod name_generator;
mod parameter;
mod raw_sql;
mod schema;
mod sql_writer;
mod transaction;
mod type_mapping;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use buffer::*;
pub use command::*;
pub use db::*;
pub use error::*;
pub use mapping_source::*;
pub use name_generator::*;
pub use parameter::*;
pub use raw_sql::*;
pub use schema::*;
pub use sql_writer::*;
pub use transaction::*;
pub use type_mapping::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
