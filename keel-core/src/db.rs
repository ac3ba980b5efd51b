use crate::Value;
use std::fmt::Debug;

/// Wire-level tag describing how a parameter or column travels to the
/// driver, mirroring the distinctions providers care about (unicode vs
/// narrow text, fixed vs variable length) that the dynamic [`Value`]
/// representation alone does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal,
    String,
    StringFixedLength,
    AnsiString,
    AnsiStringFixedLength,
    Binary,
    Date,
    Time,
    DateTime,
    DateTimeOffset,
    Guid,
    Json,
}

/// A fully configured parameter as handed to the physical driver command.
#[derive(Debug, Clone, PartialEq)]
pub struct DbParameter {
    pub name: String,
    pub value: Value,
    pub db_type: Option<DbType>,
    pub size: Option<usize>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
}

/// Opaque physical command handle owned by the driver layer.
///
/// This crate attaches text and parameters to it and never retains the
/// handle past attachment; execution belongs to the surrounding layer.
pub trait DbCommand {
    fn set_command_text(&mut self, text: &str);
    fn add_parameter(&mut self, parameter: DbParameter);
}

/// Opaque physical transaction handle owned by the driver layer.
pub trait DbTransaction: Debug {}
