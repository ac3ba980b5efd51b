use crate::{
    DbCommand, ParameterNameGenerator, ParameterNameGeneratorFactory, RelationalParameter, Result,
    TypeMapping, Value,
};
use std::{collections::HashMap, sync::Arc};

/// A reusable relational command: immutable text plus its ordered parameter
/// declarations.
///
/// Built once per logical query shape and executed any number of times with
/// different value maps; instances are read-only and freely shared across
/// threads.
#[derive(Debug, Clone)]
pub struct RelationalCommand {
    text: String,
    parameters: Arc<[RelationalParameter]>,
}

impl RelationalCommand {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parameter declarations in positional order, matching the markers in
    /// the command text.
    pub fn parameters(&self) -> &[RelationalParameter] {
        &self.parameters
    }

    /// Configure a physical command for one execution: set the text and
    /// attach every declared parameter from the name-keyed value map.
    ///
    /// Each call produces an independent binding; nothing carries over
    /// between executions.
    pub fn apply(&self, command: &mut dyn DbCommand, values: &HashMap<String, Value>) -> Result<()> {
        command.set_command_text(&self.text);
        for parameter in self.parameters.iter() {
            parameter.add_db_parameter_from_map(command, values)?;
        }
        Ok(())
    }
}

/// Accumulates command text fragments and parameter declarations for one
/// building session.
///
/// Not thread-safe during construction; [`build`](Self::build) consumes the
/// builder, so a finished command can never be affected by later builder
/// use.
#[derive(Debug)]
pub struct RelationalCommandBuilder {
    text: String,
    parameters: Vec<RelationalParameter>,
    names: ParameterNameGenerator,
}

impl RelationalCommandBuilder {
    pub fn new(names: ParameterNameGenerator) -> Self {
        Self {
            text: String::new(),
            parameters: Vec::new(),
            names,
        }
    }

    pub fn append(&mut self, fragment: impl AsRef<str>) -> &mut Self {
        self.text.push_str(fragment.as_ref());
        self
    }

    /// Declare a parameter with the given mapping, allocating its invariant
    /// name from this session's generator. Returns the allocated name so the
    /// caller can embed the matching marker in the text.
    pub fn add_parameter(&mut self, mapping: Arc<TypeMapping>) -> String {
        let name = self.names.generate_next();
        self.parameters
            .push(RelationalParameter::new(name.clone(), mapping));
        name
    }

    pub fn build(self) -> RelationalCommand {
        RelationalCommand {
            text: self.text,
            parameters: self.parameters.into(),
        }
    }
}

/// Process-wide factory for command builders. Holds no session state; every
/// [`create`](Self::create) hands out a fresh builder with its own name
/// generator, so concurrent building sessions never interfere.
#[derive(Debug, Clone, Default)]
pub struct RelationalCommandBuilderFactory {
    names: ParameterNameGeneratorFactory,
}

impl RelationalCommandBuilderFactory {
    pub fn new(names: ParameterNameGeneratorFactory) -> Self {
        Self { names }
    }

    pub fn create(&self) -> RelationalCommandBuilder {
        RelationalCommandBuilder::new(self.names.create())
    }
}
