use crate::{CommandError, DbCommand, Result, TypeMapping, Value};
use std::{collections::HashMap, sync::Arc};

/// A named placeholder in a relational command, bound to its type mapping.
///
/// Created while the command is built, never mutated afterwards, and
/// consumed at every execution to attach a concrete value to the physical
/// command. The mapping is shared, not owned: it outlives any single
/// parameter.
#[derive(Debug, Clone)]
pub struct RelationalParameter {
    invariant_name: String,
    mapping: Arc<TypeMapping>,
}

impl RelationalParameter {
    pub fn new(invariant_name: impl Into<String>, mapping: Arc<TypeMapping>) -> Self {
        Self {
            invariant_name: invariant_name.into(),
            mapping,
        }
    }

    /// Name unique within the owning command.
    pub fn invariant_name(&self) -> &str {
        &self.invariant_name
    }

    pub fn mapping(&self) -> &Arc<TypeMapping> {
        &self.mapping
    }

    /// Attach this parameter to a physical command with the given value; an
    /// absent value binds the database null of the mapping's category.
    pub fn add_db_parameter(&self, command: &mut dyn DbCommand, value: Option<&Value>) -> Result<()> {
        let parameter = self.mapping.create_db_parameter(&self.invariant_name, value)?;
        command.add_parameter(parameter);
        Ok(())
    }

    /// Attach this parameter looking its value up by invariant name. A name
    /// absent from the map is a caller error, not a silent null bind.
    pub fn add_db_parameter_from_map(
        &self,
        command: &mut dyn DbCommand,
        values: &HashMap<String, Value>,
    ) -> Result<()> {
        let value = values
            .get(&self.invariant_name)
            .ok_or_else(|| CommandError::MissingParameterValue {
                name: self.invariant_name.clone(),
            })?;
        self.add_db_parameter(command, Some(value))
    }
}
