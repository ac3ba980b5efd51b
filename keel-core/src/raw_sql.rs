use crate::{
    CommandError, DbCommand, MappingHints, ParameterNameGeneratorFactory, RelationalCommand,
    RelationalCommandBuilder, Result, TypeMappingSource, Value,
};
use std::{collections::HashMap, sync::Arc};

/// A built command paired with the concrete values for one ad-hoc
/// execution. Created per request and discarded after use; the underlying
/// command is shared, not owned.
#[derive(Debug, Clone)]
pub struct RawSqlCommand {
    command: Arc<RelationalCommand>,
    parameter_values: HashMap<String, Value>,
}

impl RawSqlCommand {
    pub fn relational_command(&self) -> &Arc<RelationalCommand> {
        &self.command
    }

    pub fn parameter_values(&self) -> &HashMap<String, Value> {
        &self.parameter_values
    }

    pub fn apply(&self, command: &mut dyn DbCommand) -> Result<()> {
        self.command.apply(command, &self.parameter_values)
    }
}

/// Builds ad-hoc commands from provider SQL text.
///
/// Positional `?` markers are auto-named in supply order with a fresh name
/// generator per build; no SQL is parsed beyond counting markers outside
/// quoted spans. Process-wide singleton, safe for concurrent use.
#[derive(Debug, Clone)]
pub struct RawSqlCommandBuilder<S: TypeMappingSource> {
    source: S,
    names: ParameterNameGeneratorFactory,
}

impl<S: TypeMappingSource> RawSqlCommandBuilder<S> {
    pub fn new(source: S, names: ParameterNameGeneratorFactory) -> Self {
        Self { source, names }
    }

    /// A parameterless command directly from literal text.
    pub fn build(&self, text: impl Into<String>) -> RelationalCommand {
        let mut builder = RelationalCommandBuilder::new(self.names.create());
        builder.append(text.into());
        builder.build()
    }

    /// A command whose `?` placeholders are bound, in order, to the supplied
    /// values. A count mismatch is a build-time error, never deferred to
    /// execution.
    pub fn build_with_values(
        &self,
        text: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<RawSqlCommand> {
        let text = text.into();
        let placeholders = count_placeholders(&text);
        if placeholders != values.len() {
            return Err(CommandError::PlaceholderCountMismatch {
                placeholders,
                values: values.len(),
            }
            .into());
        }
        let mut builder = RelationalCommandBuilder::new(self.names.create());
        builder.append(&text);
        let mut parameter_values = HashMap::with_capacity(values.len());
        for value in values {
            let mapping = self
                .source
                .resolve(&MappingHints::for_category(value.as_empty()))?;
            let name = builder.add_parameter(mapping);
            parameter_values.insert(name, value);
        }
        Ok(RawSqlCommand {
            command: Arc::new(builder.build()),
            parameter_values,
        })
    }
}

/// Count positional `?` markers, skipping `'...'` string spans (with `''`
/// escapes) and `"..."` quoted identifiers.
fn count_placeholders(text: &str) -> usize {
    let mut count = 0;
    let mut quote: Option<char> = None;
    for c in text.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(..) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '?' => count += 1,
                _ => {}
            },
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::count_placeholders;

    #[test]
    fn placeholders_outside_quotes() {
        assert_eq!(count_placeholders("SELECT 1"), 0);
        assert_eq!(count_placeholders("SELECT ?"), 1);
        assert_eq!(count_placeholders("SELECT ? WHERE a = ? AND b = ?"), 3);
    }

    #[test]
    fn placeholders_inside_quotes_do_not_count() {
        assert_eq!(count_placeholders("SELECT '?'"), 0);
        assert_eq!(count_placeholders("SELECT 'it''s ?', ?"), 1);
        assert_eq!(count_placeholders(r#"SELECT "odd?name", ?"#), 1);
    }
}
