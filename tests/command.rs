use keel::{
    CommandError, DbCommand, DbParameter, MappingHints, ParameterNameGenerator,
    ParameterNameGeneratorFactory, RawSqlCommandBuilder, RelationalCommandBuilderFactory,
    TypeMappingSource, Value,
};
use indoc::indoc;
use keel_mssql::type_mapping_source;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct FakeDbCommand {
    text: String,
    parameters: Vec<DbParameter>,
}

impl DbCommand for FakeDbCommand {
    fn set_command_text(&mut self, text: &str) {
        self.text = text.into();
    }
    fn add_parameter(&mut self, parameter: DbParameter) {
        self.parameters.push(parameter);
    }
}

#[test]
fn name_generator_is_sequential_and_resettable() {
    let mut names = ParameterNameGenerator::default();
    let first: Vec<_> = (0..5).map(|_| names.generate_next()).collect();
    assert_eq!(first, ["p0", "p1", "p2", "p3", "p4"]);
    let mut unique = first.clone();
    unique.dedup();
    assert_eq!(unique.len(), first.len());
    names.reset();
    assert_eq!(names.generate_next(), "p0");
}

#[test]
fn name_generator_factory_hands_out_independent_sessions() {
    let factory = ParameterNameGeneratorFactory::new("q");
    let mut a = factory.create();
    let mut b = factory.create();
    assert_eq!(a.generate_next(), "q0");
    assert_eq!(a.generate_next(), "q1");
    assert_eq!(b.generate_next(), "q0");
}

#[test]
fn builder_allocates_names_and_builds_immutable_commands() {
    let source = type_mapping_source();
    let factory = RelationalCommandBuilderFactory::default();

    let mut builder = factory.create();
    builder.append("SELECT name FROM users WHERE id = @");
    let mapping = source
        .resolve(&MappingHints::for_category(Value::Int32(None)))
        .unwrap();
    let name = builder.add_parameter(mapping);
    builder.append(&name);
    let command = builder.build();

    assert_eq!(command.text(), "SELECT name FROM users WHERE id = @p0");
    assert_eq!(command.parameters().len(), 1);
    assert_eq!(command.parameters()[0].invariant_name(), "p0");
    assert_eq!(command.parameters()[0].mapping().store_type(), "int");
}

#[test]
fn command_reexecution_produces_independent_bindings() {
    let source = type_mapping_source();
    let factory = RelationalCommandBuilderFactory::default();

    let mut builder = factory.create();
    builder.append("UPDATE users SET name = @");
    let mapping = source
        .resolve(&MappingHints::for_category(Value::Varchar(None)))
        .unwrap();
    let name = builder.add_parameter(mapping);
    builder.append(&name);
    let command = builder.build();

    let mut first = FakeDbCommand::default();
    let mut second = FakeDbCommand::default();
    command
        .apply(
            &mut first,
            &HashMap::from([("p0".into(), Value::from("alice"))]),
        )
        .unwrap();
    command
        .apply(
            &mut second,
            &HashMap::from([("p0".into(), Value::from("bob"))]),
        )
        .unwrap();

    assert_eq!(first.parameters.len(), 1);
    assert_eq!(first.parameters[0].value, Value::from("alice"));
    assert_eq!(second.parameters.len(), 1);
    assert_eq!(second.parameters[0].value, Value::from("bob"));
    assert_eq!(first.text, second.text);
}

#[test]
fn absent_value_is_a_missing_parameter_error() {
    let source = type_mapping_source();
    let factory = RelationalCommandBuilderFactory::default();

    let mut builder = factory.create();
    let mapping = source
        .resolve(&MappingHints::for_category(Value::Int64(None)))
        .unwrap();
    builder.add_parameter(mapping);
    let command = builder.build();

    let mut db = FakeDbCommand::default();
    let err = command.apply(&mut db, &HashMap::new()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<CommandError>(),
        Some(&CommandError::MissingParameterValue { name: "p0".into() })
    );
}

#[test]
fn null_value_binds_database_null_of_the_category() {
    let source = type_mapping_source();
    let factory = RelationalCommandBuilderFactory::default();

    let mut builder = factory.create();
    let mapping = source
        .resolve(&MappingHints::for_category(Value::Varchar(None)))
        .unwrap();
    builder.add_parameter(mapping);
    let command = builder.build();

    let mut db = FakeDbCommand::default();
    command
        .apply(&mut db, &HashMap::from([("p0".into(), Value::Null)]))
        .unwrap();
    assert_eq!(db.parameters[0].value, Value::Varchar(None));
}

#[test]
fn raw_sql_without_parameters() {
    let builder =
        RawSqlCommandBuilder::new(type_mapping_source(), ParameterNameGeneratorFactory::default());
    let command = builder.build("DELETE FROM audit_log");
    assert_eq!(command.text(), "DELETE FROM audit_log");
    assert!(command.parameters().is_empty());
}

#[test]
fn raw_sql_binds_positional_values_in_order() {
    let builder =
        RawSqlCommandBuilder::new(type_mapping_source(), ParameterNameGeneratorFactory::default());
    let raw = builder
        .build_with_values(
            indoc! {"
                INSERT INTO users (id, name)
                VALUES (?, ?)
            "},
            vec![Value::from(7i32), Value::from("carol")],
        )
        .unwrap();

    let command = raw.relational_command();
    assert_eq!(command.parameters().len(), 2);
    assert_eq!(command.parameters()[0].invariant_name(), "p0");
    assert_eq!(command.parameters()[1].invariant_name(), "p1");
    assert_eq!(raw.parameter_values()["p0"], Value::from(7i32));
    assert_eq!(raw.parameter_values()["p1"], Value::from("carol"));

    let mut db = FakeDbCommand::default();
    raw.apply(&mut db).unwrap();
    assert_eq!(db.parameters.len(), 2);
    assert_eq!(db.parameters[0].name, "p0");
    assert_eq!(db.parameters[1].value, Value::from("carol"));
}

#[test]
fn raw_sql_count_mismatch_fails_at_build_time() {
    let builder =
        RawSqlCommandBuilder::new(type_mapping_source(), ParameterNameGeneratorFactory::default());

    let err = builder
        .build_with_values("SELECT ? WHERE a = ?", vec![Value::from(1i32)])
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<CommandError>(),
        Some(&CommandError::PlaceholderCountMismatch {
            placeholders: 2,
            values: 1
        })
    );

    let err = builder
        .build_with_values("SELECT ?", vec![Value::from(1i32), Value::from(2i32)])
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<CommandError>(),
        Some(&CommandError::PlaceholderCountMismatch {
            placeholders: 1,
            values: 2
        })
    );
}

#[test]
fn raw_sql_ignores_placeholders_inside_string_literals() {
    let builder =
        RawSqlCommandBuilder::new(type_mapping_source(), ParameterNameGeneratorFactory::default());
    let raw = builder
        .build_with_values(
            "SELECT * FROM notes WHERE body = 'why?' AND id = ?",
            vec![Value::from(3i64)],
        )
        .unwrap();
    assert_eq!(raw.relational_command().parameters().len(), 1);
}
