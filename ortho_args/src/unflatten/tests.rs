//! Tests for collecting and rebuilding parsed arguments.

#![expect(
    clippy::panic_in_result_fn,
    reason = "assertions report mismatches more clearly than early returns"
)]

use anyhow::Result;
use clap::Command;
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

use super::*;
use crate::grammar::{self, Grammar, Reserved};
use crate::schema::{Annotate, Annotation, ArgModel, FieldDescriptor, ModelRef};

macro_rules! model {
    ($ty:ident, $schema:expr) => {
        #[derive(Deserialize)]
        struct $ty {}

        impl ArgModel for $ty {
            fn schema() -> ModelSchema {
                $schema
            }
        }

        impl Annotate for $ty {
            fn annotation() -> Annotation {
                Annotation::Model(ModelRef::of::<Self>())
            }
        }
    };
}

model!(
    Flat,
    ModelSchema::new("Flat")
        .field(FieldDescriptor::new("name", String::annotation()))
        .field(FieldDescriptor::new("verbose", bool::annotation()).with_default(false))
        .field(FieldDescriptor::new("tags", Option::<Vec<String>>::annotation()))
);
model!(
    Database,
    ModelSchema::new("Database")
        .field(FieldDescriptor::new("host", Option::<String>::annotation()))
        .field(FieldDescriptor::new("port", u16::annotation()).with_default(5432_u16))
);
model!(
    Start,
    ModelSchema::new("Start")
        .subcommand(true)
        .field(FieldDescriptor::new("port", u16::annotation()).with_default(8080_u16))
);
model!(
    Stop,
    ModelSchema::new("Stop")
        .subcommand(true)
        .field(FieldDescriptor::new("force", bool::annotation()).with_default(false))
);
model!(
    Service,
    ModelSchema::new("Service")
        .field(FieldDescriptor::new("verbose", bool::annotation()).with_default(false))
        .field(FieldDescriptor::new("database", Option::<Database>::annotation()))
        .field(FieldDescriptor::new("start", Option::<Start>::annotation()))
        .field(FieldDescriptor::new("stop", Option::<Stop>::annotation()))
);

fn grammar_for(schema: ModelSchema) -> Result<Grammar> {
    Ok(grammar::build(
        Command::new("prog"),
        schema,
        &Reserved {
            help: true,
            version: None,
        },
    )?)
}

#[fixture]
fn service() -> Grammar {
    grammar_for(Service::schema()).unwrap_or_else(|err| panic!("grammar: {err}"))
}

fn parse(grammar: &Grammar, tokens: &[&str]) -> Result<FlatArgs> {
    let matches = grammar
        .command
        .clone()
        .try_get_matches_from(std::iter::once("prog").chain(tokens.iter().copied()))?;
    Ok(collect(&matches, &grammar.surface))
}

#[rstest]
fn unset_flags_are_absent() -> Result<()> {
    let grammar = grammar_for(Flat::schema())?;
    let flat = parse(&grammar, &["--name", "Ada"])?;
    assert_eq!(Value::Object(flat.into_values()), json!({"name": "Ada"}));
    Ok(())
}

#[rstest]
#[case::enable(&["--verbose"], true)]
#[case::disable(&["--no-verbose"], false)]
#[case::last_disable_wins(&["--verbose", "--no-verbose"], false)]
#[case::last_enable_wins(&["--no-verbose", "--verbose"], true)]
fn boolean_pairs_collapse_to_one_value(#[case] tokens: &[&str], #[case] expected: bool) -> Result<()> {
    let grammar = grammar_for(Flat::schema())?;
    let mut args = vec!["--name", "Ada"];
    args.extend_from_slice(tokens);
    let flat = parse(&grammar, &args)?;
    assert_eq!(flat.get("verbose"), Some(&Value::Bool(expected)));
    Ok(())
}

#[rstest]
fn repeated_sequence_flags_accumulate() -> Result<()> {
    let grammar = grammar_for(Flat::schema())?;
    let flat = parse(&grammar, &["--name", "Ada", "--tags", "a", "b", "--tags", "c"])?;
    assert_eq!(flat.get("tags"), Some(&json!(["a", "b", "c"])));
    Ok(())
}

#[rstest]
fn flat_models_skip_rebuilding() -> Result<()> {
    let grammar = grammar_for(Flat::schema())?;
    let flat = parse(&grammar, &["--name", "Ada"])?;
    assert_eq!(unflatten(&Flat::schema(), &flat), flat.values().clone());
    Ok(())
}

#[rstest]
fn untouched_groups_are_pruned(service: Grammar) -> Result<()> {
    let flat = parse(&service, &["--verbose", "stop"])?;
    let tree = unflatten(&Service::schema(), &flat);
    assert_eq!(Value::Object(tree), json!({"verbose": true, "stop": {}}));
    Ok(())
}

#[rstest]
fn grouped_values_are_nested(service: Grammar) -> Result<()> {
    let flat = parse(&service, &["--host", "db.local", "start", "--port", "9000"])?;
    let tree = unflatten(&Service::schema(), &flat);
    assert_eq!(
        Value::Object(tree),
        json!({"database": {"host": "db.local"}, "start": {"port": "9000"}})
    );
    Ok(())
}

#[rstest]
fn selection_follows_the_parser_not_token_position(service: Grammar) -> Result<()> {
    let flat = parse(&service, &["--no-verbose", "start"])?;
    assert_eq!(flat.selected(), ["start"]);
    let tree = unflatten(&Service::schema(), &flat);
    assert_eq!(Value::Object(tree), json!({"verbose": false, "start": {}}));
    Ok(())
}

#[rstest]
fn sibling_variants_are_discarded_even_when_populated() {
    let mut flat = FlatArgs::new();
    flat.insert("start.port", json!("8080"));
    flat.insert("stop.force", json!(true));
    flat.select("start");
    let tree = unflatten(&Service::schema(), &flat);
    assert_eq!(Value::Object(tree), json!({"start": {"port": "8080"}}));
}

#[rstest]
fn lookup_falls_back_to_two_segments() {
    let mut flat = FlatArgs::new();
    flat.insert("outer.port", json!("1"));
    let deep = ["outer".to_owned(), "inner".to_owned(), "port".to_owned()];
    assert_eq!(flat.lookup(&deep), Some(&json!("1")));
    flat.insert("outer.inner.port", json!("2"));
    assert_eq!(flat.lookup(&deep), Some(&json!("2")));
    assert_eq!(flat.lookup(&["missing".to_owned()]), None);
}

#[rstest]
#[case::null(json!(null), None)]
#[case::empty_object(json!({}), None)]
#[case::cascading(json!({"a": {"b": null, "c": []}}), None)]
#[case::array_nulls(json!([null, 1]), Some(json!([1])))]
#[case::kept(json!({"a": false, "b": 0, "c": ""}), Some(json!({"a": false, "b": 0, "c": ""})))]
fn prune_removes_null_and_empty(#[case] input: Value, #[case] expected: Option<Value>) {
    assert_eq!(prune(input), expected);
}
