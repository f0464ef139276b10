//! Tests for the parser entry point.

#![expect(
    clippy::panic_in_result_fn,
    reason = "assertions report mismatches more clearly than early returns"
)]

use anyhow::{Result, bail, ensure};
use rstest::{fixture, rstest};
use serde::Deserialize;

use super::*;
use crate::error::GrammarError;
use crate::schema::{Annotate, FieldDescriptor, ModelSchema};

#[derive(Debug, Deserialize, PartialEq)]
struct Greet {
    name: String,
    times: u8,
    loud: bool,
}

impl ArgModel for Greet {
    fn schema() -> ModelSchema {
        ModelSchema::new("Greet")
            .description("Print a greeting.")
            .field(FieldDescriptor::new("name", String::annotation()).with_description("who to greet"))
            .field(FieldDescriptor::new("times", u8::annotation()).with_default(1_u8))
            .field(FieldDescriptor::new("loud", bool::annotation()).with_default(false))
    }
}

#[derive(Debug, Deserialize)]
struct Versioned {}

impl ArgModel for Versioned {
    fn schema() -> ModelSchema {
        ModelSchema::new("Versioned").field(FieldDescriptor::new("version", String::annotation()))
    }
}

#[fixture]
fn parser() -> ArgumentParser<Greet> {
    ArgumentParser::builder()
        .prog("greet")
        .version("1.2.3")
        .epilog("See the manual for more.")
        .exit_on_error(false)
        .build()
        .unwrap_or_else(|err| panic!("parser: {err}"))
}

#[rstest]
fn settings_default_to_help_and_exit() {
    let settings = ParserSettings::default();
    assert!(settings.add_help);
    assert!(settings.exit_on_error);
    assert_eq!(settings.prog, None);
}

#[rstest]
fn parses_and_fills_defaults(parser: ArgumentParser<Greet>) -> Result<()> {
    let greet = parser.parse_typed_args_from(["--name", "Ada", "--loud"])?;
    assert_eq!(
        greet,
        Greet {
            name: "Ada".to_owned(),
            times: 1,
            loud: true,
        }
    );
    Ok(())
}

#[rstest]
fn parser_is_reusable(parser: ArgumentParser<Greet>) -> Result<()> {
    let first = parser.parse_typed_args_from(["--name", "Ada", "--times", "2"])?;
    let second = parser.parse_typed_args_from(["--name", "Bob"])?;
    ensure!(first.times == 2 && second.times == 1);
    Ok(())
}

#[rstest]
fn missing_required_flag_is_a_parse_error(parser: ArgumentParser<Greet>) -> Result<()> {
    let Err(ArgsError::CliParsing(err)) = parser.parse_typed_args_from(Vec::<String>::new()) else {
        bail!("expected a clap error");
    };
    ensure!(!is_display_request(&err));
    ensure!(clap_error_message(&err).contains("--name"));
    Ok(())
}

#[rstest]
fn bad_values_are_validation_errors(parser: ArgumentParser<Greet>) -> Result<()> {
    let Err(ArgsError::Validation(err)) = parser.parse_typed_args_from(["--name", "Ada", "--times", "lots"])
    else {
        bail!("expected a validation error");
    };
    ensure!(err.model() == "Greet");
    ensure!(err.to_string().contains("times\n  value is not a valid unsigned integer"));
    Ok(())
}

#[rstest]
#[case::help("--help")]
#[case::short_help("-h")]
#[case::version("--version")]
#[case::short_version("-v")]
fn display_requests_are_returned(parser: ArgumentParser<Greet>, #[case] flag: &str) -> Result<()> {
    let Err(ArgsError::CliParsing(err)) = parser.parse_typed_args_from([flag]) else {
        bail!("expected a display request");
    };
    ensure!(is_display_request(&err));
    Ok(())
}

#[rstest]
fn help_lists_headings_defaults_and_epilog(parser: ArgumentParser<Greet>) {
    let help = parser.render_help();
    for expected in [
        "Print a greeting.",
        "required arguments:",
        "optional arguments:",
        "help:",
        "who to greet",
        "(default: 1)",
        "--no-loud",
        "See the manual for more.",
    ] {
        assert!(help.contains(expected), "missing {expected:?} in\n{help}");
    }
}

#[rstest]
fn usage_names_the_program(parser: ArgumentParser<Greet>) {
    assert!(parser.render_usage().contains("greet"));
    assert_eq!(parser.prog(), "greet");
    assert_eq!(parser.command().get_name(), "greet");
    assert_eq!(parser.model().schema().name(), "Greet");
}

#[rstest]
fn without_help_flag_no_help_is_registered() -> Result<()> {
    let parser = ArgumentParser::<Greet>::builder()
        .add_help(false)
        .exit_on_error(false)
        .build()?;
    ensure!(parser.command().get_arguments().all(|arg| arg.get_long() != Some("help")));
    Ok(())
}

#[rstest]
fn version_field_clashes_with_version_flag() {
    let result = ArgumentParser::<Versioned>::builder().version("1").build();
    assert!(matches!(
        result,
        Err(ArgsError::Grammar(GrammarError::DuplicateFlag { .. }))
    ));
    assert!(ArgumentParser::<Versioned>::builder().build().is_ok());
}

#[rstest]
fn parsers_can_be_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ArgumentParser<Greet>>();
}

#[rstest]
fn returned_failures_write_usage_first(parser: ArgumentParser<Greet>) -> Result<()> {
    let Err(err) = parser.parse_typed_args_from(["--name", "Ada", "--times", "lots"]) else {
        bail!("expected a validation error");
    };
    let mut out = Vec::new();
    parser.write_usage_for(&err, &mut out);
    let written = String::from_utf8(out)?;
    ensure!(written.starts_with("Usage: greet"), "got {written:?}");
    Ok(())
}

#[rstest]
fn returned_display_requests_write_nothing(parser: ArgumentParser<Greet>) -> Result<()> {
    let Err(err) = parser.parse_typed_args_from(["--help"]) else {
        bail!("expected a display request");
    };
    let mut out = Vec::new();
    parser.write_usage_for(&err, &mut out);
    ensure!(out.is_empty());
    Ok(())
}
