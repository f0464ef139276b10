//! Grammar and validation errors surfaced through the public API.

use anyhow::{Result, bail, ensure};
use ortho_args::{ArgModel, ArgsError, ArgumentParser, GrammarError};
use rstest::rstest;
use serde::Deserialize;

#[derive(ArgModel, Debug, Deserialize)]
struct Left {
    port: u16,
}

#[derive(ArgModel, Debug, Deserialize)]
struct Right {
    port: u16,
}

#[derive(ArgModel, Debug, Deserialize)]
struct SameFlag {
    left: Option<Left>,
    right: Option<Right>,
}

#[derive(ArgModel, Debug, Deserialize)]
struct SameShort {
    #[arg_model(short = 'x')]
    first: Option<u8>,
    #[arg_model(short = 'x')]
    second: Option<u8>,
}

#[derive(ArgModel, Debug, Deserialize)]
struct HelpShadow {
    help: Option<String>,
}

#[derive(ArgModel, Debug, Deserialize)]
#[arg_model(subcommand)]
struct Go {}

#[derive(ArgModel, Debug, Deserialize)]
struct SameCommand {
    go: Option<Go>,
    #[arg_model(title = "go")]
    again: Option<Go>,
}

#[derive(ArgModel, Debug, Deserialize)]
struct Holder {
    go: Option<Go>,
}

#[derive(ArgModel, Debug, Deserialize)]
struct NestedCommand {
    holder: Option<Holder>,
}

fn grammar_error<T: ArgModel>() -> Result<GrammarError> {
    match ArgumentParser::<T>::builder().exit_on_error(false).build() {
        Err(ArgsError::Grammar(err)) => Ok(err),
        Err(other) => bail!("unexpected error: {other}"),
        Ok(_) => bail!("grammar should be rejected"),
    }
}

#[rstest]
fn grouped_fields_share_one_flag_namespace() -> Result<()> {
    let err = grammar_error::<SameFlag>()?;
    ensure!(
        err == GrammarError::DuplicateFlag {
            flag: "port".to_owned(),
            first: "left.port".to_owned(),
            second: "right.port".to_owned(),
        },
        "got {err}"
    );
    Ok(())
}

#[rstest]
fn short_flags_must_be_unique() -> Result<()> {
    ensure!(matches!(
        grammar_error::<SameShort>()?,
        GrammarError::DuplicateShort { short: 'x', .. }
    ));
    Ok(())
}

#[rstest]
fn fields_cannot_shadow_help() -> Result<()> {
    ensure!(matches!(
        grammar_error::<HelpShadow>()?,
        GrammarError::DuplicateFlag { .. }
    ));
    let without_help = ArgumentParser::<HelpShadow>::builder()
        .add_help(false)
        .exit_on_error(false)
        .build();
    ensure!(without_help.is_ok());
    Ok(())
}

#[rstest]
fn command_names_must_be_unique() -> Result<()> {
    ensure!(matches!(
        grammar_error::<SameCommand>()?,
        GrammarError::DuplicateCommand { .. }
    ));
    Ok(())
}

#[rstest]
fn commands_cannot_live_inside_groups() -> Result<()> {
    let err = grammar_error::<NestedCommand>()?;
    ensure!(
        err == GrammarError::CommandInGroup {
            field: "holder.go".to_owned()
        },
        "got {err}"
    );
    Ok(())
}

#[derive(ArgModel, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
struct Typed {
    port: u16,
    ratio: Option<f32>,
    initial: Option<char>,
    enabled: Option<bool>,
}

#[rstest]
fn every_invalid_field_is_reported() -> Result<()> {
    let parser = ArgumentParser::<Typed>::builder()
        .exit_on_error(false)
        .build()?;
    let Err(ArgsError::Validation(err)) = parser.parse_typed_args_from([
        "--port", "-1", "--ratio", "half", "--initial", "xy",
    ]) else {
        bail!("expected a validation error");
    };
    let rendered = err.to_string();
    ensure!(rendered.starts_with("3 validation errors for Typed"), "{rendered}");
    for expected in [
        "port\n  value is not a valid unsigned integer [input: \"-1\"]",
        "ratio\n  value is not a valid float [input: \"half\"]",
        "initial\n  ensure this value has exactly 1 character [input: \"xy\"]",
    ] {
        ensure!(rendered.contains(expected), "missing {expected:?} in\n{rendered}");
    }
    Ok(())
}
