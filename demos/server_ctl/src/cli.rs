//! Argument models for `server_ctl`.

use ortho_args::{
    Annotate, Annotation, ArgModel, ArgsResult, ArgumentParser, FieldError, ValidationError,
};
use serde::Deserialize;

/// How a started service runs.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Stay attached to the terminal.
    Foreground,
    /// Detach and run in the background.
    Background,
}

impl Annotate for Mode {
    fn annotation() -> Annotation {
        Annotation::choice("Mode", &["foreground", "background"])
    }
}

/// Start the service.
#[derive(ArgModel, Debug, Deserialize, PartialEq)]
#[arg_model(subcommand)]
pub struct Start {
    /// Port to listen on.
    #[arg_model(short = 'p')]
    pub port: u16,
    /// Address to bind.
    #[arg_model(default = "127.0.0.1")]
    pub bind: String,
    /// Run mode.
    #[arg_model(default = "foreground")]
    pub mode: Mode,
}

/// Stop the service.
#[derive(ArgModel, Debug, Deserialize, PartialEq)]
#[arg_model(subcommand)]
pub struct Stop {
    /// Kill without draining connections.
    #[arg_model(default = false)]
    pub force: bool,
}

/// Control a pretend network service.
#[derive(ArgModel, Debug, Deserialize, PartialEq)]
#[arg_model(validate = visible_name)]
pub struct ServerCtl {
    /// Service name.
    #[arg_model(short = 'n')]
    pub name: String,
    /// Describe each step.
    #[arg_model(default = false)]
    pub verbose: bool,
    /// Start the service.
    pub start: Option<Start>,
    /// Stop the service.
    pub stop: Option<Stop>,
}

fn visible_name(ctl: &ServerCtl) -> Result<(), ValidationError> {
    if ctl.name.trim().is_empty() {
        return Err(ValidationError::single(
            "ServerCtl",
            FieldError::new(["name"], "service names must contain visible characters"),
        ));
    }
    Ok(())
}

/// Builds the parser used by the binary.
///
/// # Errors
///
/// Returns an error when the argument models cannot form a command line.
pub fn parser() -> ArgsResult<ArgumentParser<ServerCtl>> {
    ArgumentParser::builder()
        .prog("server_ctl")
        .version(env!("CARGO_PKG_VERSION"))
        .epilog("Set RUST_LOG=debug to trace parsing.")
        .build()
}
