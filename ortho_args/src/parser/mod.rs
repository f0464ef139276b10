//! Typed argument parser built from an [`ArgModel`].
//!
//! [`ArgumentParser`] ties the pipeline together: the grammar is built once
//! at construction, and every parse call runs the tokens through `clap`,
//! collects the flat mapping, rebuilds the nested tree and validates it into
//! the model type.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::Path;

use clap::Command;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{ArgsError, ArgsResult, clap_error_message, is_display_request};
use crate::grammar::{self, BoundModel, CommandSurface, Reserved, Submodel};
use crate::schema::ArgModel;
use crate::unflatten::{collect, unflatten};
use crate::validate::validate_parsed;

/// Exit status used when parsing or validation fails.
pub const EXIT_ERROR: i32 = 2;

/// Construction-time options for an [`ArgumentParser`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserSettings {
    /// Program name shown in usage and error messages. Defaults to the file
    /// name of the running executable.
    pub prog: Option<String>,
    /// Text shown above the flag list. Defaults to the model description.
    pub description: Option<String>,
    /// Version string; enables `-v/--version` when set.
    pub version: Option<String>,
    /// Text shown below the flag list.
    pub epilog: Option<String>,
    /// Registers `-h/--help` on every command level.
    pub add_help: bool,
    /// Prints the error and exits with [`EXIT_ERROR`] instead of returning
    /// it.
    pub exit_on_error: bool,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            prog: None,
            description: None,
            version: None,
            epilog: None,
            add_help: true,
            exit_on_error: true,
        }
    }
}

/// Fluent builder for [`ArgumentParser`].
///
/// ```rust
/// use ortho_args::{ArgModel, ArgumentParser};
/// use serde::Deserialize;
///
/// #[derive(ArgModel, Deserialize)]
/// struct Greet {
///     /// Who to greet.
///     name: String,
/// }
///
/// let parser = ArgumentParser::<Greet>::builder()
///     .prog("greet")
///     .version("1.0.0")
///     .exit_on_error(false)
///     .build()?;
/// let greet = parser.parse_typed_args_from(["--name", "Ada"])?;
/// assert_eq!(greet.name, "Ada");
/// # Ok::<(), ortho_args::ArgsError>(())
/// ```
pub struct ParserBuilder<T> {
    settings: ParserSettings,
    model: PhantomData<fn() -> T>,
}

impl<T: ArgModel> ParserBuilder<T> {
    /// Sets the program name.
    #[must_use]
    pub fn prog(mut self, prog: impl Into<String>) -> Self {
        self.settings.prog = Some(prog.into());
        self
    }

    /// Sets the description shown above the flags.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.settings.description = Some(description.into());
        self
    }

    /// Sets the version string.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.settings.version = Some(version.into());
        self
    }

    /// Sets the epilog shown below the flags.
    #[must_use]
    pub fn epilog(mut self, epilog: impl Into<String>) -> Self {
        self.settings.epilog = Some(epilog.into());
        self
    }

    /// Controls whether `-h/--help` is registered.
    #[must_use]
    pub const fn add_help(mut self, add_help: bool) -> Self {
        self.settings.add_help = add_help;
        self
    }

    /// Controls whether errors exit the process.
    #[must_use]
    pub const fn exit_on_error(mut self, exit_on_error: bool) -> Self {
        self.settings.exit_on_error = exit_on_error;
        self
    }

    /// Builds the parser.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::Grammar`] when the model cannot be projected onto
    /// a command line.
    pub fn build(self) -> ArgsResult<ArgumentParser<T>> {
        ArgumentParser::with_settings(self.settings)
    }
}

/// Parses command-line tokens into a validated `T`.
///
/// The parser holds only immutable state; each parse works on a clone of the
/// stored command, so one parser can serve any number of calls.
pub struct ArgumentParser<T> {
    settings: ParserSettings,
    prog: String,
    command: Command,
    surface: CommandSurface,
    model: BoundModel,
    submodels: Vec<Submodel>,
    target: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for ArgumentParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentParser")
            .field("prog", &self.prog)
            .field("model", &self.model.schema().name())
            .finish_non_exhaustive()
    }
}

impl<T: ArgModel> ArgumentParser<T> {
    /// Creates a parser with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::Grammar`] when the model cannot be projected onto
    /// a command line.
    pub fn new() -> ArgsResult<Self> {
        Self::with_settings(ParserSettings::default())
    }

    /// Starts a [`ParserBuilder`].
    #[must_use]
    pub fn builder() -> ParserBuilder<T> {
        ParserBuilder {
            settings: ParserSettings::default(),
            model: PhantomData,
        }
    }

    /// Creates a parser from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ArgsError::Grammar`] when the model cannot be projected onto
    /// a command line.
    pub fn with_settings(settings: ParserSettings) -> ArgsResult<Self> {
        let schema = T::schema();
        let prog = settings
            .prog
            .clone()
            .unwrap_or_else(|| default_prog(schema.name()));
        let mut root = Command::new(prog.clone());
        if let Some(about) = settings.description.as_deref().or_else(|| schema.about()) {
            root = root.about(about.to_owned());
        }
        if let Some(epilog) = &settings.epilog {
            root = root.after_help(epilog.clone());
        }
        let reserved = Reserved {
            help: settings.add_help,
            version: settings.version.clone(),
        };
        let grammar = grammar::build(root, schema, &reserved)?;
        debug!(prog = %prog, "argument parser ready");
        Ok(Self {
            settings,
            prog,
            command: grammar.command,
            surface: grammar.surface,
            model: grammar.model,
            submodels: grammar.submodels,
            target: PhantomData,
        })
    }

    /// Parses the live process arguments.
    ///
    /// # Errors
    ///
    /// With `exit_on_error` disabled, writes usage to stderr and returns the
    /// parsing or validation error; otherwise the process exits instead.
    pub fn parse_typed_args(&self) -> ArgsResult<T> {
        self.parse_typed_args_from(std::env::args_os().skip(1))
    }

    /// Parses `args`, which must not include the program name.
    ///
    /// # Errors
    ///
    /// With `exit_on_error` disabled, writes usage to stderr and returns the
    /// parsing or validation error; otherwise the process exits instead.
    pub fn parse_typed_args_from<I, S>(&self, args: I) -> ArgsResult<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let tree = self.parse_tree_from(args)?;
        validate_parsed(&self.model, &self.submodels, tree).map_err(|err| self.fail(err.into()))
    }

    /// Runs `args` through the grammar and returns the rebuilt tree, before
    /// any casting or validation.
    ///
    /// Values are still the raw strings the user typed; unset flags and
    /// unselected subcommands are absent.
    ///
    /// # Errors
    ///
    /// With `exit_on_error` disabled, returns the parsing error; otherwise
    /// the process exits instead.
    pub fn parse_tree_from<I, S>(&self, args: I) -> ArgsResult<Map<String, Value>>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let tokens =
            std::iter::once(OsString::from(&self.prog)).chain(args.into_iter().map(Into::into));
        let matches = self
            .command
            .clone()
            .try_get_matches_from(tokens)
            .map_err(|err| self.fail(err.into()))?;
        let flat = collect(&matches, &self.surface);
        debug!(values = flat.len(), "collected command-line values");
        Ok(unflatten(self.model.schema(), &flat))
    }

    /// Prints usage and `message` to stderr, then exits with
    /// [`EXIT_ERROR`].
    pub fn error(&self, message: &str) -> ! {
        let usage = self.render_usage();
        let mut stderr = io::stderr().lock();
        if let Err(err) = writeln!(stderr, "{usage}\n{}: error: {message}", self.prog) {
            warn!(error = %err, "failed to write to stderr");
        }
        std::process::exit(EXIT_ERROR);
    }

    /// Routes `err` through the error path. With `exit_on_error` on, the
    /// error is reported and the process exits; otherwise usage is written to
    /// stderr and the error is returned.
    fn fail(&self, err: ArgsError) -> ArgsError {
        if self.settings.exit_on_error {
            match err {
                ArgsError::CliParsing(clap_err) if is_display_request(&clap_err) => {
                    clap_err.exit()
                }
                ArgsError::CliParsing(clap_err) => self.error(&clap_error_message(&clap_err)),
                other => self.error(&other.to_string()),
            }
        }
        self.write_usage_for(&err, &mut io::stderr().lock());
        err
    }

    /// Writes usage to `out` ahead of a returned error. Help and version
    /// requests are not failures and write nothing.
    fn write_usage_for<W: Write>(&self, err: &ArgsError, out: &mut W) {
        if matches!(err, ArgsError::CliParsing(clap_err) if is_display_request(clap_err)) {
            return;
        }
        if let Err(write_err) = writeln!(out, "{}", self.render_usage()) {
            warn!(error = %write_err, "failed to write usage");
        }
    }

    /// Full help text.
    #[must_use]
    pub fn render_help(&self) -> String {
        self.command.clone().render_help().to_string()
    }

    /// One-paragraph usage text.
    #[must_use]
    pub fn render_usage(&self) -> String {
        self.command.clone().render_usage().to_string()
    }

    /// The generated `clap` command.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// The bound model used for validation.
    #[must_use]
    pub const fn model(&self) -> &BoundModel {
        &self.model
    }

    /// Program name used in usage and error output.
    #[must_use]
    pub fn prog(&self) -> &str {
        &self.prog
    }

    /// Settings the parser was built with.
    #[must_use]
    pub const fn settings(&self) -> &ParserSettings {
        &self.settings
    }
}

fn default_prog(model: &str) -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map_or_else(
            || model.to_lowercase(),
            |name| name.to_string_lossy().into_owned(),
        )
}

#[cfg(test)]
mod tests;
