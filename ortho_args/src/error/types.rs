//! Primary error enums for parser construction and parsing.

use thiserror::Error;

use crate::validate::ValidationError;

/// Result alias used throughout the crate.
pub type ArgsResult<T> = Result<T, ArgsError>;

/// Errors that can occur while building or running an argument parser.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgsError {
    /// The model cannot be projected onto a command-line grammar.
    #[error("invalid argument model: {0}")]
    Grammar(#[from] GrammarError),

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// The parsed arguments failed model validation.
    #[error("{0}")]
    Validation(#[from] Box<ValidationError>),
}

impl From<clap::Error> for ArgsError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}

impl From<ValidationError> for ArgsError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(Box::new(e))
    }
}

/// Definition errors detected while building the grammar.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum GrammarError {
    /// Two fields map onto the same long flag within one command.
    #[error("flag '--{flag}' is declared by both '{first}' and '{second}'")]
    DuplicateFlag {
        /// Long flag name without the leading dashes.
        flag: String,
        /// Path of the field that claimed the flag first.
        first: String,
        /// Path of the conflicting field.
        second: String,
    },

    /// Two fields map onto the same short flag within one command.
    #[error("short flag '-{short}' is declared by both '{first}' and '{second}'")]
    DuplicateShort {
        /// Short flag character.
        short: char,
        /// Path of the field that claimed the flag first.
        first: String,
        /// Path of the conflicting field.
        second: String,
    },

    /// Two subcommand variants share a name.
    #[error("command '{name}' is declared more than once")]
    DuplicateCommand {
        /// Command name.
        name: String,
    },

    /// A subcommand field was found inside an argument group.
    #[error("subcommand field '{field}' must be declared on a command, not inside a group")]
    CommandInGroup {
        /// Path of the offending field.
        field: String,
    },
}
