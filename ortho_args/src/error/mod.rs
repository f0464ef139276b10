//! Error types produced while building and running an argument parser.

mod helpers;
mod types;

pub use helpers::{clap_error_message, is_display_request};
pub use types::{ArgsError, ArgsResult, GrammarError};
