//! Error types for the `server_ctl` demo.

use thiserror::Error;

/// Errors raised by the `server_ctl` demo.
#[derive(Debug, Error)]
pub enum ServerCtlError {
    /// The command line could not be parsed or validated.
    #[error(transparent)]
    Arguments(#[from] ortho_args::ArgsError),
    /// Writing the plan to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias for the demo.
pub type Result<T> = std::result::Result<T, ServerCtlError>;
