//! Helpers for classifying and rendering `clap` errors.

use clap::{Error as ClapError, error::ErrorKind};

/// Reports whether `err` is clap asking to print help or version text.
///
/// Such requests arrive as [`ErrorKind::DisplayHelp`] and
/// [`ErrorKind::DisplayVersion`]. The parser prints them to stdout and exits
/// with status zero instead of taking the error path.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    let kind = err.kind();
    kind == ErrorKind::DisplayHelp || kind == ErrorKind::DisplayVersion
}

/// Extracts the message paragraph from a rendered `clap` error.
///
/// The `error: ` prefix and the usage tail are dropped so the message can be
/// re-rendered as `<prog>: error: <message>`. Multi-line messages, such as
/// the list of missing required arguments, are kept whole.
#[must_use]
pub fn clap_error_message(err: &ClapError) -> String {
    let rendered = err.render().to_string();
    let paragraph = rendered.split("\n\n").next().unwrap_or_default();
    paragraph
        .strip_prefix("error: ")
        .unwrap_or(paragraph)
        .trim_end()
        .to_owned()
}
