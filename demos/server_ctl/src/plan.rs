//! Turns parsed arguments into the steps the demo would take.

use std::io::{self, Write};

use crate::cli::{Mode, ServerCtl};

/// What the demo would do for a parsed command line.
#[derive(Debug, PartialEq, Eq)]
pub enum Plan {
    /// Start listening.
    Start {
        /// Service name.
        name: String,
        /// `host:port` to bind.
        address: String,
        /// Whether to detach.
        detach: bool,
    },
    /// Stop the service.
    Stop {
        /// Service name.
        name: String,
        /// Skip draining.
        force: bool,
    },
}

impl Plan {
    /// Builds the plan for `ctl`.
    ///
    /// Returns `None` when no command was selected.
    #[must_use]
    pub fn from_args(ctl: &ServerCtl) -> Option<Self> {
        match (&ctl.start, &ctl.stop) {
            (Some(start), _) => Some(Self::Start {
                name: ctl.name.clone(),
                address: format!("{}:{}", start.bind, start.port),
                detach: start.mode == Mode::Background,
            }),
            (None, Some(stop)) => Some(Self::Stop {
                name: ctl.name.clone(),
                force: stop.force,
            }),
            (None, None) => None,
        }
    }
}

/// Writes `plan` to `out`, one line per step.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_plan_to<W: Write>(out: &mut W, plan: &Plan, verbose: bool) -> io::Result<()> {
    match plan {
        Plan::Start {
            name,
            address,
            detach,
        } => {
            if verbose {
                writeln!(out, "resolving {address}")?;
            }
            let how = if *detach { "in the background" } else { "in the foreground" };
            writeln!(out, "starting {name} on {address} {how}")
        }
        Plan::Stop { name, force } => {
            if verbose && !force {
                writeln!(out, "draining connections")?;
            }
            let how = if *force { "forcefully" } else { "gracefully" };
            writeln!(out, "stopping {name} {how}")
        }
    }
}

/// Prints `plan` to standard output.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing to standard output fails.
pub fn print_plan(plan: &Plan, verbose: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_plan_to(&mut stdout, plan, verbose)
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::panic_in_result_fn,
        reason = "assertions report mismatches more clearly than early returns"
    )]

    use anyhow::Result;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::start(
        Plan::Start { name: "api".to_owned(), address: "0.0.0.0:80".to_owned(), detach: true },
        true,
        "resolving 0.0.0.0:80\nstarting api on 0.0.0.0:80 in the background\n"
    )]
    #[case::graceful_stop(
        Plan::Stop { name: "api".to_owned(), force: false },
        true,
        "draining connections\nstopping api gracefully\n"
    )]
    #[case::forced_stop(
        Plan::Stop { name: "api".to_owned(), force: true },
        false,
        "stopping api forcefully\n"
    )]
    fn plans_render_their_steps(
        #[case] plan: Plan,
        #[case] verbose: bool,
        #[case] expected: &str,
    ) -> Result<()> {
        let mut out = Vec::new();
        write_plan_to(&mut out, &plan, verbose)?;
        assert_eq!(String::from_utf8(out)?, expected);
        Ok(())
    }
}
