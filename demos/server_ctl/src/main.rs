//! `server_ctl` entry point: parse the command line, build the plan, print it.

use server_ctl::cli;
use server_ctl::error::Result;
use server_ctl::plan::{Plan, print_plan};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let ctl = cli::parser()?.parse_typed_args()?;
    debug!(?ctl, "parsed command line");
    let Some(plan) = Plan::from_args(&ctl) else {
        info!("no command selected");
        return Ok(());
    };
    print_plan(&plan, ctl.verbose)?;
    Ok(())
}
