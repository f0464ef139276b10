//! Library facade for the `server_ctl` demo so tests can reuse its argument
//! models and output helpers.

pub mod cli;
pub mod error;
pub mod plan;
