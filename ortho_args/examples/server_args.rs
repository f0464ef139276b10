//! Parses a small server command line into typed models.
//!
//! ```text
//! cargo run -p ortho_args --example server_args -- --host db.local start --port 9000
//! ```

use std::io::{self, Write};

use ortho_args::{Annotate, Annotation, ArgModel, ArgumentParser, FieldError, ValidationError};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Level {
    Debug,
    Info,
    Warn,
}

impl Annotate for Level {
    fn annotation() -> Annotation {
        Annotation::choice("Level", &["debug", "info", "warn"])
    }
}

/// Database connection settings.
#[derive(ArgModel, Debug, Deserialize)]
struct Database {
    /// Database host.
    #[arg_model(default = "localhost")]
    host: String,
    /// Database port.
    #[arg_model(default = 5432)]
    port: u16,
}

/// Start serving requests.
#[derive(ArgModel, Debug, Deserialize)]
#[arg_model(subcommand)]
struct Start {
    /// Port to listen on.
    #[arg_model(default = 8080, short = 'p')]
    port: u16,
    /// Worker threads; defaults to one per core.
    workers: Option<u8>,
}

/// Stop a running server.
#[derive(ArgModel, Debug, Deserialize)]
#[arg_model(subcommand)]
struct Stop {
    /// Skip the graceful drain.
    #[arg_model(default = false)]
    force: bool,
}

/// Run or stop the demo server.
#[derive(ArgModel, Debug, Deserialize)]
#[arg_model(validate = check_workers)]
struct Server {
    /// Log verbosity.
    #[arg_model(default = "info", short = 'l')]
    level: Level,
    /// Tags attached to every request log.
    #[serde(default)]
    tags: Vec<String>,
    database: Option<Database>,
    start: Option<Start>,
    stop: Option<Stop>,
}

impl Server {
    fn summary(&self) -> String {
        let database = self.database.as_ref().map_or_else(
            || "default database".to_owned(),
            |db| format!("database {}:{}", db.host, db.port),
        );
        let command = match (&self.start, &self.stop) {
            (Some(start), _) => format!(
                "start on port {} with {} workers",
                start.port,
                start
                    .workers
                    .map_or_else(|| "auto".to_owned(), |workers| workers.to_string())
            ),
            (None, Some(stop)) => format!("stop (force: {})", stop.force),
            (None, None) => "no command".to_owned(),
        };
        format!(
            "{command}; {database}; level {:?}; tags {:?}",
            self.level, self.tags
        )
    }
}

fn check_workers(server: &Server) -> Result<(), ValidationError> {
    if server.start.as_ref().is_some_and(|start| start.workers == Some(0)) {
        return Err(ValidationError::single(
            "Server",
            FieldError::new(["start", "workers"], "at least one worker is required"),
        ));
    }
    Ok(())
}

fn parser() -> ortho_args::ArgsResult<ArgumentParser<Server>> {
    ArgumentParser::builder()
        .prog("server_args")
        .version(env!("CARGO_PKG_VERSION"))
        .epilog("Database flags apply to both commands.")
        .build()
}

fn main() -> anyhow::Result<()> {
    let server = parser()?.parse_typed_args()?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", server.summary())?;
    Ok(())
}
