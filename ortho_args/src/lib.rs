//! Typed command-line parsing driven by declarative argument models.
//!
//! A model is a plain struct that derives [`ArgModel`] and
//! [`serde::Deserialize`]. From its field descriptors the crate builds a
//! `clap` grammar with one `--flag` per scalar field, argument groups for
//! nested models and subcommands for models marked as such. Parsing runs the
//! user's tokens through that grammar, collects the values that were actually
//! supplied into a flat mapping keyed by dotted field path, rebuilds the
//! nested tree and validates it back into the model type.
//!
//! ```rust
//! use ortho_args::{ArgModel, ArgumentParser};
//! use serde::Deserialize;
//!
//! #[derive(ArgModel, Deserialize)]
//! struct Serve {
//!     /// Port to listen on.
//!     #[arg_model(default = 8080)]
//!     port: u16,
//!     /// Enable request logging.
//!     #[arg_model(default = false)]
//!     verbose: bool,
//! }
//!
//! let parser = ArgumentParser::<Serve>::builder()
//!     .prog("serve")
//!     .exit_on_error(false)
//!     .build()?;
//! let serve = parser.parse_typed_args_from(["--port", "9000", "--verbose"])?;
//! assert_eq!(serve.port, 9000);
//! assert!(serve.verbose);
//! # Ok::<(), ortho_args::ArgsError>(())
//! ```

extern crate self as ortho_args;

pub use ortho_args_macros::ArgModel;

mod coerce;
mod error;
mod grammar;
mod parser;
mod schema;
pub mod unflatten;
pub mod validate;

pub use coerce::{Caster, caster_name};
pub use error::{ArgsError, ArgsResult, GrammarError, clap_error_message, is_display_request};
pub use grammar::BoundModel;
pub use parser::{ArgumentParser, EXIT_ERROR, ParserBuilder, ParserSettings};
pub use schema::{
    Annotate, Annotation, ArgModel, FieldDescriptor, ModelRef, ModelSchema, ScalarKind,
    ScalarType, TypeClass,
};
pub use unflatten::{FlatArgs, prune, unflatten};
pub use validate::{FieldError, FieldErrors, ValidationError, validate_tree};
