//! Procedural macros for `ortho_args`.
//!
//! `#[derive(ArgModel)]` implements `ortho_args::ArgModel` and
//! `ortho_args::Annotate` for a struct with named fields. Each field becomes
//! a descriptor whose annotation comes from the field type, whose key follows
//! the struct's serde renaming and whose description is taken from its doc
//! comment. Further metadata is supplied with `#[arg_model(...)]`:
//!
//! - on the struct: `subcommand`, `name = "..."`, `description = "..."`,
//!   `validate = path::to::fn` and `crate = "..."`;
//! - on a field: `default = expr`, `title = "..."`, `alias = "..."`,
//!   `description = "..."` and `short = 'c'`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `ortho_args::ArgModel`.
#[proc_macro_derive(ArgModel, attributes(arg_model))]
pub fn derive_arg_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
