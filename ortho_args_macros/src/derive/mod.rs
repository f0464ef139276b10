//! Expansion of `#[derive(ArgModel)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Parses `input` and generates the model implementations.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    Ok(generate::model_impls(&parsed))
}
