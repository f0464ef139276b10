//! Attribute parsing for the `ArgModel` derive macro.

use quote::ToTokens;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, Token, parenthesized};

mod doc_comments;
mod input;
mod literals;
mod serde_attrs;

use doc_comments::doc_text;
pub(crate) use input::{FieldDefault, ParsedField, ParsedInput, parse_input};
use literals::{lit_bool, lit_char, lit_str};

/// Struct-level `#[arg_model(...)]` metadata.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Model name used in error headers; defaults to the struct name.
    pub name: Option<String>,
    /// Help text; defaults to the struct's doc comment.
    pub description: Option<String>,
    pub subcommand: bool,
    /// Function called as the model's validation hook.
    pub validate: Option<syn::Path>,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[arg_model(...)]` metadata.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub default: Option<Expr>,
    pub title: Option<String>,
    pub alias: Option<String>,
    /// Help text; defaults to the field's doc comment.
    pub description: Option<String>,
    pub short: Option<char>,
}

/// Iterate every `#[name(...)]` attribute once and apply a callback.
fn for_each_meta<F>(attrs: &[Attribute], name: &str, mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident(name)) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, allowed: &str) -> syn::Error {
    let key = meta.path.to_token_stream().to_string();
    meta.error(format!(
        "unknown arg_model attribute `{key}`; expected one of {allowed}"
    ))
}

/// Reads a bare flag (`subcommand`) or an explicit `subcommand = bool`.
fn flag(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        return lit_bool(meta, key);
    }
    Ok(true)
}

fn assign_str(target: &mut Option<String>, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    let value = lit_str(meta, key)?.value();
    *target = Some(value);
    Ok(())
}

fn assign_char(target: &mut Option<char>, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    let value = lit_char(meta, key)?;
    *target = Some(value);
    Ok(())
}

/// Extracts `#[arg_model(...)]` metadata applied to a struct.
///
/// Unknown keys are rejected so that a misspelt attribute fails the build
/// instead of silently changing the generated grammar.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for_each_meta(attrs, "arg_model", |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => assign_str(&mut out.name, meta, "name"),
            Some("description") => assign_str(&mut out.description, meta, "description"),
            Some("subcommand") => {
                out.subcommand = flag(meta, "subcommand")?;
                Ok(())
            }
            Some("validate") => {
                out.validate = Some(meta.value()?.parse()?);
                Ok(())
            }
            Some("crate") => {
                let path = lit_str(meta, "crate")?;
                out.crate_path = Some(path.parse()?);
                Ok(())
            }
            _ => Err(unknown_key(
                meta,
                "`name`, `description`, `subcommand`, `validate` or `crate`",
            )),
        }
    })?;
    out.description = out.description.take().or_else(|| doc_text(attrs));
    Ok(out)
}

/// Extracts `#[arg_model(...)]` metadata applied to a field.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for_each_meta(&field.attrs, "arg_model", |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("default") => {
                out.default = Some(meta.value()?.parse()?);
                Ok(())
            }
            Some("title") => assign_str(&mut out.title, meta, "title"),
            Some("alias") => assign_str(&mut out.alias, meta, "alias"),
            Some("description") => assign_str(&mut out.description, meta, "description"),
            Some("short") => assign_char(&mut out.short, meta, "short"),
            _ => Err(unknown_key(
                meta,
                "`default`, `title`, `alias`, `description` or `short`",
            )),
        }
    })?;
    out.description = out.description.take().or_else(|| doc_text(&field.attrs));
    Ok(out)
}
