//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses the literal after `key =` using `extractor`.
fn parse_lit<T, F>(meta: &ParseNestedMeta, key: &str, expected: &str, extractor: F) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal)
        .ok_or_else(|| syn::Error::new(span, format!("`{key}` must be a {expected} literal")))
}

/// Parses a string literal from an attribute.
pub(super) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(text) => Some(text),
        _ => None,
    })
}

/// Parses a character literal from an attribute.
pub(super) fn lit_char(meta: &ParseNestedMeta, key: &str) -> syn::Result<char> {
    parse_lit(meta, key, "character", |lit| match lit {
        Lit::Char(c) => Some(c.value()),
        _ => None,
    })
}

/// Parses a boolean literal from an attribute.
pub(super) fn lit_bool(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    parse_lit(meta, key, "boolean", |lit| match lit {
        Lit::Bool(flag) => Some(flag.value),
        _ => None,
    })
}
