//! Help text taken from doc comments.

use syn::{Attribute, Expr, ExprLit, Lit, Meta, MetaNameValue};

/// Joins the `///` lines on an item into help text.
///
/// Lines within a paragraph are joined with single spaces; paragraphs stay
/// separated by a blank line. Returns `None` when there is no text.
pub(super) fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let raw = attrs
        .iter()
        .filter_map(doc_line)
        .map(|line| line.trim().to_owned())
        .collect::<Vec<_>>()
        .join("\n");
    let paragraphs: Vec<String> = raw
        .split("\n\n")
        .map(|paragraph| {
            paragraph
                .split('\n')
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect();
    (!paragraphs.is_empty()).then(|| paragraphs.join("\n\n"))
}

fn doc_line(attr: &Attribute) -> Option<String> {
    if !attr.path().is_ident("doc") {
        return None;
    }
    let Meta::NameValue(MetaNameValue {
        value: Expr::Lit(ExprLit {
            lit: Lit::Str(text), ..
        }),
        ..
    }) = &attr.meta
    else {
        return None;
    };
    Some(text.value())
}
