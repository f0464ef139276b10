//! Input parsing for the `ArgModel` derive macro.
//!
//! This module gathers the struct identifier, its attribute metadata and a
//! resolved description of every field in one pass so macro expansion can
//! fail fast with useful errors.

use syn::{Data, DeriveInput, Expr, Fields};

use super::serde_attrs::{SerdeDefault, serde_container, serde_field};
use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Source of a field's default value.
pub(crate) enum FieldDefault {
    /// `#[arg_model(default = expr)]`.
    Expr(Expr),
    /// `#[serde(default)]` on the field.
    Type,
    /// `#[serde(default = "path")]` on the field.
    Function(syn::Path),
    /// `#[serde(default)]` on the struct.
    Container,
    /// `#[serde(default = "path")]` on the struct.
    ContainerFunction(syn::Path),
}

/// One field that takes part in argument parsing.
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    /// Key serde deserialises the field from.
    pub key: String,
    pub default: Option<FieldDefault>,
    pub attrs: FieldAttrs,
}

/// Everything the generator needs to know about the struct.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<ParsedField>,
}

/// Gathers information from the user-provided struct.
///
/// Fields skipped by serde are left out. Generic structs, tuple structs and
/// enums are rejected, as are `#[serde(flatten)]` fields, whose keys cannot
/// be known at expansion time.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ArgModel cannot be derived for generic structs",
        ));
    }
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ArgModel can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            data.struct_token,
            "ArgModel requires named fields",
        ));
    };

    let attrs = parse_struct_attrs(&input.attrs)?;
    let container = serde_container(&input.attrs)?;
    let mut fields = Vec::new();
    for field in &named.named {
        let serde = serde_field(&field.attrs)?;
        if serde.flatten {
            return Err(syn::Error::new_spanned(
                field,
                "`#[serde(flatten)]` is not supported; nest the model as a field instead",
            ));
        }
        if serde.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let key = serde.key(&ident, container.rename_all);
        let mut field_attrs = parse_field_attrs(field)?;
        let default = field_attrs
            .default
            .take()
            .map(FieldDefault::Expr)
            .or_else(|| serde.default.map(field_default))
            .or_else(|| container.default.clone().map(container_default));
        fields.push(ParsedField {
            ident,
            key,
            ty: field.ty.clone(),
            default,
            attrs: field_attrs,
        });
    }
    Ok(ParsedInput {
        ident: input.ident.clone(),
        attrs,
        fields,
    })
}

fn field_default(default: SerdeDefault) -> FieldDefault {
    match default {
        SerdeDefault::Trait => FieldDefault::Type,
        SerdeDefault::Function(path) => FieldDefault::Function(path),
    }
}

fn container_default(default: SerdeDefault) -> FieldDefault {
    match default {
        SerdeDefault::Trait => FieldDefault::Container,
        SerdeDefault::Function(path) => FieldDefault::ContainerFunction(path),
    }
}
