//! Code generation for `#[derive(ArgModel)]`.

use proc_macro2::TokenStream;
use quote::quote;

use super::crate_path;
use super::parse::{FieldDefault, ParsedField, ParsedInput};

/// Generates the `ArgModel` and `Annotate` implementations.
pub(crate) fn model_impls(input: &ParsedInput) -> TokenStream {
    let krate = crate_path::resolve(input.attrs.crate_path.as_ref());
    let ident = &input.ident;
    let name = input
        .attrs
        .name
        .clone()
        .unwrap_or_else(|| ident.to_string());
    let description = input
        .attrs
        .description
        .as_ref()
        .map(|text| quote! { .description(#text) });
    let subcommand = input.attrs.subcommand.then(|| quote! { .subcommand(true) });
    let fields = input.fields.iter().map(|field| field_descriptor(&krate, field));
    let validate = input.attrs.validate.as_ref().map(|path| {
        quote! {
            fn validate(&self) -> ::core::result::Result<(), #krate::ValidationError> {
                #path(self)
            }
        }
    });

    quote! {
        #[automatically_derived]
        impl #krate::ArgModel for #ident {
            fn schema() -> #krate::ModelSchema {
                #krate::ModelSchema::new(#name)
                    #description
                    #subcommand
                    #( .field(#fields) )*
            }

            #validate
        }

        #[automatically_derived]
        impl #krate::Annotate for #ident {
            fn annotation() -> #krate::Annotation {
                #krate::Annotation::Model(#krate::ModelRef::new(
                    #name,
                    <Self as #krate::ArgModel>::schema,
                ))
            }
        }
    }
}

fn field_descriptor(krate: &TokenStream, field: &ParsedField) -> TokenStream {
    let key = &field.key;
    let ty = &field.ty;
    let ident = &field.ident;
    let default = field.default.as_ref().map(|default| {
        let value = match default {
            FieldDefault::Expr(expr) => quote! { #expr },
            FieldDefault::Type => quote! { <#ty as ::core::default::Default>::default() },
            FieldDefault::Function(path) => quote! { #path() },
            FieldDefault::Container => {
                quote! { <Self as ::core::default::Default>::default().#ident }
            }
            FieldDefault::ContainerFunction(path) => quote! { #path().#ident },
        };
        quote! { .with_default(#value) }
    });
    let title = field.attrs.title.as_ref().map(|title| quote! { .with_title(#title) });
    let alias = field.attrs.alias.as_ref().map(|alias| quote! { .with_alias(#alias) });
    let description = field
        .attrs
        .description
        .as_ref()
        .map(|text| quote! { .with_description(#text) });
    let short = field.attrs.short.map(|short| quote! { .with_short(#short) });
    quote! {
        #krate::FieldDescriptor::new(#key, <#ty as #krate::Annotate>::annotation())
            #default
            #title
            #alias
            #description
            #short
    }
}
