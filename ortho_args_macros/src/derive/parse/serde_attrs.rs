//! Serde attribute parsing helpers.
//!
//! Parsed values are rebuilt into a tree keyed by the names serde expects
//! when deserialising the model, so field keys must honour
//! `#[serde(rename = "...")]` and `#[serde(rename_all = "...")]`. Serde
//! defaults become field defaults, and skipped fields never reach the
//! command line.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident, LitStr, Token};

use super::{discard_unknown, for_each_meta};

/// Supported `#[serde(rename_all = "...")]` rules for struct fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(syn::Error::new(
                value.span(),
                format!(
                    "unsupported serde rename_all value '{other}'; expected one of \
\"lowercase\", \"UPPERCASE\", \"PascalCase\", \"camelCase\", \"snake_case\", \
\"SCREAMING_SNAKE_CASE\", \"kebab-case\", or \"SCREAMING-KEBAB-CASE\""
                ),
            )),
        }
    }

    pub(crate) fn apply(self, field_name: &str) -> String {
        match self {
            Self::Lower => field_name.to_ascii_lowercase(),
            Self::Upper => field_name.to_ascii_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::Snake => field_name.to_snake_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
            Self::ScreamingKebab => field_name.to_shouty_kebab_case(),
        }
    }
}

/// Where serde finds a value for a missing field.
#[derive(Clone)]
pub(crate) enum SerdeDefault {
    /// `#[serde(default)]`: the type's `Default` implementation.
    Trait,
    /// `#[serde(default = "path")]`: a function returning the value.
    Function(syn::Path),
}

/// Container-level serde settings that affect field descriptors.
#[derive(Default)]
pub(crate) struct SerdeContainer {
    pub rename_all: Option<SerdeRenameAll>,
    pub default: Option<SerdeDefault>,
}

/// Field-level serde settings that affect field descriptors.
#[derive(Default)]
pub(crate) struct SerdeField {
    pub rename: Option<String>,
    pub default: Option<SerdeDefault>,
    pub skip: bool,
    pub flatten: bool,
}

impl SerdeField {
    /// The key serde reads this field from.
    pub(crate) fn key(&self, ident: &Ident, rename_all: Option<SerdeRenameAll>) -> String {
        let name = ident.unraw().to_string();
        match (&self.rename, rename_all) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(&name),
            (None, None) => name,
        }
    }
}

/// Parses `#[serde(...)]` on the struct itself.
pub(crate) fn serde_container(attrs: &[Attribute]) -> syn::Result<SerdeContainer> {
    let mut out = SerdeContainer::default();
    for_each_meta(attrs, "serde", |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename_all") => {
                if let Some(rule) = deserialize_name(meta)? {
                    out.rename_all = Some(SerdeRenameAll::parse(&rule)?);
                }
                Ok(())
            }
            Some("default") => {
                out.default = Some(serde_default(meta)?);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Parses `#[serde(...)]` on one field.
pub(crate) fn serde_field(attrs: &[Attribute]) -> syn::Result<SerdeField> {
    let mut out = SerdeField::default();
    for_each_meta(attrs, "serde", |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename") => {
                if let Some(name) = deserialize_name(meta)? {
                    out.rename = Some(name.value());
                }
                Ok(())
            }
            Some("default") => {
                out.default = Some(serde_default(meta)?);
                Ok(())
            }
            Some("skip" | "skip_deserializing") => {
                out.skip = true;
                Ok(())
            }
            Some("flatten") => {
                out.flatten = true;
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Reads `key = "..."` or the `deserialize` half of
/// `key(serialize = "...", deserialize = "...")`.
fn deserialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }
    let mut out = None;
    if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("deserialize") {
                out = Some(nested.value()?.parse()?);
                return Ok(());
            }
            discard_unknown(&nested)
        })?;
    }
    Ok(out)
}

fn serde_default(meta: &ParseNestedMeta) -> syn::Result<SerdeDefault> {
    if meta.input.peek(Token![=]) {
        let function: LitStr = meta.value()?.parse()?;
        return Ok(SerdeDefault::Function(function.parse()?));
    }
    Ok(SerdeDefault::Trait)
}
