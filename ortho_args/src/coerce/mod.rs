//! Best-effort string coercion for scalar fields.
//!
//! The grammar collects every flag value as raw text. Before validation each
//! field whose type needs more than text gets a [`Caster`]: it converts the
//! string when it can and otherwise hands the raw string on untouched, so the
//! validator reports the problem against the field rather than as a bare
//! parse failure.

use std::fmt;

use serde_json::{Number, Value};

use crate::schema::{Annotation, FieldDescriptor, ScalarKind, ScalarType};

/// Prefix for caster names; keeps them apart from user validators.
const CASTER_PREFIX: &str = "__ortho_args_";

/// String-to-value converter for one field.
#[derive(Clone, PartialEq, Eq)]
pub struct Caster {
    name: String,
    kind: ScalarKind,
    sequence: bool,
}

impl Caster {
    /// Builds the caster for `field`, or `None` when the field needs none.
    ///
    /// Text, character and path scalars are handled natively by the parser;
    /// nested models are validated branch by branch instead.
    #[must_use]
    pub fn for_field(field: &FieldDescriptor) -> Option<Self> {
        let sequence = matches!(field.annotation().origin(), Annotation::Sequence(_));
        let scalar = field.annotation().scalar()?;
        needs_cast(scalar).then(|| Self {
            name: caster_name(field.name()),
            kind: scalar.kind(),
            sequence,
        })
    }

    /// Name derived from the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the caster.
    ///
    /// Sequences are cast element by element; any other non-text input is
    /// returned unchanged.
    #[must_use]
    pub fn apply(&self, value: Value) -> Value {
        match value {
            Value::Array(items) if self.sequence => {
                Value::Array(items.into_iter().map(|item| self.apply_one(item)).collect())
            }
            other => self.apply_one(other),
        }
    }

    fn apply_one(&self, value: Value) -> Value {
        let Value::String(raw) = value else {
            return value;
        };
        if raw.is_empty() {
            return Value::Null;
        }
        cast(self.kind, &raw).unwrap_or(Value::String(raw))
    }
}

impl fmt::Debug for Caster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Caster").field(&self.name).finish()
    }
}

/// Deterministic caster name for a field.
#[must_use]
pub fn caster_name(field: &str) -> String {
    format!("{CASTER_PREFIX}{field}")
}

const fn needs_cast(scalar: ScalarType) -> bool {
    !matches!(
        scalar.kind(),
        ScalarKind::Str | ScalarKind::Char | ScalarKind::Path
    )
}

fn cast(kind: ScalarKind, raw: &str) -> Option<Value> {
    let text = raw.trim();
    match kind {
        ScalarKind::Int => text.parse::<i64>().ok().map(Value::from),
        ScalarKind::UInt => text.parse::<u64>().ok().map(Value::from),
        ScalarKind::Float => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ScalarKind::Bool => parse_bool(text).map(Value::Bool),
        ScalarKind::Choice(choices) => choices
            .iter()
            .find(|choice| choice.eq_ignore_ascii_case(text))
            .map(|choice| Value::String((*choice).to_owned())),
        ScalarKind::Json => serde_json::from_str(text).ok(),
        ScalarKind::Str | ScalarKind::Char | ScalarKind::Path => None,
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
