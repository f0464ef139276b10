//! Validation of the rebuilt argument tree against the bound model.
//!
//! Validation runs in two passes. The schema pass walks the bound model: it
//! applies each field's caster, fills declared defaults, reports missing
//! required fields and checks every value against its annotation, collecting
//! all failures rather than stopping at the first. When that pass is clean
//! the tree is deserialised into the model type through `figment`, and the
//! model's own [`ArgModel::validate`] hook runs last.

mod error;

pub use error::{FieldError, FieldErrors, ValidationError};

use figment::{Figment, providers::Serialized};
use serde_json::{Map, Value};
use tracing::debug;

use crate::grammar::{BoundModel, Submodel};
use crate::schema::{Annotation, ArgModel, FieldDescriptor, ScalarKind, ScalarType};

/// Validates `tree` against `model` and builds the model value.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every field that failed, or the
/// error raised by the model's own validation hook.
pub fn validate_tree<T: ArgModel>(
    model: &BoundModel,
    tree: Map<String, Value>,
) -> Result<T, ValidationError> {
    validate_parsed(model, &[], tree)
}

/// Validates each registered argument group first, then the root with the
/// validated branches in place.
pub(crate) fn validate_parsed<T: ArgModel>(
    model: &BoundModel,
    submodels: &[Submodel],
    mut tree: Map<String, Value>,
) -> Result<T, ValidationError> {
    let schema = model.schema();
    let mut errors = FieldErrors::new();
    let mut done = Vec::new();
    for submodel in submodels {
        let Some(field) = schema.get(&submodel.field) else {
            continue;
        };
        debug!(group = %submodel.group, "validating argument group");
        let raw = tree.remove(field.name());
        let loc = [field.name().to_owned()];
        if let Some(value) = check_field(model, field, raw, &loc, &mut errors) {
            tree.insert(field.name().to_owned(), value);
        }
        done.push(field.name());
    }

    let root = check_model(model, tree, &[], &done, &mut errors);
    if !errors.is_empty() {
        debug!(model = schema.name(), errors = errors.len(), "validation failed");
        return Err(ValidationError::new(schema.name(), errors));
    }
    let value: T = extract(schema.name(), root)?;
    value.validate()?;
    Ok(value)
}

/// Deserialises a checked tree through `figment`.
fn extract<T: ArgModel>(model: &str, tree: Map<String, Value>) -> Result<T, ValidationError> {
    Figment::from(Serialized::defaults(Value::Object(tree)))
        .extract()
        .map_err(|err| {
            let errors = err
                .into_iter()
                .map(|e| FieldError::new(e.path, e.kind.to_string()))
                .collect();
            ValidationError::new(model, errors)
        })
}

fn check_model(
    model: &BoundModel,
    mut input: Map<String, Value>,
    loc: &[String],
    done: &[&str],
    errors: &mut FieldErrors,
) -> Map<String, Value> {
    let mut output = Map::new();
    for field in model.schema().fields() {
        let raw = input.remove(field.name());
        if done.contains(&field.name()) {
            if let Some(value) = raw {
                output.insert(field.name().to_owned(), value);
            }
            continue;
        }
        let field_loc = extend(loc, field.name());
        if let Some(value) = check_field(model, field, raw, &field_loc, errors) {
            output.insert(field.name().to_owned(), value);
        }
    }
    output
}

/// Casts, defaults and checks one field. Returns `None` when the field has
/// no value at all, which is always accompanied by an error.
fn check_field(
    parent: &BoundModel,
    field: &FieldDescriptor,
    raw: Option<Value>,
    loc: &[String],
    errors: &mut FieldErrors,
) -> Option<Value> {
    let caster = parent.caster(field.name());
    let cast = raw
        .map(|input| caster.into_iter().fold(input, |current, c| c.apply(current)))
        .filter(|value| !value.is_null());
    let nested = parent.nested(field.name());
    let Some(value) = cast else {
        return field
            .effective_default()
            .or_else(|| absent_value(field, nested, loc, errors));
    };
    Some(check_value(field.annotation(), nested, value, loc, errors))
}

/// Value for a field that was neither supplied nor defaulted.
///
/// An argument group left untouched is pruned from the tree, so a required
/// group is rebuilt from its own field defaults; its missing required fields
/// are reported at their nested locations.
fn absent_value(
    field: &FieldDescriptor,
    nested: Option<&BoundModel>,
    loc: &[String],
    errors: &mut FieldErrors,
) -> Option<Value> {
    match (field.annotation(), nested) {
        (Annotation::Model(_), Some(group)) if !group.schema().is_subcommand() => Some(
            Value::Object(check_model(group, Map::new(), loc, &[], errors)),
        ),
        _ => {
            errors.push(FieldError::new(loc.iter().cloned(), "field required"));
            None
        }
    }
}

fn check_value(
    annotation: &Annotation,
    nested: Option<&BoundModel>,
    input: Value,
    loc: &[String],
    errors: &mut FieldErrors,
) -> Value {
    match (annotation, input, nested) {
        (Annotation::Optional(_), Value::Null, _) => Value::Null,
        (Annotation::Optional(inner), value, _) => check_value(inner, nested, value, loc, errors),
        (Annotation::Sequence(inner), Value::Array(items), _) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    check_value(inner, nested, item, &extend(loc, &index.to_string()), errors)
                })
                .collect(),
        ),
        (Annotation::Model(_), Value::Object(map), Some(bound)) => {
            Value::Object(check_model(bound, map, loc, &[], errors))
        }
        (Annotation::Model(_), Value::Object(map), None) => Value::Object(map),
        (Annotation::Scalar(scalar), value, _) => {
            if let Some(message) = check_scalar(*scalar, &value) {
                errors.push(FieldError::new(loc.iter().cloned(), message).with_input(value.clone()));
            }
            value
        }
        (Annotation::Sequence(_), value, _) => {
            errors.push(
                FieldError::new(loc.iter().cloned(), "value is not a valid list")
                    .with_input(value.clone()),
            );
            value
        }
        (Annotation::Model(model), value, _) => {
            errors.push(
                FieldError::new(
                    loc.iter().cloned(),
                    format!("value is not a valid {}", model.name()),
                )
                .with_input(value.clone()),
            );
            value
        }
    }
}

/// Returns a message when `value` does not fit `scalar`.
fn check_scalar(scalar: ScalarType, value: &Value) -> Option<String> {
    let fits = match scalar.kind() {
        ScalarKind::Bool => value.is_boolean(),
        ScalarKind::Int => value.is_i64() || value.is_u64(),
        ScalarKind::UInt => value.is_u64(),
        ScalarKind::Float => value.is_number(),
        ScalarKind::Char => value.as_str().is_some_and(|text| text.chars().count() == 1),
        ScalarKind::Str | ScalarKind::Path => value.is_string(),
        ScalarKind::Choice(choices) => value.as_str().is_some_and(|text| choices.contains(&text)),
        ScalarKind::Json => true,
    };
    if fits {
        return None;
    }
    Some(match scalar.kind() {
        ScalarKind::Bool => "value could not be parsed to a boolean".to_owned(),
        ScalarKind::Int => "value is not a valid integer".to_owned(),
        ScalarKind::UInt => "value is not a valid unsigned integer".to_owned(),
        ScalarKind::Float if is_non_finite(value) => "value is not a finite float".to_owned(),
        ScalarKind::Float => "value is not a valid float".to_owned(),
        ScalarKind::Char => "ensure this value has exactly 1 character".to_owned(),
        ScalarKind::Choice(choices) => format!(
            "value is not a valid enumeration member; permitted: {}",
            choices
                .iter()
                .map(|choice| format!("'{choice}'"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        ScalarKind::Str | ScalarKind::Path | ScalarKind::Json => {
            format!("{} type expected", scalar.name())
        }
    })
}

/// Text such as `inf` or `NaN` parses as a float but has no JSON form.
fn is_non_finite(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|text| text.trim().parse::<f64>().ok())
        .is_some_and(|number| !number.is_finite())
}

fn extend(loc: &[String], name: &str) -> Vec<String> {
    let mut extended = loc.to_vec();
    extended.push(name.to_owned());
    extended
}
