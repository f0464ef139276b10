//! Flag names, metavars and help text derived from field descriptors.

use serde_json::Value;

use crate::schema::FieldDescriptor;

/// Long flag name without the leading dashes: title or name, kebab-cased.
pub(crate) fn flag_name(field: &FieldDescriptor) -> String {
    field.display_name().replace('_', "-")
}

/// Long flag name of the inverted boolean form.
pub(crate) fn inverted_flag_name(field: &FieldDescriptor) -> String {
    format!("no-{}", flag_name(field))
}

/// Argument group heading for a nested model field.
pub(crate) fn group_name(field: &FieldDescriptor) -> String {
    field.display_name().to_uppercase()
}

/// Value placeholder shown in usage: the (inner) type name, upper-cased.
pub(crate) fn metavar(field: &FieldDescriptor) -> String {
    field.annotation().type_name().to_uppercase()
}

/// Description followed by `(default: <value>)` for optional fields.
pub(crate) fn help_text(field: &FieldDescriptor) -> String {
    let default = (!field.is_required())
        .then(|| field.effective_default())
        .flatten()
        .map(|value| format!("(default: {})", display_default(&value)));
    field
        .description()
        .map(str::to_owned)
        .into_iter()
        .chain(default)
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_default(value: &Value) -> String {
    match value {
        Value::Null => "none".to_owned(),
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(display_default).collect();
            format!("[{}]", inner.join(", "))
        }
        other => other.to_string(),
    }
}
