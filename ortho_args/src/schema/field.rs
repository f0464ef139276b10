//! Introspected metadata for a single model field.

use serde::Serialize;
use serde_json::Value;

use super::annotation::{Annotation, TypeClass};
use super::ModelSchema;

/// Uniform view of one declared model field.
///
/// Descriptors are created once per field during introspection and are not
/// modified afterwards; the builder-style setters consume `self` and are only
/// used while a schema is being assembled.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    annotation: Annotation,
    default: Option<Value>,
    title: Option<String>,
    alias: Option<String>,
    description: Option<String>,
    short: Option<char>,
}

impl FieldDescriptor {
    /// Creates a descriptor with no default or display overrides.
    #[must_use]
    pub fn new(name: impl Into<String>, annotation: Annotation) -> Self {
        Self {
            name: name.into(),
            annotation,
            default: None,
            title: None,
            alias: None,
            description: None,
            short: None,
        }
    }

    /// Declares a default value.
    ///
    /// Values that cannot be represented as JSON are dropped with a warning,
    /// leaving the field required.
    #[must_use]
    pub fn with_default<T: Serialize>(mut self, value: T) -> Self {
        let serialised = serde_json::to_value(value).inspect_err(|err| {
            tracing::warn!(field = %self.name, error = %err, "default is not serialisable");
        });
        if let Ok(json) = serialised {
            self.default = Some(json);
        }
        self
    }

    /// Declares a default that is already in JSON form.
    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Overrides the display name used for flags, groups and commands.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the alias used as a fallback command name.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the help description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a short flag.
    #[must_use]
    pub const fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Field name as seen by deserialisation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared semantic type.
    #[must_use]
    pub const fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    /// Declared default value, if any.
    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Default shown in help and used when the field is absent.
    ///
    /// Optional fields without an explicit default fall back to `null`.
    #[must_use]
    pub fn effective_default(&self) -> Option<Value> {
        self.default
            .clone()
            .or_else(|| self.annotation.is_optional().then_some(Value::Null))
    }

    /// Title override.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Alias override.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Help description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Short flag.
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        self.short
    }

    /// A field is required when it has no default and is not `Optional`.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none() && !self.annotation.is_optional()
    }

    /// Title if set, otherwise the field name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Name a subcommand variant is selected by: title, alias, then name.
    #[must_use]
    pub fn command_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.alias.as_deref())
            .unwrap_or(&self.name)
    }

    /// See [`Annotation::is_a`].
    #[must_use]
    pub fn is_a(&self, targets: &[TypeClass]) -> bool {
        self.annotation.is_a(targets)
    }

    /// Returns `true` when the field holds a nested model.
    #[must_use]
    pub fn is_nested_model(&self) -> bool {
        self.is_a(&[TypeClass::Model])
    }

    /// Returns `true` when the field holds a nested model marked as a
    /// subcommand.
    #[must_use]
    pub fn is_subcommand(&self) -> bool {
        self.model_schema().is_some_and(|schema| schema.is_subcommand())
    }

    /// Introspects the nested model, if this field holds one.
    #[must_use]
    pub fn model_schema(&self) -> Option<ModelSchema> {
        self.annotation.model().map(super::ModelRef::schema)
    }
}
