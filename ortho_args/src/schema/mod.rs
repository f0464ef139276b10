//! Field introspection for argument models.
//!
//! A model is any type implementing [`ArgModel`]; usually the implementation
//! is generated by `#[derive(ArgModel)]`. Introspection is a pure read of the
//! descriptors the model declares: [`ModelSchema::fields`] yields them in
//! declaration order and can be restarted by cloning the iterator.
//!
//! # Example
//!
//! ```rust
//! use ortho_args::{Annotate, ArgModel, FieldDescriptor, ModelSchema};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Greet {
//!     name: String,
//!     times: u8,
//! }
//!
//! impl ArgModel for Greet {
//!     fn schema() -> ModelSchema {
//!         ModelSchema::new("Greet")
//!             .field(FieldDescriptor::new("name", String::annotation()))
//!             .field(FieldDescriptor::new("times", u8::annotation()).with_default(1_u8))
//!     }
//! }
//!
//! let schema = Greet::schema();
//! let names: Vec<_> = schema.fields().map(|f| f.name()).collect();
//! assert_eq!(names, ["name", "times"]);
//! ```

mod annotation;
mod field;

pub use annotation::{Annotate, Annotation, ModelRef, ScalarKind, ScalarType, TypeClass};
pub use field::FieldDescriptor;

use serde::de::DeserializeOwned;

use crate::validate::ValidationError;

/// Trait implemented by types that can be parsed from the command line.
pub trait ArgModel: DeserializeOwned {
    /// Describes the fields of the model.
    fn schema() -> ModelSchema;

    /// Model-level checks run after every field has been validated.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing each failed check.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Declarative description of one model.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSchema {
    name: String,
    description: Option<String>,
    subcommand: bool,
    fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    /// Creates an empty, non-subcommand schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            subcommand: false,
            fields: Vec::new(),
        }
    }

    /// Sets the model description, used as the command `about` text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the model as a subcommand variant.
    #[must_use]
    pub const fn subcommand(mut self, subcommand: bool) -> Self {
        self.subcommand = subcommand;
        self
    }

    /// Appends a field. Duplicate flag names are reported when the grammar
    /// is built, not here.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Model name used in validation messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model description.
    #[must_use]
    pub fn about(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `true` when the model is a subcommand variant.
    #[must_use]
    pub const fn is_subcommand(&self) -> bool {
        self.subcommand
    }

    /// Iterates the fields in declaration order.
    pub fn fields(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns `true` when any field holds a nested model.
    #[must_use]
    pub fn has_nested_models(&self) -> bool {
        self.fields.iter().any(FieldDescriptor::is_nested_model)
    }
}
