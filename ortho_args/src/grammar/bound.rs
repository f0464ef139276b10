//! Processed models: a schema plus the casters synthesised for it.

use crate::coerce::Caster;
use crate::schema::ModelSchema;

/// A model schema augmented with its per-field casters.
///
/// Built once by the grammar builder and shared by every parse call. Nested
/// models (argument groups and subcommand variants alike) are bound
/// recursively and stored by field name.
#[derive(Clone, Debug)]
pub struct BoundModel {
    schema: ModelSchema,
    validators: Vec<(String, Caster)>,
    nested: Vec<(String, Self)>,
}

impl BoundModel {
    /// Attaches `validators` and bound nested models to `schema`.
    #[must_use]
    pub const fn with_validators(
        schema: ModelSchema,
        validators: Vec<(String, Caster)>,
        nested: Vec<(String, Self)>,
    ) -> Self {
        Self {
            schema,
            validators,
            nested,
        }
    }

    /// The underlying schema.
    #[must_use]
    pub const fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Caster registered for `field`, if any.
    #[must_use]
    pub fn caster(&self, field: &str) -> Option<&Caster> {
        self.validators
            .iter()
            .find_map(|(name, caster)| (name == field).then_some(caster))
    }

    /// Iterates the `(field, caster)` pairs in declaration order.
    pub fn validators(&self) -> impl Iterator<Item = (&str, &Caster)> {
        self.validators
            .iter()
            .map(|(name, caster)| (name.as_str(), caster))
    }

    /// Bound model for a nested field.
    #[must_use]
    pub fn nested(&self, field: &str) -> Option<&Self> {
        self.nested
            .iter()
            .find_map(|(name, model)| (name == field).then_some(model))
    }
}
