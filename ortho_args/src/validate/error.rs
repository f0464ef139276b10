//! Structured validation errors and their human-readable rendering.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// One failed check, located by the path of field names leading to it.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    loc: Vec<String>,
    message: String,
    input: Option<Value>,
}

impl FieldError {
    /// Creates an error for the field at `loc`.
    #[must_use]
    pub fn new<I, S>(loc: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            message: message.into(),
            input: None,
        }
    }

    /// Records the offending input value.
    #[must_use]
    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Path of field names; empty for model-level errors.
    #[must_use]
    pub fn loc(&self) -> &[String] {
        &self.loc
    }

    /// Description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Offending input, when known.
    #[must_use]
    pub const fn input(&self) -> Option<&Value> {
        self.input.as_ref()
    }

    /// Dotted location, or `__root__` for model-level errors.
    #[must_use]
    pub fn location(&self) -> String {
        if self.loc.is_empty() {
            "__root__".to_owned()
        } else {
            self.loc.join(".")
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n  {}", self.location(), self.message)?;
        if let Some(input) = &self.input {
            write!(f, " [input: {input}]")?;
        }
        Ok(())
    }
}

/// Collection of [`FieldError`]s produced during one validation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an error.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Number of errors in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no error was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<FieldError> for FieldErrors {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Validation failure for a whole model.
///
/// Renders as a header naming the model followed by one entry per failed
/// field:
///
/// ```text
/// 2 validation errors for Server
/// port
///   value is not a valid unsigned integer [input: "eighty"]
/// database.host
///   field required
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub struct ValidationError {
    model: String,
    errors: FieldErrors,
}

impl ValidationError {
    /// Creates a validation error for `model`.
    #[must_use]
    pub fn new(model: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            model: model.into(),
            errors,
        }
    }

    /// Convenience constructor for a single model-level failure.
    #[must_use]
    pub fn single(model: impl Into<String>, error: FieldError) -> Self {
        Self::new(model, std::iter::once(error).collect())
    }

    /// Name of the model that failed validation.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The individual failures.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors.len();
        let noun = if count == 1 { "error" } else { "errors" };
        write!(f, "{count} validation {noun} for {}", self.model)?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}
