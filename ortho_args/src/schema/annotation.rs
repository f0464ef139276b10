//! Semantic type annotations attached to model fields.
//!
//! An [`Annotation`] records just enough about a Rust type for the grammar
//! builder to choose a flag shape and for the validator to check the value it
//! receives. Scalars carry their Rust type name so metavars can be derived
//! from it; nested models are referenced through [`ModelRef`] rather than
//! owned, so a schema never embeds another schema by value.

use std::fmt;
use std::path::PathBuf;

use super::{ArgModel, ModelSchema};

/// Category of a scalar leaf value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ScalarKind {
    /// `true` / `false`.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// Floating point number.
    Float,
    /// Single character.
    Char,
    /// Free text.
    Str,
    /// Filesystem path.
    Path,
    /// One of a fixed set of names.
    Choice(&'static [&'static str]),
    /// Arbitrary JSON document.
    Json,
}

/// A scalar leaf type: its kind plus the Rust type name it came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScalarType {
    kind: ScalarKind,
    name: &'static str,
}

impl ScalarType {
    /// Creates a scalar type with an explicit display name.
    #[must_use]
    pub const fn new(kind: ScalarKind, name: &'static str) -> Self {
        Self { kind, name }
    }

    /// Returns the scalar category.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Returns the Rust type name, e.g. `u16` or `PathBuf`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Reference to a nested model schema.
///
/// The schema is produced on demand by calling the stored constructor, which
/// keeps nested models separately defined and avoids recursive ownership.
#[derive(Clone, Copy)]
pub struct ModelRef {
    name: &'static str,
    schema: fn() -> ModelSchema,
}

impl ModelRef {
    /// Creates a reference to the schema of `T`.
    #[must_use]
    pub fn of<T: ArgModel>() -> Self {
        Self {
            name: short_type_name(std::any::type_name::<T>()),
            schema: T::schema,
        }
    }

    /// Creates a reference from a name and schema constructor.
    #[must_use]
    pub const fn new(name: &'static str, schema: fn() -> ModelSchema) -> Self {
        Self { name, schema }
    }

    /// Returns the model type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Introspects the referenced model.
    #[must_use]
    pub fn schema(&self) -> ModelSchema {
        (self.schema)()
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.name).finish()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ModelRef {}

/// Semantic type of a model field.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Annotation {
    /// A single scalar value.
    Scalar(ScalarType),
    /// A value that may be absent (`Option<T>`).
    Optional(Box<Annotation>),
    /// A homogeneous sequence (`Vec<T>`).
    Sequence(Box<Annotation>),
    /// A nested model.
    Model(ModelRef),
}

/// Classes a field annotation can be tested against with
/// [`FieldDescriptor::is_a`](super::FieldDescriptor::is_a).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum TypeClass {
    /// Boolean scalars.
    Bool,
    /// Signed or unsigned integers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Any number; contains `Integer` and `Float`.
    Number,
    /// Text-like scalars: strings, characters and paths.
    Text,
    /// Enumerated choices.
    Choice,
    /// JSON documents.
    Json,
    /// Any scalar at all.
    Scalar,
    /// Sequences.
    Sequence,
    /// Any nested model.
    Model,
    /// One specific nested model, by type name.
    NamedModel(&'static str),
}

impl TypeClass {
    /// Returns `true` when `self` is a family that contains `class`.
    const fn contains(self, class: Self) -> bool {
        match self {
            Self::Number => matches!(class, Self::Integer | Self::Float),
            Self::Scalar => matches!(
                class,
                Self::Bool | Self::Integer | Self::Float | Self::Text | Self::Choice | Self::Json
            ),
            _ => false,
        }
    }
}

impl Annotation {
    /// Builds a choice annotation for enum-like types.
    ///
    /// ```rust
    /// use ortho_args::{Annotation, TypeClass};
    ///
    /// let level = Annotation::choice("Level", &["debug", "info"]);
    /// assert!(level.is_a(&[TypeClass::Choice]));
    /// ```
    #[must_use]
    pub const fn choice(name: &'static str, choices: &'static [&'static str]) -> Self {
        Self::Scalar(ScalarType::new(ScalarKind::Choice(choices), name))
    }

    /// Returns the annotation with every `Optional` wrapper removed.
    ///
    /// Containers are not unwrapped: the origin of `Vec<T>` is the sequence.
    #[must_use]
    pub fn origin(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.origin(),
            other => other,
        }
    }

    /// Returns `true` when the outermost layer is `Optional`.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the nested model reference when the origin is a model.
    #[must_use]
    pub fn model(&self) -> Option<&ModelRef> {
        match self.origin() {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Returns the scalar type of the origin, looking through one sequence.
    #[must_use]
    pub fn scalar(&self) -> Option<ScalarType> {
        match self.origin() {
            Self::Scalar(scalar) => Some(*scalar),
            Self::Sequence(inner) => match inner.origin() {
                Self::Scalar(scalar) => Some(*scalar),
                _ => None,
            },
            _ => None,
        }
    }

    /// Class of the origin, used by [`Self::is_a`].
    fn class(&self) -> TypeClass {
        match self.origin() {
            Self::Scalar(scalar) => match scalar.kind() {
                ScalarKind::Bool => TypeClass::Bool,
                ScalarKind::Int | ScalarKind::UInt => TypeClass::Integer,
                ScalarKind::Float => TypeClass::Float,
                ScalarKind::Char | ScalarKind::Str | ScalarKind::Path => TypeClass::Text,
                ScalarKind::Choice(_) => TypeClass::Choice,
                ScalarKind::Json => TypeClass::Json,
            },
            Self::Sequence(_) => TypeClass::Sequence,
            Self::Model(_) => TypeClass::Model,
            Self::Optional(inner) => inner.class(),
        }
    }

    /// Checks whether the annotation *is* one of `targets`.
    ///
    /// Targets are tried by identity first, then by family membership, then
    /// by refinement to a specific model. A sequence never matches a model
    /// target, whatever its element type.
    #[must_use]
    pub fn is_a(&self, targets: &[TypeClass]) -> bool {
        let class = self.class();
        let identity = targets.contains(&class);
        let member = || targets.iter().any(|target| target.contains(class));
        let refined = || match (self.origin(), class) {
            (Self::Model(model), TypeClass::Model) => targets
                .iter()
                .any(|target| matches!(target, TypeClass::NamedModel(name) if *name == model.name())),
            _ => false,
        };
        identity || member() || refined()
    }

    /// Name used for the flag metavar: the inner type for containers.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(scalar) => scalar.name(),
            Self::Optional(inner) | Self::Sequence(inner) => inner.type_name(),
            Self::Model(model) => model.name(),
        }
    }
}

/// Strips the module path from a `std::any::type_name` result.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Maps a Rust type onto its [`Annotation`].
///
/// The derive macro implements this for every model; scalar implementations
/// are provided here. Enum-like types usually implement it by returning
/// [`Annotation::choice`].
pub trait Annotate {
    /// Returns the annotation describing `Self`.
    fn annotation() -> Annotation;
}

macro_rules! annotate_scalar {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Annotate for $ty {
                fn annotation() -> Annotation {
                    Annotation::Scalar(ScalarType::new($kind, stringify!($ty)))
                }
            }
        )+
    };
}

annotate_scalar!(ScalarKind::Int => i8, i16, i32, i64, i128, isize);
annotate_scalar!(ScalarKind::UInt => u8, u16, u32, u64, u128, usize);
annotate_scalar!(ScalarKind::Float => f32, f64);
annotate_scalar!(ScalarKind::Bool => bool);
annotate_scalar!(ScalarKind::Char => char);
annotate_scalar!(ScalarKind::Str => String);
annotate_scalar!(ScalarKind::Path => PathBuf);

impl Annotate for serde_json::Value {
    fn annotation() -> Annotation {
        Annotation::Scalar(ScalarType::new(ScalarKind::Json, "json"))
    }
}

impl<T: Annotate> Annotate for Option<T> {
    fn annotation() -> Annotation {
        Annotation::Optional(Box::new(T::annotation()))
    }
}

impl<T: Annotate> Annotate for Vec<T> {
    fn annotation() -> Annotation {
        Annotation::Sequence(Box::new(T::annotation()))
    }
}
