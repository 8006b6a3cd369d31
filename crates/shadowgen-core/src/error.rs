//! Error types for shadow class generation

use std::fmt;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Why a property type was rejected by schema validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedReason {
    /// `List<List<..>>` and friends
    ListElementParameterized,
    /// `Map<K, V>` where `K` is not a primitive, boxed primitive or String
    NonPrimitiveMapKey,
    /// `Map<K, List<..>>` and friends
    MapValueParameterized,
    /// A parameterized container other than `List` or `Map`
    UnsupportedContainer,
}

impl UnsupportedReason {
    pub fn message(&self) -> &'static str {
        match self {
            UnsupportedReason::ListElementParameterized => {
                "parameterized types not allowed as List element type"
            }
            UnsupportedReason::NonPrimitiveMapKey => {
                "non-primitive map key: only primitive-like types allowed as Map keys"
            }
            UnsupportedReason::MapValueParameterized => {
                "parameterized types not allowed as Map value type"
            }
            UnsupportedReason::UnsupportedContainer => {
                "List and Map are the only supported container types"
            }
        }
    }
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error type for schema validation and shadow class generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A property type has a shape the generator cannot mirror
    #[error("type is not supported: {type_description} (property `{property}`): {reason}")]
    UnsupportedType {
        property: String,
        type_description: String,
        reason: UnsupportedReason,
    },

    /// A generated class name could not be derived unambiguously
    #[error("ambiguous generated name for `{name}`: {reason}")]
    AmbiguousName { name: String, reason: String },

    /// The same property name appears twice in one schema
    #[error("duplicate property `{property}` in schema")]
    DuplicateProperty { property: String },

    /// A type string could not be parsed
    #[error("invalid type `{text}`: {reason}")]
    TypeSyntax { text: String, reason: String },

    /// A property name or accessor cannot be spelled in generated Java
    #[error("invalid property `{property}`: {reason}")]
    InvalidProperty { property: String, reason: String },
}

impl GenerationError {
    /// Returns a stable numeric code for the error kind
    pub fn error_code(&self) -> u32 {
        match self {
            GenerationError::UnsupportedType { .. } => 1,
            GenerationError::AmbiguousName { .. } => 2,
            GenerationError::DuplicateProperty { .. } => 3,
            GenerationError::TypeSyntax { .. } => 4,
            GenerationError::InvalidProperty { .. } => 5,
        }
    }

    pub(crate) fn ambiguous(name: impl fmt::Display, reason: impl Into<String>) -> Self {
        GenerationError::AmbiguousName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn type_syntax(text: &str, reason: impl Into<String>) -> Self {
        GenerationError::TypeSyntax {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
