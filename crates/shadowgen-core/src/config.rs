//! Generator configuration types

use serde::{Deserialize, Serialize};

/// Naming literals used to derive generated class and member names.
///
/// Only [`NameResolver`](crate::NameResolver) and the builder read these, so a
/// different convention can be swapped in without touching classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    /// Prefix of the generated outer class (`Foo` -> `AutoValue_Foo`)
    #[serde(default = "default_generated_prefix")]
    pub generated_prefix: String,

    /// Simple name of the shadow class nested in the generated class
    #[serde(default = "default_shadow_suffix")]
    pub shadow_suffix: String,

    /// Character prepended to intermediate classes when generators chain
    #[serde(default = "default_chain_marker")]
    pub chain_marker: char,

    /// Name of the shadow-to-value conversion method
    #[serde(default = "default_reverse_conversion")]
    pub reverse_conversion: String,
}

fn default_generated_prefix() -> String {
    "AutoValue_".to_string()
}

fn default_shadow_suffix() -> String {
    "FirebaseValue".to_string()
}

fn default_chain_marker() -> char {
    '$'
}

fn default_reverse_conversion() -> String {
    "toAutoValue".to_string()
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            generated_prefix: default_generated_prefix(),
            shadow_suffix: default_shadow_suffix(),
            chain_marker: default_chain_marker(),
            reverse_conversion: default_reverse_conversion(),
        }
    }
}

/// Configuration for one generation session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub naming: NamingConvention,

    /// Class annotation that opts a value class into generation
    #[serde(default = "default_marker_annotation")]
    pub marker_annotation: MarkerAnnotation,
}

/// Qualified name of the opt-in annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerAnnotation(pub String);

impl Default for MarkerAnnotation {
    fn default() -> Self {
        default_marker_annotation()
    }
}

fn default_marker_annotation() -> MarkerAnnotation {
    MarkerAnnotation("me.mattlogan.auto.value.firebase.annotation.FirebaseValue".to_string())
}

impl GeneratorConfig {
    /// Create a configuration with the default conventions
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the naming convention
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// Replace the opt-in annotation
    pub fn with_marker_annotation(mut self, marker: impl Into<String>) -> Self {
        self.marker_annotation = MarkerAnnotation(marker.into());
        self
    }
}
