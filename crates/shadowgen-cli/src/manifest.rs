//! Schema manifest parsing and validation
//!
//! A `shadowgen.toml` manifest describes the value classes of one
//! compilation run:
//!
//! ```toml
//! [generator]
//! marker_annotation = "me.mattlogan.auto.value.firebase.annotation.FirebaseValue"
//!
//! [[value]]
//! name = "com.example.Order"
//! annotations = [
//!     "me.mattlogan.auto.value.firebase.annotation.FirebaseValue",
//!     "com.google.firebase.database.IgnoreExtraProperties",
//! ]
//!
//! [[value.property]]
//! name = "id"
//! type = "String"
//!
//! [[value.property]]
//! name = "tags"
//! type = "List<Tag>"
//! ```
//!
//! Property types use Java syntax; unqualified class names resolve in the
//! value class's package.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shadowgen_core::naming::is_java_identifier;
use shadowgen_core::{
    Annotation, GenerationResult, GeneratorConfig, Property, PropertySchema, QualifiedName,
    TypeDescriptor, ValueClass,
};
use std::collections::HashSet;
use std::path::Path;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "shadowgen.toml";

/// shadowgen.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default, rename = "value")]
    pub values: Vec<ValueDefinition>,
}

/// One `[[value]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDefinition {
    /// Qualified name of the value class
    pub name: String,

    /// Simple name of the class being generated, when chained behind other generators
    #[serde(default)]
    pub generated: Option<String>,

    /// Simple name of the superclass, when chained behind other generators
    #[serde(default)]
    pub extends: Option<String>,

    #[serde(default = "default_final", rename = "final")]
    pub is_final: bool,

    #[serde(default)]
    pub annotations: Vec<AnnotationDefinition>,

    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyDefinition>,
}

fn default_final() -> bool {
    true
}

/// One `[[value.property]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub accessor: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDefinition>,
}

/// An annotation: a bare qualified name, or a table with members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationDefinition {
    Marker(String),
    WithMembers {
        #[serde(rename = "type")]
        type_name: String,
        /// Member name to Java source text, in declaration order
        #[serde(default)]
        members: toml::Table,
    },
}

impl AnnotationDefinition {
    pub fn to_annotation(&self) -> Annotation {
        match self {
            AnnotationDefinition::Marker(type_name) => {
                Annotation::marker(QualifiedName::parse(type_name))
            }
            AnnotationDefinition::WithMembers { type_name, members } => members.iter().fold(
                Annotation::marker(QualifiedName::parse(type_name)),
                |annotation, (name, value)| {
                    let source = value.as_str().map(str::to_string);
                    annotation.with_member(name, source.unwrap_or_else(|| value.to_string()))
                },
            ),
        }
    }
}

impl ValueDefinition {
    /// Build the value class this entry describes
    pub fn to_value_class(&self) -> GenerationResult<ValueClass> {
        let name = QualifiedName::parse(&self.name);
        let properties = self
            .properties
            .iter()
            .map(|p| p.to_property(name.package()))
            .collect::<GenerationResult<Vec<_>>>()?;

        let mut value = ValueClass::new(name, PropertySchema::new(properties)?)
            .with_final(self.is_final);
        if let Some(generated) = &self.generated {
            value = value.with_generated_name(generated);
        }
        if let Some(extends) = &self.extends {
            value = value.with_extends(extends);
        }
        for annotation in &self.annotations {
            value = value.with_annotation(annotation.to_annotation());
        }
        Ok(value)
    }
}

impl PropertyDefinition {
    fn to_property(&self, package: &str) -> GenerationResult<Property> {
        let mut property = Property::new(&self.name, TypeDescriptor::parse(&self.ty, package)?);
        if let Some(accessor) = &self.accessor {
            property = property.with_accessor(accessor);
        }
        for annotation in &self.annotations {
            property = property.with_annotation(annotation.to_annotation());
        }
        Ok(property)
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();

        for value in &self.values {
            if value.name.is_empty() {
                anyhow::bail!("Value class name cannot be empty");
            }

            if !names.insert(value.name.as_str()) {
                anyhow::bail!("Value class '{}' is declared more than once", value.name);
            }

            for property in &value.properties {
                if property.name.is_empty() {
                    anyhow::bail!("Property name cannot be empty in value class '{}'", value.name);
                }
                if !is_java_identifier(&property.name) {
                    anyhow::bail!(
                        "Property '{}' of value class '{}' is not a valid Java identifier",
                        property.name,
                        value.name
                    );
                }
                if let Some(accessor) = property.accessor.as_deref() {
                    if !is_java_identifier(accessor) {
                        anyhow::bail!(
                            "Accessor '{}' of property '{}.{}' is not a valid Java identifier",
                            accessor,
                            value.name,
                            property.name
                        );
                    }
                }
                if property.ty.trim().is_empty() {
                    anyhow::bail!(
                        "Property '{}' of value class '{}' has no type",
                        property.name,
                        value.name
                    );
                }
            }
        }

        if self.generator.marker_annotation.0.is_empty() {
            anyhow::bail!("Marker annotation cannot be empty");
        }

        Ok(())
    }

    /// Value classes described by the manifest, each built independently
    pub fn value_classes(&self) -> Vec<(&str, GenerationResult<ValueClass>)> {
        self.values
            .iter()
            .map(|v| (v.name.as_str(), v.to_value_class()))
            .collect()
    }
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
