//! Schema records supplied by the host: names, annotations, properties and
//! value classes.

use crate::error::{GenerationError, GenerationResult};
use crate::naming::{getter_name, is_java_identifier};
use crate::types::TypeDescriptor;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Annotation types the generator recognizes by qualified name.
pub mod known {
    /// Class-level: tolerate unknown properties when deserializing
    pub const IGNORE_EXTRA_PROPERTIES: &str = "com.google.firebase.database.IgnoreExtraProperties";
    /// Class-level: reject unknown properties when deserializing
    pub const THROW_ON_EXTRA_PROPERTIES: &str =
        "com.google.firebase.database.ThrowOnExtraProperties";
    /// Property-level: keep the property out of storage
    pub const EXCLUDE: &str = "com.google.firebase.database.Exclude";
    /// Property-level: store the property under another key
    pub const PROPERTY_NAME: &str = "com.google.firebase.database.PropertyName";
    pub const SUPPRESS_WARNINGS: &str = "java.lang.SuppressWarnings";

    /// Class annotations copied onto the shadow class
    pub const CLASS_PASSTHROUGH: &[&str] = &[IGNORE_EXTRA_PROPERTIES, THROW_ON_EXTRA_PROPERTIES];
    /// Property annotations copied onto shadow getters
    pub const PROPERTY_PASSTHROUGH: &[&str] = &[EXCLUDE, PROPERTY_NAME];
}

/// A package-qualified class name, possibly nested (`pkg.Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    package: String,
    simple_names: Vec<String>,
}

impl QualifiedName {
    /// Create a top-level class name
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// Parse a dotted name.
    ///
    /// Leading segments that start with a lowercase letter form the package;
    /// the first other segment starts the class names. A name made only of
    /// lowercase segments is read as a class in the preceding package.
    pub fn parse(text: &str) -> Self {
        let segments: Vec<&str> = text.split('.').collect();
        let split = segments
            .iter()
            .position(|s| !s.starts_with(|c: char| c.is_ascii_lowercase()))
            .unwrap_or(segments.len().saturating_sub(1));

        Self {
            package: segments[..split].join("."),
            simple_names: segments[split..].iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Name of a class nested in this one
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// Same enclosing classes, different innermost name
    pub fn with_simple_name(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        if let Some(last) = simple_names.last_mut() {
            *last = simple_name.into();
        }
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// Same class names moved into `package`
    pub fn in_package(&self, package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: self.simple_names.clone(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    /// Innermost simple name
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    /// Outermost class containing this one (itself if top-level)
    pub fn top_level(&self) -> Self {
        Self {
            package: self.package.clone(),
            simple_names: self.simple_names.iter().take(1).cloned().collect(),
        }
    }

    /// Simple names joined with `.`, as written inside the same package
    pub fn relative_name(&self) -> String {
        self.simple_names.join(".")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.relative_name())
        } else {
            write!(f, "{}.{}", self.package, self.relative_name())
        }
    }
}

impl Serialize for QualifiedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One `name = value` pair of an annotation, with the value kept as source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationMember {
    pub name: String,
    pub value: String,
}

/// An attached annotation. Member values are opaque and forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub type_name: QualifiedName,
    pub members: Vec<AnnotationMember>,
}

impl Annotation {
    /// Marker annotation without members
    pub fn marker(type_name: QualifiedName) -> Self {
        Self {
            type_name,
            members: Vec::new(),
        }
    }

    /// Add a member
    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.members.push(AnnotationMember {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Whether this annotation's type is `qualified_name`
    pub fn is(&self, qualified_name: &str) -> bool {
        self.type_name.to_string() == qualified_name
    }
}

/// Annotations attached to a class or property, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationSet(Vec<Annotation>);

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether an annotation of the given qualified type is attached
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.0.iter().any(|a| a.is(qualified_name))
    }

    /// Annotations whose type is on `allowed`, in declaration order
    pub fn passthrough(&self, allowed: &[&str]) -> Vec<Annotation> {
        self.0
            .iter()
            .filter(|a| allowed.iter().any(|name| a.is(name)))
            .cloned()
            .collect()
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single property of a value class
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeDescriptor,
    /// Accessor method on the value class, when it differs from `name`
    pub accessor: Option<String>,
    pub annotations: AnnotationSet,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            accessor: None,
            annotations: AnnotationSet::new(),
        }
    }

    pub fn with_accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Method invoked on the value object to read this property
    pub fn accessor(&self) -> &str {
        self.accessor.as_deref().unwrap_or(&self.name)
    }
}

/// Shadow fields are named after the property and read through its accessor,
/// so both must be Java identifiers. `getClass` is final on `Object`.
fn check_property_names(property: &Property) -> GenerationResult<()> {
    let invalid = |reason: String| GenerationError::InvalidProperty {
        property: property.name.clone(),
        reason,
    };
    if !is_java_identifier(&property.name) {
        return Err(invalid("not a valid Java identifier".to_string()));
    }
    if let Some(accessor) = &property.accessor {
        if !is_java_identifier(accessor) {
            return Err(invalid(format!("accessor `{accessor}` is not a valid Java identifier")));
        }
    }
    if getter_name(&property.name) == "getClass" {
        return Err(invalid("its getter would override `Object.getClass()`".to_string()));
    }
    Ok(())
}

/// Ordered, uniquely named properties of one value class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySchema {
    properties: Vec<Property>,
}

impl PropertySchema {
    /// Build a schema, rejecting repeated property names
    pub fn new(properties: impl IntoIterator<Item = Property>) -> GenerationResult<Self> {
        let mut schema = Self::default();
        for property in properties {
            schema.push(property)?;
        }
        Ok(schema)
    }

    /// Append a property after the existing ones
    pub fn push(&mut self, property: Property) -> GenerationResult<()> {
        check_property_names(&property)?;
        if self.properties.iter().any(|p| p.name == property.name) {
            return Err(GenerationError::DuplicateProperty {
                property: property.name,
            });
        }
        self.properties.push(property);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Property names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    /// Distinct names of properties, for collision checks
    pub fn name_set(&self) -> HashSet<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }
}

/// A user-authored value class as described by the host
#[derive(Debug, Clone, PartialEq)]
pub struct ValueClass {
    /// The abstract value class (`com.example.Foo`)
    pub name: QualifiedName,
    /// Simple name of the class being generated; derived when absent
    pub generated_name: Option<String>,
    /// Simple name of the class the generated class extends; derived when absent
    pub extends: Option<String>,
    /// Whether the generated class is the last in the chain
    pub is_final: bool,
    pub annotations: AnnotationSet,
    pub properties: PropertySchema,
}

impl ValueClass {
    pub fn new(name: QualifiedName, properties: PropertySchema) -> Self {
        Self {
            name,
            generated_name: None,
            extends: None,
            is_final: true,
            annotations: AnnotationSet::new(),
            properties,
        }
    }

    pub fn with_generated_name(mut self, generated_name: impl Into<String>) -> Self {
        self.generated_name = Some(generated_name.into());
        self
    }

    pub fn with_extends(mut self, extends: impl Into<String>) -> Self {
        self.extends = Some(extends.into());
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Whether a class carrying `annotations` opts into generation
pub fn applicable(annotations: &AnnotationSet, marker: &str) -> bool {
    annotations.contains(marker)
}
