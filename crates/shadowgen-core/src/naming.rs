//! Generated class names and member naming.
//!
//! [`NameResolver`] owns the convention that turns a value class name into
//! the names of its generated classes:
//!
//! | Value class | Generated class | Shadow class |
//! |-------------|-----------------|--------------|
//! | `Foo` | `AutoValue_Foo` | `AutoValue_Foo.FirebaseValue` |
//! | `Outer.Inner` | `AutoValue_Outer_Inner` | `AutoValue_Outer_Inner.FirebaseValue` |
//!
//! All three live in the value class's package.
//!
//! When several generators extend the same value class, each intermediate
//! class carries one more leading chain marker (`$$AutoValue_Foo` extends
//! `$AutoValue_Foo` ...). [`NameResolver::canonicalize`] strips them to find
//! the final concrete class.

use crate::config::NamingConvention;
use crate::error::{GenerationError, GenerationResult};
use crate::schema::{QualifiedName, ValueClass};
use std::collections::HashSet;

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_",
];

/// Derives generated class names from value class names
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    convention: &'a NamingConvention,
}

impl<'a> NameResolver<'a> {
    pub fn new(convention: &'a NamingConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> &'a NamingConvention {
        self.convention
    }

    /// The final generated class for a value class, in the value class's package
    pub fn generated_class(&self, value_class: &QualifiedName) -> GenerationResult<QualifiedName> {
        check_name(value_class)?;
        let flattened = value_class.simple_names().join("_");
        Ok(QualifiedName::new(
            value_class.package(),
            format!("{}{}", self.convention.generated_prefix, flattened),
        ))
    }

    /// The shadow class nested in a value class's generated class
    pub fn shadow_name(&self, value_class: &QualifiedName) -> GenerationResult<QualifiedName> {
        Ok(self
            .generated_class(value_class)?
            .nested(self.convention.shadow_suffix.as_str()))
    }

    /// Strip leading chain markers from the innermost simple name
    pub fn canonicalize(&self, name: &QualifiedName) -> QualifiedName {
        let simple = name.simple_name();
        let stripped = strip_chain_markers(simple, self.convention.chain_marker);
        if stripped.len() == simple.len() {
            name.clone()
        } else {
            name.with_simple_name(stripped)
        }
    }

    /// The class being generated for `value`, markers included.
    ///
    /// An explicit generated name must canonicalize to [`Self::generated_class`],
    /// the name every referencing shadow class spells.
    pub fn class_being_generated(&self, value: &ValueClass) -> GenerationResult<QualifiedName> {
        let expected = self.generated_class(&value.name)?;
        let Some(simple) = &value.generated_name else {
            return Ok(expected);
        };
        let name = QualifiedName::new(value.name.package(), simple.as_str());
        check_name(&name)?;
        if self.canonicalize(&name) != expected {
            return Err(GenerationError::ambiguous(
                &name,
                format!("does not match `{expected}` used by referencing shadow classes"),
            ));
        }
        Ok(name)
    }

    /// Simple name of the class the generated class extends
    pub fn superclass(&self, value: &ValueClass) -> GenerationResult<String> {
        match &value.extends {
            Some(extends) => Ok(extends.clone()),
            None => {
                let generated = self.class_being_generated(value)?;
                Ok(format!(
                    "{}{}",
                    self.convention.chain_marker,
                    generated.simple_name()
                ))
            }
        }
    }
}

/// Count leading `marker` characters and drop exactly that many.
///
/// ```
/// use shadowgen_core::naming::strip_chain_markers;
///
/// assert_eq!(strip_chain_markers("$$AutoValue_Foo", '$'), "AutoValue_Foo");
/// assert_eq!(strip_chain_markers("AutoValue_Foo", '$'), "AutoValue_Foo");
/// ```
pub fn strip_chain_markers(simple_name: &str, marker: char) -> &str {
    let count = simple_name.chars().take_while(|c| *c == marker).count();
    &simple_name[count * marker.len_utf8()..]
}

/// Whether `name` is a legal Java identifier
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let valid_start = match chars.next() {
        Some(c) => c.is_alphabetic() || c == '_' || c == '$',
        None => false,
    };
    valid_start
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&name)
}

fn check_name(name: &QualifiedName) -> GenerationResult<()> {
    if !name.package().is_empty() {
        if let Some(segment) = name.package().split('.').find(|s| !is_java_identifier(s)) {
            return Err(GenerationError::ambiguous(
                name,
                format!("package segment `{segment}` is not a valid identifier"),
            ));
        }
    }
    if let Some(simple) = name.simple_names().iter().find(|s| !is_java_identifier(s)) {
        let reason = if simple.is_empty() {
            "empty simple name".to_string()
        } else {
            format!("`{simple}` is not a valid class name")
        };
        return Err(GenerationError::ambiguous(name, reason));
    }
    Ok(())
}

/// `get` followed by the property name with its first letter upper-cased
pub fn getter_name(property: &str) -> String {
    format!("get{}", capitalize(property))
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first letter of a string.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Hands out local variable names that avoid already-used names and keywords
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new<'n>(taken: impl IntoIterator<Item = &'n str>) -> Self {
        Self {
            taken: taken.into_iter().map(str::to_string).collect(),
        }
    }

    /// `base`, or `base` with trailing underscores until it is free
    pub fn allocate(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        if !candidate.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '$') {
            candidate.insert(0, '_');
        }
        candidate.retain(|c| c.is_alphanumeric() || c == '_' || c == '$');
        while self.taken.contains(&candidate) || !is_java_identifier(&candidate) {
            candidate.push('_');
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
#[path = "naming/naming_tests.rs"]
mod naming_tests;
