//! Schema validation.
//!
//! Validation runs once per schema before anything is generated. It rejects
//! the four unsupported shapes (nested collections as list elements or map
//! values, non-primitive map keys, and containers other than `List`/`Map`)
//! and resolves every remaining property to a [`Shape`] the builder can act
//! on. Only the property's own type and its direct type arguments are
//! inspected; referenced value classes are validated by their own pass.

use crate::classify::{Category, classify};
use crate::error::{GenerationError, GenerationResult, UnsupportedReason};
use crate::schema::{Property, PropertySchema, QualifiedName};
use crate::types::{CollectionKind, Primitive, TypeDescriptor};

/// How a validated property maps onto the shadow class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    /// Copied as-is
    Verbatim,
    /// A single nested value class
    Nested(&'a QualifiedName),
    /// A list of nested value classes
    NestedList(&'a QualifiedName),
    /// A map from a primitive-like key to nested value classes
    NestedMap {
        key: &'a Primitive,
        value: &'a QualifiedName,
    },
}

impl<'a> Shape<'a> {
    /// The value class this shape converts through, if any
    pub fn value_class(&self) -> Option<&'a QualifiedName> {
        match *self {
            Shape::Verbatim => None,
            Shape::Nested(name) | Shape::NestedList(name) => Some(name),
            Shape::NestedMap { value, .. } => Some(value),
        }
    }
}

/// A property that passed validation
#[derive(Debug, Clone, Copy)]
pub struct ValidatedProperty<'a> {
    pub property: &'a Property,
    pub category: Category,
    pub shape: Shape<'a>,
}

/// A schema whose every property passed validation, in declaration order.
///
/// Only [`validate`] creates one, so the builder never sees an unsupported
/// type.
#[derive(Debug, Clone)]
pub struct ValidatedSchema<'a> {
    properties: Vec<ValidatedProperty<'a>>,
}

impl<'a> ValidatedSchema<'a> {
    pub fn properties(&self) -> &[ValidatedProperty<'a>] {
        &self.properties
    }

    /// Distinct value classes referenced by the schema, in first-use order
    pub fn referenced_value_classes(&self) -> Vec<&'a QualifiedName> {
        let mut seen = Vec::new();
        for name in self.properties.iter().filter_map(|p| p.shape.value_class()) {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}

/// Validate every property of `schema`, stopping at the first rejection
pub fn validate(schema: &PropertySchema) -> GenerationResult<ValidatedSchema<'_>> {
    let properties = schema
        .iter()
        .map(validate_property)
        .collect::<GenerationResult<Vec<_>>>()?;

    Ok(ValidatedSchema { properties })
}

fn validate_property(property: &Property) -> GenerationResult<ValidatedProperty<'_>> {
    let reject = |reason| unsupported(property, reason);

    let category =
        classify(&property.ty).ok_or_else(|| reject(UnsupportedReason::UnsupportedContainer))?;

    let shape = match &property.ty {
        TypeDescriptor::Primitive(_) => Shape::Verbatim,
        TypeDescriptor::ValueRef(name) => Shape::Nested(name),
        TypeDescriptor::Parameterized { .. } => {
            return Err(reject(UnsupportedReason::UnsupportedContainer));
        }
        TypeDescriptor::Collection(collection) => match collection.kind {
            CollectionKind::List => match collection.element.as_ref() {
                TypeDescriptor::Primitive(_) => Shape::Verbatim,
                TypeDescriptor::ValueRef(name) => Shape::NestedList(name),
                TypeDescriptor::Collection(_) | TypeDescriptor::Parameterized { .. } => {
                    return Err(reject(UnsupportedReason::ListElementParameterized));
                }
            },
            CollectionKind::Map => {
                let key = match collection.key.as_deref() {
                    Some(TypeDescriptor::Primitive(key)) => key,
                    _ => return Err(reject(UnsupportedReason::NonPrimitiveMapKey)),
                };
                match collection.element.as_ref() {
                    TypeDescriptor::Primitive(_) => Shape::Verbatim,
                    TypeDescriptor::ValueRef(value) => Shape::NestedMap { key, value },
                    TypeDescriptor::Collection(_) | TypeDescriptor::Parameterized { .. } => {
                        return Err(reject(UnsupportedReason::MapValueParameterized));
                    }
                }
            }
        },
    };

    Ok(ValidatedProperty {
        property,
        category,
        shape,
    })
}

fn unsupported(property: &Property, reason: UnsupportedReason) -> GenerationError {
    GenerationError::UnsupportedType {
        property: property.name.clone(),
        type_description: property.ty.to_string(),
        reason,
    }
}
