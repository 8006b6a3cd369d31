//! Shadow class assembly.
//!
//! [`ShadowClassBuilder`] turns a validated schema into a [`GenerationModel`].
//! It performs no validation of its own: every property it sees has already
//! been resolved to a [`Shape`] by [`validate`](crate::validate::validate).

use crate::config::NamingConvention;
use crate::error::GenerationResult;
use crate::model::{
    Conversion, EmptyConstructor, FieldAssignment, ForwardConstructor, GenerationModel, Getter,
    Parameter, ReverseBinding, ReverseConversion, ShadowField, WrapperClass,
};
use crate::naming::{NameAllocator, NameResolver, decapitalize, getter_name};
use crate::schema::{Annotation, QualifiedName, ValueClass, known};
use crate::types::TypeDescriptor;
use crate::validate::{Shape, ValidatedSchema};

/// Builds shadow class models under one naming convention
#[derive(Debug, Clone, Copy)]
pub struct ShadowClassBuilder<'a> {
    resolver: NameResolver<'a>,
}

impl<'a> ShadowClassBuilder<'a> {
    pub fn new(convention: &'a NamingConvention) -> Self {
        Self {
            resolver: NameResolver::new(convention),
        }
    }

    pub fn resolver(&self) -> &NameResolver<'a> {
        &self.resolver
    }

    /// Build the shadow class model for `source`.
    ///
    /// `schema` must be the validated form of `source.properties`.
    pub fn build(
        &self,
        source: &ValueClass,
        schema: &ValidatedSchema<'_>,
    ) -> GenerationResult<GenerationModel> {
        let convention = self.resolver.convention();
        let generated = self.resolver.class_being_generated(source)?;
        let name = generated.nested(convention.shadow_suffix.as_str());

        let mut locals =
            NameAllocator::new(schema.properties().iter().map(|p| p.property.name.as_str()));
        let parameter = Parameter {
            name: locals.allocate(&decapitalize(source.name.simple_name())),
            ty: TypeDescriptor::ValueRef(source.name.clone()),
        };
        let item = locals.allocate("item");
        let entry = locals.allocate("entry");

        let count = schema.properties().len();
        let mut fields = Vec::with_capacity(count);
        let mut assignments = Vec::with_capacity(count);
        let mut bindings = Vec::with_capacity(count);
        let mut getters = Vec::with_capacity(count);

        for validated in schema.properties() {
            let property = validated.property;
            let conversion = self.conversion(validated.shape, &item, &entry)?;
            let field_type = shadow_field_type(&property.ty, &conversion);

            fields.push(ShadowField {
                name: property.name.clone(),
                ty: field_type.clone(),
            });
            assignments.push(FieldAssignment {
                field: property.name.clone(),
                accessor: property.accessor().to_string(),
                conversion: conversion.clone(),
            });
            bindings.push(ReverseBinding {
                local: property.name.clone(),
                ty: property.ty.clone(),
                field: property.name.clone(),
                conversion,
            });
            getters.push(Getter {
                name: getter_name(&property.name),
                field: property.name.clone(),
                return_type: field_type,
                annotations: property.annotations.passthrough(known::PROPERTY_PASSTHROUGH),
            });
        }

        let arguments = bindings.iter().map(|b| b.local.clone()).collect();

        tracing::debug!("Built shadow class {} with {} fields", name, fields.len());

        Ok(GenerationModel {
            annotations: source.annotations.passthrough(known::CLASS_PASSTHROUGH),
            source: source.name.clone(),
            fields,
            empty_constructor: EmptyConstructor {
                annotations: vec![
                    Annotation::marker(QualifiedName::parse(known::SUPPRESS_WARNINGS))
                        .with_member("value", "\"unused\""),
                ],
            },
            forward_constructor: ForwardConstructor {
                parameter,
                assignments,
            },
            reverse_conversion: ReverseConversion {
                name: convention.reverse_conversion.clone(),
                annotations: vec![Annotation::marker(QualifiedName::parse(known::EXCLUDE))],
                return_type: self.resolver.canonicalize(&generated),
                bindings,
                arguments,
            },
            getters,
            name,
        })
    }

    /// The class being generated around the shadow class
    pub fn wrapper(&self, source: &ValueClass) -> GenerationResult<WrapperClass> {
        Ok(WrapperClass {
            name: self.resolver.class_being_generated(source)?,
            extends: self.resolver.superclass(source)?,
            is_final: source.is_final,
            constructor: source
                .properties
                .iter()
                .map(|p| Parameter {
                    name: p.name.clone(),
                    ty: p.ty.clone(),
                })
                .collect(),
        })
    }

    fn conversion(
        &self,
        shape: Shape<'_>,
        item: &str,
        entry: &str,
    ) -> GenerationResult<Conversion> {
        Ok(match shape {
            Shape::Verbatim => Conversion::Copy,
            Shape::Nested(value) => Conversion::Nested {
                value: value.clone(),
                shadow: self.resolver.shadow_name(value)?,
            },
            Shape::NestedList(value) => Conversion::NestedList {
                value: value.clone(),
                shadow: self.resolver.shadow_name(value)?,
                item: item.to_string(),
            },
            Shape::NestedMap { key, value } => Conversion::NestedMap {
                key: *key,
                value: value.clone(),
                shadow: self.resolver.shadow_name(value)?,
                entry: entry.to_string(),
            },
        })
    }
}

fn shadow_field_type(original: &TypeDescriptor, conversion: &Conversion) -> TypeDescriptor {
    match conversion {
        Conversion::Copy => original.clone(),
        Conversion::Nested { shadow, .. } => TypeDescriptor::ValueRef(shadow.clone()),
        Conversion::NestedList { shadow, .. } => {
            TypeDescriptor::list(TypeDescriptor::ValueRef(shadow.clone()))
        }
        Conversion::NestedMap { key, shadow, .. } => TypeDescriptor::map(
            TypeDescriptor::Primitive(*key),
            TypeDescriptor::ValueRef(shadow.clone()),
        ),
    }
}

#[cfg(test)]
#[path = "builder/builder_tests.rs"]
mod builder_tests;
