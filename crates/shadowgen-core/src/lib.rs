//! shadowgen-core - Shadow class generation for document-store value classes
//!
//! Immutable value classes cannot be read or written by a document store
//! that needs a no-argument constructor and getters. This crate derives, for
//! each such value class, a mutable shadow class that mirrors its properties
//! and converts in both directions:
//! - [`validate`] rejects property types the shadow cannot mirror
//! - [`ShadowClassBuilder`] assembles the [`GenerationModel`]
//! - [`NameResolver`] derives generated class names
//! - [`GenerationSession`] runs a whole catalog, following nested references
//!
//! Rendering the model to source text is left to the caller.

mod builder;
mod classify;
mod config;
mod error;
pub mod model;
pub mod naming;
mod schema;
mod session;
mod types;
mod validate;

pub use builder::ShadowClassBuilder;
pub use classify::{Category, classify};
pub use config::{GeneratorConfig, MarkerAnnotation, NamingConvention};
pub use error::{GenerationError, GenerationResult, UnsupportedReason};
pub use model::{Conversion, GeneratedUnit, GenerationModel, WrapperClass};
pub use naming::NameResolver;
pub use schema::{
    Annotation, AnnotationMember, AnnotationSet, Property, PropertySchema, QualifiedName,
    ValueClass, applicable, known,
};
pub use session::{GenerationSession, SchemaFailure, SessionReport};
pub use types::{CollectionKind, CollectionType, Primitive, PrimitiveKind, TypeDescriptor};
pub use validate::{Shape, ValidatedProperty, ValidatedSchema, validate};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GenerationError, GenerationResult, GenerationSession, GeneratorConfig, Property,
        PropertySchema, QualifiedName, TypeDescriptor, ValueClass,
    };
}
