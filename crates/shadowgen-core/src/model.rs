//! The generation model: everything an emitter needs to render one shadow
//! class and the wrapper class that encloses it.
//!
//! The model is fully resolved. Type names, member names, local variable
//! names and the order of every member list are decided by the builder, so
//! an emitter only chooses syntax. Every list preserves the value class's
//! property declaration order.

use crate::schema::{Annotation, QualifiedName};
use crate::types::{Primitive, TypeDescriptor};
use serde::Serialize;

/// Shadow class for one value class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationModel {
    /// Qualified name of the shadow class (`pkg.AutoValue_Foo.FirebaseValue`)
    pub name: QualifiedName,
    /// The user-authored value class the shadow mirrors
    pub source: QualifiedName,
    /// Class annotations forwarded from the value class
    pub annotations: Vec<Annotation>,
    pub fields: Vec<ShadowField>,
    pub empty_constructor: EmptyConstructor,
    pub forward_constructor: ForwardConstructor,
    pub reverse_conversion: ReverseConversion,
    pub getters: Vec<Getter>,
}

impl GenerationModel {
    /// Simple name of the shadow class
    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// A private field of the shadow class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowField {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// The no-argument constructor the document store deserializes through
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyConstructor {
    pub annotations: Vec<Annotation>,
}

/// A named, typed parameter or local
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// Constructor that copies a value object into a fresh shadow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardConstructor {
    /// The value object being copied
    pub parameter: Parameter,
    /// One assignment per field, in field order
    pub assignments: Vec<FieldAssignment>,
}

/// `this.<field> = <conversion of parameter.<accessor>()>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAssignment {
    pub field: String,
    pub accessor: String,
    pub conversion: Conversion,
}

/// How a value crosses between a value object and its shadow.
///
/// Every converting variant leaves an absent (null) source absent. The same
/// conversion describes both directions: forward wraps each value class
/// instance in a new `shadow`, reverse calls the shadow's reverse conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    /// Copied as-is
    Copy,
    /// One nested value
    Nested {
        value: QualifiedName,
        shadow: QualifiedName,
    },
    /// A list, converted element by element into a new `ArrayList`
    NestedList {
        value: QualifiedName,
        shadow: QualifiedName,
        /// Loop variable
        item: String,
    },
    /// A map, converted value by value into a new `LinkedHashMap`
    NestedMap {
        key: Primitive,
        value: QualifiedName,
        shadow: QualifiedName,
        /// Loop variable
        entry: String,
    },
}

impl Conversion {
    pub fn is_copy(&self) -> bool {
        matches!(self, Conversion::Copy)
    }
}

/// Method that rebuilds the value object from the shadow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReverseConversion {
    pub name: String,
    pub annotations: Vec<Annotation>,
    /// The final concrete generated class, chain markers stripped
    pub return_type: QualifiedName,
    /// Locals computed from fields, in field order
    pub bindings: Vec<ReverseBinding>,
    /// Constructor arguments of the returned instance, in property order
    pub arguments: Vec<String>,
}

/// `<ty> <local> = <reverse conversion of this.<field>>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReverseBinding {
    pub local: String,
    /// The property's type on the value class
    pub ty: TypeDescriptor,
    pub field: String,
    pub conversion: Conversion,
}

/// Public getter the document store serializes through
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Getter {
    pub name: String,
    pub field: String,
    pub return_type: TypeDescriptor,
    pub annotations: Vec<Annotation>,
}

/// The class being generated around the shadow class.
///
/// It extends the previous class in the generator chain and forwards its
/// constructor arguments unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrapperClass {
    pub name: QualifiedName,
    /// Simple name of the superclass, in the same package
    pub extends: String,
    pub is_final: bool,
    /// One parameter per property, in property order
    pub constructor: Vec<Parameter>,
}

/// Everything produced for one value class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedUnit {
    pub value_class: QualifiedName,
    pub wrapper: WrapperClass,
    pub model: GenerationModel,
    /// Value classes whose shadows this one converts through
    pub references: Vec<QualifiedName>,
}

impl GeneratedUnit {
    /// References outside the value class's package.
    ///
    /// Generated classes are package-private, so these shadows are not
    /// accessible from the generated code.
    pub fn cross_package_references(&self) -> impl Iterator<Item = &QualifiedName> {
        let package = self.value_class.package();
        self.references.iter().filter(move |r| r.package() != package)
    }
}
