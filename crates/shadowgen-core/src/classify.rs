//! Type classification

use crate::types::TypeDescriptor;
use serde::Serialize;

/// How a property is carried through the shadow class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Primitive, boxed primitive or String; copied verbatim
    Primitive,
    /// `List`/`Map` of primitive-like values; copied verbatim
    PrimitiveCollection,
    /// `List`/`Map` of value classes; elements go through nested shadows
    ValueCollection,
    /// A single value class; goes through a nested shadow
    ValueReference,
}

impl Category {
    /// Whether values of this category are copied without conversion
    pub fn is_verbatim(&self) -> bool {
        matches!(self, Category::Primitive | Category::PrimitiveCollection)
    }
}

/// Classify a property type.
///
/// Map keys are not looked at here; validation checks them. Returns `None`
/// for parameterized containers other than `List` and `Map`.
pub fn classify(ty: &TypeDescriptor) -> Option<Category> {
    match ty {
        TypeDescriptor::Primitive(_) => Some(Category::Primitive),
        TypeDescriptor::Collection(collection) => {
            if collection.element.is_primitive() {
                Some(Category::PrimitiveCollection)
            } else {
                Some(Category::ValueCollection)
            }
        }
        TypeDescriptor::ValueRef(_) => Some(Category::ValueReference),
        TypeDescriptor::Parameterized { .. } => None,
    }
}
