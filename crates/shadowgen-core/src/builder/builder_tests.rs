#![allow(non_snake_case)]

use super::*;
use crate::schema::{Property, PropertySchema};
use crate::validate::validate;

fn value_class(simple_name: &str, properties: &[(&str, &str)]) -> ValueClass {
    let schema = PropertySchema::new(properties.iter().map(|(name, ty)| {
        Property::new(*name, TypeDescriptor::parse(ty, "com.example").unwrap())
    }))
    .unwrap();
    ValueClass::new(QualifiedName::new("com.example", simple_name), schema)
}

fn build(source: &ValueClass) -> GenerationModel {
    let convention = NamingConvention::default();
    let builder = ShadowClassBuilder::new(&convention);
    let schema = validate(&source.properties).unwrap();
    builder.build(source, &schema).unwrap()
}

fn shadow(simple_name: &str) -> QualifiedName {
    QualifiedName::new("com.example", format!("AutoValue_{simple_name}")).nested("FirebaseValue")
}

// Flat schema

#[test]
fn build___flat_schema___copies_fields_verbatim() {
    let source = value_class("Item", &[("id", "String"), ("count", "int")]);

    let model = build(&source);

    assert_eq!(model.name, shadow("Item"));
    assert_eq!(model.field_names(), vec!["id", "count"]);
    assert_eq!(model.fields[0].ty, TypeDescriptor::string());
    assert_eq!(model.fields[1].ty.to_string(), "int");
    assert!(model.forward_constructor.assignments.iter().all(|a| a.conversion.is_copy()));
    assert_eq!(model.reverse_conversion.arguments, vec!["id", "count"]);
}

#[test]
fn build___flat_schema___getters_return_fields() {
    let source = value_class("Item", &[("id", "String"), ("count", "int")]);

    let model = build(&source);

    let getters: Vec<_> = model
        .getters
        .iter()
        .map(|g| (g.name.as_str(), g.field.as_str()))
        .collect();
    assert_eq!(getters, vec![("getId", "id"), ("getCount", "count")]);
}

#[test]
fn build___primitive_collections___keep_their_types() {
    let source = value_class("Item", &[("names", "List<String>"), ("scores", "Map<String, Long>")]);

    let model = build(&source);

    assert_eq!(model.fields[0].ty, source.properties.get("names").unwrap().ty);
    assert_eq!(model.fields[1].ty, source.properties.get("scores").unwrap().ty);
}

// Nested values

#[test]
fn build___value_reference___field_is_nested_shadow() {
    let source = value_class("Order", &[("owner", "User")]);

    let model = build(&source);

    assert_eq!(model.fields[0].ty, TypeDescriptor::ValueRef(shadow("User")));
    assert_eq!(
        model.forward_constructor.assignments[0].conversion,
        Conversion::Nested {
            value: QualifiedName::new("com.example", "User"),
            shadow: shadow("User"),
        }
    );
    assert_eq!(
        model.reverse_conversion.bindings[0].ty,
        TypeDescriptor::ValueRef(QualifiedName::new("com.example", "User"))
    );
}

#[test]
fn build___value_list___field_is_list_of_nested_shadows() {
    let source = value_class("Order", &[("tags", "List<Tag>")]);

    let model = build(&source);

    assert_eq!(
        model.fields[0].ty,
        TypeDescriptor::list(TypeDescriptor::ValueRef(shadow("Tag")))
    );
    assert!(matches!(
        &model.forward_constructor.assignments[0].conversion,
        Conversion::NestedList { item, .. } if item == "item"
    ));
}

#[test]
fn build___value_map___keeps_key_and_wraps_value() {
    let source = value_class("Order", &[("lines", "Map<Integer, Tag>")]);

    let model = build(&source);

    assert_eq!(
        model.fields[0].ty.to_string(),
        "java.util.Map<java.lang.Integer, com.example.AutoValue_Tag.FirebaseValue>"
    );
    assert!(matches!(
        &model.reverse_conversion.bindings[0].conversion,
        Conversion::NestedMap { entry, .. } if entry == "entry"
    ));
}

#[test]
fn build___nested_value_class___shadow_name_is_flattened() {
    let source = value_class("Order", &[("line", "com.example.Order.Line")]);

    let model = build(&source);

    assert_eq!(
        model.fields[0].ty.to_string(),
        "com.example.AutoValue_Order_Line.FirebaseValue"
    );
}

// Local names

#[test]
fn build___property_named_like_loop_variable___loop_variable_is_renamed() {
    let source = value_class("Order", &[("item", "String"), ("tags", "List<Tag>")]);

    let model = build(&source);

    match &model.forward_constructor.assignments[1].conversion {
        Conversion::NestedList { item, .. } => assert_eq!(item, "item_"),
        other => panic!("expected NestedList, got {other:?}"),
    }
}

#[test]
fn build___forward_parameter___is_decapitalized_value_class() {
    let source = value_class("UserProfile", &[("id", "String")]);

    let model = build(&source);

    let parameter = &model.forward_constructor.parameter;
    assert_eq!(parameter.name, "userProfile");
    assert_eq!(parameter.ty.to_string(), "com.example.UserProfile");
}

#[test]
fn build___forward_parameter_clashing_with_property___is_renamed() {
    let source = value_class("Order", &[("order", "String")]);

    let model = build(&source);

    assert_eq!(model.forward_constructor.parameter.name, "order_");
}

#[test]
fn build___custom_accessor___is_used_by_forward_constructor() {
    let schema = PropertySchema::new([
        Property::new("name", TypeDescriptor::string()).with_accessor("getName")
    ])
    .unwrap();
    let source = ValueClass::new(QualifiedName::new("com.example", "User"), schema);

    let model = build(&source);

    assert_eq!(model.forward_constructor.assignments[0].accessor, "getName");
    assert_eq!(model.getters[0].name, "getName");
}

// Annotations

#[test]
fn build___class_annotations___forward_only_extra_property_policy() {
    let source = value_class("Item", &[("id", "String")])
        .with_annotation(Annotation::marker(QualifiedName::parse(
            "me.mattlogan.auto.value.firebase.annotation.FirebaseValue",
        )))
        .with_annotation(Annotation::marker(QualifiedName::parse(
            known::IGNORE_EXTRA_PROPERTIES,
        )));

    let model = build(&source);

    assert_eq!(model.annotations.len(), 1);
    assert!(model.annotations[0].is(known::IGNORE_EXTRA_PROPERTIES));
}

#[test]
fn build___property_annotations___forward_exclude_and_rename_verbatim() {
    let schema = PropertySchema::new([Property::new("displayName", TypeDescriptor::string())
        .with_annotation(Annotation::marker(QualifiedName::parse("javax.annotation.Nullable")))
        .with_annotation(
            Annotation::marker(QualifiedName::parse(known::PROPERTY_NAME))
                .with_member("value", "\"display_name\""),
        )])
    .unwrap();
    let source = ValueClass::new(QualifiedName::new("com.example", "User"), schema);

    let model = build(&source);

    let annotations = &model.getters[0].annotations;
    assert_eq!(annotations.len(), 1);
    assert!(annotations[0].is(known::PROPERTY_NAME));
    assert_eq!(annotations[0].members[0].value, "\"display_name\"");
}

#[test]
fn build___empty_constructor___is_marked_unused() {
    let model = build(&value_class("Item", &[]));

    let annotation = &model.empty_constructor.annotations[0];
    assert!(annotation.is(known::SUPPRESS_WARNINGS));
    assert_eq!(annotation.members[0].value, "\"unused\"");
}

#[test]
fn build___reverse_conversion___is_excluded_from_storage() {
    let model = build(&value_class("Item", &[("id", "String")]));

    assert_eq!(model.reverse_conversion.name, "toAutoValue");
    assert!(model.reverse_conversion.annotations[0].is(known::EXCLUDE));
}

// Chained generators

#[test]
fn build___intermediate_class___returns_canonical_class() {
    let source = value_class("Item", &[("id", "String")]).with_generated_name("$$AutoValue_Item");

    let model = build(&source);

    assert_eq!(model.name.to_string(), "com.example.$$AutoValue_Item.FirebaseValue");
    assert_eq!(
        model.reverse_conversion.return_type.to_string(),
        "com.example.AutoValue_Item"
    );
}

#[test]
fn wrapper___intermediate_class___extends_next_marker_and_is_abstract() {
    let convention = NamingConvention::default();
    let builder = ShadowClassBuilder::new(&convention);
    let source = value_class("Item", &[("id", "String"), ("count", "int")])
        .with_generated_name("$AutoValue_Item")
        .with_final(false);

    let wrapper = builder.wrapper(&source).unwrap();

    assert_eq!(wrapper.name.to_string(), "com.example.$AutoValue_Item");
    assert_eq!(wrapper.extends, "$$AutoValue_Item");
    assert!(!wrapper.is_final);
    let names: Vec<_> = wrapper.constructor.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["id", "count"]);
}

#[test]
fn build___malformed_referenced_name___is_ambiguous() {
    let schema = PropertySchema::new([Property::new(
        "owner",
        TypeDescriptor::ValueRef(QualifiedName::new("com.example", "")),
    )])
    .unwrap();
    let source = ValueClass::new(QualifiedName::new("com.example", "Order"), schema);
    let convention = NamingConvention::default();
    let builder = ShadowClassBuilder::new(&convention);
    let validated = validate(&source.properties).unwrap();

    let err = builder.build(&source, &validated).unwrap_err();

    assert_eq!(err.error_code(), 2);
}
