#![allow(non_snake_case)]

use super::*;
use shadowgen_core::{GenerationError, known};
use test_case::test_case;

const ORDER_MANIFEST: &str = r#"
[[value]]
name = "com.example.Order"
annotations = [
    "me.mattlogan.auto.value.firebase.annotation.FirebaseValue",
    "com.google.firebase.database.IgnoreExtraProperties",
]

[[value.property]]
name = "id"
type = "String"

[[value.property]]
name = "count"
type = "int"
accessor = "getCount"

[[value.property]]
name = "tags"
type = "List<Tag>"
annotations = [
    { type = "com.google.firebase.database.PropertyName", members = { value = "\"tag_list\"" } },
]

[[value]]
name = "com.example.Tag"

[[value.property]]
name = "label"
type = "String"
"#;

// Manifest parsing tests

#[test]
fn Manifest___from_str___parses_values_and_properties() {
    let manifest = Manifest::from_str(ORDER_MANIFEST).unwrap();

    assert_eq!(manifest.values.len(), 2);
    assert_eq!(manifest.values[0].name, "com.example.Order");
    let names: Vec<_> = manifest.values[0]
        .properties
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["id", "count", "tags"]);
    assert!(manifest.values[0].is_final);
}

#[test]
fn Manifest___from_str___defaults_generator_config() {
    let manifest = Manifest::from_str(ORDER_MANIFEST).unwrap();

    assert_eq!(manifest.generator, GeneratorConfig::default());
}

#[test]
fn Manifest___from_str___reads_generator_section() {
    let toml = r#"
[generator]
marker_annotation = "com.example.Shadowed"

[generator.naming]
shadow_suffix = "Document"
"#;

    let manifest = Manifest::from_str(toml).unwrap();

    assert_eq!(manifest.generator.marker_annotation.0, "com.example.Shadowed");
    assert_eq!(manifest.generator.naming.shadow_suffix, "Document");
    assert_eq!(manifest.generator.naming.generated_prefix, "AutoValue_");
}

#[test]
fn Manifest___from_str___reads_chain_settings() {
    let toml = r#"
[[value]]
name = "com.example.Order"
generated = "$AutoValue_Order"
extends = "$$AutoValue_Order"
final = false
"#;

    let manifest = Manifest::from_str(toml).unwrap();

    let value = &manifest.values[0];
    assert_eq!(value.generated.as_deref(), Some("$AutoValue_Order"));
    assert_eq!(value.extends.as_deref(), Some("$$AutoValue_Order"));
    assert!(!value.is_final);
}

#[test]
fn Manifest___from_str___empty_manifest_has_no_values() {
    let manifest = Manifest::from_str("").unwrap();

    assert!(manifest.values.is_empty());
}

#[test]
fn Manifest___from_str___invalid_toml___returns_error() {
    let result = Manifest::from_str("[[value]\nname = ");

    assert!(result.is_err());
}

#[test]
fn Manifest___from_str___property_without_type___returns_error() {
    let toml = r#"
[[value]]
name = "com.example.Order"

[[value.property]]
name = "id"
"#;

    assert!(Manifest::from_str(toml).is_err());
}

// Validation tests

#[test]
fn Manifest___validate___accepts_valid_manifest() {
    let manifest = Manifest::from_str(ORDER_MANIFEST).unwrap();

    assert!(manifest.validate().is_ok());
}

#[test]
fn Manifest___validate___rejects_empty_value_name() {
    let manifest = Manifest::from_str("[[value]]\nname = \"\"\n").unwrap();

    let err = manifest.validate().unwrap_err();

    assert!(err.to_string().contains("cannot be empty"));
}

#[test]
fn Manifest___validate___rejects_duplicate_value_class() {
    let toml = r#"
[[value]]
name = "com.example.Order"

[[value]]
name = "com.example.Order"
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.validate().unwrap_err();

    assert!(err.to_string().contains("more than once"));
}

#[test]
fn Manifest___validate___rejects_blank_property_type() {
    let toml = r#"
[[value]]
name = "com.example.Order"

[[value.property]]
name = "id"
type = "  "
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.validate().unwrap_err();

    assert!(err.to_string().contains("has no type"));
}

#[test_case("class", None, "'class' of value class"; "keyword name")]
#[test_case("first-name", None, "'first-name' of value class"; "dashed name")]
#[test_case("id", Some("get id"), "Accessor 'get id'"; "spaced accessor")]
#[test_case("id", Some("new"), "Accessor 'new'"; "keyword accessor")]
fn Manifest___validate___rejects_unspellable_property(
    name: &str,
    accessor: Option<&str>,
    fragment: &str,
) {
    let accessor = accessor.map(|a| format!("accessor = \"{a}\"\n")).unwrap_or_default();
    let toml = format!(
        "[[value]]\nname = \"com.example.Order\"\n\n\
         [[value.property]]\nname = \"{name}\"\ntype = \"String\"\n{accessor}"
    );
    let manifest = Manifest::from_str(&toml).unwrap();

    let err = manifest.validate().unwrap_err();

    assert!(err.to_string().contains(fragment), "{err}");
    assert!(err.to_string().contains("not a valid Java identifier"));
}

// Conversion tests

#[test]
fn ValueDefinition___to_value_class___resolves_types_in_package() {
    let manifest = Manifest::from_str(ORDER_MANIFEST).unwrap();

    let order = manifest.values[0].to_value_class().unwrap();

    assert_eq!(order.name.to_string(), "com.example.Order");
    assert_eq!(
        order.properties.get("tags").unwrap().ty.to_string(),
        "java.util.List<com.example.Tag>"
    );
    assert_eq!(order.properties.get("count").unwrap().accessor(), "getCount");
}

#[test]
fn ValueDefinition___to_value_class___converts_annotations() {
    let manifest = Manifest::from_str(ORDER_MANIFEST).unwrap();

    let order = manifest.values[0].to_value_class().unwrap();

    assert!(order.annotations.contains(known::IGNORE_EXTRA_PROPERTIES));
    let tags = order.properties.get("tags").unwrap();
    let rename = tags.annotations.iter().next().unwrap();
    assert!(rename.is(known::PROPERTY_NAME));
    assert_eq!(rename.members[0].name, "value");
    assert_eq!(rename.members[0].value, "\"tag_list\"");
}

#[test]
fn ValueDefinition___to_value_class___keeps_member_declaration_order() {
    let toml = r#"
[[value]]
name = "com.example.Order"

[[value.property]]
name = "placed"
type = "long"
annotations = [
    { type = "com.example.Range", members = { to = "10", from = "1", unit = "Unit.DAYS" } },
]
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let order = manifest.values[0].to_value_class().unwrap();

    let range = order.properties.get("placed").unwrap().annotations.iter().next().unwrap();
    let members: Vec<(&str, &str)> = range
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.value.as_str()))
        .collect();
    assert_eq!(members, vec![("to", "10"), ("from", "1"), ("unit", "Unit.DAYS")]);
}

#[test]
fn ValueDefinition___to_value_class___writes_non_string_members_as_toml() {
    let toml = r#"
[[value]]
name = "com.example.Order"
annotations = [{ type = "com.example.Limit", members = { value = 3, strict = true } }]
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let order = manifest.values[0].to_value_class().unwrap();

    let limit = order.annotations.iter().next().unwrap();
    assert_eq!(limit.members[0].value, "3");
    assert_eq!(limit.members[1].value, "true");
}

#[test]
fn ValueDefinition___to_value_class___reports_invalid_property() {
    let toml = r#"
[[value]]
name = "com.example.Order"

[[value.property]]
name = "class"
type = "String"
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.values[0].to_value_class().unwrap_err();

    assert!(matches!(err, GenerationError::InvalidProperty { .. }));
}

#[test]
fn ValueDefinition___to_value_class___reports_type_syntax() {
    let toml = r#"
[[value]]
name = "com.example.Order"

[[value.property]]
name = "ids"
type = "String[]"
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.values[0].to_value_class().unwrap_err();

    assert!(matches!(err, GenerationError::TypeSyntax { .. }));
}

#[test]
fn ValueDefinition___to_value_class___reports_duplicate_property() {
    let toml = r#"
[[value]]
name = "com.example.Order"

[[value.property]]
name = "id"
type = "String"

[[value.property]]
name = "id"
type = "long"
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let err = manifest.values[0].to_value_class().unwrap_err();

    assert_eq!(
        err,
        GenerationError::DuplicateProperty {
            property: "id".to_string()
        }
    );
}

#[test]
fn Manifest___value_classes___builds_each_entry_independently() {
    let toml = r#"
[[value]]
name = "com.example.Broken"

[[value.property]]
name = "ids"
type = "List<"

[[value]]
name = "com.example.Fine"
"#;
    let manifest = Manifest::from_str(toml).unwrap();

    let classes = manifest.value_classes();

    assert_eq!(classes.len(), 2);
    assert!(classes[0].1.is_err());
    assert_eq!(classes[1].0, "com.example.Fine");
    assert!(classes[1].1.is_ok());
}
