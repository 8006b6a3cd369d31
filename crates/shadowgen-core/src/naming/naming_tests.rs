#![allow(non_snake_case)]

use super::*;
use crate::schema::PropertySchema;
use test_case::test_case;

fn resolver_test<T>(f: impl FnOnce(NameResolver<'_>) -> T) -> T {
    let convention = NamingConvention::default();
    f(NameResolver::new(&convention))
}

// generated_class / shadow_name

#[test]
fn NameResolver___shadow_name___prefixes_and_nests_suffix() {
    let name = resolver_test(|r| r.shadow_name(&QualifiedName::parse("com.example.Foo")).unwrap());

    assert_eq!(name.to_string(), "com.example.AutoValue_Foo.FirebaseValue");
    assert_eq!(name.package(), "com.example");
    assert_eq!(name.relative_name(), "AutoValue_Foo.FirebaseValue");
}

#[test]
fn NameResolver___generated_class___flattens_nested_value_class() {
    let name = resolver_test(|r| {
        r.generated_class(&QualifiedName::parse("org.acme.Outer.Inner"))
            .unwrap()
    });

    assert_eq!(name.to_string(), "org.acme.AutoValue_Outer_Inner");
}

#[test]
fn NameResolver___shadow_name___follows_configured_convention() {
    let convention = NamingConvention {
        generated_prefix: "Gen".into(),
        shadow_suffix: "Doc".into(),
        ..NamingConvention::default()
    };
    let resolver = NameResolver::new(&convention);

    let name = resolver
        .shadow_name(&QualifiedName::parse("com.example.Foo"))
        .unwrap();

    assert_eq!(name.to_string(), "com.example.GenFoo.Doc");
}

#[test_case(QualifiedName::new("com.example", ""), "empty simple name")]
#[test_case(QualifiedName::new("com..example", "Foo"), "package segment")]
#[test_case(QualifiedName::new("com.example", "Foo-Bar"), "not a valid class name")]
#[test_case(QualifiedName::new("com.class", "Foo"), "package segment `class`")]
fn NameResolver___malformed_name___is_ambiguous(name: QualifiedName, fragment: &str) {
    let err = resolver_test(|r| r.shadow_name(&name).unwrap_err());

    assert_eq!(err.error_code(), 2);
    assert!(err.to_string().contains(fragment), "{err}");
}

#[test]
fn NameResolver___default_package___is_allowed() {
    let name = resolver_test(|r| r.shadow_name(&QualifiedName::new("", "Foo")).unwrap());

    assert_eq!(name.to_string(), "AutoValue_Foo.FirebaseValue");
}

// canonicalize

#[test_case("AutoValue_Foo", "AutoValue_Foo"; "no markers")]
#[test_case("$AutoValue_Foo", "AutoValue_Foo"; "one marker")]
#[test_case("$$$AutoValue_Foo", "AutoValue_Foo"; "three markers")]
#[test_case("Auto$Value_Foo", "Auto$Value_Foo"; "inner marker kept")]
#[test_case("$$", ""; "only markers")]
fn NameResolver___canonicalize___strips_leading_markers(simple: &str, expected: &str) {
    let canonical = resolver_test(|r| r.canonicalize(&QualifiedName::new("com.example", simple)));

    assert_eq!(canonical, QualifiedName::new("com.example", expected));
}

#[test]
fn NameResolver___canonicalize___only_touches_innermost_name() {
    let name = QualifiedName::new("com.example", "$Outer").nested("$$Inner");

    let canonical = resolver_test(|r| r.canonicalize(&name));

    assert_eq!(canonical.to_string(), "com.example.$Outer.Inner");
}

#[test]
fn NameResolver___canonicalize___uses_configured_marker() {
    let convention = NamingConvention {
        chain_marker: '_',
        ..NamingConvention::default()
    };
    let resolver = NameResolver::new(&convention);

    let canonical = resolver.canonicalize(&QualifiedName::new("p", "__Foo"));

    assert_eq!(canonical.simple_name(), "Foo");
}

#[test]
fn strip_chain_markers___multibyte_marker___strips_whole_characters() {
    assert_eq!(strip_chain_markers("§§Foo", '§'), "Foo");
}

// class_being_generated / superclass

fn value_class() -> ValueClass {
    ValueClass::new(QualifiedName::parse("com.example.Foo"), PropertySchema::default())
}

#[test]
fn NameResolver___class_being_generated___defaults_to_final_name() {
    let name = resolver_test(|r| r.class_being_generated(&value_class()).unwrap());

    assert_eq!(name.to_string(), "com.example.AutoValue_Foo");
}

#[test]
fn NameResolver___class_being_generated___uses_host_name() {
    let value = value_class().with_generated_name("$AutoValue_Foo");

    let name = resolver_test(|r| r.class_being_generated(&value).unwrap());

    assert_eq!(name.to_string(), "com.example.$AutoValue_Foo");
}

#[test_case("Custom_Foo"; "unrelated name")]
#[test_case("$AutoValue_Bar"; "other value class")]
#[test_case("AutoValue_Foo_"; "suffixed")]
fn NameResolver___class_being_generated___rejects_name_references_cannot_spell(generated: &str) {
    let value = value_class().with_generated_name(generated);

    let err = resolver_test(|r| r.class_being_generated(&value).unwrap_err());

    assert_eq!(err.error_code(), 2);
    assert!(err.to_string().contains("com.example.AutoValue_Foo"));
}

#[test]
fn NameResolver___superclass___rejects_mismatched_generated_name() {
    let value = value_class().with_generated_name("Custom_Foo");

    let result = resolver_test(|r| r.superclass(&value));

    assert!(matches!(result, Err(GenerationError::AmbiguousName { .. })));
}

#[test]
fn NameResolver___superclass___defaults_to_one_more_marker() {
    let value = value_class().with_generated_name("$AutoValue_Foo");

    let extends = resolver_test(|r| r.superclass(&value).unwrap());

    assert_eq!(extends, "$$AutoValue_Foo");
}

#[test]
fn NameResolver___superclass___uses_host_name() {
    let value = value_class().with_extends("Base_Foo");

    let extends = resolver_test(|r| r.superclass(&value).unwrap());

    assert_eq!(extends, "Base_Foo");
}

// Member naming helpers

#[test_case("id", "getId")]
#[test_case("displayName", "getDisplayName")]
#[test_case("x", "getX")]
fn getter_name___capitalizes_property(property: &str, expected: &str) {
    assert_eq!(getter_name(property), expected);
}

#[test]
fn decapitalize___lowers_first_letter_only() {
    assert_eq!(decapitalize("UserProfile"), "userProfile");
    assert_eq!(decapitalize("URL"), "uRL");
    assert_eq!(decapitalize(""), "");
}

#[test_case("item", true)]
#[test_case("$AutoValue_Foo", true)]
#[test_case("_x", true)]
#[test_case("class", false)]
#[test_case("9lives", false)]
#[test_case("a-b", false)]
#[test_case("", false)]
fn is_java_identifier___classifies(name: &str, expected: bool) {
    assert_eq!(is_java_identifier(name), expected);
}

#[test]
fn NameAllocator___free_name___is_returned_unchanged() {
    let mut names = NameAllocator::new(["id", "count"]);

    assert_eq!(names.allocate("item"), "item");
}

#[test]
fn NameAllocator___taken_name___gets_underscores() {
    let mut names = NameAllocator::new(["item", "item_"]);

    assert_eq!(names.allocate("item"), "item__");
}

#[test]
fn NameAllocator___keyword___is_avoided() {
    let mut names = NameAllocator::default();

    assert_eq!(names.allocate("class"), "class_");
}

#[test]
fn NameAllocator___allocated_names___are_not_reused() {
    let mut names = NameAllocator::default();

    let first = names.allocate("entry");
    let second = names.allocate("entry");

    assert_ne!(first, second);
}
