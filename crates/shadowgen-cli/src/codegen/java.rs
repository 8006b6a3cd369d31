//! Java source generation for a generated unit.
//!
//! One file holds the wrapper class, which forwards its constructor to the
//! previous class in the generator chain, and the nested shadow class.

use super::imports::Imports;
use shadowgen_core::model::{
    FieldAssignment, GenerationModel, Getter, ReverseBinding, WrapperClass,
};
use shadowgen_core::{
    Annotation, CollectionKind, Conversion, GeneratedUnit, Primitive, QualifiedName,
    TypeDescriptor,
};

const INDENT: &str = "    ";

/// Render the Java compilation unit for `unit`
pub fn generate_java(unit: &GeneratedUnit) -> String {
    let package = unit.wrapper.name.package();
    let imports = Imports::resolve(package, &unit.wrapper.name, &referenced_names(unit));
    let writer = JavaWriter { imports: &imports };

    let mut code = String::new();

    if !package.is_empty() {
        code.push_str(&format!("package {};\n\n", package));
    }

    let mut any_import = false;
    for import in imports.imported() {
        code.push_str(&format!("import {};\n", import));
        any_import = true;
    }
    if any_import {
        code.push('\n');
    }

    writer.wrapper(&mut code, &unit.wrapper, &unit.model);
    code
}

/// Every class name the file spells
fn referenced_names(unit: &GeneratedUnit) -> Vec<QualifiedName> {
    let model = &unit.model;
    let mut names = Vec::new();

    for parameter in &unit.wrapper.constructor {
        type_names(&parameter.ty, &mut names);
    }
    for field in &model.fields {
        type_names(&field.ty, &mut names);
    }
    type_names(&model.forward_constructor.parameter.ty, &mut names);
    for binding in &model.reverse_conversion.bindings {
        type_names(&binding.ty, &mut names);
        match &binding.conversion {
            Conversion::Copy | Conversion::Nested { .. } => {}
            Conversion::NestedList { .. } => {
                names.push(CollectionKind::List.implementation());
            }
            Conversion::NestedMap { .. } => {
                names.push(CollectionKind::Map.class_name());
                names.push(CollectionKind::Map.implementation());
            }
        }
    }
    names.push(model.reverse_conversion.return_type.clone());

    let annotations = model
        .annotations
        .iter()
        .chain(&model.empty_constructor.annotations)
        .chain(&model.reverse_conversion.annotations)
        .chain(model.getters.iter().flat_map(|g| &g.annotations));
    names.extend(annotations.map(|a| a.type_name.clone()));

    names
}

fn type_names(ty: &TypeDescriptor, names: &mut Vec<QualifiedName>) {
    match ty {
        TypeDescriptor::Primitive(Primitive::Unboxed(kind)) => {
            // Boxed when used as a type argument
            names.push(QualifiedName::new("java.lang", kind.boxed_name()));
        }
        TypeDescriptor::Primitive(primitive) => names.extend(primitive.class_name()),
        TypeDescriptor::Collection(collection) => {
            names.push(collection.kind.class_name());
            if let Some(key) = &collection.key {
                type_names(key, names);
            }
            type_names(&collection.element, names);
        }
        TypeDescriptor::ValueRef(name) => names.push(name.clone()),
        TypeDescriptor::Parameterized { raw, arguments } => {
            names.push(raw.clone());
            for argument in arguments {
                type_names(argument, names);
            }
        }
    }
}

struct JavaWriter<'a> {
    imports: &'a Imports,
}

impl JavaWriter<'_> {
    fn wrapper(&self, code: &mut String, wrapper: &WrapperClass, model: &GenerationModel) {
        let modifier = if wrapper.is_final { "final" } else { "abstract" };
        code.push_str(&format!(
            "{} class {} extends {} {{\n",
            modifier,
            wrapper.name.simple_name(),
            wrapper.extends
        ));

        let parameters: Vec<String> = wrapper
            .constructor
            .iter()
            .map(|p| format!("{} {}", self.type_name(&p.ty), p.name))
            .collect();
        let arguments: Vec<&str> = wrapper.constructor.iter().map(|p| p.name.as_str()).collect();
        code.push_str(&format!(
            "{INDENT}{}({}) {{\n",
            wrapper.name.simple_name(),
            parameters.join(", ")
        ));
        code.push_str(&format!("{INDENT}{INDENT}super({});\n", arguments.join(", ")));
        code.push_str(&format!("{INDENT}}}\n\n"));

        self.shadow(code, model);
        code.push_str("}\n");
    }

    fn shadow(&self, code: &mut String, model: &GenerationModel) {
        let name = model.simple_name();
        let indent = INDENT;
        let body = format!("{INDENT}{INDENT}");

        self.annotations(code, indent, &model.annotations);
        code.push_str(&format!("{indent}static final class {} {{\n", name));

        // Fields
        for field in &model.fields {
            code.push_str(&format!(
                "\n{body}private {} {};\n",
                self.type_name(&field.ty),
                field.name
            ));
        }

        // Empty constructor
        code.push('\n');
        self.annotations(code, &body, &model.empty_constructor.annotations);
        code.push_str(&format!("{body}{}() {{\n{body}}}\n", name));

        // Forward constructor
        let forward = &model.forward_constructor;
        code.push_str(&format!(
            "\n{body}{}({} {}) {{\n",
            name,
            self.type_name(&forward.parameter.ty),
            forward.parameter.name
        ));
        for assignment in &forward.assignments {
            self.forward_assignment(code, &forward.parameter.name, assignment);
        }
        code.push_str(&format!("{body}}}\n"));

        // Reverse conversion
        let reverse = &model.reverse_conversion;
        let return_type = self.imports.spell(&reverse.return_type);
        code.push('\n');
        self.annotations(code, &body, &reverse.annotations);
        code.push_str(&format!("{body}public {} {}() {{\n", return_type, reverse.name));
        for binding in &reverse.bindings {
            self.reverse_binding(code, &reverse.name, binding);
        }
        code.push_str(&format!(
            "{body}{INDENT}return new {}({});\n",
            return_type,
            reverse.arguments.join(", ")
        ));
        code.push_str(&format!("{body}}}\n"));

        // Getters
        for getter in &model.getters {
            self.getter(code, getter);
        }

        code.push_str(&format!("{indent}}}\n"));
    }

    fn forward_assignment(&self, code: &mut String, parameter: &str, assignment: &FieldAssignment) {
        let line = format!("{INDENT}{INDENT}{INDENT}");
        let block = format!("{line}{INDENT}");
        let source = format!("{}.{}()", parameter, assignment.accessor);
        let field = &assignment.field;

        match &assignment.conversion {
            Conversion::Copy => {
                code.push_str(&format!("{line}this.{} = {};\n", field, source));
            }
            Conversion::Nested { shadow, .. } => {
                code.push_str(&format!(
                    "{line}this.{field} = {source} == null ? null : new {}({source});\n",
                    self.imports.spell(shadow)
                ));
            }
            Conversion::NestedList { value, shadow, item } => {
                code.push_str(&format!("{line}if ({source} != null) {{\n"));
                code.push_str(&format!(
                    "{block}this.{field} = new {}<>();\n",
                    self.imports.spell(&CollectionKind::List.implementation())
                ));
                code.push_str(&format!(
                    "{block}for ({} {item} : {source}) {{\n",
                    self.imports.spell(value)
                ));
                code.push_str(&format!(
                    "{block}{INDENT}this.{field}.add(new {}({item}));\n",
                    self.imports.spell(shadow)
                ));
                code.push_str(&format!("{block}}}\n{line}}}\n"));
            }
            Conversion::NestedMap {
                key,
                value,
                shadow,
                entry,
            } => {
                code.push_str(&format!("{line}if ({source} != null) {{\n"));
                code.push_str(&format!(
                    "{block}this.{field} = new {}<>();\n",
                    self.imports.spell(&CollectionKind::Map.implementation())
                ));
                code.push_str(&format!(
                    "{block}for ({}<{}, {}> {entry} : {source}.entrySet()) {{\n",
                    self.map_entry(),
                    self.primitive_argument(key),
                    self.imports.spell(value)
                ));
                code.push_str(&format!(
                    "{block}{INDENT}this.{field}.put({entry}.getKey(), \
                     new {}({entry}.getValue()));\n",
                    self.imports.spell(shadow)
                ));
                code.push_str(&format!("{block}}}\n{line}}}\n"));
            }
        }
    }

    fn reverse_binding(&self, code: &mut String, method: &str, binding: &ReverseBinding) {
        let line = format!("{INDENT}{INDENT}{INDENT}");
        let block = format!("{line}{INDENT}");
        let local = &binding.local;
        let field = format!("this.{}", binding.field);
        let ty = self.type_name(&binding.ty);

        match &binding.conversion {
            Conversion::Copy => {
                code.push_str(&format!("{line}{ty} {local} = {field};\n"));
            }
            Conversion::Nested { .. } => {
                code.push_str(&format!(
                    "{line}{ty} {local} = {field} == null ? null : {field}.{method}();\n"
                ));
            }
            Conversion::NestedList { shadow, item, .. } => {
                code.push_str(&format!("{line}{ty} {local} = null;\n"));
                code.push_str(&format!("{line}if ({field} != null) {{\n"));
                code.push_str(&format!(
                    "{block}{local} = new {}<>();\n",
                    self.imports.spell(&CollectionKind::List.implementation())
                ));
                code.push_str(&format!(
                    "{block}for ({} {item} : {field}) {{\n",
                    self.imports.spell(shadow)
                ));
                code.push_str(&format!("{block}{INDENT}{local}.add({item}.{method}());\n"));
                code.push_str(&format!("{block}}}\n{line}}}\n"));
            }
            Conversion::NestedMap {
                key, shadow, entry, ..
            } => {
                code.push_str(&format!("{line}{ty} {local} = null;\n"));
                code.push_str(&format!("{line}if ({field} != null) {{\n"));
                code.push_str(&format!(
                    "{block}{local} = new {}<>();\n",
                    self.imports.spell(&CollectionKind::Map.implementation())
                ));
                code.push_str(&format!(
                    "{block}for ({}<{}, {}> {entry} : {field}.entrySet()) {{\n",
                    self.map_entry(),
                    self.primitive_argument(key),
                    self.imports.spell(shadow)
                ));
                code.push_str(&format!(
                    "{block}{INDENT}{local}.put({entry}.getKey(), {entry}.getValue().{method}());\n"
                ));
                code.push_str(&format!("{block}}}\n{line}}}\n"));
            }
        }
    }

    fn getter(&self, code: &mut String, getter: &Getter) {
        let body = format!("{INDENT}{INDENT}");
        code.push('\n');
        self.annotations(code, &body, &getter.annotations);
        code.push_str(&format!(
            "{body}public {} {}() {{\n",
            self.type_name(&getter.return_type),
            getter.name
        ));
        code.push_str(&format!("{body}{INDENT}return {};\n", getter.field));
        code.push_str(&format!("{body}}}\n"));
    }

    fn annotations(&self, code: &mut String, indent: &str, annotations: &[Annotation]) {
        for annotation in annotations {
            code.push_str(indent);
            code.push('@');
            code.push_str(&self.imports.spell(&annotation.type_name));
            match annotation.members.as_slice() {
                [] => {}
                [only] if only.name == "value" => {
                    code.push_str(&format!("({})", only.value));
                }
                members => {
                    let members: Vec<String> = members
                        .iter()
                        .map(|m| format!("{} = {}", m.name, m.value))
                        .collect();
                    code.push_str(&format!("({})", members.join(", ")));
                }
            }
            code.push('\n');
        }
    }

    fn map_entry(&self) -> String {
        format!("{}.Entry", self.imports.spell(&CollectionKind::Map.class_name()))
    }

    fn primitive_argument(&self, primitive: &Primitive) -> String {
        self.type_argument(&TypeDescriptor::Primitive(*primitive))
    }

    /// A type in declaration position
    fn type_name(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(Primitive::Unboxed(kind)) => kind.keyword().to_string(),
            TypeDescriptor::Primitive(primitive) => match primitive.class_name() {
                Some(name) => self.imports.spell(&name),
                None => primitive.to_string(),
            },
            TypeDescriptor::Collection(collection) => {
                let mut arguments = Vec::with_capacity(2);
                if let Some(key) = &collection.key {
                    arguments.push(self.type_argument(key));
                }
                arguments.push(self.type_argument(&collection.element));
                format!(
                    "{}<{}>",
                    self.imports.spell(&collection.kind.class_name()),
                    arguments.join(", ")
                )
            }
            TypeDescriptor::ValueRef(name) => self.imports.spell(name),
            TypeDescriptor::Parameterized { raw, arguments } => {
                let arguments: Vec<String> =
                    arguments.iter().map(|a| self.type_argument(a)).collect();
                format!("{}<{}>", self.imports.spell(raw), arguments.join(", "))
            }
        }
    }

    /// A type in type-argument position, where primitives are boxed
    fn type_argument(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(Primitive::Unboxed(kind)) => {
                self.imports.spell(&QualifiedName::new("java.lang", kind.boxed_name()))
            }
            other => self.type_name(other),
        }
    }
}
