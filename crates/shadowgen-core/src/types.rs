//! Property type descriptors.
//!
//! [`TypeDescriptor`] is the closed set of type shapes a property can have.
//! Primitive-like types pass through generation unchanged, `List`/`Map`
//! collections carry their element types, and value references point at other
//! value classes. Every other parameterized type is kept as
//! [`TypeDescriptor::Parameterized`] so validation can reject it with a precise
//! reason.
//!
//! # Parsing
//!
//! The schema manifest spells types the way Java source does:
//!
//! ```
//! use shadowgen_core::TypeDescriptor;
//!
//! let ty = TypeDescriptor::parse("Map<String, Tag>", "com.example").unwrap();
//! assert_eq!(ty.to_string(), "java.util.Map<java.lang.String, com.example.Tag>");
//! ```
//!
//! Unqualified class names resolve in the schema's package. Arrays, wildcards
//! and raw `List`/`Map` are syntax errors.

use crate::error::{GenerationError, GenerationResult};
use crate::schema::QualifiedName;
use serde::Serialize;
use std::fmt;

/// Deepest type argument nesting the parser accepts
const MAX_DEPTH: usize = 8;

/// Java primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Char,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub fn boxed_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }
}

/// A primitive-like type: primitive, boxed primitive or String
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Unboxed(PrimitiveKind),
    Boxed(PrimitiveKind),
    String,
}

impl Primitive {
    /// The `java.lang` class for boxed primitives and String
    pub fn class_name(&self) -> Option<QualifiedName> {
        match self {
            Primitive::Unboxed(_) => None,
            Primitive::Boxed(kind) => Some(QualifiedName::new("java.lang", kind.boxed_name())),
            Primitive::String => Some(QualifiedName::new("java.lang", "String")),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        if name == "String" || name == "java.lang.String" {
            return Some(Primitive::String);
        }
        let simple = name.strip_prefix("java.lang.").unwrap_or(name);
        PrimitiveKind::ALL.iter().find_map(|kind| {
            if name == kind.keyword() {
                Some(Primitive::Unboxed(*kind))
            } else if simple == kind.boxed_name() {
                Some(Primitive::Boxed(*kind))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Unboxed(kind) => f.write_str(kind.keyword()),
            Primitive::Boxed(_) | Primitive::String => match self.class_name() {
                Some(name) => write!(f, "{name}"),
                None => Ok(()),
            },
        }
    }
}

/// The two supported container kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    List,
    Map,
}

impl CollectionKind {
    /// The `java.util` interface
    pub fn class_name(&self) -> QualifiedName {
        match self {
            CollectionKind::List => QualifiedName::new("java.util", "List"),
            CollectionKind::Map => QualifiedName::new("java.util", "Map"),
        }
    }

    /// The insertion-ordered implementation used when building a fresh collection
    pub fn implementation(&self) -> QualifiedName {
        match self {
            CollectionKind::List => QualifiedName::new("java.util", "ArrayList"),
            CollectionKind::Map => QualifiedName::new("java.util", "LinkedHashMap"),
        }
    }
}

/// A `List<E>` or `Map<K, E>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionType {
    pub kind: CollectionKind,
    /// Key type, present for maps only
    pub key: Option<Box<TypeDescriptor>>,
    /// Element type for lists, value type for maps
    pub element: Box<TypeDescriptor>,
}

/// The type of a property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Collection(CollectionType),
    /// Another value class
    ValueRef(QualifiedName),
    /// A parameterized container other than `List` or `Map`
    Parameterized {
        raw: QualifiedName,
        arguments: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn string() -> Self {
        TypeDescriptor::Primitive(Primitive::String)
    }

    pub fn unboxed(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Primitive(Primitive::Unboxed(kind))
    }

    pub fn boxed(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Primitive(Primitive::Boxed(kind))
    }

    pub fn value_ref(name: QualifiedName) -> Self {
        TypeDescriptor::ValueRef(name)
    }

    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::Collection(CollectionType {
            kind: CollectionKind::List,
            key: None,
            element: Box::new(element),
        })
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Collection(CollectionType {
            kind: CollectionKind::Map,
            key: Some(Box::new(key)),
            element: Box::new(value),
        })
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(_))
    }

    /// Whether the type carries type arguments
    pub fn is_parameterized(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Collection(_) | TypeDescriptor::Parameterized { .. }
        )
    }

    /// Parse a Java type string; unqualified class names resolve in `package`
    pub fn parse(text: &str, package: &str) -> GenerationResult<Self> {
        let tokens = tokenize(text)?;
        let mut parser = Parser {
            text,
            package,
            tokens,
            pos: 0,
            depth: 0,
        };
        let ty = parser.parse_type()?;
        if let Some(token) = parser.peek() {
            return Err(GenerationError::type_syntax(
                text,
                format!("unexpected `{token}` after type"),
            ));
        }
        Ok(ty)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => write!(f, "{p}"),
            TypeDescriptor::ValueRef(name) => write!(f, "{name}"),
            TypeDescriptor::Collection(c) => {
                write!(f, "{}<", c.kind.class_name())?;
                if let Some(key) = &c.key {
                    write!(f, "{key}, ")?;
                }
                write!(f, "{}>", c.element)
            }
            TypeDescriptor::Parameterized { raw, arguments } => {
                write!(f, "{raw}<")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Open,
    Close,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Name(name) => f.write_str(name),
            Token::Open => f.write_str("<"),
            Token::Close => f.write_str(">"),
            Token::Comma => f.write_str(","),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

fn tokenize(text: &str) -> GenerationResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '<' => tokens.push(Token::Open),
            '>' => tokens.push(Token::Close),
            ',' => tokens.push(Token::Comma),
            c if c.is_whitespace() => {}
            '[' | ']' => {
                return Err(GenerationError::type_syntax(text, "array types are not supported"));
            }
            '?' => {
                return Err(GenerationError::type_syntax(text, "wildcard types are not supported"));
            }
            c if is_name_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Name(text[start..end].to_string()));
            }
            other => {
                return Err(GenerationError::type_syntax(
                    text,
                    format!("unexpected character `{other}`"),
                ));
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    text: &'a str,
    package: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, reason: impl Into<String>) -> GenerationError {
        GenerationError::type_syntax(self.text, reason)
    }

    fn parse_type(&mut self) -> GenerationResult<TypeDescriptor> {
        let name = match self.next() {
            Some(Token::Name(name)) => name,
            Some(token) => {
                return Err(self.error(format!("expected a type name, found `{token}`")));
            }
            None => return Err(self.error("expected a type name")),
        };
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error(format!("malformed name `{name}`")));
        }

        let arguments = if self.peek() == Some(&Token::Open) {
            self.next();
            self.depth += 1;
            if self.depth > MAX_DEPTH {
                return Err(self.error(format!(
                    "type arguments nested deeper than {MAX_DEPTH} levels"
                )));
            }
            let arguments = self.parse_arguments()?;
            self.depth -= 1;
            arguments
        } else {
            Vec::new()
        };

        self.resolve(&name, arguments)
    }

    fn parse_arguments(&mut self) -> GenerationResult<Vec<TypeDescriptor>> {
        let mut arguments = vec![self.parse_type()?];
        loop {
            match self.next() {
                Some(Token::Comma) => arguments.push(self.parse_type()?),
                Some(Token::Close) => return Ok(arguments),
                Some(token) => {
                    return Err(self.error(format!("expected `,` or `>`, found `{token}`")));
                }
                None => return Err(self.error("unclosed `<`")),
            }
        }
    }

    fn resolve(
        &self,
        name: &str,
        mut arguments: Vec<TypeDescriptor>,
    ) -> GenerationResult<TypeDescriptor> {
        if let Some(primitive) = Primitive::from_name(name) {
            if !arguments.is_empty() {
                return Err(self.error(format!("`{name}` takes no type arguments")));
            }
            return Ok(TypeDescriptor::Primitive(primitive));
        }

        let kind = match name {
            "List" | "java.util.List" => Some(CollectionKind::List),
            "Map" | "java.util.Map" => Some(CollectionKind::Map),
            _ => None,
        };

        match (kind, arguments.len()) {
            (Some(CollectionKind::List), 1) => Ok(TypeDescriptor::list(arguments.remove(0))),
            (Some(CollectionKind::Map), 2) => {
                let value = arguments.remove(1);
                Ok(TypeDescriptor::map(arguments.remove(0), value))
            }
            (Some(CollectionKind::List), n) => {
                Err(self.error(format!("List takes 1 type argument, found {n}")))
            }
            (Some(CollectionKind::Map), n) => {
                Err(self.error(format!("Map takes 2 type arguments, found {n}")))
            }
            (None, 0) => Ok(TypeDescriptor::ValueRef(self.class_name(name))),
            (None, _) => Ok(TypeDescriptor::Parameterized {
                raw: self.class_name(name),
                arguments,
            }),
        }
    }

    fn class_name(&self, name: &str) -> QualifiedName {
        let parsed = QualifiedName::parse(name);
        if parsed.package().is_empty() {
            parsed.in_package(self.package)
        } else {
            parsed
        }
    }
}
