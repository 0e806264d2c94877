//! Structural type expressions.
//!
//! A [`Type`] describes the shape of a value. Types form owned trees: they
//! are not registered with the project and have no identity beyond
//! structural equality, so `clone()` is a deep copy.
//!
//! ## Display
//!
//! [`Type::stringify`] renders a type the way it would be written in source.
//! The `wrapped` argument tells a type that it appears in a position where
//! low-precedence forms (unions, intersections, conditionals, function types)
//! must be parenthesized, e.g. the element type of an array.

use std::fmt;

use smol_str::SmolStr;

use crate::base::{ReflectionId, SymbolId};

use super::project::ProjectReflection;
use super::reference::{ReferenceLink, ReferenceTarget, SymbolSpace};

// ============================================================================
// LITERALS
// ============================================================================

/// A literal value, used by literal types and enum member constants.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    BigInt { negative: bool, value: String },
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(s) => {
                let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Null => f.write_str("null"),
            LiteralValue::BigInt { negative, value } => {
                write!(f, "{}{}n", if *negative { "-" } else { "" }, value)
            }
        }
    }
}

// ============================================================================
// TYPE KINDS
// ============================================================================

/// Tag identifying a [`Type`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    Intrinsic,
    Array,
    Tuple,
    Union,
    Intersection,
    Conditional,
    Mapped,
    IndexedAccess,
    TypeOperator,
    Predicate,
    Query,
    Literal,
    Object,
    Signature,
    Reference,
    TypeParameter,
    Inferred,
    Unknown,
}

impl TypeKind {
    /// Value of the `type` field in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Intrinsic => "intrinsic",
            TypeKind::Array => "array",
            TypeKind::Tuple => "tuple",
            TypeKind::Union => "union",
            TypeKind::Intersection => "intersection",
            TypeKind::Conditional => "conditional",
            TypeKind::Mapped => "mapped",
            TypeKind::IndexedAccess => "indexedAccess",
            TypeKind::TypeOperator => "typeOperator",
            TypeKind::Predicate => "predicate",
            TypeKind::Query => "query",
            TypeKind::Literal => "literal",
            TypeKind::Object => "object",
            TypeKind::Signature => "signature",
            TypeKind::Reference => "reference",
            TypeKind::TypeParameter => "typeParameter",
            TypeKind::Inferred => "inferred",
            TypeKind::Unknown => "unknown",
        }
    }
}

// ============================================================================
// COMPOUND TYPE PARTS
// ============================================================================

/// `+`/`-` modifier on a mapped type's `readonly` or `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappedModifier {
    Add,
    Remove,
    Preserve,
}

impl MappedModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            MappedModifier::Add => "+",
            MappedModifier::Remove => "-",
            MappedModifier::Preserve => "",
        }
    }
}

/// A reference to a named type, e.g. `Map<string, T>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceType {
    pub name: SmolStr,
    pub type_arguments: Vec<Type>,
    pub link: ReferenceLink,
}

impl ReferenceType {
    pub fn new(name: impl Into<SmolStr>, link: ReferenceLink) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
            link,
        }
    }

    /// Reference to a symbol whose reflection may not exist yet.
    pub fn to_symbol(name: impl Into<SmolStr>, symbol: SymbolId, space: SymbolSpace) -> Self {
        Self::new(name, ReferenceLink::to_symbol(symbol, space))
    }

    pub fn to_reflection(name: impl Into<SmolStr>, id: ReflectionId) -> Self {
        Self::new(name, ReferenceLink::to_reflection(id))
    }

    pub fn unresolved(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ReferenceLink::unresolved())
    }

    pub fn with_type_arguments(mut self, type_arguments: Vec<Type>) -> Self {
        self.type_arguments = type_arguments;
        self
    }

    /// The reflection this type points at, if it (still) exists.
    pub fn reflection(&self, project: &ProjectReflection) -> Option<ReflectionId> {
        self.link.resolve(project)
    }

    pub fn target(&self) -> ReferenceTarget {
        self.link.target
    }

    fn stringify(&self) -> String {
        if self.type_arguments.is_empty() {
            self.name.to_string()
        } else {
            format!("{}<{}>", self.name, join(&self.type_arguments, ", ", false))
        }
    }
}

/// A parameter of a [`SignatureType`].
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureParameter {
    pub name: SmolStr,
    pub optional: bool,
    pub rest: bool,
    pub ty: Type,
}

/// An anonymous function or constructor type, e.g. `(a: string) => void`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureType {
    pub is_constructor: bool,
    pub type_parameters: Vec<TypeParameterType>,
    pub parameters: Vec<SignatureParameter>,
    pub return_type: Box<Type>,
}

impl SignatureType {
    fn stringify_parts(&self) -> (String, String) {
        let type_params = if self.type_parameters.is_empty() {
            String::new()
        } else {
            let names: Vec<String> = self
                .type_parameters
                .iter()
                .map(TypeParameterType::stringify_declaration)
                .collect();
            format!("<{}>", names.join(", "))
        };
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                format!(
                    "{}{}{}: {}",
                    if p.rest { "..." } else { "" },
                    p.name,
                    if p.optional { "?" } else { "" },
                    p.ty.stringify(false)
                )
            })
            .collect();
        (
            format!("{}({})", type_params, params.join(", ")),
            self.return_type.stringify(false),
        )
    }

    /// `(a: T) => R`, or `new (a: T) => R` for constructors.
    fn stringify_arrow(&self) -> String {
        let (params, ret) = self.stringify_parts();
        let prefix = if self.is_constructor { "new " } else { "" };
        format!("{}{} => {}", prefix, params, ret)
    }

    /// `(a: T): R` as written inside an object type.
    fn stringify_member(&self) -> String {
        let (params, ret) = self.stringify_parts();
        let prefix = if self.is_constructor { "new " } else { "" };
        format!("{}{}: {}", prefix, params, ret)
    }
}

/// A named member of an [`ObjectType`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub name: SmolStr,
    pub optional: bool,
    pub readonly: bool,
    pub ty: Type,
}

/// `[key: K]: V` inside an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignatureType {
    pub parameter: SmolStr,
    pub key_type: Type,
    pub value_type: Type,
    pub readonly: bool,
}

/// An anonymous object type, e.g. `{ a: string; (x: number): void }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectType {
    pub properties: Vec<ObjectProperty>,
    pub call_signatures: Vec<SignatureType>,
    pub construct_signatures: Vec<SignatureType>,
    pub index_signature: Option<Box<IndexSignatureType>>,
}

impl ObjectType {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
            && self.call_signatures.is_empty()
            && self.construct_signatures.is_empty()
            && self.index_signature.is_none()
    }

    fn stringify(&self) -> String {
        if self.is_empty() {
            return "{}".to_string();
        }
        let mut members = Vec::new();
        for property in &self.properties {
            members.push(format!(
                "{}{}{}: {}",
                if property.readonly { "readonly " } else { "" },
                property.name,
                if property.optional { "?" } else { "" },
                property.ty.stringify(false)
            ));
        }
        for signature in self.call_signatures.iter().chain(&self.construct_signatures) {
            members.push(signature.stringify_member());
        }
        if let Some(index) = &self.index_signature {
            members.push(format!(
                "{}[{}: {}]: {}",
                if index.readonly { "readonly " } else { "" },
                index.parameter,
                index.key_type.stringify(false),
                index.value_type.stringify(false)
            ));
        }
        format!("{{ {} }}", members.join("; "))
    }
}

/// A type parameter used as a type, optionally with its declaration bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterType {
    pub name: SmolStr,
    pub constraint: Option<Box<Type>>,
    pub default: Option<Box<Type>>,
}

impl TypeParameterType {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
            default: None,
        }
    }

    /// `T extends C = D`, as written in a type parameter list.
    fn stringify_declaration(&self) -> String {
        let mut out = self.name.to_string();
        if let Some(constraint) = &self.constraint {
            out.push_str(" extends ");
            out.push_str(&constraint.stringify(false));
        }
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(&default.stringify(false));
        }
        out
    }
}

// ============================================================================
// TYPE
// ============================================================================

/// A structural type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Built-in keyword type such as `string` or `void`.
    Intrinsic { name: SmolStr },
    Array { element_type: Box<Type> },
    Tuple { elements: Vec<Type> },
    Union { types: Vec<Type> },
    Intersection { types: Vec<Type> },
    Conditional {
        check_type: Box<Type>,
        extends_type: Box<Type>,
        true_type: Box<Type>,
        false_type: Box<Type>,
    },
    Mapped {
        parameter: SmolStr,
        parameter_type: Box<Type>,
        template_type: Box<Type>,
        name_type: Option<Box<Type>>,
        readonly_modifier: Option<MappedModifier>,
        optional_modifier: Option<MappedModifier>,
    },
    IndexedAccess {
        object_type: Box<Type>,
        index_type: Box<Type>,
    },
    /// `keyof T`, `unique symbol`, `readonly T[]`.
    TypeOperator { operator: SmolStr, target: Box<Type> },
    /// `x is T`, `asserts x`, `asserts x is T`.
    Predicate {
        name: SmolStr,
        asserts: bool,
        target_type: Option<Box<Type>>,
    },
    /// `typeof x`.
    Query { query_type: ReferenceType },
    Literal { value: LiteralValue },
    Object(ObjectType),
    Signature(SignatureType),
    Reference(ReferenceType),
    TypeParameter(TypeParameterType),
    /// `infer T` inside a conditional type.
    Inferred { name: SmolStr },
    /// Fallback for anything that could not be converted; carries the
    /// checker's display string.
    Unknown { name: SmolStr },
}

impl Type {
    pub fn intrinsic(name: impl Into<SmolStr>) -> Self {
        Type::Intrinsic { name: name.into() }
    }

    pub fn array(element_type: Type) -> Self {
        Type::Array {
            element_type: Box::new(element_type),
        }
    }

    pub fn union(types: Vec<Type>) -> Self {
        Type::Union { types }
    }

    pub fn intersection(types: Vec<Type>) -> Self {
        Type::Intersection { types }
    }

    pub fn literal(value: LiteralValue) -> Self {
        Type::Literal { value }
    }

    pub fn unknown(name: impl Into<SmolStr>) -> Self {
        Type::Unknown { name: name.into() }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Intrinsic { .. } => TypeKind::Intrinsic,
            Type::Array { .. } => TypeKind::Array,
            Type::Tuple { .. } => TypeKind::Tuple,
            Type::Union { .. } => TypeKind::Union,
            Type::Intersection { .. } => TypeKind::Intersection,
            Type::Conditional { .. } => TypeKind::Conditional,
            Type::Mapped { .. } => TypeKind::Mapped,
            Type::IndexedAccess { .. } => TypeKind::IndexedAccess,
            Type::TypeOperator { .. } => TypeKind::TypeOperator,
            Type::Predicate { .. } => TypeKind::Predicate,
            Type::Query { .. } => TypeKind::Query,
            Type::Literal { .. } => TypeKind::Literal,
            Type::Object(_) => TypeKind::Object,
            Type::Signature(_) => TypeKind::Signature,
            Type::Reference(_) => TypeKind::Reference,
            Type::TypeParameter(_) => TypeKind::TypeParameter,
            Type::Inferred { .. } => TypeKind::Inferred,
            Type::Unknown { .. } => TypeKind::Unknown,
        }
    }

    /// Render as source text. `wrapped` requests parentheses around
    /// low-precedence forms.
    pub fn stringify(&self, wrapped: bool) -> String {
        match self {
            Type::Intrinsic { name } => name.to_string(),
            Type::Array { element_type } => format!("{}[]", element_type.stringify(true)),
            Type::Tuple { elements } => format!("[{}]", join(elements, ", ", false)),
            Type::Union { types } => parenthesize(join(types, " | ", true), wrapped),
            Type::Intersection { types } => parenthesize(join(types, " & ", true), wrapped),
            Type::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => parenthesize(
                format!(
                    "{} extends {} ? {} : {}",
                    check_type.stringify(true),
                    extends_type.stringify(false),
                    true_type.stringify(false),
                    false_type.stringify(false)
                ),
                wrapped,
            ),
            Type::Mapped {
                parameter,
                parameter_type,
                template_type,
                name_type,
                readonly_modifier,
                optional_modifier,
            } => {
                let readonly = match readonly_modifier {
                    Some(m) => format!("{}readonly ", m.as_str()),
                    None => String::new(),
                };
                let optional = match optional_modifier {
                    Some(m) => format!("{}?", m.as_str()),
                    None => String::new(),
                };
                let rename = match name_type {
                    Some(t) => format!(" as {}", t.stringify(false)),
                    None => String::new(),
                };
                format!(
                    "{{ {}[{} in {}{}]{}: {} }}",
                    readonly,
                    parameter,
                    parameter_type.stringify(false),
                    rename,
                    optional,
                    template_type.stringify(false)
                )
            }
            Type::IndexedAccess {
                object_type,
                index_type,
            } => format!(
                "{}[{}]",
                object_type.stringify(true),
                index_type.stringify(false)
            ),
            Type::TypeOperator { operator, target } => {
                format!("{} {}", operator, target.stringify(true))
            }
            Type::Predicate {
                name,
                asserts,
                target_type,
            } => {
                let prefix = if *asserts { "asserts " } else { "" };
                match target_type {
                    Some(t) => format!("{}{} is {}", prefix, name, t.stringify(false)),
                    None => format!("{}{}", prefix, name),
                }
            }
            Type::Query { query_type } => format!("typeof {}", query_type.stringify()),
            Type::Literal { value } => value.to_string(),
            Type::Object(object) => object.stringify(),
            Type::Signature(signature) => parenthesize(signature.stringify_arrow(), wrapped),
            Type::Reference(reference) => reference.stringify(),
            Type::TypeParameter(param) => param.name.to_string(),
            Type::Inferred { name } => format!("infer {}", name),
            Type::Unknown { name } => name.to_string(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(false))
    }
}

fn join(types: &[Type], separator: &str, wrapped: bool) -> String {
    types
        .iter()
        .map(|t| t.stringify(wrapped))
        .collect::<Vec<_>>()
        .join(separator)
}

fn parenthesize(text: String, wrapped: bool) -> String {
    if wrapped { format!("({})", text) } else { text }
}
