//! Syntactic type expressions as written in source.
//!
//! A [`TypeNode`] is what the author wrote (`Array<string>`, `keyof T`).
//! The converter prefers these over checker-resolved types because they
//! keep the author's aliases and spelling.

use smol_str::SmolStr;

use crate::base::SymbolId;
use crate::models::{LiteralValue, MappedModifier};

/// Tag of a [`TypeNode`] variant; the key of the type-node converter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeNodeKind {
    Keyword,
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
    TypeLiteral,
    Function,
    Constructor,
    Reference,
    Parenthesized,
    Infer,
    This,
}

/// A parameter of a function type node.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    pub name: SmolStr,
    pub optional: bool,
    pub rest: bool,
    pub type_node: Option<TypeNode>,
}

impl ParameterNode {
    pub fn new(name: impl Into<SmolStr>, type_node: TypeNode) -> Self {
        Self {
            name: name.into(),
            optional: false,
            rest: false,
            type_node: Some(type_node),
        }
    }
}

/// A type parameter inside a function type node.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterNode {
    pub name: SmolStr,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

/// `<T>(a: A) => R` or `new (a: A) => R`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTypeNode {
    pub type_parameters: Vec<TypeParameterNode>,
    pub parameters: Vec<ParameterNode>,
    pub return_type: Box<TypeNode>,
}

impl FunctionTypeNode {
    pub fn new(parameters: Vec<ParameterNode>, return_type: TypeNode) -> Self {
        Self {
            type_parameters: Vec::new(),
            parameters,
            return_type: Box::new(return_type),
        }
    }

    /// `prefix(a: A, ...b: B[]) => R`.
    fn display(&self, prefix: &str) -> String {
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                let rest = if p.rest { "..." } else { "" };
                let optional = if p.optional { "?" } else { "" };
                match &p.type_node {
                    Some(ty) => format!("{}{}{}: {}", rest, p.name, optional, ty.display()),
                    None => format!("{}{}{}", rest, p.name, optional),
                }
            })
            .collect();
        format!(
            "{}({}) => {}",
            prefix,
            parameters.join(", "),
            self.return_type.display()
        )
    }
}

/// A member of a `{ ... }` type literal.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMemberNode {
    Property {
        name: SmolStr,
        optional: bool,
        readonly: bool,
        type_node: Option<TypeNode>,
    },
    Method {
        name: SmolStr,
        optional: bool,
        signature: FunctionTypeNode,
    },
    Call(FunctionTypeNode),
    Construct(FunctionTypeNode),
    Index {
        parameter: SmolStr,
        key_type: TypeNode,
        value_type: TypeNode,
        readonly: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    /// `string`, `number`, `void`, `any`, ...
    Keyword(SmolStr),
    Array(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    Conditional {
        check_type: Box<TypeNode>,
        extends_type: Box<TypeNode>,
        true_type: Box<TypeNode>,
        false_type: Box<TypeNode>,
    },
    Mapped {
        parameter: SmolStr,
        constraint: Box<TypeNode>,
        template: Box<TypeNode>,
        name_type: Option<Box<TypeNode>>,
        readonly_modifier: Option<MappedModifier>,
        optional_modifier: Option<MappedModifier>,
    },
    IndexedAccess {
        object_type: Box<TypeNode>,
        index_type: Box<TypeNode>,
    },
    TypeOperator {
        operator: SmolStr,
        target: Box<TypeNode>,
    },
    Predicate {
        name: SmolStr,
        asserts: bool,
        target_type: Option<Box<TypeNode>>,
    },
    /// `typeof name`.
    Query {
        name: SmolStr,
        symbol: Option<SymbolId>,
    },
    Literal(LiteralValue),
    TypeLiteral(Vec<TypeMemberNode>),
    Function(FunctionTypeNode),
    Constructor(FunctionTypeNode),
    /// A named type; `symbol` is `None` when the checker could not bind it.
    Reference {
        name: SmolStr,
        symbol: Option<SymbolId>,
        type_arguments: Vec<TypeNode>,
    },
    Parenthesized(Box<TypeNode>),
    Infer(SmolStr),
    This,
}

impl TypeNode {
    pub fn keyword(name: impl Into<SmolStr>) -> Self {
        TypeNode::Keyword(name.into())
    }

    pub fn reference(name: impl Into<SmolStr>, symbol: Option<SymbolId>) -> Self {
        TypeNode::Reference {
            name: name.into(),
            symbol,
            type_arguments: Vec::new(),
        }
    }

    pub fn array(element: TypeNode) -> Self {
        TypeNode::Array(Box::new(element))
    }

    pub fn kind(&self) -> TypeNodeKind {
        match self {
            TypeNode::Keyword(_) => TypeNodeKind::Keyword,
            TypeNode::Array(_) => TypeNodeKind::Array,
            TypeNode::Tuple(_) => TypeNodeKind::Tuple,
            TypeNode::Union(_) => TypeNodeKind::Union,
            TypeNode::Intersection(_) => TypeNodeKind::Intersection,
            TypeNode::Conditional { .. } => TypeNodeKind::Conditional,
            TypeNode::Mapped { .. } => TypeNodeKind::Mapped,
            TypeNode::IndexedAccess { .. } => TypeNodeKind::IndexedAccess,
            TypeNode::TypeOperator { .. } => TypeNodeKind::TypeOperator,
            TypeNode::Predicate { .. } => TypeNodeKind::Predicate,
            TypeNode::Query { .. } => TypeNodeKind::Query,
            TypeNode::Literal(_) => TypeNodeKind::Literal,
            TypeNode::TypeLiteral(_) => TypeNodeKind::TypeLiteral,
            TypeNode::Function(_) => TypeNodeKind::Function,
            TypeNode::Constructor(_) => TypeNodeKind::Constructor,
            TypeNode::Reference { .. } => TypeNodeKind::Reference,
            TypeNode::Parenthesized(_) => TypeNodeKind::Parenthesized,
            TypeNode::Infer(_) => TypeNodeKind::Infer,
            TypeNode::This => TypeNodeKind::This,
        }
    }

    /// Source-like text of the node, as used by fallbacks and messages.
    pub fn display(&self) -> String {
        fn join(nodes: &[TypeNode], separator: &str) -> String {
            nodes
                .iter()
                .map(TypeNode::display)
                .collect::<Vec<_>>()
                .join(separator)
        }
        match self {
            TypeNode::Keyword(name) => name.to_string(),
            TypeNode::Infer(name) => format!("infer {}", name),
            TypeNode::Array(element) => match **element {
                TypeNode::Union(_) | TypeNode::Intersection(_) | TypeNode::Function(_) => {
                    format!("({})[]", element.display())
                }
                _ => format!("{}[]", element.display()),
            },
            TypeNode::Tuple(elements) => format!("[{}]", join(elements, ", ")),
            TypeNode::Union(types) => join(types, " | "),
            TypeNode::Intersection(types) => join(types, " & "),
            TypeNode::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => format!(
                "{} extends {} ? {} : {}",
                check_type.display(),
                extends_type.display(),
                true_type.display(),
                false_type.display()
            ),
            TypeNode::Mapped {
                parameter,
                constraint,
                template,
                name_type,
                readonly_modifier,
                optional_modifier,
            } => {
                let readonly = readonly_modifier
                    .map(|m| format!("{}readonly ", m.as_str()))
                    .unwrap_or_default();
                let optional = optional_modifier
                    .map(|m| format!("{}?", m.as_str()))
                    .unwrap_or_default();
                let rename = name_type
                    .as_ref()
                    .map(|n| format!(" as {}", n.display()))
                    .unwrap_or_default();
                format!(
                    "{{ {}[{} in {}{}]{}: {} }}",
                    readonly,
                    parameter,
                    constraint.display(),
                    rename,
                    optional,
                    template.display()
                )
            }
            TypeNode::IndexedAccess {
                object_type,
                index_type,
            } => format!("{}[{}]", object_type.display(), index_type.display()),
            TypeNode::TypeOperator { operator, target } => {
                format!("{} {}", operator, target.display())
            }
            TypeNode::Predicate {
                name,
                asserts,
                target_type,
            } => {
                let prefix = if *asserts { "asserts " } else { "" };
                match target_type {
                    Some(target) => format!("{}{} is {}", prefix, name, target.display()),
                    None => format!("{}{}", prefix, name),
                }
            }
            TypeNode::Query { name, .. } => format!("typeof {}", name),
            TypeNode::Literal(value) => value.to_string(),
            TypeNode::TypeLiteral(members) if members.is_empty() => "{}".to_string(),
            TypeNode::TypeLiteral(members) => format!("{{ {} members }}", members.len()),
            TypeNode::Function(signature) => signature.display(""),
            TypeNode::Constructor(signature) => signature.display("new "),
            TypeNode::Reference {
                name,
                type_arguments,
                ..
            } => {
                if type_arguments.is_empty() {
                    name.to_string()
                } else {
                    format!("{}<{}>", name, join(type_arguments, ", "))
                }
            }
            TypeNode::Parenthesized(inner) => format!("({})", inner.display()),
            TypeNode::This => "this".to_string(),
        }
    }
}
