//! Checker-resolved types and signatures.
//!
//! These are what the type checker infers where no annotation was written.
//! They are coarser than [`TypeNode`](super::TypeNode)s: aliases are already
//! expanded and anonymous object shapes are flattened.

use smol_str::SmolStr;

use crate::base::{DeclarationId, SymbolId};
use crate::models::LiteralValue;

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType {
    Intrinsic(SmolStr),
    Literal(LiteralValue),
    Union(Vec<ResolvedType>),
    Intersection(Vec<ResolvedType>),
    Array(Box<ResolvedType>),
    Tuple(Vec<ResolvedType>),
    Reference {
        symbol: Option<SymbolId>,
        name: SmolStr,
        type_arguments: Vec<ResolvedType>,
    },
    TypeParameter(SmolStr),
    /// An anonymous object type.
    Anonymous {
        properties: Vec<(SmolStr, ResolvedType)>,
        call_signatures: Vec<ResolvedSignature>,
    },
    /// A type the checker can only describe by its display string.
    Opaque(SmolStr),
}

impl ResolvedType {
    pub fn intrinsic(name: impl Into<SmolStr>) -> Self {
        ResolvedType::Intrinsic(name.into())
    }

    /// Checker display string, as used by error messages and fallbacks.
    pub fn display(&self) -> String {
        fn join(types: &[ResolvedType], separator: &str) -> String {
            types
                .iter()
                .map(ResolvedType::display)
                .collect::<Vec<_>>()
                .join(separator)
        }
        match self {
            ResolvedType::Intrinsic(name)
            | ResolvedType::TypeParameter(name)
            | ResolvedType::Opaque(name) => name.to_string(),
            ResolvedType::Literal(value) => value.to_string(),
            ResolvedType::Union(types) => join(types, " | "),
            ResolvedType::Intersection(types) => join(types, " & "),
            ResolvedType::Array(element) => match **element {
                ResolvedType::Union(_) | ResolvedType::Intersection(_) => {
                    format!("({})[]", element.display())
                }
                _ => format!("{}[]", element.display()),
            },
            ResolvedType::Tuple(types) => format!("[{}]", join(types, ", ")),
            ResolvedType::Reference {
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
            ResolvedType::Anonymous {
                properties,
                call_signatures,
            } => {
                let mut members: Vec<String> = properties
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, ty.display()))
                    .collect();
                members.extend(call_signatures.iter().map(|s| {
                    let params: Vec<String> = s
                        .parameters
                        .iter()
                        .map(|p| format!("{}: {}", p.name, p.ty.display()))
                        .collect();
                    format!("({}): {}", params.join(", "), s.return_type.display())
                }));
                if members.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", members.join("; "))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameter {
    pub name: SmolStr,
    /// The parameter's own declaration, when it has one.
    pub declaration: Option<DeclarationId>,
    pub ty: ResolvedType,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSignature {
    /// Declarations of the signature's type parameters.
    pub type_parameters: Vec<DeclarationId>,
    pub parameters: Vec<ResolvedParameter>,
    pub return_type: ResolvedType,
}
