//! Built-in type converters.
//!
//! Type conversion is two-tiered: [`nodes`] maps what the author wrote,
//! one converter per [`TypeNodeKind`](crate::program::TypeNodeKind);
//! [`resolved`] maps checker types where no annotation exists, tried in
//! priority order.

mod nodes;
mod resolved;

use crate::program::TypeNodeKind;

use super::registry::{FnResolvedTypeConverter, FnTypeNodeConverter, TypeNodeFn};

fn node(kind: TypeNodeKind, convert: TypeNodeFn) -> FnTypeNodeConverter {
    FnTypeNodeConverter { kind, convert }
}

pub(crate) fn builtin_node_converters() -> Vec<FnTypeNodeConverter> {
    vec![
        node(TypeNodeKind::Keyword, nodes::keyword),
        node(TypeNodeKind::Array, nodes::array),
        node(TypeNodeKind::Tuple, nodes::tuple),
        node(TypeNodeKind::Union, nodes::union),
        node(TypeNodeKind::Intersection, nodes::intersection),
        node(TypeNodeKind::Conditional, nodes::conditional),
        node(TypeNodeKind::Mapped, nodes::mapped),
        node(TypeNodeKind::IndexedAccess, nodes::indexed_access),
        node(TypeNodeKind::TypeOperator, nodes::type_operator),
        node(TypeNodeKind::Predicate, nodes::predicate),
        node(TypeNodeKind::Query, nodes::query),
        node(TypeNodeKind::Literal, nodes::literal),
        node(TypeNodeKind::TypeLiteral, nodes::type_literal),
        node(TypeNodeKind::Function, nodes::function),
        node(TypeNodeKind::Constructor, nodes::function),
        node(TypeNodeKind::Reference, nodes::reference),
        node(TypeNodeKind::Parenthesized, nodes::parenthesized),
        node(TypeNodeKind::Infer, nodes::infer),
        node(TypeNodeKind::This, nodes::this),
    ]
}

pub(crate) fn builtin_resolved_converters() -> Vec<FnResolvedTypeConverter> {
    resolved::converters()
}
