//! Type node converters.
//!
//! Each function handles exactly one [`TypeNode`] variant; the registry
//! guarantees it is only called with that variant.

use crate::models::{
    IndexSignatureType, ObjectProperty, ObjectType, ReferenceType, SignatureParameter,
    SignatureType, SymbolSpace, Type, TypeParameterType,
};
use crate::program::{FunctionTypeNode, SymbolFlags, TypeMemberNode, TypeNode};

use crate::converter::context::Context;

fn mismatch(node: &TypeNode) -> Type {
    Type::unknown(format!("{:?}", node.kind()))
}

fn boxed(cx: &mut Context<'_>, node: &TypeNode) -> Box<Type> {
    Box::new(cx.convert_type_node(node))
}

fn all(cx: &mut Context<'_>, nodes: &[TypeNode]) -> Vec<Type> {
    nodes.iter().map(|n| cx.convert_type_node(n)).collect()
}

pub(super) fn keyword(_: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Keyword(name) => Type::intrinsic(name.clone()),
        _ => mismatch(node),
    }
}

pub(super) fn array(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Array(element) => Type::Array {
            element_type: boxed(cx, element),
        },
        _ => mismatch(node),
    }
}

pub(super) fn tuple(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Tuple(elements) => Type::Tuple {
            elements: all(cx, elements),
        },
        _ => mismatch(node),
    }
}

pub(super) fn union(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Union(types) => Type::union(all(cx, types)),
        _ => mismatch(node),
    }
}

pub(super) fn intersection(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Intersection(types) => Type::intersection(all(cx, types)),
        _ => mismatch(node),
    }
}

pub(super) fn conditional(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Conditional {
            check_type,
            extends_type,
            true_type,
            false_type,
        } => Type::Conditional {
            check_type: boxed(cx, check_type),
            extends_type: boxed(cx, extends_type),
            true_type: boxed(cx, true_type),
            false_type: boxed(cx, false_type),
        },
        _ => mismatch(node),
    }
}

pub(super) fn mapped(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Mapped {
            parameter,
            constraint,
            template,
            name_type,
            readonly_modifier,
            optional_modifier,
        } => Type::Mapped {
            parameter: parameter.clone(),
            parameter_type: boxed(cx, constraint),
            template_type: boxed(cx, template),
            name_type: name_type.as_ref().map(|n| boxed(cx, n)),
            readonly_modifier: *readonly_modifier,
            optional_modifier: *optional_modifier,
        },
        _ => mismatch(node),
    }
}

pub(super) fn indexed_access(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::IndexedAccess {
            object_type,
            index_type,
        } => Type::IndexedAccess {
            object_type: boxed(cx, object_type),
            index_type: boxed(cx, index_type),
        },
        _ => mismatch(node),
    }
}

pub(super) fn type_operator(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::TypeOperator { operator, target } => Type::TypeOperator {
            operator: operator.clone(),
            target: boxed(cx, target),
        },
        _ => mismatch(node),
    }
}

pub(super) fn predicate(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Predicate {
            name,
            asserts,
            target_type,
        } => Type::Predicate {
            name: name.clone(),
            asserts: *asserts,
            target_type: target_type.as_ref().map(|t| boxed(cx, t)),
        },
        _ => mismatch(node),
    }
}

/// `typeof x` refers to a value.
pub(super) fn query(_: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Query { name, symbol } => Type::Query {
            query_type: match symbol {
                Some(symbol) => ReferenceType::to_symbol(name.clone(), *symbol, SymbolSpace::Value),
                None => ReferenceType::unresolved(name.clone()),
            },
        },
        _ => mismatch(node),
    }
}

pub(super) fn literal(_: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Literal(value) => Type::literal(value.clone()),
        _ => mismatch(node),
    }
}

pub(super) fn type_literal(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    let TypeNode::TypeLiteral(members) = node else {
        return mismatch(node);
    };
    let mut object = ObjectType::default();
    for member in members {
        match member {
            TypeMemberNode::Property {
                name,
                optional,
                readonly,
                type_node,
            } => {
                let ty = match type_node {
                    Some(node) => cx.convert_type_node(node),
                    None => Type::intrinsic("any"),
                };
                object.properties.push(ObjectProperty {
                    name: name.clone(),
                    optional: *optional,
                    readonly: *readonly,
                    ty,
                });
            }
            TypeMemberNode::Method {
                name,
                optional,
                signature,
            } => {
                let ty = Type::Signature(signature_type(cx, signature, false));
                object.properties.push(ObjectProperty {
                    name: name.clone(),
                    optional: *optional,
                    readonly: false,
                    ty,
                });
            }
            TypeMemberNode::Call(signature) => {
                let signature = signature_type(cx, signature, false);
                object.call_signatures.push(signature);
            }
            TypeMemberNode::Construct(signature) => {
                let signature = signature_type(cx, signature, true);
                object.construct_signatures.push(signature);
            }
            TypeMemberNode::Index {
                parameter,
                key_type,
                value_type,
                readonly,
            } => {
                object.index_signature = Some(Box::new(IndexSignatureType {
                    parameter: parameter.clone(),
                    key_type: cx.convert_type_node(key_type),
                    value_type: cx.convert_type_node(value_type),
                    readonly: *readonly,
                }));
            }
        }
    }
    Type::Object(object)
}

pub(super) fn function(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Function(signature) => Type::Signature(signature_type(cx, signature, false)),
        TypeNode::Constructor(signature) => Type::Signature(signature_type(cx, signature, true)),
        _ => mismatch(node),
    }
}

fn signature_type(
    cx: &mut Context<'_>,
    node: &FunctionTypeNode,
    is_constructor: bool,
) -> SignatureType {
    let type_parameters = node
        .type_parameters
        .iter()
        .map(|p| TypeParameterType {
            name: p.name.clone(),
            constraint: p.constraint.as_ref().map(|c| boxed(cx, c)),
            default: p.default.as_ref().map(|d| boxed(cx, d)),
        })
        .collect();
    let parameters = node
        .parameters
        .iter()
        .map(|p| SignatureParameter {
            name: p.name.clone(),
            optional: p.optional,
            rest: p.rest,
            ty: match &p.type_node {
                Some(node) => cx.convert_type_node(node),
                None => Type::intrinsic("any"),
            },
        })
        .collect();
    SignatureType {
        is_constructor,
        type_parameters,
        parameters,
        return_type: boxed(cx, &node.return_type),
    }
}

/// A named type. Type parameter names become type parameter types; bound
/// names become late-bound references; the rest stay unresolved.
pub(super) fn reference(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    let TypeNode::Reference {
        name,
        symbol,
        type_arguments,
    } = node
    else {
        return mismatch(node);
    };
    let is_type_parameter = symbol
        .and_then(|s| cx.program().symbol(s))
        .is_some_and(|s| s.flags.contains(SymbolFlags::TYPE_PARAMETER));
    if is_type_parameter {
        return Type::TypeParameter(TypeParameterType::new(name.clone()));
    }
    let type_arguments = all(cx, type_arguments);
    let reference = match symbol {
        Some(symbol) => ReferenceType::to_symbol(name.clone(), *symbol, SymbolSpace::Type),
        None => ReferenceType::unresolved(name.clone()),
    };
    Type::Reference(reference.with_type_arguments(type_arguments))
}

pub(super) fn parenthesized(cx: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Parenthesized(inner) => cx.convert_type_node(inner),
        _ => mismatch(node),
    }
}

pub(super) fn infer(_: &mut Context<'_>, node: &TypeNode) -> Type {
    match node {
        TypeNode::Infer(name) => Type::Inferred { name: name.clone() },
        _ => mismatch(node),
    }
}

pub(super) fn this(_: &mut Context<'_>, _: &TypeNode) -> Type {
    Type::intrinsic("this")
}
