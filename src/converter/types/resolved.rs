//! Resolved type converters.
//!
//! Every variant except [`ResolvedType::Opaque`] is supported; opaque types
//! fall through to the `unknown` fallback in the context.

use crate::models::{
    ObjectProperty, ObjectType, ReferenceType, SignatureParameter, SignatureType, SymbolSpace,
    Type, TypeParameterType,
};
use crate::program::{ResolvedSignature, ResolvedType};

use crate::converter::context::Context;
use crate::converter::registry::FnResolvedTypeConverter;

pub(super) fn converters() -> Vec<FnResolvedTypeConverter> {
    vec![
        FnResolvedTypeConverter {
            priority: 0,
            supports: |ty| matches!(ty, ResolvedType::Intrinsic(_)),
            convert: intrinsic,
        },
        FnResolvedTypeConverter {
            priority: 0,
            supports: |ty| matches!(ty, ResolvedType::Literal(_)),
            convert: literal,
        },
        FnResolvedTypeConverter {
            priority: 0,
            supports: |ty| matches!(ty, ResolvedType::Union(_) | ResolvedType::Intersection(_)),
            convert: composite,
        },
        FnResolvedTypeConverter {
            priority: 0,
            supports: |ty| matches!(ty, ResolvedType::Array(_) | ResolvedType::Tuple(_)),
            convert: sequence,
        },
        FnResolvedTypeConverter {
            priority: 0,
            supports: |ty| matches!(ty, ResolvedType::Reference { .. }),
            convert: reference,
        },
        FnResolvedTypeConverter {
            priority: 0,
            supports: |ty| matches!(ty, ResolvedType::TypeParameter(_)),
            convert: type_parameter,
        },
        FnResolvedTypeConverter {
            priority: 0,
            supports: |ty| matches!(ty, ResolvedType::Anonymous { .. }),
            convert: anonymous,
        },
    ]
}

fn unexpected(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    Type::unknown(cx.program().type_to_string(ty))
}

fn all(cx: &mut Context<'_>, types: &[ResolvedType]) -> Vec<Type> {
    types.iter().map(|t| cx.convert_resolved_type(t)).collect()
}

fn intrinsic(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    match ty {
        ResolvedType::Intrinsic(name) => Type::intrinsic(name.clone()),
        _ => unexpected(cx, ty),
    }
}

fn literal(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    match ty {
        ResolvedType::Literal(value) => Type::literal(value.clone()),
        _ => unexpected(cx, ty),
    }
}

fn composite(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    match ty {
        ResolvedType::Union(types) => Type::union(all(cx, types)),
        ResolvedType::Intersection(types) => Type::intersection(all(cx, types)),
        _ => unexpected(cx, ty),
    }
}

fn sequence(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    match ty {
        ResolvedType::Array(element) => Type::array(cx.convert_resolved_type(element)),
        ResolvedType::Tuple(elements) => Type::Tuple {
            elements: all(cx, elements),
        },
        _ => unexpected(cx, ty),
    }
}

fn reference(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    let ResolvedType::Reference {
        symbol,
        name,
        type_arguments,
    } = ty
    else {
        return unexpected(cx, ty);
    };
    let type_arguments = all(cx, type_arguments);
    let reference = match symbol {
        Some(symbol) => ReferenceType::to_symbol(name.clone(), *symbol, SymbolSpace::Type),
        None => ReferenceType::unresolved(name.clone()),
    };
    Type::Reference(reference.with_type_arguments(type_arguments))
}

fn type_parameter(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    match ty {
        ResolvedType::TypeParameter(name) => Type::TypeParameter(TypeParameterType::new(name.clone())),
        _ => unexpected(cx, ty),
    }
}

fn anonymous(cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
    let ResolvedType::Anonymous {
        properties,
        call_signatures,
    } = ty
    else {
        return unexpected(cx, ty);
    };
    let mut object = ObjectType::default();
    for (name, ty) in properties {
        object.properties.push(ObjectProperty {
            name: name.clone(),
            optional: false,
            readonly: false,
            ty: cx.convert_resolved_type(ty),
        });
    }
    for signature in call_signatures {
        let signature = signature_type(cx, signature);
        object.call_signatures.push(signature);
    }
    // A lone call signature is a function type.
    if object.properties.is_empty() && object.call_signatures.len() == 1 {
        if let Some(signature) = object.call_signatures.pop() {
            return Type::Signature(signature);
        }
    }
    Type::Object(object)
}

fn signature_type(cx: &mut Context<'_>, signature: &ResolvedSignature) -> SignatureType {
    let program = cx.program();
    let type_parameters = signature
        .type_parameters
        .iter()
        .filter_map(|d| program.declaration(*d))
        .map(|d| TypeParameterType::new(d.name.clone()))
        .collect();
    let parameters = signature
        .parameters
        .iter()
        .map(|p| SignatureParameter {
            name: p.name.clone(),
            optional: p.optional,
            rest: p.rest,
            ty: cx.convert_resolved_type(&p.ty),
        })
        .collect();
    SignatureType {
        is_constructor: false,
        type_parameters,
        parameters,
        return_type: Box::new(cx.convert_resolved_type(&signature.return_type)),
    }
}
