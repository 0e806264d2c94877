//! Workers for types, one per group of related variants.

use serde_json::{Value, json};

use crate::models::{
    LiteralValue, MappedModifier, ObjectType, ReferenceType, SignatureType, Type,
    TypeParameterType,
};

use super::worker::{Entity, Group, JsonObject, SerializeContext, SerializeWorker, insert};

type WriteFn = fn(&Type, &mut JsonObject, &SerializeContext<'_>);

/// A type worker given as a pair of plain functions.
struct TypeWorker {
    supports: fn(&Type) -> bool,
    write: WriteFn,
}

impl SerializeWorker for TypeWorker {
    fn group(&self) -> Group {
        Group::Type
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Type(ty) if (self.supports)(ty))
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Entity::Type(ty) = entity {
            (self.write)(ty, &mut object, cx);
        }
        object
    }
}

fn worker(supports: fn(&Type) -> bool, write: WriteFn) -> Box<dyn SerializeWorker> {
    Box::new(TypeWorker { supports, write })
}

pub(super) fn builtin_workers() -> Vec<Box<dyn SerializeWorker>> {
    vec![
        worker(
            |ty| {
                matches!(
                    ty,
                    Type::Intrinsic { .. } | Type::Inferred { .. } | Type::Unknown { .. }
                )
            },
            named,
        ),
        worker(|ty| matches!(ty, Type::Literal { .. }), literal),
        worker(
            |ty| {
                matches!(
                    ty,
                    Type::Array { .. }
                        | Type::Tuple { .. }
                        | Type::Union { .. }
                        | Type::Intersection { .. }
                )
            },
            composite,
        ),
        worker(
            |ty| {
                matches!(
                    ty,
                    Type::Conditional { .. }
                        | Type::Mapped { .. }
                        | Type::IndexedAccess { .. }
                        | Type::TypeOperator { .. }
                        | Type::Predicate { .. }
                )
            },
            operator,
        ),
        worker(
            |ty| matches!(ty, Type::Reference(_) | Type::Query { .. }),
            reference,
        ),
        worker(|ty| matches!(ty, Type::TypeParameter(_)), type_parameter),
        worker(
            |ty| matches!(ty, Type::Object(_) | Type::Signature(_)),
            structural,
        ),
    ]
}

fn all(cx: &SerializeContext<'_>, types: &[Type]) -> Value {
    Value::Array(types.iter().map(|t| cx.type_value(t)).collect())
}

fn named(ty: &Type, object: &mut JsonObject, _: &SerializeContext<'_>) {
    if let Type::Intrinsic { name } | Type::Inferred { name } | Type::Unknown { name } = ty {
        object.insert("name".into(), json!(name.as_str()));
    }
}

fn literal(ty: &Type, object: &mut JsonObject, _: &SerializeContext<'_>) {
    let Type::Literal { value } = ty else {
        return;
    };
    let value = match value {
        LiteralValue::String(s) => json!(s),
        LiteralValue::Number(n) => number(*n),
        LiteralValue::Boolean(b) => json!(b),
        LiteralValue::Null => Value::Null,
        LiteralValue::BigInt { negative, value } => json!({
            "negative": negative,
            "value": value,
        }),
    };
    object.insert("value".into(), value);
}

/// Integral values within the exactly representable range are written as
/// integers, so `1` does not become `1.0`.
fn number(n: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT {
        json!(n as i64)
    } else {
        json!(n)
    }
}

fn composite(ty: &Type, object: &mut JsonObject, cx: &SerializeContext<'_>) {
    match ty {
        Type::Array { element_type } => {
            object.insert("elementType".into(), cx.type_value(element_type));
        }
        Type::Tuple { elements } => {
            insert(object, "elements", (!elements.is_empty()).then(|| all(cx, elements)));
        }
        Type::Union { types } | Type::Intersection { types } => {
            insert(object, "types", (!types.is_empty()).then(|| all(cx, types)));
        }
        _ => {}
    }
}

fn modifier(modifier: MappedModifier) -> Value {
    match modifier {
        MappedModifier::Remove => json!("-"),
        MappedModifier::Add | MappedModifier::Preserve => json!("+"),
    }
}

fn operator(ty: &Type, object: &mut JsonObject, cx: &SerializeContext<'_>) {
    match ty {
        Type::Conditional {
            check_type,
            extends_type,
            true_type,
            false_type,
        } => {
            object.insert("checkType".into(), cx.type_value(check_type));
            object.insert("extendsType".into(), cx.type_value(extends_type));
            object.insert("trueType".into(), cx.type_value(true_type));
            object.insert("falseType".into(), cx.type_value(false_type));
        }
        Type::Mapped {
            parameter,
            parameter_type,
            template_type,
            name_type,
            readonly_modifier,
            optional_modifier,
        } => {
            object.insert("parameter".into(), json!(parameter.as_str()));
            object.insert("parameterType".into(), cx.type_value(parameter_type));
            object.insert("templateType".into(), cx.type_value(template_type));
            insert(object, "nameType", name_type.as_ref().map(|t| cx.type_value(t)));
            insert(object, "readonlyModifier", readonly_modifier.map(modifier));
            insert(object, "optionalModifier", optional_modifier.map(modifier));
        }
        Type::IndexedAccess {
            object_type,
            index_type,
        } => {
            object.insert("objectType".into(), cx.type_value(object_type));
            object.insert("indexType".into(), cx.type_value(index_type));
        }
        Type::TypeOperator { operator, target } => {
            object.insert("operator".into(), json!(operator.as_str()));
            object.insert("target".into(), cx.type_value(target));
        }
        Type::Predicate {
            name,
            asserts,
            target_type,
        } => {
            object.insert("name".into(), json!(name.as_str()));
            object.insert("asserts".into(), json!(asserts));
            insert(object, "targetType", target_type.as_ref().map(|t| cx.type_value(t)));
        }
        _ => {}
    }
}

fn reference_object(reference: &ReferenceType, cx: &SerializeContext<'_>) -> JsonObject {
    let mut object = JsonObject::new();
    object.insert("name".into(), json!(reference.name.as_str()));
    insert(
        &mut object,
        "id",
        reference.reflection(cx.project()).map(|id| json!(id.index())),
    );
    if !reference.type_arguments.is_empty() {
        object.insert("typeArguments".into(), all(cx, &reference.type_arguments));
    }
    object
}

fn reference(ty: &Type, object: &mut JsonObject, cx: &SerializeContext<'_>) {
    match ty {
        Type::Reference(reference) => object.extend(reference_object(reference, cx)),
        Type::Query { query_type } => {
            let mut query = reference_object(query_type, cx);
            query.insert("type".into(), json!("reference"));
            object.insert("queryType".into(), Value::Object(query));
        }
        _ => {}
    }
}

fn type_parameter_object(type_parameter: &TypeParameterType, cx: &SerializeContext<'_>) -> JsonObject {
    let mut object = JsonObject::new();
    object.insert("name".into(), json!(type_parameter.name.as_str()));
    insert(
        &mut object,
        "constraint",
        type_parameter.constraint.as_ref().map(|t| cx.type_value(t)),
    );
    insert(
        &mut object,
        "default",
        type_parameter.default.as_ref().map(|t| cx.type_value(t)),
    );
    object
}

fn type_parameter(ty: &Type, object: &mut JsonObject, cx: &SerializeContext<'_>) {
    if let Type::TypeParameter(type_parameter) = ty {
        object.extend(type_parameter_object(type_parameter, cx));
    }
}

fn signature_value(signature: &SignatureType, cx: &SerializeContext<'_>) -> Value {
    let mut object = JsonObject::new();
    if signature.is_constructor {
        object.insert("isConstructor".into(), Value::Bool(true));
    }
    if !signature.type_parameters.is_empty() {
        let type_parameters = signature
            .type_parameters
            .iter()
            .map(|t| Value::Object(type_parameter_object(t, cx)))
            .collect();
        object.insert("typeParameters".into(), Value::Array(type_parameters));
    }
    if !signature.parameters.is_empty() {
        let parameters = signature
            .parameters
            .iter()
            .map(|p| {
                let mut parameter = JsonObject::new();
                parameter.insert("name".into(), json!(p.name.as_str()));
                if p.optional {
                    parameter.insert("isOptional".into(), Value::Bool(true));
                }
                if p.rest {
                    parameter.insert("isRest".into(), Value::Bool(true));
                }
                parameter.insert("type".into(), cx.type_value(&p.ty));
                Value::Object(parameter)
            })
            .collect();
        object.insert("parameters".into(), Value::Array(parameters));
    }
    object.insert("returnType".into(), cx.type_value(&signature.return_type));
    Value::Object(object)
}

fn object_fields(ty: &ObjectType, object: &mut JsonObject, cx: &SerializeContext<'_>) {
    if !ty.properties.is_empty() {
        let properties = ty
            .properties
            .iter()
            .map(|p| {
                let mut property = JsonObject::new();
                property.insert("name".into(), json!(p.name.as_str()));
                if p.optional {
                    property.insert("isOptional".into(), Value::Bool(true));
                }
                if p.readonly {
                    property.insert("isReadonly".into(), Value::Bool(true));
                }
                property.insert("type".into(), cx.type_value(&p.ty));
                Value::Object(property)
            })
            .collect();
        object.insert("properties".into(), Value::Array(properties));
    }
    let signatures = |list: &[SignatureType]| {
        (!list.is_empty())
            .then(|| Value::Array(list.iter().map(|s| signature_value(s, cx)).collect()))
    };
    insert(object, "callSignatures", signatures(&ty.call_signatures));
    insert(object, "constructSignatures", signatures(&ty.construct_signatures));
    if let Some(index) = &ty.index_signature {
        let mut value = JsonObject::new();
        value.insert("parameter".into(), json!(index.parameter.as_str()));
        value.insert("keyType".into(), cx.type_value(&index.key_type));
        value.insert("valueType".into(), cx.type_value(&index.value_type));
        if index.readonly {
            value.insert("isReadonly".into(), Value::Bool(true));
        }
        object.insert("indexSignature".into(), Value::Object(value));
    }
}

fn structural(ty: &Type, object: &mut JsonObject, cx: &SerializeContext<'_>) {
    match ty {
        Type::Object(object_type) => object_fields(object_type, object, cx),
        Type::Signature(signature) => {
            if let Value::Object(fields) = signature_value(signature, cx) {
                object.extend(fields);
            }
        }
        _ => {}
    }
}
