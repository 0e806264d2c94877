//! Workers for reflection fields.

use serde_json::{Value, json};

use crate::models::{Comment, ReflectionData, SignatureReflection, SourceReference, Type};

use super::worker::{Entity, Group, JsonObject, SerializeContext, SerializeWorker, insert};

pub(super) fn builtin_workers() -> Vec<Box<dyn SerializeWorker>> {
    vec![
        Box::new(CommentWorker),
        Box::new(DeclarationWorker),
        Box::new(SignatureWorker),
        Box::new(ParameterWorker),
        Box::new(TypeParameterWorker),
        Box::new(ReferenceWorker),
        Box::new(SourcesWorker),
        Box::new(GroupsWorker),
    ]
}

// ============================================================================
// COMMENTS AND SOURCES
// ============================================================================

struct CommentWorker;

impl CommentWorker {
    fn comment<'a>(entity: &Entity<'a>) -> Option<&'a Comment> {
        match *entity {
            Entity::Reflection(r) => r.comment.as_ref(),
            Entity::Signature(s) => s.comment.as_ref(),
            Entity::Parameter(p) => p.comment.as_ref(),
            Entity::TypeParameter(t) => t.comment.as_ref(),
            Entity::Type(_) => None,
        }
    }
}

impl SerializeWorker for CommentWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        Self::comment(entity).is_some_and(Comment::has_visible_component)
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        _: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Some(comment) = Self::comment(entity) {
            object.insert("comment".into(), comment_value(comment));
        }
        object
    }
}

fn comment_value(comment: &Comment) -> Value {
    let mut object = JsonObject::new();
    if !comment.short_text.is_empty() {
        object.insert("shortText".into(), json!(comment.short_text));
    }
    if !comment.text.is_empty() {
        object.insert("text".into(), json!(comment.text));
    }
    if !comment.tags.is_empty() {
        let tags = comment
            .tags
            .iter()
            .map(|tag| {
                let mut object = JsonObject::new();
                object.insert("tag".into(), json!(tag.tag_name.as_str()));
                object.insert("text".into(), json!(tag.text));
                insert(&mut object, "param", tag.param_name.as_ref().map(|p| json!(p.as_str())));
                Value::Object(object)
            })
            .collect();
        object.insert("tags".into(), Value::Array(tags));
    }
    Value::Object(object)
}

struct SourcesWorker;

impl SerializeWorker for SourcesWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn priority(&self) -> i32 {
        10
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Reflection(_) | Entity::Signature(_))
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        let sources = match entity {
            Entity::Reflection(r) => &r.sources,
            Entity::Signature(s) => &s.sources,
            _ => return object,
        };
        insert(&mut object, "sources", cx.array(sources, source_value));
        object
    }
}

fn source_value(source: &SourceReference) -> Value {
    json!({
        "fileName": source.file_name,
        "line": source.line,
        "character": source.character,
    })
}

struct GroupsWorker;

impl SerializeWorker for GroupsWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn priority(&self) -> i32 {
        10
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Reflection(r) if !r.groups.is_empty())
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Entity::Reflection(reflection) = entity {
            let groups = cx.array(&reflection.groups, |group| {
                json!({
                    "title": group.title.as_str(),
                    "kind": group.kind.bits(),
                    "children": group.children.iter().map(|c| c.index()).collect::<Vec<_>>(),
                })
            });
            insert(&mut object, "groups", groups);
        }
        object
    }
}

// ============================================================================
// DECLARATIONS AND REFERENCES
// ============================================================================

struct DeclarationWorker;

impl SerializeWorker for DeclarationWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Reflection(r) if r.declaration_data().is_some())
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        let Entity::Reflection(reflection) = entity else {
            return object;
        };
        let Some(data) = reflection.declaration_data() else {
            return object;
        };
        let signature = |s: &SignatureReflection| cx.to_value(Entity::Signature(s));
        let ty = |t: &Type| cx.type_value(t);

        insert(&mut object, "type", data.ty.as_ref().map(ty));
        insert(&mut object, "defaultValue", data.default_value.as_ref().map(|v| json!(v)));
        insert(&mut object, "signatures", cx.array(&data.signatures, signature));
        insert(&mut object, "indexSignature", data.index_signature.as_ref().map(signature));
        insert(&mut object, "getSignature", data.get_signature.as_ref().map(signature));
        insert(&mut object, "setSignature", data.set_signature.as_ref().map(signature));
        insert(
            &mut object,
            "typeParameters",
            cx.array(&data.type_parameters, |t| cx.to_value(Entity::TypeParameter(t))),
        );
        insert(&mut object, "extendedTypes", cx.array(&data.extended_types, ty));
        insert(&mut object, "extendedBy", cx.array(&data.extended_by, ty));
        insert(&mut object, "implementedTypes", cx.array(&data.implemented_types, ty));
        insert(&mut object, "implementedBy", cx.array(&data.implemented_by, ty));
        if data.has_getter {
            object.insert("hasGetter".into(), Value::Bool(true));
        }
        if data.has_setter {
            object.insert("hasSetter".into(), Value::Bool(true));
        }
        object
    }
}

/// `target` is always written; `null` marks a broken reference.
struct ReferenceWorker;

impl SerializeWorker for ReferenceWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Reflection(r) if matches!(r.data, ReflectionData::Reference(_)))
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Entity::Reflection(reflection) = entity {
            let target = reflection
                .reference_link()
                .and_then(|link| link.resolve(cx.project()));
            object.insert(
                "target".into(),
                target.map_or(Value::Null, |id| json!(id.index())),
            );
        }
        object
    }
}

// ============================================================================
// DEPENDENT REFLECTIONS
// ============================================================================

struct SignatureWorker;

impl SerializeWorker for SignatureWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Signature(_))
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Entity::Signature(signature) = entity {
            insert(
                &mut object,
                "typeParameters",
                cx.array(&signature.type_parameters, |t| {
                    cx.to_value(Entity::TypeParameter(t))
                }),
            );
            insert(
                &mut object,
                "parameters",
                cx.array(&signature.parameters, |p| cx.to_value(Entity::Parameter(p))),
            );
            insert(
                &mut object,
                "type",
                signature.return_type.as_ref().map(|t| cx.type_value(t)),
            );
        }
        object
    }
}

struct ParameterWorker;

impl SerializeWorker for ParameterWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Parameter(_))
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Entity::Parameter(parameter) = entity {
            insert(&mut object, "type", parameter.ty.as_ref().map(|t| cx.type_value(t)));
            insert(
                &mut object,
                "defaultValue",
                parameter.default_value.as_ref().map(|v| json!(v)),
            );
        }
        object
    }
}

struct TypeParameterWorker;

impl SerializeWorker for TypeParameterWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::TypeParameter(_))
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Entity::TypeParameter(type_parameter) = entity {
            insert(
                &mut object,
                "type",
                type_parameter.constraint.as_ref().map(|t| cx.type_value(t)),
            );
            insert(
                &mut object,
                "default",
                type_parameter.default.as_ref().map(|t| cx.type_value(t)),
            );
        }
        object
    }
}
