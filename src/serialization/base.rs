//! The base worker: fields every entity of a group carries.

use serde_json::{Map, Value, json};

use crate::models::{ReflectionFlags, ReflectionKind};

use super::worker::{Entity, Group, JsonObject, SerializeContext, SerializeWorker, insert};

pub(super) struct BaseWorker;

impl SerializeWorker for BaseWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn supports(&self, _: &Entity<'_>) -> bool {
        true
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        match entity {
            Entity::Reflection(reflection) => {
                write_header(
                    &mut object,
                    reflection.id().index(),
                    reflection.name(),
                    reflection.kind(),
                    reflection.flags,
                );
                insert(&mut object, "originalName", reflection.original_name().map(|n| json!(n)));
                let project = cx.project();
                let children: Vec<Value> = reflection
                    .children()
                    .iter()
                    .filter_map(|id| project.get(*id))
                    .map(|child| cx.to_value(Entity::Reflection(child)))
                    .collect();
                if !children.is_empty() {
                    object.insert("children".into(), Value::Array(children));
                }
            }
            Entity::Signature(signature) => write_header(
                &mut object,
                signature.id.index(),
                &signature.name,
                signature.kind,
                signature.flags,
            ),
            Entity::Parameter(parameter) => write_header(
                &mut object,
                parameter.id.index(),
                &parameter.name,
                ReflectionKind::PARAMETER,
                parameter.flags,
            ),
            Entity::TypeParameter(type_parameter) => write_header(
                &mut object,
                type_parameter.id.index(),
                &type_parameter.name,
                ReflectionKind::TYPE_PARAMETER,
                ReflectionFlags::empty(),
            ),
            Entity::Type(ty) => {
                object.insert("type".into(), json!(ty.kind().as_str()));
            }
        }
        object
    }
}

fn write_header(
    object: &mut JsonObject,
    id: u32,
    name: &str,
    kind: ReflectionKind,
    flags: ReflectionFlags,
) {
    object.insert("id".into(), json!(id));
    object.insert("name".into(), json!(name));
    object.insert("kind".into(), json!(kind.bits()));
    object.insert("kindString".into(), json!(kind.kind_string()));
    let flags: Map<String, Value> = flags
        .names()
        .into_iter()
        .map(|name| (name.to_string(), Value::Bool(true)))
        .collect();
    object.insert("flags".into(), Value::Object(flags));
}
