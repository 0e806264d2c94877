//! Custom workers plugged into the serializer.

use serde_json::{Value, json};

use docgraph::models::{ReflectionKind, Type};
use docgraph::serialization::{Entity, Group, JsonObject, SerializeContext, SerializeWorker, Serializer};

use super::json_child;
use crate::helpers::program_fixtures::*;

/// Writes the dotted path of every class.
struct ClassPathWorker;

impl SerializeWorker for ClassPathWorker {
    fn group(&self) -> Group {
        Group::Reflection
    }

    fn priority(&self) -> i32 {
        50
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Reflection(r) if r.kind() == ReflectionKind::CLASS)
    }

    fn to_object(
        &self,
        entity: &Entity<'_>,
        mut object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject {
        if let Entity::Reflection(reflection) = entity {
            let path = cx.project().full_name(reflection.id());
            object.insert("path".into(), json!(path));
        }
        object
    }
}

/// Marks built-in keyword types.
struct BuiltinMarker;

impl SerializeWorker for BuiltinMarker {
    fn group(&self) -> Group {
        Group::Type
    }

    fn priority(&self) -> i32 {
        10
    }

    fn supports(&self, entity: &Entity<'_>) -> bool {
        matches!(entity, Entity::Type(Type::Intrinsic { .. }))
    }

    fn to_object(
        &self,
        _: &Entity<'_>,
        mut object: JsonObject,
        _: &SerializeContext<'_>,
    ) -> JsonObject {
        object.insert("builtin".into(), Value::Bool(true));
        object
    }
}

fn library_value(serializer: &Serializer) -> Value {
    let conversion = convert_with(&library_program(), repo_options());
    serializer.project_to_value(&conversion.project)
}

#[test]
fn test_reflection_worker_sees_project() {
    let mut serializer = Serializer::new();
    let builtin = serializer.len();
    serializer.add_worker(Box::new(ClassPathWorker));
    assert_eq!(serializer.len(), builtin + 1);

    let value = library_value(&serializer);
    assert_eq!(json_child(&value, &["index", "Animal"])["path"], "index.Animal");
    assert_eq!(json_child(&value, &["index", "Dog"])["path"], "index.Dog");
    assert!(json_child(&value, &["index", "Named"]).get("path").is_none());
    assert!(json_child(&value, &["index"]).get("path").is_none());
}

#[test]
fn test_type_worker_extends_nested_types() {
    let mut serializer = Serializer::new();
    serializer.add_worker(Box::new(BuiltinMarker));

    let value = library_value(&serializer);
    assert_eq!(
        json_child(&value, &["index", "VERSION"])["type"],
        json!({"type": "intrinsic", "name": "string", "builtin": true})
    );
    let speak = json_child(&value, &["index", "Animal", "speak"]);
    assert_eq!(speak["signatures"][0]["type"]["builtin"], true);
    // Type workers never see reflections.
    assert!(speak.get("builtin").is_none());
}

#[test]
fn test_empty_serializer_with_one_worker() {
    let mut serializer = Serializer::empty();
    serializer.add_worker(Box::new(ClassPathWorker));

    let value = library_value(&serializer);
    let animal = json_child(&value, &["index", "Animal"]);
    assert_eq!(animal["path"], "index.Animal");
    assert!(animal.get("comment").is_none());
    assert!(animal.get("sources").is_none());
}
