//! The worker pipeline.
//!
//! Serializing an entity folds every supporting worker of its group over a
//! partial JSON object. The base worker always runs first; the others run
//! by ascending priority, ties in registration order.

use serde_json::{Map, Value};

use crate::models::{
    ParameterReflection, ProjectReflection, Reflection, SignatureReflection, Type,
    TypeParameterReflection,
};

use super::base::BaseWorker;

/// A partially serialized object.
pub type JsonObject = Map<String, Value>;

/// Worker group of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Reflection,
    Type,
}

/// Anything the pipeline can serialize.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Reflection(&'a Reflection),
    Signature(&'a SignatureReflection),
    Parameter(&'a ParameterReflection),
    TypeParameter(&'a TypeParameterReflection),
    Type(&'a Type),
}

impl Entity<'_> {
    pub fn group(&self) -> Group {
        match self {
            Entity::Type(_) => Group::Type,
            _ => Group::Reflection,
        }
    }
}

/// One step of the pipeline.
pub trait SerializeWorker {
    fn group(&self) -> Group;

    /// Lower runs first.
    fn priority(&self) -> i32 {
        0
    }

    fn supports(&self, entity: &Entity<'_>) -> bool;

    /// Add this worker's fields to `object`.
    fn to_object(
        &self,
        entity: &Entity<'_>,
        object: JsonObject,
        cx: &SerializeContext<'_>,
    ) -> JsonObject;
}

/// Runs the pipeline over a project.
pub struct Serializer {
    base: BaseWorker,
    /// Kept sorted by ascending priority, stable on ties.
    workers: Vec<Box<dyn SerializeWorker>>,
}

impl Serializer {
    /// A serializer with the base worker only.
    pub fn empty() -> Self {
        Self {
            base: BaseWorker,
            workers: Vec::new(),
        }
    }

    /// A serializer with every built-in worker.
    pub fn new() -> Self {
        let mut serializer = Self::empty();
        for worker in super::reflections::builtin_workers() {
            serializer.add_worker(worker);
        }
        for worker in super::types::builtin_workers() {
            serializer.add_worker(worker);
        }
        serializer
    }

    pub fn add_worker(&mut self, worker: Box<dyn SerializeWorker>) {
        let priority = worker.priority();
        let position = self
            .workers
            .iter()
            .position(|w| w.priority() > priority)
            .unwrap_or(self.workers.len());
        self.workers.insert(position, worker);
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Serialize the project root.
    pub fn project_to_value(&self, project: &ProjectReflection) -> Value {
        let cx = SerializeContext {
            serializer: self,
            project,
        };
        match project.get(project.root()) {
            Some(root) => cx.to_value(Entity::Reflection(root)),
            None => Value::Null,
        }
    }

    fn to_object(&self, entity: &Entity<'_>, cx: &SerializeContext<'_>) -> JsonObject {
        let group = entity.group();
        let object = self.base.to_object(entity, JsonObject::new(), cx);
        self.workers
            .iter()
            .filter(|w| w.group() == group && w.supports(entity))
            .fold(object, |object, worker| worker.to_object(entity, object, cx))
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// What workers see while serializing one project.
pub struct SerializeContext<'a> {
    serializer: &'a Serializer,
    project: &'a ProjectReflection,
}

impl<'a> SerializeContext<'a> {
    pub fn project(&self) -> &'a ProjectReflection {
        self.project
    }

    /// Serialize a nested entity through the full pipeline.
    pub fn to_value(&self, entity: Entity<'_>) -> Value {
        Value::Object(self.serializer.to_object(&entity, self))
    }

    pub fn type_value(&self, ty: &Type) -> Value {
        self.to_value(Entity::Type(ty))
    }

    /// Serialized array, or `None` when `items` is empty.
    pub fn array<T>(&self, items: &[T], f: impl Fn(&T) -> Value) -> Option<Value> {
        (!items.is_empty()).then(|| Value::Array(items.iter().map(f).collect()))
    }
}

/// Insert `value` under `key` unless it is absent.
pub fn insert(object: &mut JsonObject, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        object.insert(key.to_string(), value);
    }
}
