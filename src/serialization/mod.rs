//! JSON serialization of a converted project.
//!
//! ## Pipeline
//!
//! ```text
//! Entity ─► BaseWorker ─► worker₁ ─► worker₂ ─► ... ─► JSON object
//!           (id, name,    (ascending priority, only workers of the
//!            kind, flags,  entity's group that support it)
//!            children)
//! ```
//!
//! Empty arrays and absent values are never written. Reference reflections
//! always carry `target`, which is `null` when the referenced reflection was
//! removed or never created.

mod base;
mod error;
mod reflections;
mod types;
mod worker;


use std::fs;
use std::path::Path;

use tracing::debug;

pub use error::SerializeError;
pub use worker::{Entity, Group, JsonObject, SerializeContext, SerializeWorker, Serializer, insert};

use crate::models::ProjectReflection;

/// Render a project with the built-in workers.
pub fn project_to_json(project: &ProjectReflection, pretty: bool) -> Result<String, SerializeError> {
    Serializer::new().to_json(project, pretty)
}

/// Write a project to `path` as pretty JSON, creating missing parent
/// directories.
pub fn write_json(project: &ProjectReflection, path: impl AsRef<Path>) -> Result<(), SerializeError> {
    Serializer::new().write_json(project, path, true)
}

impl Serializer {
    pub fn to_json(&self, project: &ProjectReflection, pretty: bool) -> Result<String, SerializeError> {
        let value = self.project_to_value(project);
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    pub fn write_json(
        &self,
        project: &ProjectReflection,
        path: impl AsRef<Path>,
        pretty: bool,
    ) -> Result<(), SerializeError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = self.to_json(project, pretty)?;
        fs::write(path, text)?;
        debug!(path = %path.display(), reflections = project.len(), "wrote json");
        Ok(())
    }
}
