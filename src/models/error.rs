//! Errors raised by the project registry.

use thiserror::Error;

use crate::base::ReflectionId;

use super::kind::ReflectionKind;

/// Violations of the reflection tree invariants.
///
/// These indicate a bug in a converter or plugin, not bad user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Unknown reflection {0}")]
    UnknownReflection(ReflectionId),

    #[error("Reflection {0} is already registered")]
    AlreadyRegistered(ReflectionId),

    #[error("Reflection {child} already belongs to {parent}")]
    AlreadyParented {
        child: ReflectionId,
        parent: ReflectionId,
    },

    #[error("A {parent_kind} cannot contain a {child_kind}")]
    DisallowedChild {
        parent_kind: &'static str,
        child_kind: &'static str,
    },

    #[error("Reflection {0} is not a container")]
    NotAContainer(ReflectionId),

    #[error("The project root cannot be removed")]
    RemoveRoot,
}

impl ProjectError {
    pub fn disallowed_child(parent: ReflectionKind, child: ReflectionKind) -> Self {
        Self::DisallowedChild {
            parent_kind: parent.kind_string(),
            child_kind: child.kind_string(),
        }
    }
}
