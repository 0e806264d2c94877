//! Error types for conversion.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{DeclarationId, SymbolId};
use crate::models::ProjectError;
use crate::program::TypeNodeKind;

use super::context::Phase;

/// Fatal conversion errors.
///
/// Soft problems (missing converters, types that cannot be converted) are
/// reported as diagnostics instead and never surface here.
#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("Unknown {0}")]
    UnknownSymbol(SymbolId),

    #[error("Unknown {0}")]
    UnknownDeclaration(DeclarationId),

    #[error("No signature can be derived from '{name}' ({declaration})")]
    MissingSignature {
        name: SmolStr,
        declaration: DeclarationId,
    },

    #[error("Parameter '{name}' of {owner} has no declaration")]
    ParameterWithoutDeclaration {
        name: SmolStr,
        owner: DeclarationId,
    },

    #[error("Enum member '{name}' ({declaration}) has no constant value")]
    MissingConstantValue {
        name: SmolStr,
        declaration: DeclarationId,
    },

    #[error("A type node converter for {0:?} is already registered")]
    DuplicateTypeNodeConverter(TypeNodeKind),

    #[error("Reflections can only be renamed while finalizing names, not while {0}")]
    RenameOutsidePhase(Phase),

    #[error("Plugin '{plugin}' failed: {message}")]
    Plugin {
        plugin: &'static str,
        message: String,
    },
}

impl ConvertError {
    pub fn missing_signature(name: impl Into<SmolStr>, declaration: DeclarationId) -> Self {
        Self::MissingSignature {
            name: name.into(),
            declaration,
        }
    }

    pub fn plugin(plugin: &'static str, message: impl Into<String>) -> Self {
        Self::Plugin {
            plugin,
            message: message.into(),
        }
    }
}
