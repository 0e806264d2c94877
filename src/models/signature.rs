//! Dependent reflections.
//!
//! Signatures, parameters and type parameters exist only as parts of their
//! owning declaration. They are stored by value inside it, are never
//! registered with the project, and disappear with their owner. Their ids
//! come from the same allocator as independent reflections.

use smol_str::SmolStr;

use crate::base::ReflectionId;

use super::comment::Comment;
use super::flags::ReflectionFlags;
use super::kind::ReflectionKind;
use super::reflection::SourceReference;
use super::types::Type;

/// A call, construct, index, get or set signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureReflection {
    pub id: ReflectionId,
    pub name: SmolStr,
    /// One of the `*_SIGNATURE` kinds.
    pub kind: ReflectionKind,
    pub flags: ReflectionFlags,
    pub comment: Option<Comment>,
    pub sources: Vec<SourceReference>,
    pub type_parameters: Vec<TypeParameterReflection>,
    pub parameters: Vec<ParameterReflection>,
    pub return_type: Option<Type>,
}

impl SignatureReflection {
    pub fn new(id: ReflectionId, name: impl Into<SmolStr>, kind: ReflectionKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            flags: ReflectionFlags::empty(),
            comment: None,
            sources: Vec::new(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterReflection> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut ParameterReflection> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterReflection {
    pub id: ReflectionId,
    pub name: SmolStr,
    pub flags: ReflectionFlags,
    pub comment: Option<Comment>,
    pub ty: Option<Type>,
    pub default_value: Option<String>,
}

impl ParameterReflection {
    pub fn new(id: ReflectionId, name: impl Into<SmolStr>) -> Self {
        Self {
            id,
            name: name.into(),
            flags: ReflectionFlags::empty(),
            comment: None,
            ty: None,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterReflection {
    pub id: ReflectionId,
    pub name: SmolStr,
    pub comment: Option<Comment>,
    pub constraint: Option<Type>,
    pub default: Option<Type>,
}

impl TypeParameterReflection {
    pub fn new(id: ReflectionId, name: impl Into<SmolStr>) -> Self {
        Self {
            id,
            name: name.into(),
            comment: None,
            constraint: None,
            default: None,
        }
    }
}
