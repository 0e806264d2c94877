//! The documentation graph.
//!
//! ## Entities
//!
//! - [`Reflection`]: an independent node, registered in the project table
//! - [`SignatureReflection`], [`ParameterReflection`], [`TypeParameterReflection`]:
//!   dependent nodes owned by value
//! - [`Type`]: structural type expressions, owned trees without identity
//! - [`ProjectReflection`]: the root and registry

mod comment;
mod error;
mod flags;
mod kind;
mod project;
mod reference;
mod reflection;
mod signature;
mod types;

pub use comment::{Comment, CommentTag};
pub use error::ProjectError;
pub use flags::ReflectionFlags;
pub use kind::ReflectionKind;
pub use project::ProjectReflection;
pub use reference::{ReferenceLink, ReferenceTarget, SymbolSpace};
pub use reflection::{
    DeclarationData, Reflection, ReflectionData, ReflectionGroup, SourceReference,
};
pub use signature::{ParameterReflection, SignatureReflection, TypeParameterReflection};
pub use types::{
    IndexSignatureType, LiteralValue, MappedModifier, ObjectProperty, ObjectType, ReferenceType,
    SignatureParameter, SignatureType, Type, TypeKind, TypeParameterType,
};
