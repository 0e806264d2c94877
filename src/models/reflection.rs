//! Independent reflections: the nodes of the documentation tree.
//!
//! A [`Reflection`] is owned by the [`ProjectReflection`](super::ProjectReflection)
//! table and addressed by [`ReflectionId`]. Parent and child links are ids,
//! and only the project may change them, which keeps the containment
//! invariants in one place.

use std::cell::Cell;

use smol_str::SmolStr;

use crate::base::ReflectionId;

use super::comment::Comment;
use super::flags::ReflectionFlags;
use super::kind::ReflectionKind;
use super::reference::ReferenceLink;
use super::signature::{SignatureReflection, TypeParameterReflection};
use super::types::Type;

// ============================================================================
// AUXILIARY DATA
// ============================================================================

/// A location the reflection was declared at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    /// File name relative to the configured base path.
    pub file_name: String,
    pub line: u32,
    pub character: u32,
}

/// A titled group of children sharing a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionGroup {
    pub title: SmolStr,
    pub kind: ReflectionKind,
    pub children: Vec<ReflectionId>,
}

/// Fields carried by declaration reflections.
///
/// Which fields are populated depends on the kind: functions fill
/// `signatures`, classes fill `extended_types`, accessors fill the
/// getter/setter flags, and so on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationData {
    pub ty: Option<Type>,
    pub default_value: Option<String>,
    pub signatures: Vec<SignatureReflection>,
    pub index_signature: Option<SignatureReflection>,
    pub get_signature: Option<SignatureReflection>,
    pub set_signature: Option<SignatureReflection>,
    pub type_parameters: Vec<TypeParameterReflection>,
    pub extended_types: Vec<Type>,
    pub implemented_types: Vec<Type>,
    pub extended_by: Vec<Type>,
    pub implemented_by: Vec<Type>,
    pub has_getter: bool,
    pub has_setter: bool,
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ReflectionData {
    Project,
    Declaration(Box<DeclarationData>),
    /// A re-export pointing at another reflection.
    Reference(ReferenceLink),
}

// ============================================================================
// REFLECTION
// ============================================================================

#[derive(Debug, Clone)]
pub struct Reflection {
    pub(super) id: ReflectionId,
    pub(super) name: SmolStr,
    pub(super) original_name: Option<SmolStr>,
    pub(super) kind: ReflectionKind,
    pub(super) parent: Option<ReflectionId>,
    pub(super) children: Vec<ReflectionId>,
    /// Memoized result of walking to the root; cleared on re-parenting.
    pub(super) project_root: Cell<Option<ReflectionId>>,

    pub flags: ReflectionFlags,
    pub comment: Option<Comment>,
    pub sources: Vec<SourceReference>,
    pub groups: Vec<ReflectionGroup>,
    pub data: ReflectionData,
}

impl Reflection {
    fn with_data(
        id: ReflectionId,
        name: SmolStr,
        kind: ReflectionKind,
        data: ReflectionData,
    ) -> Self {
        Self {
            id,
            name,
            original_name: None,
            kind,
            parent: None,
            children: Vec::new(),
            project_root: Cell::new(None),
            flags: ReflectionFlags::empty(),
            comment: None,
            sources: Vec::new(),
            groups: Vec::new(),
            data,
        }
    }

    pub(super) fn project(id: ReflectionId, name: impl Into<SmolStr>) -> Self {
        Self::with_data(id, name.into(), ReflectionKind::PROJECT, ReflectionData::Project)
    }

    /// A declaration reflection of any non-project, non-reference kind.
    pub fn declaration(id: ReflectionId, name: impl Into<SmolStr>, kind: ReflectionKind) -> Self {
        Self::with_data(
            id,
            name.into(),
            kind,
            ReflectionData::Declaration(Box::default()),
        )
    }

    pub fn reference(id: ReflectionId, name: impl Into<SmolStr>, link: ReferenceLink) -> Self {
        Self::with_data(
            id,
            name.into(),
            ReflectionKind::REFERENCE,
            ReflectionData::Reference(link),
        )
    }

    pub fn id(&self) -> ReflectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name before the first rename, if the reflection was renamed.
    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    pub fn kind(&self) -> ReflectionKind {
        self.kind
    }

    pub fn kind_of(&self, kinds: ReflectionKind) -> bool {
        self.kind.intersects(kinds)
    }

    pub fn parent(&self) -> Option<ReflectionId> {
        self.parent
    }

    pub fn children(&self) -> &[ReflectionId] {
        &self.children
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn declaration_data(&self) -> Option<&DeclarationData> {
        match &self.data {
            ReflectionData::Declaration(data) => Some(data),
            _ => None,
        }
    }

    pub fn declaration_data_mut(&mut self) -> Option<&mut DeclarationData> {
        match &mut self.data {
            ReflectionData::Declaration(data) => Some(data),
            _ => None,
        }
    }

    pub fn reference_link(&self) -> Option<&ReferenceLink> {
        match &self.data {
            ReflectionData::Reference(link) => Some(link),
            _ => None,
        }
    }

    /// Signatures of a signature-bearing reflection; empty otherwise.
    pub fn signatures(&self) -> &[SignatureReflection] {
        self.declaration_data()
            .map(|d| d.signatures.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the comment (or any signature's comment) has content.
    pub fn has_comment(&self) -> bool {
        self.comment
            .as_ref()
            .is_some_and(Comment::has_visible_component)
            || self.signatures().iter().any(|s| {
                s.comment
                    .as_ref()
                    .is_some_and(Comment::has_visible_component)
            })
    }
}
