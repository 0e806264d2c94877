//! Late-bound links from one entity to a reflection.
//!
//! Links are created while the tree is still being built, so the target may
//! not exist yet (forward reference) or may be removed later. Resolution is
//! always performed on demand and failure is a normal outcome.

use std::cell::Cell;

use crate::base::{ReflectionId, SymbolId};

use super::kind::ReflectionKind;
use super::project::ProjectReflection;

/// Which declaration space a reference prefers when a symbol produced
/// several reflections (e.g. `const Foo` and `type Foo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolSpace {
    Value,
    #[default]
    Type,
}

impl SymbolSpace {
    /// Whether reflections of `kind` live in this space. Classes and enums
    /// live in both.
    pub fn admits(self, kind: ReflectionKind) -> bool {
        let kinds = match self {
            SymbolSpace::Value => {
                ReflectionKind::SOME_VALUE
                    | ReflectionKind::SOME_MODULE
                    | ReflectionKind::CLASS
                    | ReflectionKind::ENUM
                    | ReflectionKind::ENUM_MEMBER
                    | ReflectionKind::CLASS_MEMBER
            }
            SymbolSpace::Type => {
                ReflectionKind::SOME_TYPE | ReflectionKind::CLASS | ReflectionKind::ENUM
            }
        };
        kind.intersects(kinds)
    }
}

/// What a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceTarget {
    /// A reflection known at creation time.
    Reflection(ReflectionId),
    /// A symbol whose reflection is looked up when needed.
    Symbol(SymbolId),
    /// A name that never had a target (e.g. a global from a dependency).
    Unresolved,
}

/// A target plus the cached result of its last resolution.
#[derive(Debug, Clone)]
pub struct ReferenceLink {
    pub target: ReferenceTarget,
    pub space: SymbolSpace,
    resolved: Cell<Option<ReflectionId>>,
}

impl PartialEq for ReferenceLink {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.space == other.space
    }
}

impl ReferenceLink {
    pub fn new(target: ReferenceTarget, space: SymbolSpace) -> Self {
        Self {
            target,
            space,
            resolved: Cell::new(None),
        }
    }

    pub fn to_reflection(id: ReflectionId) -> Self {
        Self::new(ReferenceTarget::Reflection(id), SymbolSpace::Type)
    }

    pub fn to_symbol(symbol: SymbolId, space: SymbolSpace) -> Self {
        Self::new(ReferenceTarget::Symbol(symbol), space)
    }

    pub fn unresolved() -> Self {
        Self::new(ReferenceTarget::Unresolved, SymbolSpace::Type)
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self.target {
            ReferenceTarget::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Resolve to a live reflection, or `None` if the target is gone or was
    /// never created.
    ///
    /// A symbol target is resolved once and cached; the cache is only
    /// trusted while the cached reflection is still registered.
    pub fn resolve(&self, project: &ProjectReflection) -> Option<ReflectionId> {
        match self.target {
            ReferenceTarget::Reflection(id) => project.contains(id).then_some(id),
            ReferenceTarget::Symbol(symbol) => {
                if let Some(cached) = self.resolved.get() {
                    if project.contains(cached) {
                        return Some(cached);
                    }
                }
                let found = project.resolve_symbol(symbol, self.space);
                self.resolved.set(found);
                found
            }
            ReferenceTarget::Unresolved => None,
        }
    }
}
