//! Identifier newtypes and the run-scoped id allocator.

use std::fmt;

/// Identity of a reflection within one conversion run.
///
/// Ids are assigned in creation order starting at 0 (the project root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReflectionId(pub u32);

impl ReflectionId {
    /// The id always taken by the project root.
    pub const ROOT: ReflectionId = ReflectionId(0);

    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a symbol owned by the external semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "symbol#{}", self.0)
    }
}

/// Handle to a syntactic declaration owned by the external semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclarationId(pub u32);

impl DeclarationId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "declaration#{}", self.0)
    }
}

/// Monotonic source of [`ReflectionId`]s.
///
/// One allocator belongs to one conversion run, so repeated or concurrent
/// runs in the same process never share a counter.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart numbering at 0.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> ReflectionId {
        let id = ReflectionId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out since the last reset.
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
