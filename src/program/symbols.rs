//! Semantic symbols.

use smol_str::SmolStr;

use crate::base::{DeclarationId, SymbolId};

bitflags::bitflags! {
    /// Which spaces a symbol occupies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const VALUE = 1 << 0;
        const TYPE = 1 << 1;
        const NAMESPACE = 1 << 2;
        /// `export { a as b }` / `import x = y`.
        const ALIAS = 1 << 3;
        const TYPE_PARAMETER = 1 << 4;
    }
}

/// A named entity in the program's symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: SmolStr,
    pub flags: SymbolFlags,
    pub declarations: Vec<DeclarationId>,
    /// Class, interface, enum and literal members.
    pub members: Vec<SymbolId>,
    /// Module and namespace exports.
    pub exports: Vec<SymbolId>,
    pub alias_target: Option<SymbolId>,
}

impl Symbol {
    pub fn new(id: SymbolId, name: impl Into<SmolStr>, flags: SymbolFlags) -> Self {
        Self {
            id,
            name: name.into(),
            flags,
            declarations: Vec::new(),
            members: Vec::new(),
            exports: Vec::new(),
            alias_target: None,
        }
    }

    pub fn is_alias(&self) -> bool {
        self.flags.contains(SymbolFlags::ALIAS)
    }
}
