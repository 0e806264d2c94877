//! The semantic program consumed by the converter.
//!
//! The converter never parses or type-checks anything itself. It reads a
//! program through two query traits:
//!
//! - [`SemanticModel`]: symbols, declarations, resolved types and signatures
//! - [`CommentProvider`]: parsed documentation comments
//!
//! Both are pure queries; the converter never mutates the program.
//! [`MemoryProgram`] implements both from tables filled through a builder API.

mod comments;
mod declarations;
mod memory;
mod resolved;
mod symbols;
mod type_nodes;

pub use comments::select_comment_block;
pub use declarations::{Declaration, DeclarationKind, ModifierFlags};
pub use memory::MemoryProgram;
pub use resolved::{ResolvedParameter, ResolvedSignature, ResolvedType};
pub use symbols::{Symbol, SymbolFlags};
pub use type_nodes::{
    FunctionTypeNode, ParameterNode, TypeMemberNode, TypeNode, TypeNodeKind, TypeParameterNode,
};

use smol_str::SmolStr;

use crate::base::{DeclarationId, SymbolId};
use crate::models::{Comment, LiteralValue};

// ============================================================================
// QUERY TRAITS
// ============================================================================

/// Read access to a checked program.
pub trait SemanticModel {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    fn declaration(&self, id: DeclarationId) -> Option<&Declaration>;

    /// Exported symbols of a module or namespace, in declaration order.
    fn exports_of_module(&self, module: SymbolId) -> Vec<SymbolId>;

    /// Declarations of a symbol, in source order.
    fn declarations(&self, symbol: SymbolId) -> Vec<DeclarationId>;

    /// Members of a class, interface, enum or object literal.
    fn members(&self, symbol: SymbolId) -> Vec<SymbolId>;

    /// The symbol an alias (re-export) points at.
    fn alias_target(&self, symbol: SymbolId) -> Option<SymbolId>;

    fn type_at_location(&self, declaration: DeclarationId) -> ResolvedType;

    /// `None` when no signature can be derived.
    fn signature_from_declaration(&self, declaration: DeclarationId) -> Option<ResolvedSignature>;

    /// Constant value of an enum member.
    fn constant_value(&self, declaration: DeclarationId) -> Option<LiteralValue>;

    fn type_to_string(&self, ty: &ResolvedType) -> String {
        ty.display()
    }

    fn node_to_string(&self, node: &TypeNode) -> String {
        node.display()
    }
}

/// Documentation comments for declarations.
pub trait CommentProvider {
    /// The comment describing the entity declared by `declarations`.
    fn comment_for_declarations(&self, declarations: &[DeclarationId]) -> Option<Comment>;
}

/// A documented module: one per entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: SmolStr,
    pub module: SymbolId,
}

impl EntryPoint {
    pub fn new(name: impl Into<SmolStr>, module: SymbolId) -> Self {
        Self {
            name: name.into(),
            module,
        }
    }
}
