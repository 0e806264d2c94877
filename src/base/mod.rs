//! Foundation types for the docgraph toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`ReflectionId`] - Run-scoped identity of a documentation node
//! - [`SymbolId`], [`DeclarationId`] - Handles into the external semantic model
//! - [`IdAllocator`] - Monotonic id source owned by one conversion run
//! - [`SourceLocation`] - File/line/character position of a declaration
//!
//! This module has NO dependencies on other docgraph modules.

mod ids;
mod position;

pub use ids::{DeclarationId, IdAllocator, ReflectionId, SymbolId};
pub use position::SourceLocation;
