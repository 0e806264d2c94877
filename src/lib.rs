//! # docgraph-base
//!
//! Core library for turning a checked program into a documentation graph
//! and serializing it to JSON.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! serialization → Worker pipeline, JSON output
//!   ↓
//! converter     → Dispatch engine, events, built-in converters and plugins
//!   ↓
//! models        → Reflections, types, project registry
//!   ↓
//! program       → Semantic model traits, in-memory program
//!   ↓
//! base          → Primitives (ids, id allocator, source locations)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! let mut program = MemoryProgram::new();
//! let module = program.add_module("index", "src/index.ts");
//! program.add_export(module, "VERSION", DeclarationKind::Variable, |d| d);
//!
//! let converter = Converter::default();
//! let conversion = converter.convert(&program, &program, program.entry_points())?;
//! let json = project_to_json(&conversion.project, true)?;
//! ```

// ============================================================================
// MODULES (dependency order: base → program → models → converter → serialization)
// ============================================================================

/// Foundation types: ids, id allocation, source locations
pub mod base;

/// Conversion options
pub mod config;

/// The semantic program consumed by the converter
pub mod program;

/// Reflections, types and the project registry
pub mod models;

/// Conversion engine: registries, events, converters, plugins
pub mod converter;

/// JSON serialization: worker pipeline and output
pub mod serialization;

use thiserror::Error;

// Re-export commonly needed items
pub use base::{DeclarationId, ReflectionId, SourceLocation, SymbolId};
pub use config::{ConfigError, Options};
pub use converter::{Context, Conversion, ConvertError, Converter, Diagnostic};
pub use models::{ProjectReflection, Reflection, ReflectionFlags, ReflectionKind, Type};
pub use program::{CommentProvider, EntryPoint, MemoryProgram, SemanticModel};
pub use serialization::{SerializeError, Serializer, project_to_json, write_json};

// ============================================================================
// END TO END
// ============================================================================

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Convert `entry_points` and render the project as JSON, indented when the
/// converter's options ask for it.
pub fn render(
    converter: &Converter,
    program: &dyn SemanticModel,
    comments: &dyn CommentProvider,
    entry_points: &[EntryPoint],
) -> Result<(Conversion, String), Error> {
    let conversion = converter.convert(program, comments, entry_points)?;
    let json = project_to_json(&conversion.project, converter.options().pretty)?;
    Ok((conversion, json))
}
