//! Diagnostics: non-fatal conversion problems.
//!
//! Anything the converter skips or approximates is logged through `tracing`
//! and recorded here, so embedders can report it after the run.

use smol_str::SmolStr;

use crate::base::{DeclarationId, SourceLocation};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Code from [`codes`], e.g. `"W0001"`.
    pub code: Option<SmolStr>,
    pub message: String,
    /// Declaration the problem was found on.
    pub declaration: Option<DeclarationId>,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            message: message.into(),
            declaration: None,
            location: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            ..Self::warning(message)
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_declaration(mut self, declaration: DeclarationId) -> Self {
        self.declaration = Some(declaration);
        self
    }

    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

pub mod codes {
    /// No converter is registered for a declaration kind.
    pub const MISSING_DECLARATION_CONVERTER: &str = "W0001";
    /// No converter is registered for a syntactic type kind.
    pub const MISSING_TYPE_NODE_CONVERTER: &str = "W0002";
    /// No resolved-type converter supports a checker type.
    pub const UNKNOWN_TYPE: &str = "W0003";
    /// An alias export has no target.
    pub const UNRESOLVED_ALIAS: &str = "W0004";
    /// A reflection was removed by a plugin.
    pub const REMOVED_BY_PLUGIN: &str = "I0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics carrying `code`.
    pub fn with_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.code.as_deref() == Some(code))
            .collect()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
