//! The conversion dispatch engine.
//!
//! ## Architecture
//!
//! ```text
//! EntryPoint ─► Context::convert
//!                 │ exports_of_module
//!                 ▼
//!               convert_symbol ─► classify_merge ─► DeclarationConverter
//!                                                     │
//!                         ┌───────────────────────────┤
//!                         ▼                           ▼
//!               TypeNodeConverter          ResolvedTypeConverter
//! ```
//!
//! A [`Converter`] holds the options and the three converter registries and
//! can be reused. Each call to [`Converter::convert`] (or
//! [`Converter::context`]) starts a fresh [`Context`] with its own id
//! counter, event hub and project.

mod context;
mod diagnostics;
mod error;
mod events;
mod merge;
mod plugins;
mod registry;
mod signatures;
mod symbols;
mod types;

pub use context::{Context, Conversion, Phase, reflection_flags};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use error::ConvertError;
pub use events::{ConverterEvent, EventHub, EventKind, Listener, SignatureSlot};
pub use merge::{MergeDecision, MergeGroup, classify_merge};
pub use plugins::{CommentPlugin, build_groups};
pub use registry::{
    DeclarationConverter, DeclarationRegistry, FnDeclarationConverter, FnResolvedTypeConverter,
    FnTypeNodeConverter, ResolvedTypeConverter, ResolvedTypeRegistry, SymbolTarget,
    TypeNodeConverter, TypeNodeRegistry,
};
pub use signatures::{attach_type_parameters, create_index_signature, create_signature};
pub use symbols::overload_declarations;

use crate::config::Options;
use crate::program::{CommentProvider, EntryPoint, SemanticModel};

pub struct Converter {
    options: Options,
    declarations: DeclarationRegistry,
    type_nodes: TypeNodeRegistry,
    resolved_types: ResolvedTypeRegistry,
}

impl Converter {
    /// A converter with every built-in converter registered.
    pub fn new(options: Options) -> Self {
        let mut converter = Self::empty(options);
        for declaration_converter in symbols::builtin_converters() {
            converter.declarations.register(Box::new(declaration_converter));
        }
        converter.type_nodes = TypeNodeRegistry::from_builtins(types::builtin_node_converters());
        for resolved_converter in types::builtin_resolved_converters() {
            converter.resolved_types.register(Box::new(resolved_converter));
        }
        converter
    }

    /// A converter with empty registries.
    pub fn empty(options: Options) -> Self {
        Self {
            options,
            declarations: DeclarationRegistry::default(),
            type_nodes: TypeNodeRegistry::default(),
            resolved_types: ResolvedTypeRegistry::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn add_declaration_converter(&mut self, converter: Box<dyn DeclarationConverter>) {
        self.declarations.register(converter);
    }

    /// Fails if a converter for the same type node kind already exists.
    pub fn add_type_node_converter(
        &mut self,
        converter: Box<dyn TypeNodeConverter>,
    ) -> Result<(), ConvertError> {
        self.type_nodes.register(converter)
    }

    pub fn add_resolved_type_converter(&mut self, converter: Box<dyn ResolvedTypeConverter>) {
        self.resolved_types.register(converter);
    }

    pub fn declaration_converters(&self) -> &DeclarationRegistry {
        &self.declarations
    }

    pub fn type_node_converters(&self) -> &TypeNodeRegistry {
        &self.type_nodes
    }

    pub fn resolved_type_converters(&self) -> &ResolvedTypeRegistry {
        &self.resolved_types
    }

    /// Start a run; add listeners to it before calling [`Context::convert`].
    pub fn context<'a>(
        &'a self,
        program: &'a dyn SemanticModel,
        comments: &'a dyn CommentProvider,
    ) -> Context<'a> {
        Context::new(self, program, comments)
    }

    /// Run a full conversion with the built-in listeners only.
    pub fn convert(
        &self,
        program: &dyn SemanticModel,
        comments: &dyn CommentProvider,
        entry_points: &[EntryPoint],
    ) -> Result<Conversion, ConvertError> {
        self.context(program, comments).convert(entry_points)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
