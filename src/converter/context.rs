//! The conversion run.
//!
//! A [`Context`] is created per conversion. It owns everything that must not
//! leak between runs: the id allocator, the project under construction, the
//! event hub with its listeners, and the collected diagnostics.
//!
//! ## Phases
//!
//! ```text
//! Converting ──► Resolving ──► FinalizingNames ──► Done
//! (begin, modules,  (resolveBegin,   (finalizeNames;
//!  declarations,     resolve × n,     renames allowed)
//!  end)              resolveEnd)
//! ```

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, trace, warn};

use crate::base::{DeclarationId, IdAllocator, ReflectionId, SymbolId};
use crate::config::Options;
use crate::models::{
    ProjectReflection, ReferenceLink, Reflection, ReflectionFlags, ReflectionKind, SymbolSpace,
    Type,
};
use crate::program::{
    CommentProvider, Declaration, EntryPoint, ModifierFlags, ResolvedType, SemanticModel,
    TypeNode,
};

use super::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use super::error::ConvertError;
use super::events::{ConverterEvent, EventHub, EventKind};
use super::merge::classify_merge;
use super::plugins;
use super::registry::SymbolTarget;
use super::Converter;

// ============================================================================
// PHASES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Converting,
    Resolving,
    FinalizingNames,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Converting => "converting",
            Phase::Resolving => "resolving",
            Phase::FinalizingNames => "finalizing names",
            Phase::Done => "done",
        })
    }
}

/// The outcome of a successful run.
#[derive(Debug)]
pub struct Conversion {
    pub project: ProjectReflection,
    pub diagnostics: DiagnosticCollector,
}

// ============================================================================
// CONTEXT
// ============================================================================

pub struct Context<'a> {
    program: &'a dyn SemanticModel,
    comments: &'a dyn CommentProvider,
    converter: &'a Converter,
    project: ProjectReflection,
    ids: IdAllocator,
    events: EventHub,
    /// Events emitted while a listener runs, delivered once it returns.
    pending: VecDeque<ConverterEvent>,
    dispatching: bool,
    /// Container new reflections are added to.
    scope: ReflectionId,
    phase: Phase,
    diagnostics: DiagnosticCollector,
    /// Symbols exported directly by some entry point.
    entry_exports: FxHashSet<SymbolId>,
}

impl<'a> Context<'a> {
    /// Start a run. The id counter is reset, so the root always takes id 0.
    pub fn new(
        converter: &'a Converter,
        program: &'a dyn SemanticModel,
        comments: &'a dyn CommentProvider,
    ) -> Self {
        let mut ids = IdAllocator::new();
        ids.reset();
        let root = ids.allocate();
        let options = converter.options();
        let mut events = EventHub::new();
        plugins::install(&mut events, options);
        Self {
            program,
            comments,
            converter,
            project: ProjectReflection::new(root, options.name.as_str()),
            ids,
            events,
            pending: VecDeque::new(),
            dispatching: false,
            scope: root,
            phase: Phase::Converting,
            diagnostics: DiagnosticCollector::new(),
            entry_exports: FxHashSet::default(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn program(&self) -> &'a dyn SemanticModel {
        self.program
    }

    pub fn comments(&self) -> &'a dyn CommentProvider {
        self.comments
    }

    pub fn options(&self) -> &'a Options {
        self.converter.options()
    }

    pub fn project(&self) -> &ProjectReflection {
        &self.project
    }

    pub fn project_mut(&mut self) -> &mut ProjectReflection {
        &mut self.project
    }

    pub fn scope(&self) -> ReflectionId {
        self.scope
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.add(diagnostic);
    }

    pub fn events_mut(&mut self) -> &mut EventHub {
        &mut self.events
    }

    /// Register a closure for one event kind on this run.
    pub fn on<F>(&mut self, kind: EventKind, priority: i32, handler: F)
    where
        F: FnMut(&mut Context<'_>, &ConverterEvent) -> Result<(), ConvertError> + 'static,
    {
        self.events.on(kind, priority, handler);
    }

    /// Next id; dependent reflections draw from the same counter.
    pub fn allocate_id(&mut self) -> ReflectionId {
        self.ids.allocate()
    }

    // ========================================================================
    // RUN
    // ========================================================================

    /// Convert every entry point, then resolve and finalize names.
    pub fn convert(mut self, entry_points: &[EntryPoint]) -> Result<Conversion, ConvertError> {
        let program = self.program;
        self.entry_exports = entry_points
            .iter()
            .flat_map(|entry| program.exports_of_module(entry.module))
            .collect();

        debug!(entry_points = entry_points.len(), "conversion begin");
        self.emit(ConverterEvent::Begin)?;
        for entry in entry_points {
            self.convert_entry_point(entry)?;
        }
        self.emit(ConverterEvent::End)?;

        self.phase = Phase::Resolving;
        debug!(reflections = self.project.len(), "resolving");
        self.emit(ConverterEvent::ResolveBegin)?;
        for id in self.project.ids() {
            if self.project.contains(id) {
                self.emit(ConverterEvent::Resolve { reflection: id })?;
            }
        }
        self.emit(ConverterEvent::ResolveEnd)?;

        self.phase = Phase::FinalizingNames;
        debug!("finalizing names");
        self.emit(ConverterEvent::FinalizeNames)?;

        self.phase = Phase::Done;
        debug!(
            reflections = self.project.len(),
            warnings = self.diagnostics.warning_count(),
            "conversion end"
        );
        Ok(Conversion {
            project: self.project,
            diagnostics: self.diagnostics,
        })
    }

    fn convert_entry_point(&mut self, entry: &EntryPoint) -> Result<(), ConvertError> {
        let program = self.program;
        let id = self.ids.allocate();
        let mut module = Reflection::declaration(id, entry.name.clone(), ReflectionKind::MODULE);
        module.comment = self
            .comments
            .comment_for_declarations(&program.declarations(entry.module));
        self.project.register(module, Some(entry.module))?;
        self.project.add_child(self.project.root(), id)?;
        trace!(%id, name = %entry.name, "module");

        self.emit(ConverterEvent::CreateModule {
            reflection: id,
            module: entry.module,
        })?;
        if self.project.contains(id) {
            self.with_scope(id, |cx| cx.convert_exports(entry.module))?;
        }
        Ok(())
    }

    /// Convert every export of a module or namespace into the current scope.
    pub fn convert_exports(&mut self, module: SymbolId) -> Result<(), ConvertError> {
        for symbol in self.program.exports_of_module(module) {
            self.convert_symbol(symbol, None)?;
        }
        Ok(())
    }

    /// Run `f` with `scope` as the container for new reflections.
    pub fn with_scope<T>(
        &mut self,
        scope: ReflectionId,
        f: impl FnOnce(&mut Self) -> Result<T, ConvertError>,
    ) -> Result<T, ConvertError> {
        let previous = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = previous;
        result
    }

    // ========================================================================
    // SYMBOLS
    // ========================================================================

    /// Convert one symbol into the current scope.
    ///
    /// Declarations are grouped by [`classify_merge`]; each group goes to the
    /// converter registered for its primary kind. `name` overrides the
    /// symbol's own name.
    pub fn convert_symbol(
        &mut self,
        symbol: SymbolId,
        name: Option<SmolStr>,
    ) -> Result<Vec<ReflectionId>, ConvertError> {
        let program = self.program;
        let converter = self.converter;
        let sym = program
            .symbol(symbol)
            .ok_or(ConvertError::UnknownSymbol(symbol))?;
        let name = name.unwrap_or_else(|| sym.name.clone());
        if sym.is_alias() {
            return self.convert_alias(symbol, name);
        }

        let mut declarations = Vec::new();
        for id in program.declarations(symbol) {
            let declaration = program
                .declaration(id)
                .ok_or(ConvertError::UnknownDeclaration(id))?;
            if self.is_excluded(declaration) {
                trace!(%symbol, declaration = %id, "excluded");
                continue;
            }
            declarations.push(declaration);
        }
        if declarations.is_empty() {
            return Ok(Vec::new());
        }

        let kinds: BTreeSet<_> = declarations.iter().map(|d| d.kind).collect();
        let mut produced = Vec::new();
        for group in classify_merge(&kinds).groups {
            let target = SymbolTarget {
                symbol,
                name: name.clone(),
                kind: group.primary,
                declarations: declarations
                    .iter()
                    .filter(|d| group.kinds.contains(&d.kind))
                    .map(|d| d.id)
                    .collect(),
            };
            match converter.declaration_converters().find(group.primary) {
                Some(declaration_converter) => {
                    trace!(%symbol, %name, kind = group.primary.as_str(), "convert");
                    if let Some(id) = declaration_converter.convert(self, &target)? {
                        produced.push(id);
                    }
                }
                None => {
                    warn!(%name, kind = group.primary.as_str(), "no converter for declaration kind");
                    let first = target.declarations.first().copied();
                    let location = first
                        .and_then(|id| program.declaration(id))
                        .and_then(|d| d.source.clone());
                    let mut diagnostic = Diagnostic::warning(format!(
                        "no converter for {} '{}'",
                        group.primary.as_str(),
                        name
                    ))
                    .with_code(codes::MISSING_DECLARATION_CONVERTER)
                    .with_location(location);
                    if let Some(first) = first {
                        diagnostic = diagnostic.with_declaration(first);
                    }
                    self.diagnostics.add(diagnostic);
                }
            }
        }
        Ok(produced)
    }

    /// Re-exports become Reference reflections when their target is (or will
    /// be) converted on its own; otherwise the target is converted here under
    /// the alias name.
    fn convert_alias(
        &mut self,
        alias: SymbolId,
        name: SmolStr,
    ) -> Result<Vec<ReflectionId>, ConvertError> {
        let Some(target) = self.resolve_alias(alias) else {
            warn!(%name, "alias has no target");
            self.diagnostics.add(
                Diagnostic::warning(format!("alias '{}' has no target", name))
                    .with_code(codes::UNRESOLVED_ALIAS),
            );
            return Ok(Vec::new());
        };

        let converted = !self.project.ids_by_symbol(target).is_empty();
        if !converted && !self.entry_exports.contains(&target) {
            trace!(%name, %target, "alias converted in place");
            return self.convert_symbol(target, Some(name));
        }

        let declarations = self.program.declarations(alias);
        let id = self.ids.allocate();
        let mut reflection = Reflection::reference(
            id,
            name,
            ReferenceLink::to_symbol(target, SymbolSpace::Value),
        );
        reflection.comment = self.comments.comment_for_declarations(&declarations);
        self.project.register(reflection, Some(alias))?;
        self.project.add_child(self.scope, id)?;
        trace!(%id, %target, "reference");

        self.emit(ConverterEvent::CreateDeclaration {
            reflection: id,
            symbol: Some(alias),
            declarations,
        })?;
        Ok(self.project.contains(id).then_some(id).into_iter().collect())
    }

    /// Follow an alias chain to the first non-alias symbol.
    fn resolve_alias(&self, alias: SymbolId) -> Option<SymbolId> {
        let mut seen = FxHashSet::default();
        let mut current = alias;
        loop {
            let symbol = self.program.symbol(current)?;
            if !symbol.is_alias() {
                return Some(current);
            }
            if !seen.insert(current) {
                return None;
            }
            current = self.program.alias_target(current)?;
        }
    }

    fn is_excluded(&self, declaration: &Declaration) -> bool {
        let options = self.options();
        (options.exclude_private && declaration.has_modifier(ModifierFlags::PRIVATE))
            || (options.exclude_protected && declaration.has_modifier(ModifierFlags::PROTECTED))
            || (options.exclude_externals && declaration.is_external())
    }

    // ========================================================================
    // REFLECTIONS
    // ========================================================================

    /// Create, register and attach a declaration reflection for `target`,
    /// then announce it.
    ///
    /// Returns `None` when a listener removed the reflection; the caller
    /// must then skip its members.
    pub fn create_declaration(
        &mut self,
        kind: ReflectionKind,
        target: &SymbolTarget,
    ) -> Result<Option<ReflectionId>, ConvertError> {
        let program = self.program;
        let id = self.ids.allocate();
        let mut reflection = Reflection::declaration(id, target.name.clone(), kind);
        if let Some(first) = target
            .declarations
            .first()
            .and_then(|d| program.declaration(*d))
        {
            reflection.flags = reflection_flags(first);
        }
        let in_module = self
            .project
            .get(self.scope)
            .is_some_and(|scope| scope.kind_of(ReflectionKind::PROJECT | ReflectionKind::SOME_MODULE));
        if in_module {
            reflection.flags.set_flag(ReflectionFlags::EXPORTED, true);
        }
        reflection.comment = self.comments.comment_for_declarations(&target.declarations);

        self.project.register(reflection, Some(target.symbol))?;
        self.project.add_child(self.scope, id)?;
        trace!(%id, name = %target.name, kind = kind.kind_string(), "created");

        self.emit(ConverterEvent::CreateDeclaration {
            reflection: id,
            symbol: Some(target.symbol),
            declarations: target.declarations.clone(),
        })?;
        Ok(self.project.contains(id).then_some(id))
    }

    /// Remove a reflection with its subtree and the References to it.
    pub fn remove(&mut self, id: ReflectionId) -> Result<Vec<ReflectionId>, ConvertError> {
        let removed = self.project.remove(id)?;
        trace!(%id, count = removed.len(), "removed");
        Ok(removed)
    }

    /// Rename a reflection. Only allowed while finalizing names.
    pub fn rename(&mut self, id: ReflectionId, name: impl Into<SmolStr>) -> Result<(), ConvertError> {
        if self.phase != Phase::FinalizingNames {
            return Err(ConvertError::RenameOutsidePhase(self.phase));
        }
        self.project.rename(id, name)?;
        Ok(())
    }

    /// Deliver an event to every listener of this run.
    ///
    /// Events emitted from inside a listener are queued and delivered, in
    /// emission order, after the current event has reached every listener.
    pub fn emit(&mut self, event: ConverterEvent) -> Result<(), ConvertError> {
        trace!(kind = ?event.kind(), queued = self.dispatching, "emit");
        if self.dispatching {
            self.pending.push_back(event);
            return Ok(());
        }

        self.dispatching = true;
        let mut hub = std::mem::take(&mut self.events);
        let mut next = Some(event);
        let mut result = Ok(());
        while let Some(event) = next {
            result = hub.dispatch(self, &event);
            hub.absorb(std::mem::take(&mut self.events));
            if result.is_err() {
                self.pending.clear();
                break;
            }
            next = self.pending.pop_front();
        }
        self.events = hub;
        self.dispatching = false;
        result
    }

    // ========================================================================
    // TYPES
    // ========================================================================

    /// Convert a syntactic type through the type node registry.
    pub fn convert_type_node(&mut self, node: &TypeNode) -> Type {
        let converter = self.converter;
        let kind = node.kind();
        match converter.type_node_converters().get(kind) {
            Some(type_converter) => type_converter.convert_node(self, node),
            None => {
                warn!(?kind, "no converter for type node");
                self.diagnostics.add(
                    Diagnostic::warning(format!("no converter for {:?} type nodes", kind))
                        .with_code(codes::MISSING_TYPE_NODE_CONVERTER),
                );
                Type::unknown(self.program.node_to_string(node))
            }
        }
    }

    /// Convert a checker type through the first supporting converter, or
    /// fall back to `unknown` with the checker's display string.
    pub fn convert_resolved_type(&mut self, ty: &ResolvedType) -> Type {
        let converter = self.converter;
        match converter.resolved_type_converters().find(ty) {
            Some(type_converter) => type_converter.convert_type(self, ty),
            None => {
                let shown = self.program.type_to_string(ty);
                warn!(ty = %shown, "unsupported type");
                self.diagnostics.add(
                    Diagnostic::warning(format!("cannot convert type '{}'", shown))
                        .with_code(codes::UNKNOWN_TYPE),
                );
                Type::unknown(shown)
            }
        }
    }

    /// The declared type of `declaration`, preferring its annotation.
    pub fn convert_declared_type(&mut self, declaration: DeclarationId) -> Result<Type, ConvertError> {
        let program = self.program;
        let decl = program
            .declaration(declaration)
            .ok_or(ConvertError::UnknownDeclaration(declaration))?;
        Ok(match &decl.type_node {
            Some(node) => self.convert_type_node(node),
            None => self.convert_resolved_type(&program.type_at_location(declaration)),
        })
    }
}

/// Reflection flags implied by a declaration's modifiers.
pub fn reflection_flags(declaration: &Declaration) -> ReflectionFlags {
    const MAPPING: &[(ModifierFlags, ReflectionFlags)] = &[
        (ModifierFlags::PRIVATE, ReflectionFlags::PRIVATE),
        (ModifierFlags::PROTECTED, ReflectionFlags::PROTECTED),
        (ModifierFlags::PUBLIC, ReflectionFlags::PUBLIC),
        (ModifierFlags::STATIC, ReflectionFlags::STATIC),
        (ModifierFlags::READONLY, ReflectionFlags::READONLY),
        (ModifierFlags::ABSTRACT, ReflectionFlags::ABSTRACT),
        (ModifierFlags::CONST, ReflectionFlags::CONST),
        (ModifierFlags::LET, ReflectionFlags::LET),
        (ModifierFlags::OPTIONAL, ReflectionFlags::OPTIONAL),
        (ModifierFlags::REST, ReflectionFlags::REST),
        (ModifierFlags::EXPORT, ReflectionFlags::EXPORTED),
    ];
    let mut flags = ReflectionFlags::empty();
    for (modifier, flag) in MAPPING {
        if declaration.has_modifier(*modifier) {
            flags.set_flag(*flag, true);
        }
    }
    if declaration.is_external() {
        flags.set_flag(ReflectionFlags::EXTERNAL, true);
    }
    flags
}
