//! An in-memory program.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{DeclarationId, SourceLocation, SymbolId};
use crate::models::{Comment, LiteralValue};

use super::comments::select_comment_block;
use super::declarations::{Declaration, DeclarationKind, ModifierFlags};
use super::resolved::{ResolvedParameter, ResolvedSignature, ResolvedType};
use super::symbols::{Symbol, SymbolFlags};
use super::type_nodes::TypeNode;
use super::{CommentProvider, EntryPoint, SemanticModel};

/// A program held in plain tables.
///
/// Ids are indexes into the symbol and declaration vectors, so they are
/// assigned in insertion order.
#[derive(Debug, Default)]
pub struct MemoryProgram {
    symbols: Vec<Symbol>,
    declarations: Vec<Declaration>,
    entry_points: Vec<EntryPoint>,
    types: FxHashMap<DeclarationId, ResolvedType>,
    return_types: FxHashMap<DeclarationId, ResolvedType>,
    signatures: FxHashMap<DeclarationId, ResolvedSignature>,
    unresolvable_signatures: FxHashSet<DeclarationId>,
    constants: FxHashMap<DeclarationId, LiteralValue>,
    comments: FxHashMap<DeclarationId, Vec<Comment>>,
}

impl MemoryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    // ========================================================================
    // BUILDERS
    // ========================================================================

    /// Add an entry module backed by the source file `file_name`.
    pub fn add_module(&mut self, name: &str, file_name: &str) -> SymbolId {
        let module = self.add_symbol(name, SymbolFlags::VALUE | SymbolFlags::NAMESPACE);
        self.declare_with(module, DeclarationKind::SourceFile, |d| {
            d.with_source(SourceLocation::new(file_name, 1, 0))
        });
        self.entry_points.push(EntryPoint::new(name, module));
        module
    }

    pub fn add_symbol(&mut self, name: &str, flags: SymbolFlags) -> SymbolId {
        let id = SymbolId::new(self.symbols.len());
        self.symbols.push(Symbol::new(id, name, flags));
        id
    }

    /// Add a declaration of `symbol` named after it.
    pub fn declare(&mut self, symbol: SymbolId, kind: DeclarationKind) -> DeclarationId {
        self.declare_with(symbol, kind, |d| d)
    }

    /// Add a declaration of `symbol`, letting `build` fill in its details.
    pub fn declare_with(
        &mut self,
        symbol: SymbolId,
        kind: DeclarationKind,
        build: impl FnOnce(Declaration) -> Declaration,
    ) -> DeclarationId {
        let id = DeclarationId::new(self.declarations.len());
        let name = self
            .symbols
            .get(symbol.index())
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let mut declaration = build(Declaration::new(id, kind, name));
        declaration.id = id;
        declaration.symbol = Some(symbol);
        self.declarations.push(declaration);
        if let Some(symbol) = self.symbols.get_mut(symbol.index()) {
            symbol.declarations.push(id);
        }
        id
    }

    /// Add a symbol with one declaration, exported from `owner`.
    pub fn add_export(
        &mut self,
        owner: SymbolId,
        name: &str,
        kind: DeclarationKind,
        build: impl FnOnce(Declaration) -> Declaration,
    ) -> (SymbolId, DeclarationId) {
        let symbol = self.add_symbol(name, default_flags(kind));
        let declaration = self.declare_with(symbol, kind, build);
        self.export(owner, symbol);
        (symbol, declaration)
    }

    /// Add a symbol with one declaration as a member of `owner`.
    pub fn add_member_declaration(
        &mut self,
        owner: SymbolId,
        name: &str,
        kind: DeclarationKind,
        build: impl FnOnce(Declaration) -> Declaration,
    ) -> (SymbolId, DeclarationId) {
        let symbol = self.add_symbol(name, default_flags(kind));
        let declaration = self.declare_with(symbol, kind, build);
        self.add_member(owner, symbol);
        (symbol, declaration)
    }

    pub fn export(&mut self, owner: SymbolId, symbol: SymbolId) {
        if let Some(owner) = self.symbols.get_mut(owner.index()) {
            owner.exports.push(symbol);
        }
    }

    pub fn add_member(&mut self, owner: SymbolId, member: SymbolId) {
        if let Some(owner) = self.symbols.get_mut(owner.index()) {
            owner.members.push(member);
        }
    }

    /// Make `alias` a re-export of `target`.
    pub fn set_alias(&mut self, alias: SymbolId, target: SymbolId) {
        if let Some(alias) = self.symbols.get_mut(alias.index()) {
            alias.flags |= SymbolFlags::ALIAS;
            alias.alias_target = Some(target);
        }
    }

    /// Add a parameter declaration to a function-like declaration.
    pub fn add_parameter(
        &mut self,
        owner: DeclarationId,
        name: &str,
        type_node: Option<TypeNode>,
        modifiers: ModifierFlags,
    ) -> DeclarationId {
        let id = DeclarationId::new(self.declarations.len());
        let mut parameter = Declaration::new(id, DeclarationKind::Parameter, name)
            .with_modifiers(modifiers);
        parameter.type_node = type_node;
        self.declarations.push(parameter);
        if let Some(owner) = self.declarations.get_mut(owner.index()) {
            owner.parameters.push(id);
        }
        id
    }

    /// Add a type parameter declaration to a generic declaration.
    pub fn add_type_parameter(
        &mut self,
        owner: DeclarationId,
        name: &str,
        constraint: Option<TypeNode>,
    ) -> DeclarationId {
        let id = DeclarationId::new(self.declarations.len());
        let mut parameter = Declaration::new(id, DeclarationKind::TypeParameter, name);
        parameter.constraint = constraint;
        self.declarations.push(parameter);
        if let Some(owner) = self.declarations.get_mut(owner.index()) {
            owner.type_parameters.push(id);
        }
        id
    }

    pub fn declaration_mut(&mut self, id: DeclarationId) -> Option<&mut Declaration> {
        self.declarations.get_mut(id.index())
    }

    pub fn set_type(&mut self, declaration: DeclarationId, ty: ResolvedType) {
        self.types.insert(declaration, ty);
    }

    /// Return type used when synthesizing a signature.
    pub fn set_return_type(&mut self, declaration: DeclarationId, ty: ResolvedType) {
        self.return_types.insert(declaration, ty);
    }

    pub fn set_signature(&mut self, declaration: DeclarationId, signature: ResolvedSignature) {
        self.signatures.insert(declaration, signature);
    }

    /// Make `signature_from_declaration` fail for `declaration`.
    pub fn set_unresolvable_signature(&mut self, declaration: DeclarationId) {
        self.unresolvable_signatures.insert(declaration);
    }

    pub fn set_constant(&mut self, declaration: DeclarationId, value: LiteralValue) {
        self.constants.insert(declaration, value);
    }

    /// Attach a raw comment block; a declaration may carry several.
    pub fn add_comment(&mut self, declaration: DeclarationId, comment: Comment) {
        self.comments.entry(declaration).or_default().push(comment);
    }

    fn synthesize_signature(&self, declaration: &Declaration) -> ResolvedSignature {
        let parameters = declaration
            .parameters
            .iter()
            .filter_map(|id| self.declarations.get(id.index()))
            .map(|parameter| ResolvedParameter {
                name: parameter.name.clone(),
                declaration: Some(parameter.id),
                ty: self.type_at_location(parameter.id),
                optional: parameter.has_modifier(ModifierFlags::OPTIONAL),
                rest: parameter.has_modifier(ModifierFlags::REST),
            })
            .collect();
        let return_type = self
            .return_types
            .get(&declaration.id)
            .cloned()
            .unwrap_or_else(|| ResolvedType::intrinsic("void"));
        ResolvedSignature {
            type_parameters: declaration.type_parameters.clone(),
            parameters,
            return_type,
        }
    }
}

/// Symbol flags implied by a declaration kind.
fn default_flags(kind: DeclarationKind) -> SymbolFlags {
    match kind {
        DeclarationKind::Class | DeclarationKind::Enum => SymbolFlags::VALUE | SymbolFlags::TYPE,
        DeclarationKind::Interface | DeclarationKind::TypeAlias => SymbolFlags::TYPE,
        DeclarationKind::Module => SymbolFlags::VALUE | SymbolFlags::NAMESPACE,
        DeclarationKind::TypeParameter => SymbolFlags::TYPE_PARAMETER,
        DeclarationKind::ExportSpecifier => SymbolFlags::ALIAS,
        _ => SymbolFlags::VALUE,
    }
}

impl SemanticModel for MemoryProgram {
    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    fn exports_of_module(&self, module: SymbolId) -> Vec<SymbolId> {
        self.symbol(module)
            .map(|s| s.exports.clone())
            .unwrap_or_default()
    }

    fn declarations(&self, symbol: SymbolId) -> Vec<DeclarationId> {
        self.symbol(symbol)
            .map(|s| s.declarations.clone())
            .unwrap_or_default()
    }

    fn members(&self, symbol: SymbolId) -> Vec<SymbolId> {
        self.symbol(symbol)
            .map(|s| s.members.clone())
            .unwrap_or_default()
    }

    fn alias_target(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.symbol(symbol)?.alias_target
    }

    fn type_at_location(&self, declaration: DeclarationId) -> ResolvedType {
        self.types
            .get(&declaration)
            .cloned()
            .unwrap_or_else(|| ResolvedType::intrinsic("any"))
    }

    fn signature_from_declaration(&self, declaration: DeclarationId) -> Option<ResolvedSignature> {
        if self.unresolvable_signatures.contains(&declaration) {
            return None;
        }
        if let Some(signature) = self.signatures.get(&declaration) {
            return Some(signature.clone());
        }
        let declaration = self.declaration(declaration)?;
        let has_signature = declaration.kind.is_function_like()
            || matches!(
                declaration.kind,
                DeclarationKind::GetAccessor | DeclarationKind::SetAccessor
            );
        has_signature.then(|| self.synthesize_signature(declaration))
    }

    fn constant_value(&self, declaration: DeclarationId) -> Option<LiteralValue> {
        self.constants.get(&declaration).cloned()
    }
}

impl CommentProvider for MemoryProgram {
    fn comment_for_declarations(&self, declarations: &[DeclarationId]) -> Option<Comment> {
        declarations.iter().find_map(|id| {
            self.comments
                .get(id)
                .and_then(|blocks| select_comment_block(blocks))
                .cloned()
        })
    }
}
