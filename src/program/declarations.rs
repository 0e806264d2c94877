//! Syntactic declarations.

use smol_str::SmolStr;

use crate::base::{DeclarationId, SourceLocation, SymbolId};

use super::type_nodes::TypeNode;

/// Syntactic kind of a declaration.
///
/// The derive order is the order in which the converter processes the
/// kinds of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclarationKind {
    SourceFile,
    Module,
    Class,
    Interface,
    Enum,
    EnumMember,
    TypeAlias,
    Function,
    Variable,
    Constructor,
    Property,
    PropertySignature,
    Method,
    MethodSignature,
    GetAccessor,
    SetAccessor,
    IndexSignature,
    Parameter,
    TypeParameter,
    ExportSpecifier,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::SourceFile => "SourceFile",
            DeclarationKind::Module => "ModuleDeclaration",
            DeclarationKind::Class => "ClassDeclaration",
            DeclarationKind::Interface => "InterfaceDeclaration",
            DeclarationKind::Enum => "EnumDeclaration",
            DeclarationKind::EnumMember => "EnumMember",
            DeclarationKind::TypeAlias => "TypeAliasDeclaration",
            DeclarationKind::Function => "FunctionDeclaration",
            DeclarationKind::Variable => "VariableDeclaration",
            DeclarationKind::Constructor => "Constructor",
            DeclarationKind::Property => "PropertyDeclaration",
            DeclarationKind::PropertySignature => "PropertySignature",
            DeclarationKind::Method => "MethodDeclaration",
            DeclarationKind::MethodSignature => "MethodSignature",
            DeclarationKind::GetAccessor => "GetAccessor",
            DeclarationKind::SetAccessor => "SetAccessor",
            DeclarationKind::IndexSignature => "IndexSignature",
            DeclarationKind::Parameter => "Parameter",
            DeclarationKind::TypeParameter => "TypeParameter",
            DeclarationKind::ExportSpecifier => "ExportSpecifier",
        }
    }

    /// Kinds whose declarations may be overloaded.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            DeclarationKind::Function
                | DeclarationKind::Method
                | DeclarationKind::MethodSignature
                | DeclarationKind::Constructor
        )
    }
}

bitflags::bitflags! {
    /// Syntactic modifiers on a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const EXPORT = 1 << 0;
        const DEFAULT = 1 << 1;
        const PRIVATE = 1 << 2;
        const PROTECTED = 1 << 3;
        const PUBLIC = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const ABSTRACT = 1 << 7;
        const CONST = 1 << 8;
        const LET = 1 << 9;
        /// `?` on a property or parameter.
        const OPTIONAL = 1 << 10;
        /// `...` on a parameter.
        const REST = 1 << 11;
    }
}

/// One syntactic declaration of a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub id: DeclarationId,
    pub kind: DeclarationKind,
    pub name: SmolStr,
    pub symbol: Option<SymbolId>,
    pub modifiers: ModifierFlags,
    /// Whether a function-like declaration has an implementation body.
    pub has_body: bool,
    /// Declared type annotation, or the aliased type of a type alias.
    pub type_node: Option<TypeNode>,
    /// Constraint of a type parameter.
    pub constraint: Option<TypeNode>,
    /// Default of a type parameter.
    pub default_type: Option<TypeNode>,
    /// Initializer source text.
    pub initializer: Option<String>,
    pub parameters: Vec<DeclarationId>,
    pub type_parameters: Vec<DeclarationId>,
    pub extends: Vec<TypeNode>,
    pub implements: Vec<TypeNode>,
    pub source: Option<SourceLocation>,
}

impl Declaration {
    pub fn new(id: DeclarationId, kind: DeclarationKind, name: impl Into<SmolStr>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            symbol: None,
            modifiers: ModifierFlags::empty(),
            has_body: false,
            type_node: None,
            constraint: None,
            default_type: None,
            initializer: None,
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            source: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn with_body(mut self) -> Self {
        self.has_body = true;
        self
    }

    pub fn with_type(mut self, type_node: TypeNode) -> Self {
        self.type_node = Some(type_node);
        self
    }

    pub fn with_constraint(mut self, constraint: TypeNode) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_default_type(mut self, default_type: TypeNode) -> Self {
        self.default_type = Some(default_type);
        self
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    pub fn with_extends(mut self, heritage: TypeNode) -> Self {
        self.extends.push(heritage);
        self
    }

    pub fn with_implements(mut self, heritage: TypeNode) -> Self {
        self.implements.push(heritage);
        self
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    pub fn has_modifier(&self, modifier: ModifierFlags) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn is_external(&self) -> bool {
        self.source.as_ref().is_some_and(|s| s.is_external)
    }
}
