//! Converter registries.
//!
//! Three tables drive dispatch:
//!
//! - declaration converters, keyed by [`DeclarationKind`]; several may claim
//!   a kind and the highest priority wins (the earliest registered on ties)
//! - type node converters, keyed by [`TypeNodeKind`]; at most one per kind,
//!   a second registration is rejected
//! - resolved type converters, tried in priority order until one
//!   `supports` the type

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{DeclarationId, ReflectionId, SymbolId};
use crate::models::Type;
use crate::program::{DeclarationKind, ResolvedType, TypeNode, TypeNodeKind};

use super::context::Context;
use super::error::ConvertError;

// ============================================================================
// CONVERTER TRAITS
// ============================================================================

/// What a declaration converter is asked to convert: one merge group of a
/// symbol's declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTarget {
    pub symbol: SymbolId,
    /// Name to give the reflection; differs from the symbol name for
    /// aliases converted in place.
    pub name: SmolStr,
    pub kind: DeclarationKind,
    pub declarations: Vec<DeclarationId>,
}

pub trait DeclarationConverter {
    /// Declaration kinds this converter handles.
    fn kinds(&self) -> &[DeclarationKind];

    fn priority(&self) -> i32 {
        0
    }

    /// Create the reflection for `target` in the current scope.
    ///
    /// `Ok(None)` means nothing was produced (or a listener removed it).
    fn convert(
        &self,
        cx: &mut Context<'_>,
        target: &SymbolTarget,
    ) -> Result<Option<ReflectionId>, ConvertError>;
}

pub trait TypeNodeConverter {
    fn kind(&self) -> TypeNodeKind;

    fn convert_node(&self, cx: &mut Context<'_>, node: &TypeNode) -> Type;
}

pub trait ResolvedTypeConverter {
    fn priority(&self) -> i32 {
        0
    }

    fn supports(&self, ty: &ResolvedType) -> bool;

    fn convert_type(&self, cx: &mut Context<'_>, ty: &ResolvedType) -> Type;
}

// ============================================================================
// FUNCTION-BACKED CONVERTERS
// ============================================================================

pub type DeclarationFn =
    fn(&mut Context<'_>, &SymbolTarget) -> Result<Option<ReflectionId>, ConvertError>;
pub type TypeNodeFn = fn(&mut Context<'_>, &TypeNode) -> Type;
pub type ResolvedTypeFn = fn(&mut Context<'_>, &ResolvedType) -> Type;

/// A declaration converter given as a plain function.
pub struct FnDeclarationConverter {
    pub kinds: &'static [DeclarationKind],
    pub convert: DeclarationFn,
}

impl DeclarationConverter for FnDeclarationConverter {
    fn kinds(&self) -> &[DeclarationKind] {
        self.kinds
    }

    fn convert(
        &self,
        cx: &mut Context<'_>,
        target: &SymbolTarget,
    ) -> Result<Option<ReflectionId>, ConvertError> {
        (self.convert)(cx, target)
    }
}

pub struct FnTypeNodeConverter {
    pub kind: TypeNodeKind,
    pub convert: TypeNodeFn,
}

impl TypeNodeConverter for FnTypeNodeConverter {
    fn kind(&self) -> TypeNodeKind {
        self.kind
    }

    fn convert_node(&self, cx: &mut Context<'_>, node: &TypeNode) -> Type {
        (self.convert)(cx, node)
    }
}

pub struct FnResolvedTypeConverter {
    pub priority: i32,
    pub supports: fn(&ResolvedType) -> bool,
    pub convert: ResolvedTypeFn,
}

impl ResolvedTypeConverter for FnResolvedTypeConverter {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, ty: &ResolvedType) -> bool {
        (self.supports)(ty)
    }

    fn convert_type(&self, cx: &mut Context<'_>, ty: &ResolvedType) -> Type {
        (self.convert)(cx, ty)
    }
}

// ============================================================================
// REGISTRIES
// ============================================================================

#[derive(Default)]
pub struct DeclarationRegistry {
    converters: Vec<Box<dyn DeclarationConverter>>,
}

impl DeclarationRegistry {
    pub fn register(&mut self, converter: Box<dyn DeclarationConverter>) {
        self.converters.push(converter);
    }

    /// Highest-priority converter for `kind`; the earliest on ties.
    pub fn find(&self, kind: DeclarationKind) -> Option<&dyn DeclarationConverter> {
        let mut best: Option<&dyn DeclarationConverter> = None;
        for converter in &self.converters {
            if !converter.kinds().contains(&kind) {
                continue;
            }
            match best {
                Some(current) if current.priority() >= converter.priority() => {}
                _ => best = Some(converter.as_ref()),
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

#[derive(Default)]
pub struct TypeNodeRegistry {
    converters: IndexMap<TypeNodeKind, Box<dyn TypeNodeConverter>>,
}

impl TypeNodeRegistry {
    /// Build from converters whose kinds are distinct by construction.
    pub(crate) fn from_builtins(converters: Vec<FnTypeNodeConverter>) -> Self {
        let converters = converters
            .into_iter()
            .map(|c| (c.kind, Box::new(c) as Box<dyn TypeNodeConverter>))
            .collect();
        Self { converters }
    }

    pub fn register(&mut self, converter: Box<dyn TypeNodeConverter>) -> Result<(), ConvertError> {
        let kind = converter.kind();
        if self.converters.contains_key(&kind) {
            return Err(ConvertError::DuplicateTypeNodeConverter(kind));
        }
        self.converters.insert(kind, converter);
        Ok(())
    }

    pub fn get(&self, kind: TypeNodeKind) -> Option<&dyn TypeNodeConverter> {
        self.converters.get(&kind).map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

#[derive(Default)]
pub struct ResolvedTypeRegistry {
    /// Kept sorted by descending priority, stable on ties.
    converters: Vec<Box<dyn ResolvedTypeConverter>>,
}

impl ResolvedTypeRegistry {
    pub fn register(&mut self, converter: Box<dyn ResolvedTypeConverter>) {
        let priority = converter.priority();
        let position = self
            .converters
            .iter()
            .position(|c| c.priority() < priority)
            .unwrap_or(self.converters.len());
        self.converters.insert(position, converter);
    }

    /// First converter, in priority order, that supports `ty`.
    pub fn find(&self, ty: &ResolvedType) -> Option<&dyn ResolvedTypeConverter> {
        self.converters
            .iter()
            .find(|c| c.supports(ty))
            .map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}
