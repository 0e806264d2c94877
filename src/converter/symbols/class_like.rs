//! Classes and interfaces.

use crate::base::{DeclarationId, ReflectionId};
use crate::models::{ReflectionKind, Type};

use crate::converter::context::Context;
use crate::converter::error::ConvertError;
use crate::converter::registry::SymbolTarget;
use crate::converter::signatures::attach_type_parameters;

use super::convert_members;

/// A class, absorbing any interface declarations merged into it.
pub(super) fn convert_class(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    convert_class_like(cx, target, ReflectionKind::CLASS)
}

pub(super) fn convert_interface(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    convert_class_like(cx, target, ReflectionKind::INTERFACE)
}

fn convert_class_like(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
    kind: ReflectionKind,
) -> Result<Option<ReflectionId>, ConvertError> {
    let program = cx.program();
    let Some(id) = cx.create_declaration(kind, target)? else {
        return Ok(None);
    };

    // Type parameters come from the first declaration that has any.
    let type_parameters: Vec<DeclarationId> = target
        .declarations
        .iter()
        .filter_map(|d| program.declaration(*d))
        .find(|d| !d.type_parameters.is_empty())
        .map(|d| d.type_parameters.clone())
        .unwrap_or_default();
    attach_type_parameters(cx, id, &type_parameters)?;
    if !cx.project().contains(id) {
        return Ok(None);
    }

    let mut extended = Vec::new();
    let mut implemented = Vec::new();
    for declaration in target.declarations.iter().filter_map(|d| program.declaration(*d)) {
        for node in &declaration.extends {
            push_unique(&mut extended, cx.convert_type_node(node));
        }
        for node in &declaration.implements {
            push_unique(&mut implemented, cx.convert_type_node(node));
        }
    }
    if let Some(data) = cx
        .project_mut()
        .get_mut(id)
        .and_then(|r| r.declaration_data_mut())
    {
        data.extended_types = extended;
        data.implemented_types = implemented;
    }

    convert_members(cx, id, target.symbol)?;
    Ok(cx.project().contains(id).then_some(id))
}

fn push_unique(types: &mut Vec<Type>, ty: Type) {
    if !types.contains(&ty) {
        types.push(ty);
    }
}
