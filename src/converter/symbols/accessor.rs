//! Get/set accessor pairs.
//!
//! Both halves of a pair become one ACCESSOR reflection with a get and a set
//! signature. The property type is taken from the getter's annotation, then
//! from the setter's parameter, then from the checker.

use crate::base::{DeclarationId, ReflectionId};
use crate::models::{ReflectionKind, Type};
use crate::program::DeclarationKind;

use crate::converter::context::Context;
use crate::converter::error::ConvertError;
use crate::converter::registry::SymbolTarget;
use crate::converter::signatures::create_signature;

use super::first_declaration;

pub(super) fn convert(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    let program = cx.program();
    let find = |kind: DeclarationKind| -> Option<DeclarationId> {
        target
            .declarations
            .iter()
            .copied()
            .find(|d| program.declaration(*d).is_some_and(|d| d.kind == kind))
    };
    let getter = find(DeclarationKind::GetAccessor);
    let setter = find(DeclarationKind::SetAccessor);

    let Some(id) = cx.create_declaration(ReflectionKind::ACCESSOR, target)? else {
        return Ok(None);
    };

    let getter_node = getter
        .and_then(|d| program.declaration(d))
        .and_then(|d| d.type_node.as_ref());
    let setter_node = setter
        .and_then(|d| program.declaration(d))
        .and_then(|d| d.parameters.first())
        .and_then(|p| program.declaration(*p))
        .and_then(|p| p.type_node.as_ref());
    let ty = match getter_node.or(setter_node) {
        Some(node) => cx.convert_type_node(node),
        None => cx.convert_declared_type(first_declaration(target)?)?,
    };
    if let Some(data) = cx
        .project_mut()
        .get_mut(id)
        .and_then(|r| r.declaration_data_mut())
    {
        data.ty = Some(ty);
        data.has_getter = getter.is_some();
        data.has_setter = setter.is_some();
    }

    if let Some(getter) = getter {
        create_signature(cx, id, ReflectionKind::GET_SIGNATURE, getter, None)?;
    }
    if let Some(setter) = setter {
        if !cx.project().contains(id) {
            return Ok(None);
        }
        create_signature(
            cx,
            id,
            ReflectionKind::SET_SIGNATURE,
            setter,
            Some(Type::intrinsic("void")),
        )?;
    }
    Ok(cx.project().contains(id).then_some(id))
}
