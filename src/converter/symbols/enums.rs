//! Enums and enum members.

use crate::base::ReflectionId;
use crate::models::{ReflectionKind, Type};

use crate::converter::context::Context;
use crate::converter::error::ConvertError;
use crate::converter::registry::SymbolTarget;

use super::{convert_members, first_declaration};

pub(super) fn convert_enum(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    let Some(id) = cx.create_declaration(ReflectionKind::ENUM, target)? else {
        return Ok(None);
    };
    convert_members(cx, id, target.symbol)?;
    Ok(cx.project().contains(id).then_some(id))
}

/// An enum member; its constant value becomes both its type and its default.
pub(super) fn convert_member(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    let declaration = first_declaration(target)?;
    let value = cx.program().constant_value(declaration).ok_or_else(|| {
        ConvertError::MissingConstantValue {
            name: target.name.clone(),
            declaration,
        }
    })?;

    let Some(id) = cx.create_declaration(ReflectionKind::ENUM_MEMBER, target)? else {
        return Ok(None);
    };
    if let Some(data) = cx
        .project_mut()
        .get_mut(id)
        .and_then(|r| r.declaration_data_mut())
    {
        data.default_value = Some(value.to_string());
        data.ty = Some(Type::literal(value));
    }
    Ok(Some(id))
}
