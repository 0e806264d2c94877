use crate::base::ReflectionId;
use crate::models::ReflectionKind;

use crate::converter::context::Context;
use crate::converter::error::ConvertError;
use crate::converter::registry::SymbolTarget;
use crate::converter::signatures::attach_type_parameters;

use super::first_declaration;

/// `type A<T> = ...`: the aliased type plus its type parameters.
pub(super) fn convert(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    let declaration = first_declaration(target)?;
    let type_parameters = cx
        .program()
        .declaration(declaration)
        .map(|d| d.type_parameters.clone())
        .unwrap_or_default();

    let Some(id) = cx.create_declaration(ReflectionKind::TYPE_ALIAS, target)? else {
        return Ok(None);
    };
    attach_type_parameters(cx, id, &type_parameters)?;
    if !cx.project().contains(id) {
        return Ok(None);
    }
    let ty = cx.convert_declared_type(declaration)?;
    if let Some(data) = cx
        .project_mut()
        .get_mut(id)
        .and_then(|r| r.declaration_data_mut())
    {
        data.ty = Some(ty);
    }
    Ok(Some(id))
}
