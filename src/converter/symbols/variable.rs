//! Variables and properties.

use crate::base::ReflectionId;
use crate::models::ReflectionKind;
use crate::program::DeclarationKind;

use crate::converter::context::Context;
use crate::converter::error::ConvertError;
use crate::converter::registry::SymbolTarget;

use super::first_declaration;

pub(super) fn convert(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    let kind = match target.kind {
        DeclarationKind::Variable => ReflectionKind::VARIABLE,
        _ => ReflectionKind::PROPERTY,
    };
    let declaration = first_declaration(target)?;
    let initializer = cx
        .program()
        .declaration(declaration)
        .and_then(|d| d.initializer.clone());

    let Some(id) = cx.create_declaration(kind, target)? else {
        return Ok(None);
    };
    let ty = cx.convert_declared_type(declaration)?;
    if let Some(data) = cx
        .project_mut()
        .get_mut(id)
        .and_then(|r| r.declaration_data_mut())
    {
        data.ty = Some(ty);
        data.default_value = initializer;
    }
    Ok(Some(id))
}
