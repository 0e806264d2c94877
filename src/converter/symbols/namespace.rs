use crate::base::ReflectionId;
use crate::models::ReflectionKind;

use crate::converter::context::Context;
use crate::converter::error::ConvertError;
use crate::converter::registry::SymbolTarget;

/// `namespace N { ... }`: a container holding the namespace's exports.
pub(super) fn convert(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    let Some(id) = cx.create_declaration(ReflectionKind::NAMESPACE, target)? else {
        return Ok(None);
    };
    cx.with_scope(id, |cx| cx.convert_exports(target.symbol))?;
    Ok(Some(id))
}
