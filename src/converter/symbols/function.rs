//! Functions, methods and constructors.

use tracing::trace;

use crate::base::ReflectionId;
use crate::models::{ReferenceType, ReflectionKind, Type};
use crate::program::DeclarationKind;

use crate::converter::context::Context;
use crate::converter::error::ConvertError;
use crate::converter::registry::SymbolTarget;
use crate::converter::signatures::create_signature;

use super::overload_declarations;

pub(super) fn convert(
    cx: &mut Context<'_>,
    target: &SymbolTarget,
) -> Result<Option<ReflectionId>, ConvertError> {
    let (kind, signature_kind) = match target.kind {
        DeclarationKind::Constructor => (
            ReflectionKind::CONSTRUCTOR,
            ReflectionKind::CONSTRUCTOR_SIGNATURE,
        ),
        DeclarationKind::Method | DeclarationKind::MethodSignature => {
            (ReflectionKind::METHOD, ReflectionKind::CALL_SIGNATURE)
        }
        _ => (ReflectionKind::FUNCTION, ReflectionKind::CALL_SIGNATURE),
    };

    // Constructors return an instance of the class they are declared in.
    let scope = cx.scope();
    let return_type = if kind == ReflectionKind::CONSTRUCTOR {
        cx.project()
            .get(scope)
            .map(|class| Type::Reference(ReferenceType::to_reflection(class.name(), scope)))
    } else {
        None
    };

    let Some(id) = cx.create_declaration(kind, target)? else {
        return Ok(None);
    };
    let real = overload_declarations(cx.program(), &target.declarations);
    trace!(%id, signatures = real.len(), "signatures");
    for declaration in real {
        if !cx.project().contains(id) {
            return Ok(None);
        }
        create_signature(cx, id, signature_kind, declaration, return_type.clone())?;
    }
    Ok(cx.project().contains(id).then_some(id))
}
