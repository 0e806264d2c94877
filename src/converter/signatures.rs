//! Dependent reflections: signatures, parameters and type parameters.
//!
//! Each is built completely, attached to its owner, and only then announced,
//! so listeners always see it in place. If a listener removes the owner the
//! remaining announcements are skipped.

use smol_str::SmolStr;

use crate::base::{DeclarationId, ReflectionId};
use crate::models::{
    ParameterReflection, ReflectionFlags, ReflectionKind, SignatureReflection, Type,
    TypeParameterReflection,
};
use crate::program::{Declaration, ModifierFlags, ResolvedSignature};

use super::context::Context;
use super::error::ConvertError;
use super::events::{ConverterEvent, SignatureSlot};

/// Derive a signature from `declaration` and attach it to `owner`.
///
/// `kind` selects the slot: get/set signatures replace the owner's accessor
/// slots, everything else is appended to `signatures`. `return_type`
/// overrides the declared return type (constructors, setters).
pub fn create_signature(
    cx: &mut Context<'_>,
    owner: ReflectionId,
    kind: ReflectionKind,
    declaration: DeclarationId,
    return_type: Option<Type>,
) -> Result<(), ConvertError> {
    let program = cx.program();
    let decl = program
        .declaration(declaration)
        .ok_or(ConvertError::UnknownDeclaration(declaration))?;
    let resolved = program
        .signature_from_declaration(declaration)
        .ok_or_else(|| ConvertError::missing_signature(decl.name.clone(), declaration))?;
    let name: SmolStr = cx
        .project()
        .get(owner)
        .map(|r| r.name().into())
        .unwrap_or_else(|| decl.name.clone());

    let signature = build_signature(cx, kind, name, decl, &resolved, return_type)?;
    let parameter_decls: Vec<DeclarationId> = resolved
        .parameters
        .iter()
        .filter_map(|p| p.declaration)
        .collect();
    let type_parameter_decls = resolved.type_parameters.clone();

    let Some(data) = cx
        .project_mut()
        .get_mut(owner)
        .and_then(|r| r.declaration_data_mut())
    else {
        return Err(ConvertError::Project(
            crate::models::ProjectError::UnknownReflection(owner),
        ));
    };
    let slot = if kind == ReflectionKind::GET_SIGNATURE {
        data.get_signature = Some(signature);
        SignatureSlot::Get
    } else if kind == ReflectionKind::SET_SIGNATURE {
        data.set_signature = Some(signature);
        SignatureSlot::Set
    } else {
        data.signatures.push(signature);
        SignatureSlot::Call(data.signatures.len() - 1)
    };

    announce(
        cx,
        owner,
        slot,
        Some(declaration),
        &type_parameter_decls,
        &parameter_decls,
    )
}

/// Build the index signature of `owner` from an index signature declaration.
pub fn create_index_signature(
    cx: &mut Context<'_>,
    owner: ReflectionId,
    declaration: DeclarationId,
) -> Result<(), ConvertError> {
    let program = cx.program();
    let decl = program
        .declaration(declaration)
        .ok_or(ConvertError::UnknownDeclaration(declaration))?;

    let mut signature =
        SignatureReflection::new(cx.allocate_id(), "__index", ReflectionKind::INDEX_SIGNATURE);
    signature.comment = cx.comments().comment_for_declarations(&[declaration]);
    for parameter in &decl.parameters {
        let parameter_decl = program
            .declaration(*parameter)
            .ok_or(ConvertError::UnknownDeclaration(*parameter))?;
        let mut reflection = ParameterReflection::new(cx.allocate_id(), parameter_decl.name.clone());
        reflection.ty = Some(cx.convert_declared_type(*parameter)?);
        signature.parameters.push(reflection);
    }
    signature.return_type = Some(cx.convert_declared_type(declaration)?);
    if decl.has_modifier(ModifierFlags::READONLY) {
        signature.flags.set_flag(ReflectionFlags::READONLY, true);
    }

    let Some(data) = cx
        .project_mut()
        .get_mut(owner)
        .and_then(|r| r.declaration_data_mut())
    else {
        return Err(ConvertError::Project(
            crate::models::ProjectError::UnknownReflection(owner),
        ));
    };
    data.index_signature = Some(signature);

    announce(
        cx,
        owner,
        SignatureSlot::Index,
        Some(declaration),
        &[],
        &decl.parameters,
    )
}

/// Convert type parameter declarations and attach them to `owner` itself.
pub fn attach_type_parameters(
    cx: &mut Context<'_>,
    owner: ReflectionId,
    declarations: &[DeclarationId],
) -> Result<(), ConvertError> {
    if declarations.is_empty() {
        return Ok(());
    }
    let type_parameters = build_type_parameters(cx, declarations)?;
    if let Some(data) = cx
        .project_mut()
        .get_mut(owner)
        .and_then(|r| r.declaration_data_mut())
    {
        data.type_parameters = type_parameters;
    }
    for (index, declaration) in declarations.iter().enumerate() {
        if !cx.project().contains(owner) {
            return Ok(());
        }
        cx.emit(ConverterEvent::CreateTypeParameter {
            owner,
            signature: None,
            index,
            declaration: *declaration,
        })?;
    }
    Ok(())
}

fn announce(
    cx: &mut Context<'_>,
    owner: ReflectionId,
    slot: SignatureSlot,
    declaration: Option<DeclarationId>,
    type_parameters: &[DeclarationId],
    parameters: &[DeclarationId],
) -> Result<(), ConvertError> {
    cx.emit(ConverterEvent::CreateSignature {
        owner,
        slot,
        declaration,
    })?;
    for (index, declaration) in type_parameters.iter().enumerate() {
        if !cx.project().contains(owner) {
            return Ok(());
        }
        cx.emit(ConverterEvent::CreateTypeParameter {
            owner,
            signature: Some(slot),
            index,
            declaration: *declaration,
        })?;
    }
    for (index, declaration) in parameters.iter().enumerate() {
        if !cx.project().contains(owner) {
            return Ok(());
        }
        cx.emit(ConverterEvent::CreateParameter {
            owner,
            slot,
            index,
            declaration: *declaration,
        })?;
    }
    Ok(())
}

fn build_signature(
    cx: &mut Context<'_>,
    kind: ReflectionKind,
    name: SmolStr,
    decl: &Declaration,
    resolved: &ResolvedSignature,
    return_type: Option<Type>,
) -> Result<SignatureReflection, ConvertError> {
    let program = cx.program();
    let mut signature = SignatureReflection::new(cx.allocate_id(), name, kind);
    signature.comment = cx.comments().comment_for_declarations(&[decl.id]);
    signature.type_parameters = build_type_parameters(cx, &resolved.type_parameters)?;

    for parameter in &resolved.parameters {
        let declaration = parameter
            .declaration
            .ok_or_else(|| ConvertError::ParameterWithoutDeclaration {
                name: parameter.name.clone(),
                owner: decl.id,
            })?;
        let parameter_decl = program
            .declaration(declaration)
            .ok_or(ConvertError::UnknownDeclaration(declaration))?;

        let mut reflection = ParameterReflection::new(cx.allocate_id(), parameter.name.clone());
        if parameter.optional || parameter_decl.has_modifier(ModifierFlags::OPTIONAL) {
            reflection.flags.set_flag(ReflectionFlags::OPTIONAL, true);
        }
        if parameter.rest || parameter_decl.has_modifier(ModifierFlags::REST) {
            reflection.flags.set_flag(ReflectionFlags::REST, true);
        }
        reflection.ty = Some(match &parameter_decl.type_node {
            Some(node) => cx.convert_type_node(node),
            None => cx.convert_resolved_type(&parameter.ty),
        });
        reflection.default_value = parameter_decl.initializer.clone();
        signature.parameters.push(reflection);
    }

    signature.return_type = Some(match (return_type, &decl.type_node) {
        (Some(ty), _) => ty,
        (None, Some(node)) => cx.convert_type_node(node),
        (None, None) => cx.convert_resolved_type(&resolved.return_type),
    });
    Ok(signature)
}

fn build_type_parameters(
    cx: &mut Context<'_>,
    declarations: &[DeclarationId],
) -> Result<Vec<TypeParameterReflection>, ConvertError> {
    let program = cx.program();
    let mut type_parameters = Vec::with_capacity(declarations.len());
    for id in declarations {
        let decl = program
            .declaration(*id)
            .ok_or(ConvertError::UnknownDeclaration(*id))?;
        let mut reflection = TypeParameterReflection::new(cx.allocate_id(), decl.name.clone());
        reflection.comment = cx.comments().comment_for_declarations(&[*id]);
        reflection.constraint = decl.constraint.as_ref().map(|n| cx.convert_type_node(n));
        reflection.default = decl.default_type.as_ref().map(|n| cx.convert_type_node(n));
        type_parameters.push(reflection);
    }
    Ok(type_parameters)
}
