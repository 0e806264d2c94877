//! Built-in declaration converters.
//!
//! One converter per reflection shape:
//!
//! - `namespace`: module declarations
//! - `class_like`: classes (with merged interfaces) and interfaces
//! - `function`: functions, methods and constructors
//! - `variable`: variables and properties
//! - `accessor`: get/set accessor pairs
//! - `enums`: enums and their members
//! - `type_alias`: type aliases

mod accessor;
mod class_like;
mod enums;
mod function;
mod namespace;
mod type_alias;
mod variable;


use crate::base::{DeclarationId, ReflectionId, SymbolId};
use crate::program::{DeclarationKind, SemanticModel};

use super::context::Context;
use super::error::ConvertError;
use super::registry::{FnDeclarationConverter, SymbolTarget};
use super::signatures::create_index_signature;

/// The converters registered by [`Converter::new`](super::Converter::new).
pub(crate) fn builtin_converters() -> Vec<FnDeclarationConverter> {
    vec![
        FnDeclarationConverter {
            kinds: &[DeclarationKind::Module],
            convert: namespace::convert,
        },
        FnDeclarationConverter {
            kinds: &[DeclarationKind::Class],
            convert: class_like::convert_class,
        },
        FnDeclarationConverter {
            kinds: &[DeclarationKind::Interface],
            convert: class_like::convert_interface,
        },
        FnDeclarationConverter {
            kinds: &[
                DeclarationKind::Function,
                DeclarationKind::Method,
                DeclarationKind::MethodSignature,
                DeclarationKind::Constructor,
            ],
            convert: function::convert,
        },
        FnDeclarationConverter {
            kinds: &[
                DeclarationKind::Variable,
                DeclarationKind::Property,
                DeclarationKind::PropertySignature,
            ],
            convert: variable::convert,
        },
        FnDeclarationConverter {
            kinds: &[DeclarationKind::GetAccessor, DeclarationKind::SetAccessor],
            convert: accessor::convert,
        },
        FnDeclarationConverter {
            kinds: &[DeclarationKind::Enum],
            convert: enums::convert_enum,
        },
        FnDeclarationConverter {
            kinds: &[DeclarationKind::EnumMember],
            convert: enums::convert_member,
        },
        FnDeclarationConverter {
            kinds: &[DeclarationKind::TypeAlias],
            convert: type_alias::convert,
        },
    ]
}

/// The declarations of an overload group that get a signature.
///
/// A sole declaration is always real. With several, only the bodiless ones
/// (the overloads) are; if every declaration has a body they all count.
pub fn overload_declarations(
    program: &dyn SemanticModel,
    declarations: &[DeclarationId],
) -> Vec<DeclarationId> {
    if declarations.len() <= 1 {
        return declarations.to_vec();
    }
    let overloads: Vec<DeclarationId> = declarations
        .iter()
        .copied()
        .filter(|id| program.declaration(*id).is_some_and(|d| !d.has_body))
        .collect();
    if overloads.is_empty() {
        declarations.to_vec()
    } else {
        overloads
    }
}

/// Convert the members of `symbol` into `owner`.
///
/// Index signature members become the owner's index signature; everything
/// else is converted as a child.
pub(crate) fn convert_members(
    cx: &mut Context<'_>,
    owner: ReflectionId,
    symbol: SymbolId,
) -> Result<(), ConvertError> {
    let program = cx.program();
    cx.with_scope(owner, |cx| {
        for member in program.members(symbol) {
            if !cx.project().contains(owner) {
                break;
            }
            let declarations = program.declarations(member);
            let index_signature = declarations.iter().copied().find(|id| {
                program
                    .declaration(*id)
                    .is_some_and(|d| d.kind == DeclarationKind::IndexSignature)
            });
            match index_signature {
                Some(declaration) => create_index_signature(cx, owner, declaration)?,
                None => {
                    cx.convert_symbol(member, None)?;
                }
            }
        }
        Ok(())
    })
}

/// First declaration of a conversion target.
pub(crate) fn first_declaration(target: &SymbolTarget) -> Result<DeclarationId, ConvertError> {
    target
        .declarations
        .first()
        .copied()
        .ok_or(ConvertError::UnknownSymbol(target.symbol))
}
