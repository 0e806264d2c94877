//! Source plugin: records where each reflection was declared.

use crate::base::{DeclarationId, ReflectionId};
use crate::models::SourceReference;

use crate::converter::context::Context;
use crate::converter::events::{ConverterEvent, EventHub, EventKind, SignatureSlot};

use super::signature_mut;

pub(super) fn install(events: &mut EventHub) {
    events.on(EventKind::CreateModule, 0, |cx, event| {
        if let ConverterEvent::CreateModule { reflection, module } = event {
            let declarations = cx.program().declarations(*module);
            let sources = collect(cx, &declarations);
            if let Some(r) = cx.project_mut().get_mut(*reflection) {
                r.sources = sources;
            }
        }
        Ok(())
    });
    events.on(EventKind::CreateDeclaration, 0, |cx, event| {
        if let ConverterEvent::CreateDeclaration {
            reflection,
            declarations,
            ..
        } = event
        {
            let sources = collect(cx, declarations);
            if let Some(r) = cx.project_mut().get_mut(*reflection) {
                r.sources = sources;
            }
        }
        Ok(())
    });
    events.on(EventKind::CreateSignature, 0, |cx, event| {
        if let ConverterEvent::CreateSignature {
            owner,
            slot,
            declaration: Some(declaration),
        } = event
        {
            let sources = collect(cx, &[*declaration]);
            set_signature_sources(cx, *owner, *slot, sources);
        }
        Ok(())
    });
}

fn set_signature_sources(
    cx: &mut Context<'_>,
    owner: ReflectionId,
    slot: SignatureSlot,
    sources: Vec<SourceReference>,
) {
    if let Some(signature) = cx
        .project_mut()
        .get_mut(owner)
        .and_then(|r| r.declaration_data_mut())
        .and_then(|data| signature_mut(data, slot))
    {
        signature.sources = sources;
    }
}

/// Distinct locations of `declarations`, relative to the base path.
fn collect(cx: &Context<'_>, declarations: &[DeclarationId]) -> Vec<SourceReference> {
    let program = cx.program();
    let base_path = cx.options().base_path.as_deref();
    let mut sources: Vec<SourceReference> = Vec::new();
    for location in declarations
        .iter()
        .filter_map(|d| program.declaration(*d))
        .filter_map(|d| d.source.as_ref())
    {
        let source = SourceReference {
            file_name: location.relative_file_name(base_path),
            line: location.line,
            character: location.character,
        };
        if !sources.contains(&source) {
            sources.push(source);
        }
    }
    sources
}
