//! Comment plugin.
//!
//! - `@private`, `@protected` and `@public` set the matching visibility flag
//! - `@hidden` and `@ignore` mark a reflection for removal at resolve begin
//! - `@param name text` becomes the comment of parameter `name`
//! - `@typeParam T text` (or `@template`) becomes the comment of type
//!   parameter `T`
//! - with `excludeNotDocumented`, leaf declarations without any comment are
//!   removed at resolve begin

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::base::ReflectionId;
use crate::config::Options;
use crate::models::{Comment, ReflectionData, ReflectionFlags, ReflectionKind};

use crate::converter::context::Context;
use crate::converter::diagnostics::{Diagnostic, codes};
use crate::converter::error::ConvertError;
use crate::converter::events::{ConverterEvent, Listener, SignatureSlot};

use super::signature_mut;

pub(super) const PRIORITY: i32 = 100;

const VISIBILITY_TAGS: &[(&str, ReflectionFlags)] = &[
    ("private", ReflectionFlags::PRIVATE),
    ("protected", ReflectionFlags::PROTECTED),
    ("public", ReflectionFlags::PUBLIC),
];
const HIDDEN_TAGS: &[&str] = &["hidden", "ignore"];
const TYPE_PARAM_TAGS: &[&str] = &["typeParam", "typeparam", "template"];

#[derive(Debug, Default)]
pub struct CommentPlugin {
    hidden: FxHashSet<ReflectionId>,
    /// In marking order, so removal is deterministic.
    hidden_order: Vec<ReflectionId>,
    exclude_private: bool,
    exclude_protected: bool,
    exclude_not_documented: bool,
}

impl CommentPlugin {
    pub fn new(options: &Options) -> Self {
        Self {
            exclude_private: options.exclude_private,
            exclude_protected: options.exclude_protected,
            exclude_not_documented: options.exclude_not_documented,
            ..Self::default()
        }
    }

    fn hide(&mut self, id: ReflectionId) {
        if self.hidden.insert(id) {
            self.hidden_order.push(id);
        }
    }

    fn on_declaration(&mut self, cx: &mut Context<'_>, id: ReflectionId) {
        let Some(reflection) = cx.project_mut().get_mut(id) else {
            return;
        };
        let Some(comment) = reflection.comment.as_mut() else {
            return;
        };
        for (tag, flag) in VISIBILITY_TAGS {
            if comment.has_tag(tag) {
                reflection.flags.set_flag(*flag, true);
                comment.remove_tags(tag);
            }
        }
        let hidden = HIDDEN_TAGS.iter().any(|tag| comment.has_tag(tag));
        let flags = reflection.flags;
        if hidden
            || (self.exclude_private && flags.contains(ReflectionFlags::PRIVATE))
            || (self.exclude_protected && flags.contains(ReflectionFlags::PROTECTED))
        {
            self.hide(id);
        }
    }

    /// Move the owner's comment onto its first signature, where it is
    /// rendered; an explicit signature comment wins.
    fn on_signature(cx: &mut Context<'_>, owner: ReflectionId, slot: SignatureSlot) {
        let Some(reflection) = cx.project_mut().get_mut(owner) else {
            return;
        };
        let owner_comment = reflection.comment.clone();
        let Some(signature) = reflection
            .declaration_data_mut()
            .and_then(|data| signature_mut(data, slot))
        else {
            return;
        };
        if signature.comment.is_none() {
            signature.comment = owner_comment.clone();
        }
        if signature.comment == owner_comment && matches!(slot, SignatureSlot::Call(_)) {
            reflection.comment = None;
        }
    }

    fn on_parameter(cx: &mut Context<'_>, owner: ReflectionId, slot: SignatureSlot, index: usize) {
        let Some(signature) = cx
            .project_mut()
            .get_mut(owner)
            .and_then(|r| r.declaration_data_mut())
            .and_then(|data| signature_mut(data, slot))
        else {
            return;
        };
        let Some(comment) = signature.comment.as_ref() else {
            return;
        };
        let Some(parameter) = signature.parameters.get(index) else {
            return;
        };
        let text = comment
            .tag("param", Some(parameter.name.as_str()))
            .map(|tag| tag.text.clone());
        if let (Some(text), Some(parameter)) = (text, signature.parameters.get_mut(index)) {
            parameter.comment = Some(Comment::new(text));
        }
    }

    fn on_type_parameter(
        cx: &mut Context<'_>,
        owner: ReflectionId,
        signature: Option<SignatureSlot>,
        index: usize,
    ) {
        let Some(reflection) = cx.project_mut().get_mut(owner) else {
            return;
        };
        let owner_comment = reflection.comment.clone();
        let Some(data) = reflection.declaration_data_mut() else {
            return;
        };
        let (comment, type_parameters) = match signature {
            Some(slot) => match signature_mut(data, slot) {
                Some(signature) => (
                    signature.comment.clone().or(owner_comment),
                    &mut signature.type_parameters,
                ),
                None => return,
            },
            None => (owner_comment, &mut data.type_parameters),
        };
        let (Some(comment), Some(type_parameter)) = (comment, type_parameters.get_mut(index))
        else {
            return;
        };
        let text = TYPE_PARAM_TAGS
            .iter()
            .find_map(|tag| comment.tag(tag, Some(type_parameter.name.as_str())));
        if let Some(tag) = text {
            type_parameter.comment = Some(Comment::new(tag.text.clone()));
        }
    }

    fn on_resolve_begin(&mut self, cx: &mut Context<'_>) -> Result<(), ConvertError> {
        let mut removed = 0;
        for id in std::mem::take(&mut self.hidden_order) {
            if cx.project().contains(id) {
                removed += remove(cx, id, "hidden")?;
            }
        }
        self.hidden.clear();

        if self.exclude_not_documented {
            let undocumented: Vec<ReflectionId> = cx
                .project()
                .iter()
                .filter(|r| {
                    !r.is_container()
                        && !r.kind_of(ReflectionKind::PROJECT | ReflectionKind::REFERENCE)
                        && matches!(r.data, ReflectionData::Declaration(_))
                        && !r.has_comment()
                })
                .map(|r| r.id())
                .collect();
            for id in undocumented {
                if cx.project().contains(id) {
                    removed += remove(cx, id, "not documented")?;
                }
            }
        }
        debug!(removed, "comment plugin");
        Ok(())
    }
}

fn remove(cx: &mut Context<'_>, id: ReflectionId, reason: &str) -> Result<usize, ConvertError> {
    let name = cx.project().full_name(id);
    let removed = cx.remove(id)?;
    cx.report(
        Diagnostic::info(format!("removed '{}' ({})", name, reason))
            .with_code(codes::REMOVED_BY_PLUGIN),
    );
    Ok(removed.len())
}

impl Listener for CommentPlugin {
    fn handle(&mut self, cx: &mut Context<'_>, event: &ConverterEvent) -> Result<(), ConvertError> {
        match event {
            ConverterEvent::CreateModule { reflection, .. }
            | ConverterEvent::CreateDeclaration { reflection, .. } => {
                self.on_declaration(cx, *reflection);
            }
            ConverterEvent::CreateSignature { owner, slot, .. } => {
                Self::on_signature(cx, *owner, *slot);
            }
            ConverterEvent::CreateParameter {
                owner, slot, index, ..
            } => Self::on_parameter(cx, *owner, *slot, *index),
            ConverterEvent::CreateTypeParameter {
                owner,
                signature,
                index,
                ..
            } => Self::on_type_parameter(cx, *owner, *signature, *index),
            ConverterEvent::ResolveBegin => self.on_resolve_begin(cx)?,
            _ => {}
        }
        Ok(())
    }
}
