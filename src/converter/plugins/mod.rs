//! Built-in plugins.
//!
//! Plugins are ordinary event listeners installed on every run before any
//! user listener. They only use the public [`Context`] API, so an embedder
//! can replace or extend any of them.

mod comment;
mod group;
mod hierarchy;
mod sources;

pub use comment::CommentPlugin;
pub use group::build_groups;

use crate::config::Options;
use crate::models::{DeclarationData, SignatureReflection};

use super::events::{EventHub, SignatureSlot};

/// Install the built-in plugins on a fresh hub.
pub(crate) fn install(events: &mut EventHub, options: &Options) {
    events.subscribe(comment::PRIORITY, Box::new(CommentPlugin::new(options)));
    sources::install(events);
    hierarchy::install(events);
    group::install(events);
}

/// The signature living in `slot` of a declaration.
pub(crate) fn signature_mut(
    data: &mut DeclarationData,
    slot: SignatureSlot,
) -> Option<&mut SignatureReflection> {
    match slot {
        SignatureSlot::Call(index) => data.signatures.get_mut(index),
        SignatureSlot::Index => data.index_signature.as_mut(),
        SignatureSlot::Get => data.get_signature.as_mut(),
        SignatureSlot::Set => data.set_signature.as_mut(),
    }
}
