//! Hierarchy plugin: fills `extendedBy` and `implementedBy`.
//!
//! Runs per reflection during resolve, when every heritage target that will
//! ever exist has been created.

use crate::base::ReflectionId;
use crate::models::{ReferenceType, Type};

use crate::converter::context::Context;
use crate::converter::events::{ConverterEvent, EventHub, EventKind};

pub(super) fn install(events: &mut EventHub) {
    events.on(EventKind::Resolve, 0, |cx, event| {
        if let ConverterEvent::Resolve { reflection } = event {
            link_heritage(cx, *reflection);
        }
        Ok(())
    });
}

#[derive(Clone, Copy)]
enum Heritage {
    Extends,
    Implements,
}

fn link_heritage(cx: &mut Context<'_>, id: ReflectionId) {
    let Some(reflection) = cx.project().get(id) else {
        return;
    };
    let Some(data) = reflection.declaration_data() else {
        return;
    };
    let back_reference = Type::Reference(ReferenceType::to_reflection(reflection.name(), id));

    let mut links = Vec::new();
    for (heritage, types) in [
        (Heritage::Extends, &data.extended_types),
        (Heritage::Implements, &data.implemented_types),
    ] {
        for ty in types {
            if let Type::Reference(reference) = ty {
                if let Some(target) = reference.reflection(cx.project()) {
                    links.push((heritage, target));
                }
            }
        }
    }

    for (heritage, target) in links {
        let Some(data) = cx
            .project_mut()
            .get_mut(target)
            .and_then(|r| r.declaration_data_mut())
        else {
            continue;
        };
        let list = match heritage {
            Heritage::Extends => &mut data.extended_by,
            Heritage::Implements => &mut data.implemented_by,
        };
        if !list.contains(&back_reference) {
            list.push(back_reference.clone());
        }
    }
}
