//! Group plugin: orders children and builds `groups`.

use std::cmp::Ordering;

use crate::base::ReflectionId;
use crate::models::{ProjectReflection, Reflection, ReflectionGroup};

use crate::converter::events::{EventHub, EventKind};

pub(super) fn install(events: &mut EventHub) {
    events.on(EventKind::ResolveEnd, 0, |cx, _| {
        let containers: Vec<ReflectionId> = cx
            .project()
            .iter()
            .filter(|r| r.is_container() && !r.children().is_empty())
            .map(|r| r.id())
            .collect();
        for id in containers {
            let project = cx.project_mut();
            project.sort_children_by(id, compare);
            let groups = build_groups(project, id);
            if let Some(reflection) = project.get_mut(id) {
                reflection.groups = groups;
            }
        }
        Ok(())
    });
}

/// Kind weight first, then name.
fn compare(a: &Reflection, b: &Reflection) -> Ordering {
    a.kind()
        .weight()
        .cmp(&b.kind().weight())
        .then_with(|| a.name().cmp(b.name()))
}

/// One group per child kind, in child order.
pub fn build_groups(project: &ProjectReflection, parent: ReflectionId) -> Vec<ReflectionGroup> {
    let mut groups: Vec<ReflectionGroup> = Vec::new();
    let Some(parent) = project.get(parent) else {
        return groups;
    };
    for child in parent.children().iter().filter_map(|c| project.get(*c)) {
        let kind = child.kind();
        match groups.iter_mut().find(|g| g.kind == kind) {
            Some(group) => group.children.push(child.id()),
            None => groups.push(ReflectionGroup {
                title: kind.plural().into(),
                kind,
                children: vec![child.id()],
            }),
        }
    }
    groups
}
