//! Assertions over converted projects.

use std::collections::HashSet;

use docgraph::base::ReflectionId;
use docgraph::models::{ProjectReflection, Reflection, ReflectionKind};

/// Look up a reflection by dotted path from the root, e.g. `index.Animal.speak`.
pub fn get_reflection<'a>(project: &'a ProjectReflection, path: &str) -> &'a Reflection {
    find_reflection(project, path)
        .unwrap_or_else(|| panic!("Expected reflection '{}' to exist", path))
}

/// Like [`get_reflection`], but `None` when any step is missing.
pub fn find_reflection<'a>(project: &'a ProjectReflection, path: &str) -> Option<&'a Reflection> {
    let mut current = project.get(project.root())?;
    for name in path.split('.') {
        current = project.child_by_name(current.id(), name)?;
    }
    Some(current)
}

/// Assert a reflection has the expected kind.
pub fn assert_kind(reflection: &Reflection, expected: ReflectionKind) {
    assert_eq!(
        reflection.kind(),
        expected,
        "Expected '{}' to be a {}, got {}",
        reflection.name(),
        expected.kind_string(),
        reflection.kind().kind_string()
    );
}

/// Names of a reflection's children, in order.
pub fn child_names<'a>(project: &'a ProjectReflection, parent: ReflectionId) -> Vec<&'a str> {
    project
        .get(parent)
        .map(|p| p.children())
        .unwrap_or_default()
        .iter()
        .filter_map(|id| project.get(*id))
        .map(|r| r.name())
        .collect()
}

/// Parent and child links agree, every reflection reaches the root, and
/// every child kind is allowed in its container.
pub fn assert_tree_invariants(project: &ProjectReflection) {
    let root = project.root();
    for reflection in project.iter() {
        assert_eq!(
            project.project_of(reflection.id()),
            Some(root),
            "'{}' is not attached to the project",
            reflection.name()
        );
        for child_id in reflection.children() {
            let child = project
                .get(*child_id)
                .unwrap_or_else(|| panic!("'{}' lists missing child {}", reflection.name(), child_id));
            assert_eq!(
                child.parent(),
                Some(reflection.id()),
                "'{}' does not point back to '{}'",
                child.name(),
                reflection.name()
            );
            assert!(
                reflection.kind().accepts_child(child.kind()),
                "A {} cannot contain a {} ('{}')",
                reflection.kind().kind_string(),
                child.kind().kind_string(),
                child.name()
            );
        }
        if let Some(parent) = reflection.parent() {
            let listed = project
                .get(parent)
                .is_some_and(|p| p.children().contains(&reflection.id()));
            assert!(listed, "'{}' missing from its parent's children", reflection.name());
        }
    }
}

/// Every id, independent or dependent, is used once.
pub fn assert_unique_ids(project: &ProjectReflection) {
    let mut seen = HashSet::new();
    let mut check = |id: ReflectionId, name: &str| {
        assert!(seen.insert(id), "Duplicate id {} ('{}')", id, name);
    };
    for reflection in project.iter() {
        check(reflection.id(), reflection.name());
        let Some(data) = reflection.declaration_data() else {
            continue;
        };
        let signatures = data
            .signatures
            .iter()
            .chain(data.index_signature.iter())
            .chain(data.get_signature.iter())
            .chain(data.set_signature.iter());
        for signature in signatures {
            check(signature.id, &signature.name);
            for parameter in &signature.parameters {
                check(parameter.id, &parameter.name);
            }
            for type_parameter in &signature.type_parameters {
                check(type_parameter.id, &type_parameter.name);
            }
        }
        for type_parameter in &data.type_parameters {
            check(type_parameter.id, &type_parameter.name);
        }
    }
}
