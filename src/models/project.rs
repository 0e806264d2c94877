//! The project registry.
//!
//! [`ProjectReflection`] owns every independent reflection of a run:
//!
//! - an id → reflection table in creation order, the single source of truth
//!   for liveness;
//! - a symbol → reflection ids multimap, since one symbol can produce several
//!   reflections (a value and a type, merged accessors);
//! - a lazily built reverse reference graph (target → Reference reflections),
//!   used to cascade removals.
//!
//! The graph follows the lazy rebuild pattern: it is dropped on every
//! `register` and rebuilt on the next query. `remove` never drops it, so a
//! single build serves a whole cascade.

use std::cmp::Ordering;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::base::{ReflectionId, SymbolId};

use super::error::ProjectError;
use super::reference::SymbolSpace;
use super::reflection::{Reflection, ReflectionData};

type ReferenceGraph = FxHashMap<ReflectionId, Vec<ReflectionId>>;

#[derive(Debug)]
pub struct ProjectReflection {
    root: ReflectionId,
    reflections: IndexMap<ReflectionId, Reflection>,
    symbol_to_ids: FxHashMap<SymbolId, Vec<ReflectionId>>,
    id_to_symbol: FxHashMap<ReflectionId, SymbolId>,
    /// `None` when a rebuild is needed.
    reference_graph: Option<ReferenceGraph>,
}

impl ProjectReflection {
    /// Create a project whose root takes `root` as its id.
    pub fn new(root: ReflectionId, name: impl Into<SmolStr>) -> Self {
        let mut reflections = IndexMap::new();
        reflections.insert(root, Reflection::project(root, name));
        Self {
            root,
            reflections,
            symbol_to_ids: FxHashMap::default(),
            id_to_symbol: FxHashMap::default(),
            reference_graph: None,
        }
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    pub fn root(&self) -> ReflectionId {
        self.root
    }

    pub fn name(&self) -> &str {
        self.reflections
            .get(&self.root)
            .map(Reflection::name)
            .unwrap_or_default()
    }

    pub fn get(&self, id: ReflectionId) -> Option<&Reflection> {
        self.reflections.get(&id)
    }

    pub fn get_mut(&mut self, id: ReflectionId) -> Option<&mut Reflection> {
        self.reflections.get_mut(&id)
    }

    pub fn contains(&self, id: ReflectionId) -> bool {
        self.reflections.contains_key(&id)
    }

    /// Number of live reflections, including the root.
    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }

    /// Live reflections in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Reflection> {
        self.reflections.values()
    }

    /// Live reflection ids in creation order.
    pub fn ids(&self) -> Vec<ReflectionId> {
        self.reflections.keys().copied().collect()
    }

    /// Ids currently associated with `symbol`, in registration order.
    pub fn ids_by_symbol(&self, symbol: SymbolId) -> &[ReflectionId] {
        self.symbol_to_ids
            .get(&symbol)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get_by_symbol(&self, symbol: SymbolId) -> Vec<&Reflection> {
        self.ids_by_symbol(symbol)
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    /// First child of `parent` called `name`.
    pub fn child_by_name(&self, parent: ReflectionId, name: &str) -> Option<&Reflection> {
        self.get(parent)?
            .children()
            .iter()
            .filter_map(|id| self.get(*id))
            .find(|child| child.name() == name)
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    /// Store a freshly created reflection. Must happen exactly once per
    /// independent reflection, before anything can reference it.
    pub fn register(
        &mut self,
        reflection: Reflection,
        symbol: Option<SymbolId>,
    ) -> Result<ReflectionId, ProjectError> {
        let id = reflection.id();
        if self.reflections.contains_key(&id) {
            return Err(ProjectError::AlreadyRegistered(id));
        }
        trace!(%id, name = reflection.name(), kind = reflection.kind().kind_string(), "register");
        self.reflections.insert(id, reflection);
        if let Some(symbol) = symbol {
            self.symbol_to_ids.entry(symbol).or_default().push(id);
            self.id_to_symbol.insert(id, symbol);
        }
        self.reference_graph = None;
        Ok(id)
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Fails if the child already has a container, or the parent's kind
    /// does not accept the child's kind.
    pub fn add_child(
        &mut self,
        parent: ReflectionId,
        child: ReflectionId,
    ) -> Result<(), ProjectError> {
        let child_ref = self
            .reflections
            .get(&child)
            .ok_or(ProjectError::UnknownReflection(child))?;
        if let Some(existing) = child_ref.parent() {
            return Err(ProjectError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        let child_kind = child_ref.kind();

        let parent_ref = self
            .reflections
            .get_mut(&parent)
            .ok_or(ProjectError::UnknownReflection(parent))?;
        if !parent_ref.is_container() {
            return Err(ProjectError::NotAContainer(parent));
        }
        if !parent_ref.kind().accepts_child(child_kind) {
            return Err(ProjectError::disallowed_child(parent_ref.kind(), child_kind));
        }
        parent_ref.children.push(child);

        if let Some(child_ref) = self.reflections.get_mut(&child) {
            child_ref.parent = Some(parent);
        }
        self.clear_project_memo(child);
        Ok(())
    }

    /// Rename a reflection, remembering the first name it had.
    pub(crate) fn rename(
        &mut self,
        id: ReflectionId,
        name: impl Into<SmolStr>,
    ) -> Result<(), ProjectError> {
        let reflection = self
            .reflections
            .get_mut(&id)
            .ok_or(ProjectError::UnknownReflection(id))?;
        let name = name.into();
        if name == reflection.name {
            return Ok(());
        }
        if reflection.original_name.is_none() {
            reflection.original_name = Some(reflection.name.clone());
        }
        reflection.name = name;
        Ok(())
    }

    /// Reorder `parent`'s children with `compare`.
    pub fn sort_children_by<F>(&mut self, parent: ReflectionId, mut compare: F)
    where
        F: FnMut(&Reflection, &Reflection) -> Ordering,
    {
        let Some(mut children) = self
            .reflections
            .get_mut(&parent)
            .map(|r| std::mem::take(&mut r.children))
        else {
            return;
        };
        children.sort_by(|a, b| match (self.reflections.get(a), self.reflections.get(b)) {
            (Some(a), Some(b)) => compare(a, b),
            _ => a.cmp(b),
        });
        if let Some(reflection) = self.reflections.get_mut(&parent) {
            reflection.children = children;
        }
    }

    // ========================================================================
    // REMOVAL
    // ========================================================================

    /// Remove a reflection, the References pointing at it, and its subtree.
    ///
    /// Returns every removed id in removal order.
    pub fn remove(&mut self, id: ReflectionId) -> Result<Vec<ReflectionId>, ProjectError> {
        if id == self.root {
            return Err(ProjectError::RemoveRoot);
        }
        if !self.contains(id) {
            return Err(ProjectError::UnknownReflection(id));
        }
        self.ensure_reference_graph();
        let mut removed = Vec::new();
        self.remove_cascade(id, &mut removed);
        Ok(removed)
    }

    fn remove_cascade(&mut self, id: ReflectionId, removed: &mut Vec<ReflectionId>) {
        // Already gone through another branch of the same cascade.
        if !self.reflections.contains_key(&id) {
            return;
        }

        let referencing = self
            .reference_graph
            .as_mut()
            .and_then(|graph| graph.remove(&id))
            .unwrap_or_default();
        for reference in referencing {
            self.remove_cascade(reference, removed);
        }

        let children = self
            .reflections
            .get(&id)
            .map(|r| r.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove_cascade(child, removed);
        }

        self.unlink(id);

        if self.reflections.shift_remove(&id).is_some() {
            if let Some(symbol) = self.id_to_symbol.remove(&id) {
                if let Some(ids) = self.symbol_to_ids.get_mut(&symbol) {
                    ids.retain(|other| *other != id);
                    if ids.is_empty() {
                        self.symbol_to_ids.remove(&symbol);
                    }
                }
            }
            trace!(%id, "removed");
            removed.push(id);
        }
    }

    /// Detach `id` from its container.
    fn unlink(&mut self, id: ReflectionId) {
        let Some(parent) = self.reflections.get_mut(&id).and_then(|r| r.parent.take()) else {
            return;
        };
        if let Some(parent) = self.reflections.get_mut(&parent) {
            parent.children.retain(|child| *child != id);
            for group in &mut parent.groups {
                group.children.retain(|child| *child != id);
            }
            parent.groups.retain(|group| !group.children.is_empty());
        }
        self.clear_project_memo(id);
    }

    fn clear_project_memo(&self, id: ReflectionId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(reflection) = self.reflections.get(&current) {
                reflection.project_root.set(None);
                stack.extend(reflection.children.iter().copied());
            }
        }
    }

    // ========================================================================
    // REFERENCES
    // ========================================================================

    /// Resolve a symbol to one of its reflections.
    ///
    /// Prefers a reflection living in `space`; when none does, falls back
    /// to the first reflection registered for the symbol.
    pub fn resolve_symbol(&self, symbol: SymbolId, space: SymbolSpace) -> Option<ReflectionId> {
        let ids = self.ids_by_symbol(symbol);
        ids.iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|r| space.admits(r.kind())))
            .or_else(|| ids.iter().copied().find(|id| self.contains(*id)))
    }

    /// Reference reflections currently pointing at `target`.
    pub fn references_to(&mut self, target: ReflectionId) -> Vec<ReflectionId> {
        self.ensure_reference_graph();
        self.reference_graph
            .as_ref()
            .and_then(|graph| graph.get(&target))
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| self.reflections.contains_key(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn ensure_reference_graph(&mut self) {
        if self.reference_graph.is_some() {
            return;
        }
        let mut graph = ReferenceGraph::default();
        for reflection in self.reflections.values() {
            if let ReflectionData::Reference(link) = &reflection.data {
                if let Some(target) = link.resolve(self) {
                    graph.entry(target).or_default().push(reflection.id());
                }
            }
        }
        trace!(targets = graph.len(), "rebuilt reference graph");
        self.reference_graph = Some(graph);
    }

    // ========================================================================
    // TREE QUERIES
    // ========================================================================

    /// The project root `id` belongs to, found by walking parents.
    ///
    /// `None` for a reflection that is not attached to the tree.
    pub fn project_of(&self, id: ReflectionId) -> Option<ReflectionId> {
        let reflection = self.get(id)?;
        if let Some(root) = reflection.project_root.get() {
            return Some(root);
        }
        let root = match reflection.parent() {
            Some(parent) => self.project_of(parent)?,
            None if id == self.root => id,
            None => return None,
        };
        reflection.project_root.set(Some(root));
        Some(root)
    }

    /// Dotted path from the first module below the root, e.g. `ns.Class.method`.
    pub fn full_name(&self, id: ReflectionId) -> String {
        let mut parts = Vec::new();
        let mut current = self.get(id);
        while let Some(reflection) = current {
            if reflection.id() == self.root {
                break;
            }
            parts.push(reflection.name());
            current = reflection.parent().and_then(|p| self.get(p));
        }
        parts.reverse();
        parts.join(".")
    }
}
