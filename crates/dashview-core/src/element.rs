//! Element tree for dashview.
//!
//! Provides an arena-backed element hierarchy with:
//! - Stable element identifiers via `slotmap`
//! - Parent-child relationships with DOM-style reparenting
//! - Element naming and lookup
//! - Per-element edit-mode state
//! - Dynamic property storage
//!
//! # Ownership
//!
//! Every element is either [`Ownership::Owned`] by the tree or
//! [`Ownership::External`]. External elements (cards supplied by the
//! embedder) can be reparented and flagged, but [`ElementTree::release`]
//! never destroys them: releasing an owned subtree detaches the external
//! elements it contains and destroys everything else.
//!
//! # Key Types
//!
//! - [`ElementTree`] - The arena holding every element
//! - [`ElementId`] - Stable handle to an element
//! - [`ElementState`] - Mutable per-element state (edit mode)

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::error::{TreeError, TreeResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an element in an [`ElementTree`].
    ///
    /// Handles stay valid while the tree changes shape and become invalid
    /// once the element is released.
    pub struct ElementId;
}

impl ElementId {
    /// Convert the ID to a raw u64 value, for interop with external systems.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Who is responsible for destroying an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// Created and destroyed by the tree.
    #[default]
    Owned,
    /// Supplied by the embedder; the tree only reparents and flags it.
    External,
}

/// Mutable state stored alongside each element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementState {
    /// Whether the element is currently shown in edit mode.
    pub edit_mode: bool,
}

/// Internal data stored in the arena for each element.
struct ElementData {
    /// Element tag, e.g. `"div"` or `"card"`.
    tag: &'static str,
    /// Name used for lookup (the element's id attribute).
    name: String,
    ownership: Ownership,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    state: ElementState,
    /// Dynamic properties (type-erased).
    properties: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl ElementData {
    fn new(tag: &'static str, ownership: Ownership) -> Self {
        Self {
            tag,
            name: String::new(),
            ownership,
            parent: None,
            children: Vec::new(),
            state: ElementState::default(),
            properties: HashMap::new(),
        }
    }
}

/// An in-memory element tree.
///
/// Uses arena-based storage via `SlotMap` for stable IDs and cheap
/// parent-child bookkeeping. Appending an element that already has a parent
/// moves it, the way DOM `appendChild` does.
pub struct ElementTree {
    elements: SlotMap<ElementId, ElementData>,
}

static_assertions::assert_impl_all!(ElementTree: Send, Sync);

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
        }
    }

    /// Create a detached element owned by the tree.
    pub fn create(&mut self, tag: &'static str) -> ElementId {
        self.insert(tag, Ownership::Owned)
    }

    /// Create a detached element owned by the embedder.
    pub fn create_external(&mut self, tag: &'static str) -> ElementId {
        self.insert(tag, Ownership::External)
    }

    fn insert(&mut self, tag: &'static str, ownership: Ownership) -> ElementId {
        let id = self.elements.insert(ElementData::new(tag, ownership));
        tracing::trace!(target: targets::ELEMENT, ?id, tag, ?ownership, "created element");
        id
    }

    fn data(&self, id: ElementId) -> TreeResult<&ElementData> {
        self.elements.get(id).ok_or(TreeError::InvalidElement(id))
    }

    fn data_mut(&mut self, id: ElementId) -> TreeResult<&mut ElementData> {
        self.elements.get_mut(id).ok_or(TreeError::InvalidElement(id))
    }

    /// Check if an element exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Number of live elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// All elements without a parent.
    pub fn roots(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, d)| d.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Get the element's tag.
    pub fn tag(&self, id: ElementId) -> TreeResult<&'static str> {
        self.data(id).map(|d| d.tag)
    }

    /// Get the element's ownership.
    pub fn ownership(&self, id: ElementId) -> TreeResult<Ownership> {
        self.data(id).map(|d| d.ownership)
    }

    /// Get the element's name.
    pub fn name(&self, id: ElementId) -> TreeResult<&str> {
        self.data(id).map(|d| d.name.as_str())
    }

    /// Set the element's name.
    pub fn set_name(&mut self, id: ElementId, name: impl Into<String>) -> TreeResult<()> {
        self.data_mut(id).map(|d| d.name = name.into())
    }

    /// Get the parent of an element.
    pub fn parent(&self, id: ElementId) -> TreeResult<Option<ElementId>> {
        self.data(id).map(|d| d.parent)
    }

    /// Get the children of an element, in order.
    pub fn children(&self, id: ElementId) -> TreeResult<&[ElementId]> {
        self.data(id).map(|d| d.children.as_slice())
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, id: ElementId, name: &str) -> TreeResult<Option<ElementId>> {
        let children = self.children(id)?;
        Ok(children
            .iter()
            .copied()
            .find(|&child| self.elements.get(child).is_some_and(|d| d.name == name)))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// If `child` already has a parent it is removed from it first, so an
    /// element is never attached in two places.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> TreeResult<()> {
        self.data(parent)?;
        self.data(child)?;
        if self.is_ancestor_of(child, parent) {
            return Err(TreeError::CircularParentage { child, parent });
        }

        self.detach(child)?;
        self.data_mut(child)?.parent = Some(parent);
        self.data_mut(parent)?.children.push(child);
        tracing::trace!(target: targets::ELEMENT, ?parent, ?child, "appended child");
        Ok(())
    }

    /// Remove `child` from `parent`, leaving it detached.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> TreeResult<()> {
        if self.parent(child)? != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.detach(child)
    }

    /// Detach an element from its parent, if it has one.
    pub fn detach(&mut self, id: ElementId) -> TreeResult<()> {
        let old_parent = self.data_mut(id)?.parent.take();
        if let Some(parent_id) = old_parent {
            if let Some(parent_data) = self.elements.get_mut(parent_id) {
                parent_data.children.retain(|&c| c != id);
            }
        }
        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.elements.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Release an element and its owned subtree.
    ///
    /// Owned elements are destroyed. External elements found in the subtree
    /// are detached with their own children intact and stay valid. Releasing
    /// an external element only detaches it.
    #[tracing::instrument(skip(self), target = "dashview_core::element", level = "trace")]
    pub fn release(&mut self, id: ElementId) -> TreeResult<()> {
        self.detach(id)?;
        if self.data(id)?.ownership == Ownership::External {
            return Ok(());
        }

        let mut owned = Vec::new();
        let mut external = Vec::new();
        self.collect_release_set(id, &mut owned, &mut external)?;

        for ext in &external {
            if let Some(data) = self.elements.get_mut(*ext) {
                data.parent = None;
            }
        }
        for owned_id in &owned {
            self.elements.remove(*owned_id);
        }
        self.elements.remove(id);

        tracing::trace!(
            target: targets::ELEMENT,
            ?id,
            destroyed = owned.len() + 1,
            detached = external.len(),
            "released element"
        );
        Ok(())
    }

    /// Collect owned descendants (children first) and the external elements
    /// where traversal stops.
    fn collect_release_set(
        &self,
        id: ElementId,
        owned: &mut Vec<ElementId>,
        external: &mut Vec<ElementId>,
    ) -> TreeResult<()> {
        for &child in &self.data(id)?.children {
            if self.data(child)?.ownership == Ownership::External {
                external.push(child);
            } else {
                self.collect_release_set(child, owned, external)?;
                owned.push(child);
            }
        }
        Ok(())
    }

    /// Get the element's state.
    pub fn state(&self, id: ElementId) -> TreeResult<ElementState> {
        self.data(id).map(|d| d.state)
    }

    /// Whether the element is flagged as being in edit mode.
    pub fn edit_mode(&self, id: ElementId) -> TreeResult<bool> {
        self.data(id).map(|d| d.state.edit_mode)
    }

    /// Set the element's edit-mode flag.
    pub fn set_edit_mode(&mut self, id: ElementId, edit_mode: bool) -> TreeResult<()> {
        self.data_mut(id).map(|d| d.state.edit_mode = edit_mode)
    }

    /// Set a dynamic property on an element.
    pub fn set_property<T: Any + Send + Sync>(
        &mut self,
        id: ElementId,
        name: impl Into<String>,
        value: T,
    ) -> TreeResult<()> {
        self.data_mut(id)?.properties.insert(name.into(), Box::new(value));
        Ok(())
    }

    /// Get a dynamic property. Returns `None` if missing or of another type.
    pub fn property<T: Any>(&self, id: ElementId, name: &str) -> TreeResult<Option<&T>> {
        Ok(self
            .data(id)?
            .properties
            .get(name)
            .and_then(|v| v.downcast_ref::<T>()))
    }

    /// Remove a dynamic property.
    pub fn remove_property(
        &mut self,
        id: ElementId,
        name: &str,
    ) -> TreeResult<Option<Box<dyn Any + Send + Sync>>> {
        Ok(self.data_mut(id)?.properties.remove(name))
    }

    /// Names of all dynamic properties on an element, sorted.
    pub fn property_names(&self, id: ElementId) -> TreeResult<Vec<&str>> {
        let mut names: Vec<&str> = self.data(id)?.properties.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        Ok(names)
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementTree")
            .field("element_count", &self.elements.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_name() {
        let mut tree = ElementTree::new();
        let div = tree.create("div");
        tree.set_name(div, "main").unwrap();

        assert_eq!(tree.tag(div).unwrap(), "div");
        assert_eq!(tree.name(div).unwrap(), "main");
        assert_eq!(tree.ownership(div).unwrap(), Ownership::Owned);
        assert_eq!(tree.parent(div).unwrap(), None);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut tree = ElementTree::new();
        let parent = tree.create("div");
        let a = tree.create("span");
        let b = tree.create("span");
        let c = tree.create("span");

        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();
        tree.append_child(parent, c).unwrap();

        assert_eq!(tree.children(parent).unwrap(), &[a, b, c]);
        assert_eq!(tree.parent(b).unwrap(), Some(parent));
    }

    #[test]
    fn test_append_reparents() {
        let mut tree = ElementTree::new();
        let old_parent = tree.create("div");
        let new_parent = tree.create("div");
        let card = tree.create_external("card");

        tree.append_child(old_parent, card).unwrap();
        tree.append_child(new_parent, card).unwrap();

        assert!(tree.children(old_parent).unwrap().is_empty());
        assert_eq!(tree.children(new_parent).unwrap(), &[card]);
    }

    #[test]
    fn test_append_same_parent_moves_to_end() {
        let mut tree = ElementTree::new();
        let parent = tree.create("div");
        let a = tree.create("span");
        let b = tree.create("span");
        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();

        tree.append_child(parent, a).unwrap();
        assert_eq!(tree.children(parent).unwrap(), &[b, a]);
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let mut tree = ElementTree::new();
        let outer = tree.create("div");
        let inner = tree.create("div");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(TreeError::CircularParentage {
                child: outer,
                parent: inner
            })
        );
        assert!(matches!(
            tree.append_child(outer, outer),
            Err(TreeError::CircularParentage { .. })
        ));
    }

    #[test]
    fn test_remove_child() {
        let mut tree = ElementTree::new();
        let parent = tree.create("div");
        let other = tree.create("div");
        let child = tree.create("span");
        tree.append_child(parent, child).unwrap();

        assert_eq!(
            tree.remove_child(other, child),
            Err(TreeError::NotAChild {
                parent: other,
                child
            })
        );

        tree.remove_child(parent, child).unwrap();
        assert!(tree.children(parent).unwrap().is_empty());
        assert_eq!(tree.parent(child).unwrap(), None);
    }

    #[test]
    fn test_find_child_by_name() {
        let mut tree = ElementTree::new();
        let parent = tree.create("div");
        let main = tree.create("div");
        tree.set_name(main, "main").unwrap();
        tree.append_child(parent, main).unwrap();

        assert_eq!(tree.find_child_by_name(parent, "main").unwrap(), Some(main));
        assert_eq!(tree.find_child_by_name(parent, "sidebar").unwrap(), None);
    }

    #[test]
    fn test_release_detaches_external() {
        let mut tree = ElementTree::new();
        let anchor = tree.create("div");
        let container = tree.create("div");
        let wrapper = tree.create("card-options");
        let card = tree.create_external("card");
        let card_inner = tree.create("span");

        tree.append_child(card, card_inner).unwrap();
        tree.append_child(wrapper, card).unwrap();
        tree.append_child(container, wrapper).unwrap();
        tree.append_child(anchor, container).unwrap();

        tree.release(container).unwrap();

        assert!(!tree.contains(container));
        assert!(!tree.contains(wrapper));
        assert!(tree.contains(card));
        assert!(tree.contains(card_inner));
        assert_eq!(tree.parent(card).unwrap(), None);
        assert_eq!(tree.children(card).unwrap(), &[card_inner]);
        assert!(tree.children(anchor).unwrap().is_empty());
    }

    #[test]
    fn test_release_external_only_detaches() {
        let mut tree = ElementTree::new();
        let parent = tree.create("div");
        let card = tree.create_external("card");
        tree.append_child(parent, card).unwrap();

        tree.release(card).unwrap();
        assert!(tree.contains(card));
        assert!(tree.children(parent).unwrap().is_empty());
    }

    #[test]
    fn test_released_id_is_invalid() {
        let mut tree = ElementTree::new();
        let div = tree.create("div");
        tree.release(div).unwrap();

        assert_eq!(tree.tag(div), Err(TreeError::InvalidElement(div)));
        assert_eq!(tree.release(div), Err(TreeError::InvalidElement(div)));
    }

    #[test]
    fn test_edit_mode_flag() {
        let mut tree = ElementTree::new();
        let card = tree.create_external("card");
        assert!(!tree.edit_mode(card).unwrap());

        tree.set_edit_mode(card, true).unwrap();
        assert!(tree.edit_mode(card).unwrap());
        assert_eq!(tree.state(card).unwrap(), ElementState { edit_mode: true });
    }

    #[test]
    fn test_dynamic_properties() {
        let mut tree = ElementTree::new();
        let el = tree.create("card-options");

        tree.set_property(el, "path", (2usize, 1usize)).unwrap();
        tree.set_property(el, "label", "add".to_string()).unwrap();

        assert_eq!(tree.property::<(usize, usize)>(el, "path").unwrap(), Some(&(2, 1)));
        // Wrong type reads as missing
        assert_eq!(tree.property::<u32>(el, "path").unwrap(), None);
        assert_eq!(tree.property_names(el).unwrap(), vec!["label", "path"]);

        assert!(tree.remove_property(el, "label").unwrap().is_some());
        assert_eq!(tree.property::<String>(el, "label").unwrap(), None);
    }

    #[test]
    fn test_roots() {
        let mut tree = ElementTree::new();
        let root = tree.create("div");
        let child = tree.create("div");
        tree.append_child(root, child).unwrap();

        assert_eq!(tree.roots(), vec![root]);
        assert_eq!(tree.element_count(), 2);
    }
}
