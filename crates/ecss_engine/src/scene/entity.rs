//! Entity arena and scenegraph tree structure
//!
//! Entities are nodes in a tree keyed by generational `slotmap` handles.
//! A node owns an ordered child list and records the attachment order of
//! its components; the component data itself lives in per-type stores
//! (see [`crate::scene::components::ComponentStore`]).

use slotmap::SlotMap;

use super::components::ComponentSlot;
use super::error::SceneError;

slotmap::new_key_type! {
    /// Stable handle to an entity in the scenegraph
    pub struct Entity;
}

/// Tree node backing one entity
#[derive(Debug)]
pub(crate) struct EntityNode {
    /// Human-readable name, used for logging and lookup
    pub name: String,

    /// Owning parent; `None` for the root and for detached subtrees
    pub parent: Option<Entity>,

    /// Ordered child list; traversal visits children in this order
    pub children: Vec<Entity>,

    /// Component slots in attachment order; dispatch follows this order
    pub slots: Vec<ComponentSlot>,
}

/// The entity tree: ownership, child-indexed access, structural mutation
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: SlotMap<Entity, EntityNode>,
}

impl SceneTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity with no parent and no components
    pub fn create(&mut self, name: impl Into<String>) -> Entity {
        self.nodes.insert(EntityNode {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            slots: Vec::new(),
        })
    }

    /// Whether the handle refers to a live entity
    pub fn contains(&self, entity: Entity) -> bool {
        self.nodes.contains_key(entity)
    }

    /// Name of an entity, if it is alive
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.nodes.get(entity).map(|n| n.name.as_str())
    }

    /// Parent of an entity; `None` for the root, detached nodes, or dead handles
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.nodes.get(entity).and_then(|n| n.parent)
    }

    /// Ordered children of an entity; empty for dead handles
    pub fn children(&self, entity: Entity) -> &[Entity] {
        self.nodes.get(entity).map_or(&[], |n| n.children.as_slice())
    }

    /// Child at `index` (0-based); `None` past the end
    ///
    /// The `None` sentinel supports the drain idiom: repeatedly take child 0
    /// and remove it until nothing remains.
    pub fn child(&self, parent: Entity, index: usize) -> Option<Entity> {
        self.children(parent).get(index).copied()
    }

    /// Number of children attached to an entity
    pub fn child_count(&self, entity: Entity) -> usize {
        self.children(entity).len()
    }

    /// Component slots of an entity in attachment order
    pub fn slots(&self, entity: Entity) -> &[ComponentSlot] {
        self.nodes.get(entity).map_or(&[], |n| n.slots.as_slice())
    }

    /// Whether `ancestor` appears on the parent chain of `entity` (inclusive)
    pub fn is_ancestor_of(&self, ancestor: Entity, entity: Entity) -> bool {
        let mut current = Some(entity);
        while let Some(e) = current {
            if e == ancestor {
                return true;
            }
            current = self.parent(e);
        }
        false
    }

    /// Append `child` to `parent`'s ordered child list
    ///
    /// Re-attaching transfers ownership: a child already under another
    /// parent is severed from it first. Fails without mutating the tree if
    /// the attachment would create a cycle.
    pub fn add_child(&mut self, parent: Entity, child: Entity) -> Result<(), SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownEntity(parent));
        }
        if !self.contains(child) {
            return Err(SceneError::UnknownEntity(child));
        }
        if self.is_ancestor_of(child, parent) {
            return Err(SceneError::CycleDetected { parent, child });
        }
        if let Some(old_parent) = self.parent(child) {
            self.sever(old_parent, child)?;
        }
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from `parent`, severing the link only
    ///
    /// The child's subtree stays alive in the arena, keeps its components,
    /// and can be reattached later.
    pub fn remove_child(&mut self, parent: Entity, child: Entity) -> Result<(), SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownEntity(parent));
        }
        if !self.contains(child) {
            return Err(SceneError::UnknownEntity(child));
        }
        self.sever(parent, child)
    }

    fn sever(&mut self, parent: Entity, child: Entity) -> Result<(), SceneError> {
        let children = &mut self.nodes[parent].children;
        let position = children
            .iter()
            .position(|&c| c == child)
            .ok_or(SceneError::NotAChild { parent, child })?;
        children.remove(position);
        self.nodes[child].parent = None;
        Ok(())
    }

    /// Entities of the subtree rooted at `root` in pre-order
    ///
    /// Parents appear before their children; children in attachment order.
    /// Transform propagation relies on this ordering.
    pub fn preorder(&self, root: Entity) -> Vec<Entity> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(entity) = stack.pop() {
            if !self.contains(entity) {
                continue;
            }
            order.push(entity);
            // Reverse push so the first child is popped first
            stack.extend(self.children(entity).iter().rev());
        }
        order
    }

    /// The ancestor chain of `entity`, ordered root first, `entity` last
    pub fn ancestors_from_root(&self, entity: Entity) -> Vec<Entity> {
        let mut chain = Vec::new();
        let mut current = Some(entity);
        while let Some(e) = current {
            if !self.contains(e) {
                break;
            }
            chain.push(e);
            current = self.parent(e);
        }
        chain.reverse();
        chain
    }

    /// Record a component attachment on the entity's dispatch list
    pub(crate) fn push_slot(&mut self, entity: Entity, slot: ComponentSlot) {
        if let Some(node) = self.nodes.get_mut(entity) {
            node.slots.push(slot);
        }
    }

    /// Set dispatch visibility for a single-slot component variant
    ///
    /// Single-slot variants are identified by kind: a visible slot keeps
    /// its original dispatch position across replacements, and a hidden
    /// one is withdrawn from the list without touching the store.
    pub(crate) fn set_slot(&mut self, entity: Entity, slot: ComponentSlot, visible: bool) {
        if let Some(node) = self.nodes.get_mut(entity) {
            let present = node.slots.iter().any(|s| s.kind() == slot.kind());
            if visible && !present {
                node.slots.push(slot);
            } else if !visible && present {
                node.slots.retain(|s| s.kind() != slot.kind());
            }
        }
    }

    /// Drop a node from the arena, returning its slots
    pub(crate) fn release(&mut self, entity: Entity) -> Vec<ComponentSlot> {
        self.nodes.remove(entity).map_or_else(Vec::new, |n| n.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entity_has_no_parent_and_no_children() {
        let mut tree = SceneTree::new();
        let e = tree.create("lonely");
        assert_eq!(tree.parent(e), None);
        assert_eq!(tree.child_count(e), 0);
        assert_eq!(tree.name(e), Some("lonely"));
    }

    #[test]
    fn children_are_kept_in_attachment_order() {
        let mut tree = SceneTree::new();
        let root = tree.create("root");
        let a = tree.create("a");
        let b = tree.create("b");
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.child(root, 0), Some(a));
        assert_eq!(tree.child(root, 2), None);
    }

    #[test]
    fn cycle_attachment_fails_and_leaves_tree_unchanged() {
        let mut tree = SceneTree::new();
        let root = tree.create("root");
        let child = tree.create("child");
        let grandchild = tree.create("grandchild");
        tree.add_child(root, child).unwrap();
        tree.add_child(child, grandchild).unwrap();

        let err = tree.add_child(grandchild, root).unwrap_err();
        assert_eq!(
            err,
            SceneError::CycleDetected {
                parent: grandchild,
                child: root
            }
        );
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(grandchild), &[] as &[Entity]);

        // Self-attachment is the degenerate cycle
        assert!(matches!(
            tree.add_child(root, root),
            Err(SceneError::CycleDetected { .. })
        ));
    }

    #[test]
    fn reattach_transfers_ownership() {
        let mut tree = SceneTree::new();
        let root = tree.create("root");
        let a = tree.create("a");
        let b = tree.create("b");
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        tree.add_child(b, a).unwrap();
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.children(b), &[a]);
        assert_eq!(tree.parent(a), Some(b));
    }

    #[test]
    fn preorder_visits_parent_before_children() {
        let mut tree = SceneTree::new();
        let root = tree.create("root");
        let a = tree.create("a");
        let b = tree.create("b");
        let a1 = tree.create("a1");
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.add_child(a, a1).unwrap();

        assert_eq!(tree.preorder(root), vec![root, a, a1, b]);
    }

    #[test]
    fn ancestor_chain_is_root_first() {
        let mut tree = SceneTree::new();
        let root = tree.create("root");
        let mid = tree.create("mid");
        let leaf = tree.create("leaf");
        tree.add_child(root, mid).unwrap();
        tree.add_child(mid, leaf).unwrap();

        assert_eq!(tree.ancestors_from_root(leaf), vec![root, mid, leaf]);
    }
}
