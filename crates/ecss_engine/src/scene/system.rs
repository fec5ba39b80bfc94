//! Visitor dispatch for traversal passes
//!
//! A [`System`] is an operation applied to entities and their components
//! while the world walks the tree. Dispatch is double-ended: the traversal
//! routes each attached component slot to the handler for its variant, and
//! every handler defaults to a no-op, so a system only implements the
//! variants it cares about. Visiting a component a system has no handler
//! for is absorbed silently by contract.

use super::components::ComponentStore;
use super::entity::{Entity, SceneTree};

/// Position of the visited entity within the tree
#[derive(Debug, Clone, Copy)]
pub struct NodeContext {
    /// The entity being visited
    pub entity: Entity,
    /// Its parent, `None` at the traversal root
    pub parent: Option<Entity>,
}

/// An operation dispatched per component variant during traversal
///
/// Handlers receive the tree read-only (for ancestor walks) and the
/// component stores mutably; all traversal runs on the single update
/// thread between frames.
#[allow(unused_variables)]
pub trait System {
    /// Called once per visited entity before its component handlers
    fn visit_entity(&mut self, ctx: &NodeContext, tree: &SceneTree, store: &mut ComponentStore) {}

    /// Handle the entity's transform component
    fn visit_transform(&mut self, ctx: &NodeContext, tree: &SceneTree, store: &mut ComponentStore) {}

    /// Handle the entity's camera component
    fn visit_camera(&mut self, ctx: &NodeContext, tree: &SceneTree, store: &mut ComponentStore) {}

    /// Handle the entity's mesh component
    fn visit_mesh(&mut self, ctx: &NodeContext, tree: &SceneTree, store: &mut ComponentStore) {}

    /// Handle one keyframe of the entity's keyframe sequence
    fn visit_keyframe(
        &mut self,
        ctx: &NodeContext,
        tree: &SceneTree,
        store: &mut ComponentStore,
        index: usize,
    ) {
    }

    /// Handle the entity's animation state
    fn visit_animation(&mut self, ctx: &NodeContext, tree: &SceneTree, store: &mut ComponentStore) {}
}
