//! Transform propagation system
//!
//! Computes each visited entity's local-to-world matrix as the product of
//! the parent's already-computed local-to-world and the entity's own local
//! TRS. Correctness depends on the pre-order guarantee of the traversal:
//! a parent's matrix is final before any of its children are visited.

use crate::foundation::math::Mat4;
use crate::scene::components::{Component, ComponentStore, UpdateArgs};
use crate::scene::entity::{Entity, SceneTree};
use crate::scene::system::{NodeContext, System};

/// Recomputes local-to-world matrices on every pass
///
/// No dirty-flag scheme: recompute is unconditional, so ancestor TRS edits
/// between frames are always picked up.
#[derive(Debug, Default)]
pub struct TransformSystem;

impl TransformSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for TransformSystem {
    fn visit_transform(&mut self, ctx: &NodeContext, tree: &SceneTree, store: &mut ComponentStore) {
        let parent_l2world = nearest_ancestor_l2world(tree, store, ctx.parent);
        if let Some(transform) = store.transforms.get_mut(ctx.entity) {
            let l2world = parent_l2world * transform.trs();
            transform.update(&UpdateArgs::new().l2world(l2world));
        }
    }
}

/// Local-to-world of the nearest transformed ancestor, identity at the root
///
/// Entities without a transform contribute identity, so the chain skips
/// over them.
fn nearest_ancestor_l2world(
    tree: &SceneTree,
    store: &ComponentStore,
    mut current: Option<Entity>,
) -> Mat4 {
    while let Some(entity) = current {
        if let Some(transform) = store.transforms.get(entity) {
            return transform.l2world();
        }
        current = tree.parent(entity);
    }
    Mat4::identity()
}
