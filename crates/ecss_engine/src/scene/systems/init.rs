//! Initialization pass
//!
//! Runs each component's one-time `init` and records which meshes need a
//! GPU upload. The pass is idempotent: a second run requests nothing new
//! unless a mesh was replaced since, in which case the fresh component is
//! uninitialized again and a new upload request supersedes the stale one.

use crate::scene::components::{Component, ComponentStore};
use crate::scene::entity::{Entity, SceneTree};
use crate::scene::system::{NodeContext, System};

/// Dispatches component `init` calls and collects upload requests
#[derive(Debug, Default)]
pub struct InitSystem {
    uploads: Vec<Entity>,
}

impl InitSystem {
    /// Create the system
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear upload requests before a pass
    pub fn begin_pass(&mut self) {
        self.uploads.clear();
    }

    /// Entities whose mesh data must be (re)uploaded by the collaborator
    pub fn uploads(&self) -> &[Entity] {
        &self.uploads
    }
}

impl System for InitSystem {
    fn visit_transform(&mut self, ctx: &NodeContext, _tree: &SceneTree, store: &mut ComponentStore) {
        if let Some(transform) = store.transforms.get_mut(ctx.entity) {
            transform.init();
        }
    }

    fn visit_camera(&mut self, ctx: &NodeContext, _tree: &SceneTree, store: &mut ComponentStore) {
        if let Some(camera) = store.cameras.get_mut(ctx.entity) {
            camera.init();
        }
    }

    fn visit_mesh(&mut self, ctx: &NodeContext, _tree: &SceneTree, store: &mut ComponentStore) {
        if let Some(mesh) = store.meshes.get_mut(ctx.entity) {
            if !mesh.is_initialized() {
                mesh.init();
                self.uploads.push(ctx.entity);
            }
        }
    }
}
