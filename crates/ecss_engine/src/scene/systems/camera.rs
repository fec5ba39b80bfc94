//! Camera composition system
//!
//! Works in two phases. The ancestor phase runs on the camera-only
//! traversal: it accumulates the TRS matrices along the chain from the
//! root down to the camera entity, its own TRS included; [`CameraSystem::prepare`]
//! then inverts the product into the root-to-camera matrix and writes it
//! into the camera component. The broadcast phase runs on the general
//! pass, after transform propagation, and writes
//! `l2cam = root2cam * l2world` into every transform.

use log::warn;

use crate::foundation::math::Mat4;
use crate::scene::components::{Component, ComponentStore, UpdateArgs};
use crate::scene::entity::{Entity, SceneTree};
use crate::scene::error::SceneError;
use crate::scene::system::{NodeContext, System};
use crate::scene::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ancestors,
    Broadcast,
}

/// Composes the active camera's view matrix and broadcasts it
#[derive(Debug)]
pub struct CameraSystem {
    phase: Phase,
    accumulated: Mat4,
    root2cam: Mat4,
}

impl Default for CameraSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSystem {
    /// Create the system; call [`Self::prepare`] before the general pass
    pub fn new() -> Self {
        Self {
            phase: Phase::Ancestors,
            accumulated: Mat4::identity(),
            root2cam: Mat4::identity(),
        }
    }

    /// Run the camera-only ancestor pass for `camera`
    ///
    /// Inverts the accumulated chain once the whole pass has run, so the
    /// camera's own TRS counts regardless of component attachment order.
    /// Leaves the system in broadcast mode for the following general pass.
    pub fn prepare(&mut self, world: &mut World, camera: Entity) -> Result<(), SceneError> {
        self.phase = Phase::Ancestors;
        self.accumulated = Mat4::identity();
        world.traverse_camera(self, camera)?;

        self.root2cam = self.accumulated.try_inverse().unwrap_or_else(|| {
            warn!("camera chain at {camera:?} is singular, using identity view");
            Mat4::identity()
        });
        if let Some(cam) = world.store_mut().cameras.get_mut(camera) {
            cam.update(&UpdateArgs::new().root2cam(self.root2cam));
        }
        self.phase = Phase::Broadcast;
        Ok(())
    }

    /// The root-to-camera matrix from the last ancestor pass
    pub fn root2cam(&self) -> Mat4 {
        self.root2cam
    }
}

impl System for CameraSystem {
    fn visit_transform(&mut self, ctx: &NodeContext, _tree: &SceneTree, store: &mut ComponentStore) {
        match self.phase {
            Phase::Ancestors => {
                if let Some(transform) = store.transforms.get(ctx.entity) {
                    self.accumulated *= transform.trs();
                }
            }
            Phase::Broadcast => {
                if let Some(transform) = store.transforms.get_mut(ctx.entity) {
                    let l2cam = self.root2cam * transform.l2world();
                    transform.update(&UpdateArgs::new().l2cam(l2cam));
                }
            }
        }
    }
}
