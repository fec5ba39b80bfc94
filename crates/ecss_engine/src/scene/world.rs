//! Scenegraph world
//!
//! Owns the entity tree, the per-type component stores and the event bus,
//! and orchestrates traversal passes. All operations run synchronously on
//! the single update thread; a traversal pass runs to completion within
//! the frame that requested it.

use log::debug;

use crate::animation::AnimationComponent;
use crate::events::{Event, EventArg, EventManager};

use super::components::{
    CameraComponent, ComponentSlot, ComponentStore, Decorated, DetachedComponent,
    KeyframeComponent, MeshComponent, TransformComponent,
};
use super::entity::{Entity, SceneTree};
use super::error::SceneError;
use super::system::{NodeContext, System};

/// Event published when a destroyed subtree sheds its components
pub const COMPONENTS_DETACHED: &str = "components_detached";

/// The scenegraph: entity tree, component stores and event bus
#[derive(Default)]
pub struct World {
    tree: SceneTree,
    store: ComponentStore,
    events: EventManager,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity tree, read-only
    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    /// The component stores, read-only
    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    /// The component stores, mutable (feature wrappers mutate between frames)
    pub fn store_mut(&mut self) -> &mut ComponentStore {
        &mut self.store
    }

    /// The event bus
    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Allocate a fresh entity with no parent
    pub fn create_entity(&mut self, name: impl Into<String>) -> Entity {
        let entity = self.tree.create(name);
        debug!("created entity {:?} ({})", entity, self.tree.name(entity).unwrap_or(""));
        entity
    }

    /// Append `child` to `parent`'s ordered child list
    pub fn add_child(&mut self, parent: Entity, child: Entity) -> Result<(), SceneError> {
        self.tree.add_child(parent, child)
    }

    /// Child at `index` (0-based); `None` past the end
    pub fn child(&self, parent: Entity, index: usize) -> Option<Entity> {
        self.tree.child(parent, index)
    }

    /// Detach `child` from `parent`, severing the link only
    ///
    /// The subtree keeps its components and can be reattached; world
    /// matrices are recomputed on the next traversal pass.
    pub fn remove_child(&mut self, parent: Entity, child: Entity) -> Result<(), SceneError> {
        self.tree.remove_child(parent, child)
    }

    /// Destroy a subtree, releasing its entities and components
    ///
    /// Returns the detached components and publishes them on the event bus
    /// under [`COMPONENTS_DETACHED`] so the rendering collaborator can
    /// reclaim stale GPU resources.
    pub fn destroy_subtree(&mut self, root: Entity) -> Result<Vec<DetachedComponent>, SceneError> {
        if !self.tree.contains(root) {
            return Err(SceneError::UnknownEntity(root));
        }
        if let Some(parent) = self.tree.parent(root) {
            self.tree.remove_child(parent, root)?;
        }

        let mut detached = Vec::new();
        for entity in self.tree.preorder(root) {
            detached.extend(self.store.detach_all(entity));
            self.tree.release(entity);
        }
        debug!("destroyed subtree at {root:?}: {} components detached", detached.len());

        let event = Event::new(COMPONENTS_DETACHED)
            .with_arg("root", EventArg::Entity(root))
            .with_arg("detached", EventArg::Detached(detached.clone()));
        self.events.notify(&event);
        Ok(detached)
    }

    /// Attach a transform, replacing any existing one
    ///
    /// Accepts a plain component or a [`Decorated`] wrapper; the wrapper's
    /// visitor choice decides whether traversal dispatch reaches the slot.
    /// Returns the replaced component, if any; a replaced visible slot
    /// keeps its original dispatch position.
    pub fn add_transform(
        &mut self,
        entity: Entity,
        transform: impl Into<Decorated<TransformComponent>>,
    ) -> Result<Option<TransformComponent>, SceneError> {
        self.ensure_alive(entity)?;
        let transform = transform.into();
        let visible = transform.accepts_inner();
        let replaced = self.store.transforms.insert(entity, transform.into_inner());
        self.tree.set_slot(entity, ComponentSlot::Transform, visible);
        Ok(replaced)
    }

    /// Attach a camera, replacing any existing one
    pub fn add_camera(
        &mut self,
        entity: Entity,
        camera: impl Into<Decorated<CameraComponent>>,
    ) -> Result<Option<CameraComponent>, SceneError> {
        self.ensure_alive(entity)?;
        let camera = camera.into();
        let visible = camera.accepts_inner();
        let replaced = self.store.cameras.insert(entity, camera.into_inner());
        self.tree.set_slot(entity, ComponentSlot::Camera, visible);
        Ok(replaced)
    }

    /// Attach a mesh, replacing any existing one
    pub fn add_mesh(
        &mut self,
        entity: Entity,
        mesh: impl Into<Decorated<MeshComponent>>,
    ) -> Result<Option<MeshComponent>, SceneError> {
        self.ensure_alive(entity)?;
        let mesh = mesh.into();
        let visible = mesh.accepts_inner();
        let replaced = self.store.meshes.insert(entity, mesh.into_inner());
        self.tree.set_slot(entity, ComponentSlot::Mesh, visible);
        Ok(replaced)
    }

    /// Append a keyframe to the entity's pose sequence
    ///
    /// Several keyframes per entity are expected; returns the index of the
    /// appended pose. A wrapper declining visitors appends to the sequence
    /// without a dispatch slot.
    pub fn add_keyframe(
        &mut self,
        entity: Entity,
        keyframe: impl Into<Decorated<KeyframeComponent>>,
    ) -> Result<usize, SceneError> {
        self.ensure_alive(entity)?;
        let keyframe = keyframe.into();
        let visible = keyframe.accepts_inner();
        let sequence = self
            .store
            .keyframes
            .entry(entity)
            .ok_or(SceneError::UnknownEntity(entity))?
            .or_insert_with(Vec::new);
        sequence.push(keyframe.into_inner());
        let index = sequence.len() - 1;
        if visible {
            self.tree.push_slot(entity, ComponentSlot::Keyframe(index));
        }
        Ok(index)
    }

    /// Attach animation playback state, replacing any existing one
    pub fn add_animation(
        &mut self,
        entity: Entity,
        animation: impl Into<Decorated<AnimationComponent>>,
    ) -> Result<Option<AnimationComponent>, SceneError> {
        self.ensure_alive(entity)?;
        let animation = animation.into();
        let visible = animation.accepts_inner();
        let replaced = self.store.animations.insert(entity, animation.into_inner());
        self.tree.set_slot(entity, ComponentSlot::Animation, visible);
        Ok(replaced)
    }

    /// Walk the subtree at `root` in pre-order, dispatching to `system`
    ///
    /// Parents are visited before children, children in attachment order,
    /// and each entity's component slots in attachment order.
    pub fn traverse_visit(
        &mut self,
        system: &mut dyn System,
        root: Entity,
    ) -> Result<(), SceneError> {
        if !self.tree.contains(root) {
            return Err(SceneError::UnknownEntity(root));
        }
        for entity in self.tree.preorder(root) {
            Self::dispatch(system, entity, &self.tree, &mut self.store);
        }
        Ok(())
    }

    /// Visit only the ancestor chain of `camera`, root first
    ///
    /// Used by the camera system to compose the root-to-camera matrix
    /// before the general pass broadcasts it.
    pub fn traverse_camera(
        &mut self,
        system: &mut dyn System,
        camera: Entity,
    ) -> Result<(), SceneError> {
        if !self.tree.contains(camera) {
            return Err(SceneError::UnknownEntity(camera));
        }
        for entity in self.tree.ancestors_from_root(camera) {
            Self::dispatch(system, entity, &self.tree, &mut self.store);
        }
        Ok(())
    }

    fn dispatch(system: &mut dyn System, entity: Entity, tree: &SceneTree, store: &mut ComponentStore) {
        let ctx = NodeContext {
            entity,
            parent: tree.parent(entity),
        };
        system.visit_entity(&ctx, tree, store);
        for slot in tree.slots(entity) {
            match *slot {
                ComponentSlot::Transform => system.visit_transform(&ctx, tree, store),
                ComponentSlot::Camera => system.visit_camera(&ctx, tree, store),
                ComponentSlot::Mesh => system.visit_mesh(&ctx, tree, store),
                ComponentSlot::Keyframe(index) => system.visit_keyframe(&ctx, tree, store, index),
                ComponentSlot::Animation => system.visit_animation(&ctx, tree, store),
            }
        }
    }

    fn ensure_alive(&self, entity: Entity) -> Result<(), SceneError> {
        if self.tree.contains(entity) {
            Ok(())
        } else {
            Err(SceneError::UnknownEntity(entity))
        }
    }
}
