//! Component variants and per-type storage
//!
//! Components are a closed set of typed data containers attached to
//! entities. Instead of a virtual class hierarchy, each variant is a plain
//! struct stored in a per-type container keyed by entity id
//! (struct-of-arrays), and visitor dispatch is routed through
//! [`crate::scene::system::System`] with one handler per variant.

pub mod camera;
pub mod decorator;
pub mod keyframe;
pub mod mesh;
pub mod transform;

pub use camera::CameraComponent;
pub use decorator::Decorated;
pub use keyframe::KeyframeComponent;
pub use mesh::{MeshComponent, VertexAttribute};
pub use transform::TransformComponent;

use slotmap::SecondaryMap;

use crate::animation::AnimationComponent;
use crate::foundation::math::Mat4;

use super::entity::Entity;

/// Shared lifecycle of every component variant
///
/// `init` performs one-time resource setup and must be idempotent;
/// `update` applies named matrix/state updates, ignoring keys the variant
/// does not recognize.
pub trait Component {
    /// One-time setup; safe to call repeatedly
    fn init(&mut self) {}

    /// Apply the recognized subset of `args`
    fn update(&mut self, _args: &UpdateArgs) {}
}

/// Named update arguments
///
/// The explicit-field analogue of keyword arguments: each variant reads
/// the keys it recognizes (`l2world`/`trs`/`l2cam` for transforms,
/// `root2cam` for cameras) and silently ignores the rest.
#[derive(Debug, Clone, Default)]
pub struct UpdateArgs {
    /// New local TRS matrix
    pub trs: Option<Mat4>,
    /// New local-to-world matrix
    pub l2world: Option<Mat4>,
    /// New local-to-camera matrix
    pub l2cam: Option<Mat4>,
    /// New root-to-camera matrix
    pub root2cam: Option<Mat4>,
}

impl UpdateArgs {
    /// Start an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local TRS matrix
    #[must_use]
    pub fn trs(mut self, m: Mat4) -> Self {
        self.trs = Some(m);
        self
    }

    /// Set the local-to-world matrix
    #[must_use]
    pub fn l2world(mut self, m: Mat4) -> Self {
        self.l2world = Some(m);
        self
    }

    /// Set the local-to-camera matrix
    #[must_use]
    pub fn l2cam(mut self, m: Mat4) -> Self {
        self.l2cam = Some(m);
        self
    }

    /// Set the root-to-camera matrix
    #[must_use]
    pub fn root2cam(mut self, m: Mat4) -> Self {
        self.root2cam = Some(m);
        self
    }
}

/// Component variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// TRS transform with derived world/camera matrices
    Transform,
    /// Projection and root-to-camera matrices
    Camera,
    /// Vertex-attribute arrays and primitive indices
    Mesh,
    /// One sampled skeletal pose
    Keyframe,
    /// Blending state machine for keyframe playback
    Animation,
}

/// One attachment on an entity's dispatch list
///
/// Keyframes carry their position in the entity's keyframe sequence since
/// several can be attached to one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentSlot {
    /// The entity's transform
    Transform,
    /// The entity's camera
    Camera,
    /// The entity's mesh
    Mesh,
    /// The keyframe at the given sequence index
    Keyframe(usize),
    /// The entity's animation state
    Animation,
}

impl ComponentSlot {
    /// The variant tag of this slot
    pub fn kind(self) -> ComponentKind {
        match self {
            Self::Transform => ComponentKind::Transform,
            Self::Camera => ComponentKind::Camera,
            Self::Mesh => ComponentKind::Mesh,
            Self::Keyframe(_) => ComponentKind::Keyframe,
            Self::Animation => ComponentKind::Animation,
        }
    }
}

/// Record of a component severed from the scenegraph
///
/// Emitted when a subtree is destroyed so the rendering collaborator can
/// identify stale GPU resources for cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedComponent {
    /// The entity the component belonged to
    pub entity: Entity,
    /// Which variant was detached
    pub kind: ComponentKind,
}

/// Per-type component containers keyed by entity id
#[derive(Debug, Default)]
pub struct ComponentStore {
    /// Transform components, at most one per entity
    pub transforms: SecondaryMap<Entity, TransformComponent>,
    /// Camera components, at most one per entity
    pub cameras: SecondaryMap<Entity, CameraComponent>,
    /// Mesh components, at most one per entity
    pub meshes: SecondaryMap<Entity, MeshComponent>,
    /// Keyframe sequences, ordered by attachment
    pub keyframes: SecondaryMap<Entity, Vec<KeyframeComponent>>,
    /// Animation blending state, at most one per entity
    pub animations: SecondaryMap<Entity, AnimationComponent>,
}

impl ComponentStore {
    /// Create empty stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Keyframes of an entity in attachment order
    pub fn keyframes_of(&self, entity: Entity) -> &[KeyframeComponent] {
        self.keyframes.get(entity).map_or(&[], Vec::as_slice)
    }

    /// Detach every component of `entity`, reporting what was removed
    pub(crate) fn detach_all(&mut self, entity: Entity) -> Vec<DetachedComponent> {
        let mut detached = Vec::new();
        if self.transforms.remove(entity).is_some() {
            detached.push(DetachedComponent { entity, kind: ComponentKind::Transform });
        }
        if self.cameras.remove(entity).is_some() {
            detached.push(DetachedComponent { entity, kind: ComponentKind::Camera });
        }
        if self.meshes.remove(entity).is_some() {
            detached.push(DetachedComponent { entity, kind: ComponentKind::Mesh });
        }
        if let Some(keys) = self.keyframes.remove(entity) {
            detached.extend(
                keys.iter()
                    .map(|_| DetachedComponent { entity, kind: ComponentKind::Keyframe }),
            );
        }
        if self.animations.remove(entity).is_some() {
            detached.push(DetachedComponent { entity, kind: ComponentKind::Animation });
        }
        detached
    }
}
