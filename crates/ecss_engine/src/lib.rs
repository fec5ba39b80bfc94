//! # ECSS Engine
//!
//! An Entity-Component-Scenegraph core for interactive 3D visualization.
//!
//! ## Features
//!
//! - **Scenegraph**: tree of entities with ordered children and components
//! - **Visitor Systems**: per-variant dispatch without type-casing at call sites
//! - **Transform Propagation**: pre-order composition of local-to-world and
//!   local-to-camera matrices
//! - **Event Bus**: synchronous named events with weak subscriber references
//! - **Animation Blending**: ping-pong keyframe playback with SLERP/LERP
//!   rotation channels and flattened per-bone pose buffers
//!
//! ## Quick Start
//!
//! ```rust
//! use ecss_engine::prelude::*;
//!
//! let mut world = World::new();
//! let root = world.create_entity("root");
//! let node = world.create_entity("node");
//! world.add_child(root, node)?;
//! world.add_transform(node, TransformComponent::from_trs(translate(0.0, 0.0, -8.0)))?;
//!
//! world.traverse_visit(&mut TransformSystem::new(), root)?;
//! assert_eq!(
//!     world.store().transforms[node].l2world(),
//!     translate(0.0, 0.0, -8.0)
//! );
//! # Ok::<(), ecss_engine::scene::SceneError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animation;
pub mod config;
pub mod events;
pub mod foundation;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::animation::{AnimationComponent, Interpolation, PoseBuffer};
    pub use crate::config::{Config, ConfigError, PlaybackConfig};
    pub use crate::events::{Event, EventArg, EventHandler, EventManager};
    pub use crate::foundation::math::{
        rotate, scale, translate, Mat4, Mat4Ext, Quat, Vec3, Vec4,
    };
    pub use crate::scene::{
        CameraComponent, Component, ComponentKind, ComponentStore, Decorated, DetachedComponent,
        Entity, KeyframeComponent, MeshComponent, NodeContext, SceneError, SceneTree, System,
        TransformComponent, UpdateArgs, VertexAttribute, World, COMPONENTS_DETACHED,
    };
    pub use crate::scene::systems::{
        CameraSystem, DrawItem, InitSystem, RenderCollector, TransformSystem,
    };
}
