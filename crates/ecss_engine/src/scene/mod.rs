//! Scenegraph: entities, components, traversal and systems
//!
//! The world owns a tree of entities and per-type component stores. A
//! depth-first pre-order traversal drives visitor systems that propagate
//! transforms, compose the camera view and collect draw submissions.

pub mod components;
pub mod entity;
pub mod error;
pub mod system;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

pub use components::{
    CameraComponent, Component, ComponentKind, ComponentSlot, ComponentStore, Decorated,
    DetachedComponent, KeyframeComponent, MeshComponent, TransformComponent, UpdateArgs,
    VertexAttribute,
};
pub use entity::{Entity, SceneTree};
pub use error::SceneError;
pub use system::{NodeContext, System};
pub use world::{World, COMPONENTS_DETACHED};
