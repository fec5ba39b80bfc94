//! Concrete traversal systems
//!
//! - [`TransformSystem`]: propagates local-to-world matrices down the tree
//! - [`CameraSystem`]: composes root-to-camera, then broadcasts local-to-camera
//! - [`InitSystem`]: one-time component setup and GPU upload requests
//! - [`RenderCollector`]: turns resolved meshes into an ordered draw list

pub mod camera;
pub mod init;
pub mod render;
pub mod transform;

pub use camera::CameraSystem;
pub use init::InitSystem;
pub use render::{DrawItem, RenderCollector};
pub use transform::TransformSystem;
