//! Keyframe component
//!
//! One sampled skeletal pose: a 4x4 matrix per bone at a fixed point in
//! animation time. The blender decomposes the per-bone matrices into
//! rotation and translation channels for interpolation.

use crate::foundation::math::{rotation_of, translation_of, Mat4, Quat, Vec3};

use super::Component;

/// A sampled skeletal pose, one matrix per bone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeComponent {
    bones: Vec<Mat4>,
}

impl KeyframeComponent {
    /// Create a pose from per-bone matrices, ordered by bone index
    pub fn new(bones: Vec<Mat4>) -> Self {
        Self { bones }
    }

    /// Per-bone pose matrices
    pub fn bones(&self) -> &[Mat4] {
        &self.bones
    }

    /// Number of bones in the pose
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Translation channel: one vector per bone
    pub fn translations(&self) -> Vec<Vec3> {
        self.bones.iter().map(translation_of).collect()
    }

    /// Rotation channel: one unit quaternion per bone
    pub fn rotations(&self) -> Vec<Quat> {
        self.bones.iter().map(rotation_of).collect()
    }
}

impl Component for KeyframeComponent {}
