//! Transform component
//!
//! Holds the local TRS matrix and the two matrices derived from it during
//! traversal. There is no dirty-flag scheme: both derived matrices are
//! recomputed unconditionally on every pass.

use crate::foundation::math::{translation_of, Mat4, Vec3};

use super::{Component, UpdateArgs};

/// Local TRS plus derived local-to-world and local-to-camera matrices
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    trs: Mat4,
    l2world: Mat4,
    l2cam: Mat4,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformComponent {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            trs: Mat4::identity(),
            l2world: Mat4::identity(),
            l2cam: Mat4::identity(),
        }
    }

    /// Create a transform with the given local TRS matrix
    pub fn from_trs(trs: Mat4) -> Self {
        Self {
            trs,
            ..Self::identity()
        }
    }

    /// The local translation-rotation-scale matrix
    pub fn trs(&self) -> Mat4 {
        self.trs
    }

    /// Replace the local TRS matrix
    pub fn set_trs(&mut self, trs: Mat4) {
        self.trs = trs;
    }

    /// The derived local-to-world matrix from the last traversal
    pub fn l2world(&self) -> Mat4 {
        self.l2world
    }

    /// The derived local-to-camera matrix from the last traversal
    pub fn l2cam(&self) -> Mat4 {
        self.l2cam
    }

    /// Translation column of the local TRS
    pub fn translation(&self) -> Vec3 {
        translation_of(&self.trs)
    }
}

impl Component for TransformComponent {
    fn update(&mut self, args: &UpdateArgs) {
        if let Some(trs) = args.trs {
            self.trs = trs;
        }
        if let Some(l2world) = args.l2world {
            self.l2world = l2world;
        }
        if let Some(l2cam) = args.l2cam {
            self.l2cam = l2cam;
        }
    }
}
