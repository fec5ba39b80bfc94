//! Camera component
//!
//! Holds a projection matrix and the derived root-to-camera matrix. The
//! projection is configured at construction; the root-to-camera matrix is
//! written by the camera system during the ancestor-only pass.

use crate::foundation::math::{Mat4, Mat4Ext};

use super::{Component, UpdateArgs};

/// Projection plus derived root-to-camera matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CameraComponent {
    projection: Mat4,
    root2cam: Mat4,
}

impl Default for CameraComponent {
    fn default() -> Self {
        // Symmetric orthographic volume, wide enough for untransformed scenes
        Self::orthographic(-100.0, 100.0, -100.0, 100.0, 1.0, 100.0)
    }
}

impl CameraComponent {
    /// Create a camera with an explicit projection matrix
    pub fn from_projection(projection: Mat4) -> Self {
        Self {
            projection,
            root2cam: Mat4::identity(),
        }
    }

    /// Create a camera with an orthographic projection
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::from_projection(Mat4::ortho(left, right, bottom, top, near, far))
    }

    /// Create a camera with a perspective projection
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::from_projection(Mat4::perspective(fov_y, aspect, near, far))
    }

    /// The projection matrix
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// The derived root-to-camera matrix from the last camera pass
    pub fn root2cam(&self) -> Mat4 {
        self.root2cam
    }
}

impl Component for CameraComponent {
    fn update(&mut self, args: &UpdateArgs) {
        if let Some(root2cam) = args.root2cam {
            self.root2cam = root2cam;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::translate;
    use approx::assert_relative_eq;

    #[test]
    fn update_recognizes_root2cam_only() {
        let mut cam = CameraComponent::default();
        let projection = cam.projection();
        let m = translate(0.0, 1.0, 0.0);
        cam.update(&UpdateArgs::new().root2cam(m).trs(m));
        assert_relative_eq!(cam.root2cam(), m);
        assert_relative_eq!(cam.projection(), projection);
    }
}
