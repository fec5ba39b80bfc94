//! Math utilities and types
//!
//! Provides the fundamental math types used by the scenegraph core. All
//! matrix composition in the engine uses nalgebra's column-major 4x4
//! matrices; that convention is fixed here and used consistently for
//! local-to-world, local-to-camera and pose-matrix math.

pub use nalgebra::{Matrix3, Matrix4, Unit, UnitQuaternion, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Create a translation matrix
pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::new_translation(&Vec3::new(x, y, z))
}

/// Create a uniform scaling matrix
pub fn scale(factor: f32) -> Mat4 {
    Mat4::new_scaling(factor)
}

/// Create a non-uniform scaling matrix
pub fn scale_xyz(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::new_nonuniform_scaling(&Vec3::new(x, y, z))
}

/// Create a rotation matrix from an axis and an angle in radians
pub fn rotate(axis: Vec3, angle: f32) -> Mat4 {
    Mat4::from_axis_angle(&Unit::new_normalize(axis), angle)
}

/// Extract the translation column of a TRS matrix
pub fn translation_of(m: &Mat4) -> Vec3 {
    m.fixed_view::<3, 1>(0, 3).into_owned()
}

/// Extract the rotation of a TRS matrix as a unit quaternion
///
/// The upper-left 3x3 block is taken as-is; scaled matrices should be
/// normalized by the caller first.
pub fn rotation_of(m: &Mat4) -> Quat {
    Quat::from_matrix(&m.fixed_view::<3, 3>(0, 0).into_owned())
}

/// Extension trait for Mat4 with projection and view helpers
pub trait Mat4Ext {
    /// Create a perspective projection matrix
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create an orthographic projection matrix
    fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4;

    /// Create a look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_orthographic(left, right, bottom, top, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&eye.into(), &target.into(), &up)
    }
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
