//! Skeletal animation blending
//!
//! Interpolates between keyframe poses per bone and produces a flattened
//! pose-matrix array per frame. Playback is a ping-pong state machine: the
//! elapsed-time accumulator moves by `tempo` per tick, the active segment
//! is selected by comparing the accumulator against the configured time
//! boundaries, and the direction flips at the outer boundaries.
//!
//! Rotation interpolates spherically or linearly (configurable); the
//! translation channel is always linear.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Mat4;
use crate::scene::components::{Component, KeyframeComponent};

/// Rotation interpolation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Spherical-linear interpolation of the rotation channel
    #[default]
    #[serde(rename = "SLERP")]
    Slerp,
    /// Normalized linear interpolation of the rotation channel
    #[serde(rename = "LERP")]
    Lerp,
}

/// Flattened per-frame pose: one 4x4 matrix per bone, ordered by bone index
///
/// Matrices are flattened column-major; the whole buffer is viewable as a
/// contiguous float slice for direct upload as a uniform array.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseBuffer {
    matrices: Vec<[f32; 16]>,
}

impl PoseBuffer {
    fn from_matrices(matrices: &[Mat4]) -> Self {
        let matrices = matrices
            .iter()
            .map(|m| {
                let mut flat = [0.0f32; 16];
                flat.copy_from_slice(m.as_slice());
                flat
            })
            .collect();
        Self { matrices }
    }

    /// Number of bone matrices in the pose
    pub fn bone_count(&self) -> usize {
        self.matrices.len()
    }

    /// Reassemble the matrix for one bone
    pub fn matrix(&self, bone: usize) -> Option<Mat4> {
        self.matrices
            .get(bone)
            .map(|flat| Mat4::from_column_slice(flat))
    }

    /// The whole pose as one contiguous float buffer
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.matrices)
    }
}

/// Per-entity animation playback state and blender
///
/// Scalar state only; the keyframe poses themselves live in
/// [`KeyframeComponent`]s attached to the same entity.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationComponent {
    tempo: f32,
    boundaries: [f32; 3],
    accumulator: f32,
    forward: bool,
    playing: bool,
    interpolation: Interpolation,
    alpha: f32,
}

impl Default for AnimationComponent {
    fn default() -> Self {
        Self::new(2.0, [0.0, 100.0, 200.0], Interpolation::Slerp)
    }
}

impl AnimationComponent {
    /// Create playback state with the given tempo and segment boundaries
    ///
    /// `boundaries` are the key-frame times `[t0, t1, t2]`: segment A→B
    /// spans `[t0, t1]`, segment B→C spans `(t1, t2]` when a third
    /// keyframe exists.
    pub fn new(tempo: f32, boundaries: [f32; 3], interpolation: Interpolation) -> Self {
        Self {
            tempo,
            boundaries,
            accumulator: boundaries[0],
            forward: true,
            playing: true,
            interpolation,
            alpha: 0.0,
        }
    }

    /// Blend factor of the last tick, in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Elapsed-time accumulator
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Whether playback currently moves toward the final boundary
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Whether the accumulator advances on tick
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Pause or resume playback
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// The rotation interpolation mode
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Advance one tick and blend the active segment into a pose
    ///
    /// Out-of-range accumulators produce an identity-filled pose. With two
    /// keyframes the ping-pong turns at `t1`; a third keyframe extends the
    /// run to `t2`.
    pub fn advance(
        &mut self,
        key1: &KeyframeComponent,
        key2: &KeyframeComponent,
        key3: Option<&KeyframeComponent>,
    ) -> PoseBuffer {
        let [t0, t1, t2] = self.boundaries;
        let last = if key3.is_some() { t2 } else { t1 };

        let mut pose = vec![Mat4::identity(); key1.bone_count()];
        if self.accumulator >= t0 && self.accumulator <= t1 {
            self.blend_into(&mut pose, key1, key2, t0, t1);
        } else if self.accumulator > t1 && self.accumulator <= t2 {
            if let Some(key3) = key3 {
                self.blend_into(&mut pose, key2, key3, t1, t2);
            }
        }

        if self.playing {
            let step = if self.forward { self.tempo } else { -self.tempo };
            self.accumulator = (self.accumulator + step).clamp(t0, last);
        }
        if self.accumulator >= last {
            self.forward = false;
        } else if self.accumulator <= t0 {
            self.forward = true;
        }

        PoseBuffer::from_matrices(&pose)
    }

    fn blend_into(
        &mut self,
        pose: &mut [Mat4],
        from: &KeyframeComponent,
        to: &KeyframeComponent,
        start: f32,
        end: f32,
    ) {
        self.alpha = (self.accumulator - start) / (end - start).abs();
        let from_rotations = from.rotations();
        let to_rotations = to.rotations();
        let from_translations = from.translations();
        let to_translations = to.translations();

        // Blend only the bones every involved pose carries
        let bones = pose.len().min(from.bone_count()).min(to.bone_count());
        for (bone, matrix) in pose.iter_mut().enumerate().take(bones) {
            let rotation = match self.interpolation {
                Interpolation::Slerp => from_rotations[bone]
                    .try_slerp(&to_rotations[bone], self.alpha, 1.0e-6)
                    .unwrap_or_else(|| from_rotations[bone].nlerp(&to_rotations[bone], self.alpha)),
                Interpolation::Lerp => from_rotations[bone].nlerp(&to_rotations[bone], self.alpha),
            };
            let translation = from_translations[bone]
                + (to_translations[bone] - from_translations[bone]) * self.alpha;
            matrix
                .fixed_view_mut::<3, 3>(0, 0)
                .copy_from(rotation.to_rotation_matrix().matrix());
            matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        }
    }
}

impl Component for AnimationComponent {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{translate, Quat, Vec3};
    use approx::assert_relative_eq;

    fn pose_pair() -> (KeyframeComponent, KeyframeComponent) {
        let q = Quat::from_axis_angle(&Vec3::y_axis(), 1.0);
        let key1 = KeyframeComponent::new(vec![Mat4::identity(), translate(1.0, 0.0, 0.0)]);
        let key2 = KeyframeComponent::new(vec![q.to_homogeneous(), translate(3.0, 0.0, 0.0)]);
        (key1, key2)
    }

    #[test]
    fn ping_pong_flips_at_the_boundaries() {
        let (key1, key2) = pose_pair();
        let mut anim = AnimationComponent::new(2.0, [0.0, 100.0, 200.0], Interpolation::Slerp);

        for _ in 0..50 {
            assert!(anim.is_forward());
            anim.advance(&key1, &key2, None);
        }
        assert_relative_eq!(anim.accumulator(), 100.0);
        assert!(!anim.is_forward());

        for _ in 0..50 {
            anim.advance(&key1, &key2, None);
        }
        assert_relative_eq!(anim.accumulator(), 0.0);
        assert!(anim.is_forward());
    }

    #[test]
    fn paused_playback_freezes_the_accumulator() {
        let (key1, key2) = pose_pair();
        let mut anim = AnimationComponent::default();
        anim.set_playing(false);
        anim.advance(&key1, &key2, None);
        anim.advance(&key1, &key2, None);
        assert_relative_eq!(anim.accumulator(), 0.0);
    }

    #[test]
    fn alpha_zero_reproduces_the_first_keyframe() {
        let (key1, key2) = pose_pair();
        for mode in [Interpolation::Slerp, Interpolation::Lerp] {
            let mut anim = AnimationComponent::new(2.0, [0.0, 100.0, 200.0], mode);
            let pose = anim.advance(&key1, &key2, None);
            assert_relative_eq!(anim.alpha(), 0.0);
            for bone in 0..key1.bone_count() {
                assert_relative_eq!(
                    pose.matrix(bone).unwrap(),
                    key1.bones()[bone],
                    epsilon = 1.0e-5
                );
            }
        }
    }

    #[test]
    fn alpha_one_reproduces_the_second_keyframe() {
        let (key1, key2) = pose_pair();
        for mode in [Interpolation::Slerp, Interpolation::Lerp] {
            let mut anim = AnimationComponent::new(2.0, [0.0, 100.0, 200.0], mode);
            // 51st tick blends with the accumulator parked at the boundary
            let mut pose = anim.advance(&key1, &key2, None);
            for _ in 0..50 {
                pose = anim.advance(&key1, &key2, None);
            }
            assert_relative_eq!(anim.alpha(), 1.0);
            for bone in 0..key2.bone_count() {
                assert_relative_eq!(
                    pose.matrix(bone).unwrap(),
                    key2.bones()[bone],
                    epsilon = 1.0e-5
                );
            }
        }
    }

    #[test]
    fn third_keyframe_extends_playback_to_the_final_boundary() {
        let (key1, key2) = pose_pair();
        let key3 = KeyframeComponent::new(vec![Mat4::identity(), translate(5.0, 0.0, 0.0)]);
        let mut anim = AnimationComponent::new(2.0, [0.0, 100.0, 200.0], Interpolation::Slerp);

        for _ in 0..100 {
            anim.advance(&key1, &key2, Some(&key3));
        }
        assert_relative_eq!(anim.accumulator(), 200.0);
        assert!(!anim.is_forward());
    }

    #[test]
    fn mismatched_bone_counts_blend_the_shared_prefix() {
        let key1 = KeyframeComponent::new(vec![Mat4::identity(), translate(1.0, 0.0, 0.0)]);
        let key2 = KeyframeComponent::new(vec![translate(0.0, 2.0, 0.0)]);
        let key3 = KeyframeComponent::new(vec![Mat4::identity(), translate(5.0, 0.0, 0.0)]);
        let mut anim = AnimationComponent::new(5.0, [0.0, 10.0, 20.0], Interpolation::Slerp);

        // Tick into the second segment, where the short middle pose is the source
        let mut pose = anim.advance(&key1, &key2, Some(&key3));
        for _ in 0..3 {
            pose = anim.advance(&key1, &key2, Some(&key3));
        }
        assert!(anim.accumulator() > 10.0);
        assert_eq!(pose.bone_count(), 2);
        // Bones past the shared prefix stay at identity
        assert_relative_eq!(pose.matrix(1).unwrap(), Mat4::identity(), epsilon = 1.0e-5);
    }

    #[test]
    fn pose_buffer_is_contiguous_and_bone_ordered() {
        let (key1, key2) = pose_pair();
        let mut anim = AnimationComponent::default();
        let pose = anim.advance(&key1, &key2, None);
        assert_eq!(pose.bone_count(), 2);
        let floats = pose.as_floats();
        assert_eq!(floats.len(), 32);
        // Column-major flatten: bone 1's translation.x lands at 16 + 12
        assert_relative_eq!(floats[28], 1.0);
    }
}
