//! Conversions from ClientKit math types to `euclid` vectors, quaternions and matrices.
//!
//! Matrices follow the row-vector convention: a point is transformed as `p * M`,
//! translation lives in `m41..m43`, and `a.then(&b)` applies `a` first.

use euclid::default::{Rotation3D, Transform3D, Vector3D};
use crate::native::{OSVR_Pose3, OSVR_Quaternion, OSVR_Vec3};
use serde::Deserialize;

pub type Vec3 = Vector3D<f32>;
pub type Quat = Rotation3D<f32>;
pub type Matrix = Transform3D<f32>;

/// Coordinate system the converted values should be expressed in.
///
/// ClientKit reports right-handed coordinates, so `RightHanded` is a plain
/// precision change. `LeftHanded` mirrors the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Serialize))]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    RightHanded,
    LeftHanded,
}

impl Default for Handedness {
    fn default() -> Handedness {
        Handedness::RightHanded
    }
}

pub fn convert_position(vec: &OSVR_Vec3, handedness: Handedness) -> Vec3 {
    let [x, y, z] = vec.data;
    match handedness {
        Handedness::RightHanded => Vec3::new(x as f32, y as f32, z as f32),
        Handedness::LeftHanded => Vec3::new(x as f32, y as f32, -z as f32),
    }
}

pub fn convert_orientation(quat: &OSVR_Quaternion, handedness: Handedness) -> Quat {
    let [w, x, y, z] = quat.data;
    match handedness {
        Handedness::RightHanded => Quat::quaternion(x as f32, y as f32, z as f32, w as f32),
        Handedness::LeftHanded => Quat::quaternion(-x as f32, -y as f32, z as f32, w as f32),
    }
}

pub fn convert_pose(pose: &OSVR_Pose3, handedness: Handedness) -> Matrix {
    let rotation = rotation_matrix(&convert_orientation(&pose.rotation, handedness));
    // Writing the translation row directly saves a matrix multiply.
    with_translation(rotation, convert_position(&pose.translation, handedness))
}

/// Returns `matrix` with its translation row replaced.
pub fn with_translation(matrix: Matrix, translation: Vec3) -> Matrix {
    let mut result = matrix;
    result.m41 = translation.x;
    result.m42 = translation.y;
    result.m43 = translation.z;
    result
}

/// Rotation matrix of a quaternion. Non-unit quaternions are normalized first,
/// a zero quaternion yields the identity.
pub fn rotation_matrix(rotation: &Quat) -> Matrix {
    let norm = rotation.square_norm();
    if norm == 0.0 {
        return Matrix::identity();
    }
    let q = if (norm - 1.0).abs() > 1e-6 { rotation.normalize() } else { *rotation };
    let (x, y, z, w) = (q.i, q.j, q.k, q.r);

    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (xy, zw, zx, yw, yz, xw) = (x * y, z * w, z * x, y * w, y * z, x * w);

    Matrix::new(
        1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw),       2.0 * (zx - yw),       0.0,
        2.0 * (xy - zw),       1.0 - 2.0 * (zz + xx), 2.0 * (yz + xw),       0.0,
        2.0 * (zx + yw),       2.0 * (yz - xw),       1.0 - 2.0 * (yy + xx), 0.0,
        0.0,                   0.0,                   0.0,                   1.0,
    )
}

/// Quaternion for a yaw (around Y), pitch (around X) and roll (around Z), in radians.
/// Roll is applied first, then pitch, then yaw.
pub fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Quat {
    let (sr, cr) = (roll * 0.5).sin_cos();
    let (sp, cp) = (pitch * 0.5).sin_cos();
    let (sy, cy) = (yaw * 0.5).sin_cos();

    Quat::quaternion(
        cy * sp * cr + sy * cp * sr,
        sy * cp * cr - cy * sp * sr,
        cy * cp * sr - sy * sp * cr,
        cy * cp * cr + sy * sp * sr,
    )
}

/// Rotation of `angle` radians around the Z axis.
pub fn roll(angle: f32) -> Quat {
    yaw_pitch_roll(0.0, 0.0, angle)
}

pub fn right() -> Vec3 { Vec3::new(1.0, 0.0, 0.0) }
pub fn left() -> Vec3 { Vec3::new(-1.0, 0.0, 0.0) }
pub fn up() -> Vec3 { Vec3::new(0.0, 1.0, 0.0) }
pub fn down() -> Vec3 { Vec3::new(0.0, -1.0, 0.0) }
pub fn forward() -> Vec3 { Vec3::new(0.0, 0.0, -1.0) }
pub fn backward() -> Vec3 { Vec3::new(0.0, 0.0, 1.0) }

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn positions_keep_their_axes() {
        let native = OSVR_Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(convert_position(&native, Handedness::RightHanded), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(convert_position(&native, Handedness::LeftHanded), Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn orientation_moves_the_scalar_last() {
        let native = OSVR_Quaternion::new(0.5, 0.1, 0.2, 0.3);
        let q = convert_orientation(&native, Handedness::RightHanded);
        assert_eq!((q.i, q.j, q.k, q.r), (0.1, 0.2, 0.3, 0.5));

        let q = convert_orientation(&native, Handedness::LeftHanded);
        assert_eq!((q.i, q.j, q.k, q.r), (-0.1, -0.2, 0.3, 0.5));
    }

    #[test]
    fn pose_matrix_carries_translation() {
        let pose = OSVR_Pose3 {
            translation: OSVR_Vec3::new(1.0, 2.0, 3.0),
            rotation: OSVR_Quaternion::identity(),
        };
        let m = convert_pose(&pose, Handedness::RightHanded);
        assert_eq!(m, Matrix::translation(1.0, 2.0, 3.0));
    }

    #[test]
    fn pose_matrix_rotates_before_translating() {
        let half = (FRAC_PI_2 * 0.5) as f64;
        let pose = OSVR_Pose3 {
            translation: OSVR_Vec3::new(0.0, 0.0, -2.0),
            // Quarter turn around Y.
            rotation: OSVR_Quaternion::new(half.cos(), 0.0, half.sin(), 0.0),
        };
        let m = convert_pose(&pose, Handedness::RightHanded);
        assert_vec_close(m.transform_vector3d(forward()), left());
        assert_eq!((m.m41, m.m42, m.m43), (0.0, 0.0, -2.0));
    }

    #[test]
    fn yaw_turns_forward_to_the_left() {
        let q = yaw_pitch_roll(FRAC_PI_2, 0.0, 0.0);
        assert!((q.j - (FRAC_PI_2 * 0.5).sin()).abs() < 1e-6);
        assert_eq!((q.i, q.k), (0.0, 0.0));
        assert_vec_close(rotation_matrix(&q).transform_vector3d(forward()), left());
    }

    #[test]
    fn pitch_turns_forward_upwards() {
        let q = yaw_pitch_roll(0.0, FRAC_PI_2, 0.0);
        assert_vec_close(rotation_matrix(&q).transform_vector3d(forward()), up());
    }

    #[test]
    fn roll_turns_right_upwards() {
        assert_vec_close(rotation_matrix(&roll(FRAC_PI_2)).transform_vector3d(right()), up());
    }

    #[test]
    fn degenerate_rotations() {
        assert_eq!(rotation_matrix(&Quat::quaternion(0.0, 0.0, 0.0, 0.0)), Matrix::identity());
        assert_eq!(rotation_matrix(&Quat::identity()), Matrix::identity());
        // Scaled quaternions describe the same rotation.
        let scaled = Quat::quaternion(0.0, 0.0, 0.0, 2.0);
        assert_eq!(rotation_matrix(&scaled), Matrix::identity());
    }
}
