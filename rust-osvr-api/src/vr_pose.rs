use crate::math::{self, Matrix, Quat, Vec3};

/// Position and orientation of a tracked sensor, as delivered to pose callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(serde::Deserialize, serde::Serialize))]
pub struct PoseReport {
    pub position: Vec3,
    pub rotation: Quat,
}

impl PoseReport {
    pub fn new(position: Vec3, rotation: Quat) -> PoseReport {
        PoseReport { position, rotation }
    }

    pub fn identity() -> PoseReport {
        PoseReport::new(Vec3::zero(), Quat::identity())
    }

    /// The pose as a rigid transform: rotation, then translation.
    pub fn to_matrix(&self) -> Matrix {
        math::with_translation(math::rotation_matrix(&self.rotation), self.position)
    }
}

impl Default for PoseReport {
    fn default() -> PoseReport {
        PoseReport::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_identity() {
        let pose = PoseReport::default();
        assert_eq!(pose.position, Vec3::zero());
        assert_eq!(pose.rotation, Quat::identity());
        assert_eq!(pose.to_matrix(), Matrix::identity());
    }

    #[test]
    fn matrix_places_translation_last() {
        let pose = PoseReport::new(Vec3::new(1.0, -2.0, 3.0), math::roll(std::f32::consts::PI));
        let m = pose.to_matrix();
        assert_eq!((m.m41, m.m42, m.m43, m.m44), (1.0, -2.0, 3.0, 1.0));
        assert!((m.m11 + 1.0).abs() < 1e-6);
        assert!((m.m22 + 1.0).abs() < 1e-6);
    }
}
