use crate::math::Matrix;
use crate::ProjectionError;
use std::f32::consts::PI;

/// Right-handed perspective projection mapping view depth to 0..1,
/// following the XNA `CreatePerspectiveFieldOfView` layout.
pub fn perspective_fov(
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Result<Matrix, ProjectionError> {
    if !(fov_y > 0.0 && fov_y < PI) {
        return Err(ProjectionError::FieldOfView(fov_y));
    }
    if !(aspect > 0.0) {
        return Err(ProjectionError::AspectRatio(aspect));
    }
    if !(near > 0.0 && far > 0.0 && near < far) {
        return Err(ProjectionError::ClippingPlanes { near, far });
    }

    let y_scale = 1.0 / (fov_y * 0.5).tan();
    let x_scale = y_scale / aspect;
    let depth = near - far;

    Ok(Matrix::new(
        x_scale, 0.0, 0.0, 0.0,
        0.0, y_scale, 0.0, 0.0,
        0.0, 0.0, far / depth, -1.0,
        0.0, 0.0, near * far / depth, 0.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::default::Point3D;
    use std::f32::consts::FRAC_PI_2;

    fn project(m: &Matrix, z: f32) -> f32 {
        let p = m.transform_point3d_homogeneous(Point3D::new(0.0, 0.0, z));
        p.z / p.w
    }

    #[test]
    fn near_and_far_map_to_unit_depth() {
        let m = perspective_fov(FRAC_PI_2, 16.0 / 9.0, 0.1, 1000.0).unwrap();
        assert!(project(&m, -0.1).abs() < 1e-5);
        assert!((project(&m, -1000.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn scales_follow_fov_and_aspect() {
        let m = perspective_fov(FRAC_PI_2, 2.0, 1.0, 10.0).unwrap();
        assert!((m.m22 - 1.0).abs() < 1e-6);
        assert!((m.m11 - 0.5).abs() < 1e-6);
        assert_eq!(m.m34, -1.0);
        assert_eq!(m.m44, 0.0);
    }

    #[test]
    fn rejects_degenerate_frustums() {
        assert_eq!(perspective_fov(0.0, 1.0, 0.1, 10.0), Err(ProjectionError::FieldOfView(0.0)));
        assert_eq!(perspective_fov(PI, 1.0, 0.1, 10.0), Err(ProjectionError::FieldOfView(PI)));
        assert_eq!(perspective_fov(1.0, 0.0, 0.1, 10.0), Err(ProjectionError::AspectRatio(0.0)));
        assert_eq!(
            perspective_fov(1.0, 1.0, 0.0, 10.0),
            Err(ProjectionError::ClippingPlanes { near: 0.0, far: 10.0 })
        );
        assert_eq!(
            perspective_fov(1.0, 1.0, 10.0, 10.0),
            Err(ProjectionError::ClippingPlanes { near: 10.0, far: 10.0 })
        );
        assert!(perspective_fov(1.0, f32::NAN, 0.1, 10.0).is_err());
    }
}
