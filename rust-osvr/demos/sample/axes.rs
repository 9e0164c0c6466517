use euclid::default::Point3D;
use rust_osvr::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

/// A single triangle marking the axes: red toward +Z, green toward +X, blue toward -X.
pub struct Axes {
    vertices: [(Point3D<f32>, Color); 3],
}

impl Axes {
    pub fn new() -> Axes {
        Axes {
            vertices: [
                (Point3D::new(0.0, 0.0, 5.0), Color::Red),
                (Point3D::new(5.0, 0.0, 0.0), Color::Green),
                (Point3D::new(-5.0, 0.0, 0.0), Color::Blue),
            ],
        }
    }

    /// Transforms each vertex by world, view then projection. Vertices behind
    /// the camera come back as `None`.
    pub fn project(&self, world: &Matrix, view: &Matrix, projection: &Matrix) -> [(Color, Option<Point3D<f32>>); 3] {
        let wvp = world.then(view).then(projection);
        self.vertices.map(|(position, color)| {
            (color, wvp.transform_point3d_homogeneous(position).to_point3d())
        })
    }
}
