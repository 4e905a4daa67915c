pub mod boxgeom;
pub mod geometry;

pub use boxgeom::{anchor_point, edge_line, face_plane, resolve_offset, BoxDims, GeometryError};
pub use geometry::point::Point3d;
pub use geometry::transform::{BoundingBox, Transform};
pub use geometry::vector::Vec3;

/// Global tolerance configuration for geometric comparisons.
///
/// All lengths are millimetres; the coincidence tolerance is the bound
/// within which resolved anchor points (and cycle-closing transforms)
/// must agree.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (mm).
    pub coincidence: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { coincidence: 1e-6 }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }

    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }
}
