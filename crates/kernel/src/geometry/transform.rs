use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// A rigid-body transform (rotation + translation) stored as a 4x4
/// column-major matrix.
///
/// The rotation part is always orthonormal; in this domain it is built
/// from axis-aligned unit frames, so its entries are exactly -1, 0 or 1
/// and composition stays bit-exact across runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Column-major 4x4 matrix entries.
    pub m: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx,  dy,  dz,  1.0,
        ];
        Self { m }
    }

    /// Build a transform whose rotation columns are the given orthonormal
    /// axes and whose translation is `origin`: it maps local (1,0,0) to
    /// `x_axis`, local (0,0,0) to `origin`, and so on.
    pub fn from_frame(origin: Vec3, x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        #[rustfmt::skip]
        let m = [
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            origin.x, origin.y, origin.z, 1.0,
        ];
        Self { m }
    }

    /// Matrix element access (row, col), 0-indexed.
    fn at(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    /// The image of the local X/Y/Z basis vectors, by column index.
    pub fn basis(&self, col: usize) -> Vec3 {
        Vec3::new(self.at(0, col), self.at(1, col), self.at(2, col))
    }

    pub fn translation_vec(&self) -> Vec3 {
        self.basis(3)
    }

    /// Transform a point (applies translation).
    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        let x = self.at(0, 0) * p.x + self.at(0, 1) * p.y + self.at(0, 2) * p.z + self.at(0, 3);
        let y = self.at(1, 0) * p.x + self.at(1, 1) * p.y + self.at(1, 2) * p.z + self.at(1, 3);
        let z = self.at(2, 0) * p.x + self.at(2, 1) * p.y + self.at(2, 2) * p.z + self.at(2, 3);
        Point3d::new(x, y, z)
    }

    /// Transform a direction (rotation only).
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        let x = self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z;
        let y = self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z;
        let z = self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z;
        Vec3::new(x, y, z)
    }

    /// Compose two transforms: apply `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let mut result = [0.0f64; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * other.at(k, col);
                }
                result[col * 4 + row] = sum;
            }
        }
        Transform { m: result }
    }

    /// Exact inverse of a rigid transform: the rotation part is
    /// transposed and the translation is rotated back through it.
    pub fn rigid_inverse(&self) -> Transform {
        let t = self.translation_vec();
        let rx = self.basis(0);
        let ry = self.basis(1);
        let rz = self.basis(2);
        // Rows of R become columns of R^T.
        let ix = Vec3::new(rx.x, ry.x, rz.x);
        let iy = Vec3::new(rx.y, ry.y, rz.y);
        let iz = Vec3::new(rx.z, ry.z, rz.z);
        let origin = Vec3::new(-rx.dot(&t), -ry.dot(&t), -rz.dot(&t));
        Transform::from_frame(origin, ix, iy, iz)
    }

    /// Component-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Transform, tol: f64) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// The largest absolute component difference between two transforms.
    pub fn max_deviation(&self, other: &Transform) -> f64 {
        self.m
            .iter()
            .zip(other.m.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3d]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point3d::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3d::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn center(&self) -> Point3d {
        self.min.midpoint(&self.max)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        let p = Point3d::new(1.0, 2.0, 3.0);
        let result = t.transform_point(&p);
        assert!((result.x - 1.0).abs() < 1e-12);
        assert!((result.y - 2.0).abs() < 1e-12);
        assert!((result.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let p = Point3d::new(1.0, 2.0, 3.0);
        let result = t.transform_point(&p);
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_frame_quarter_turn() {
        // Frame rotated 90 degrees about Z: local X -> world Y.
        let t = Transform::from_frame(Vec3::ZERO, Vec3::Y, -Vec3::X, Vec3::Z);
        let p = t.transform_point(&Point3d::new(1.0, 0.0, 0.0));
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 1.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_compose_transforms() {
        let t1 = Transform::translation(1.0, 0.0, 0.0);
        let t2 = Transform::translation(0.0, 2.0, 0.0);
        let combined = t1.then(&t2);
        let result = combined.transform_point(&Point3d::ORIGIN);
        assert!((result.x - 1.0).abs() < 1e-12);
        assert!((result.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rigid_inverse_round_trip() {
        use approx::assert_abs_diff_eq;

        let t = Transform::from_frame(Vec3::new(5.0, -3.0, 7.0), Vec3::Y, -Vec3::X, Vec3::Z);
        let round_trip = t.rigid_inverse().then(&t);
        for (a, b) in round_trip.m.iter().zip(Transform::identity().m.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_quarter_turn_frames_compose_exactly() {
        // Axis-aligned frames keep entries in {-1, 0, 1}; four quarter
        // turns about Z must reproduce the identity bit-for-bit.
        let quarter = Transform::from_frame(Vec3::ZERO, Vec3::Y, -Vec3::X, Vec3::Z);
        let full = quarter.then(&quarter).then(&quarter).then(&quarter);
        assert_eq!(full.m, Transform::identity().m);
    }

    #[test]
    fn test_bounding_box() {
        let bb = BoundingBox::from_points(&[
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 2.0, 3.0),
            Point3d::new(-1.0, 0.5, 1.0),
        ]);
        assert!((bb.min.x - (-1.0)).abs() < 1e-12);
        assert!((bb.max.y - 2.0).abs() < 1e-12);
        assert!(bb.is_valid());
    }
}
