//! Triangle meshes for resolved assemblies.
//!
//! Each piece tessellates as its cross-section polygon extruded along the
//! local length axis, optionally with the four long corners chamfered;
//! world-space meshes come from composing the local mesh with the piece's
//! resolved transform.

pub mod svg;

use serde::{Deserialize, Serialize};

use tenon_engine::{Assembly, Model};
use tenon_kernel::{BoxDims, Point3d, Transform, Vec3};

/// A triangle mesh for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn add_vertex(&mut self, pos: Point3d, normal: Vec3) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions.push(pos.x as f32);
        self.positions.push(pos.y as f32);
        self.positions.push(pos.z as f32);
        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
        idx
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        for &idx in &other.indices {
            self.indices.push(idx + offset);
        }
    }

    /// The mesh mapped through a rigid transform.
    pub fn transformed(&self, transform: &Transform) -> TriangleMesh {
        let mut out = TriangleMesh::new();
        for i in 0..self.vertex_count() {
            let p = Point3d::new(
                self.positions[i * 3] as f64,
                self.positions[i * 3 + 1] as f64,
                self.positions[i * 3 + 2] as f64,
            );
            let n = Vec3::new(
                self.normals[i * 3] as f64,
                self.normals[i * 3 + 1] as f64,
                self.normals[i * 3 + 2] as f64,
            );
            out.add_vertex(transform.transform_point(&p), transform.transform_vector(&n));
        }
        out.indices = self.indices.clone();
        out
    }
}

/// Tessellate one piece in its local frame.
///
/// `chamfer` > 0 cuts the four long corners at 45 degrees (an octagonal
/// section), clamped to half the smaller cross-section dimension; this is
/// the mesh-level rendering of a fillet radius.
pub fn piece_mesh(dims: &BoxDims, chamfer: f64) -> TriangleMesh {
    let profile = section_profile(dims.width, dims.height, chamfer);
    extrude_profile(&profile, dims.length)
}

/// World-space meshes for every piece of a resolved assembly, in model
/// insertion order.
pub fn assembly_meshes(
    model: &Model,
    assembly: &Assembly,
    chamfer: f64,
) -> Vec<(String, TriangleMesh)> {
    model
        .pieces()
        .map(|piece| {
            let local = piece_mesh(&BoxDims::of(piece), chamfer);
            let world = assembly
                .world_transform(&piece.id)
                .expect("assembly covers every model piece");
            (piece.id.clone(), local.transformed(world))
        })
        .collect()
}

/// Cross-section outline in the XY plane, counter-clockwise seen from +Z.
fn section_profile(width: f64, height: f64, chamfer: f64) -> Vec<(f64, f64)> {
    let c = chamfer.clamp(0.0, width.min(height) / 2.0);
    if c <= 0.0 {
        return vec![(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)];
    }
    vec![
        (c, 0.0),
        (width - c, 0.0),
        (width, c),
        (width, height - c),
        (width - c, height),
        (c, height),
        (0.0, height - c),
        (0.0, c),
    ]
}

/// Extrude a convex CCW profile from z = 0 to z = length.
fn extrude_profile(profile: &[(f64, f64)], length: f64) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let n = profile.len();

    // Bottom cap, wound clockwise so the normal faces -Z.
    let bottom: Vec<u32> = profile
        .iter()
        .rev()
        .map(|&(x, y)| mesh.add_vertex(Point3d::new(x, y, 0.0), -Vec3::Z))
        .collect();
    for i in 1..(n - 1) {
        mesh.add_triangle(bottom[0], bottom[i], bottom[i + 1]);
    }

    // Top cap, counter-clockwise, normal +Z.
    let top: Vec<u32> = profile
        .iter()
        .map(|&(x, y)| mesh.add_vertex(Point3d::new(x, y, length), Vec3::Z))
        .collect();
    for i in 1..(n - 1) {
        mesh.add_triangle(top[0], top[i], top[i + 1]);
    }

    // Side quads, one per profile edge, outward normal in the XY plane.
    for i in 0..n {
        let (x0, y0) = profile[i];
        let (x1, y1) = profile[(i + 1) % n];
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-9 {
            // A fully clamped chamfer collapses two profile edges.
            continue;
        }
        let normal = Vec3::new(dy / len, -dx / len, 0.0);

        let v0 = mesh.add_vertex(Point3d::new(x0, y0, 0.0), normal);
        let v1 = mesh.add_vertex(Point3d::new(x1, y1, 0.0), normal);
        let v2 = mesh.add_vertex(Point3d::new(x1, y1, length), normal);
        let v3 = mesh.add_vertex(Point3d::new(x0, y0, length), normal);
        mesh.add_triangle(v0, v1, v2);
        mesh.add_triangle(v0, v2, v3);
    }

    mesh
}

/// Serialize a mesh in Wavefront OBJ format.
pub fn mesh_to_obj(mesh: &TriangleMesh, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("o {name}\n"));
    for i in 0..mesh.vertex_count() {
        out.push_str(&format!(
            "v {} {} {}\n",
            mesh.positions[i * 3],
            mesh.positions[i * 3 + 1],
            mesh.positions[i * 3 + 2]
        ));
    }
    for i in 0..mesh.vertex_count() {
        out.push_str(&format!(
            "vn {} {} {}\n",
            mesh.normals[i * 3],
            mesh.normals[i * 3 + 1],
            mesh.normals[i * 3 + 2]
        ));
    }
    for t in 0..mesh.triangle_count() {
        // OBJ indices are 1-based.
        let (a, b, c) = (
            mesh.indices[t * 3] + 1,
            mesh.indices[t * 3 + 1] + 1,
            mesh.indices[t * 3 + 2] + 1,
        );
        out.push_str(&format!("f {a}//{a} {b}//{b} {c}//{c}\n"));
    }
    out
}

/// Serialize a set of named meshes as one OBJ document.
pub fn meshes_to_obj(meshes: &[(String, TriangleMesh)]) -> String {
    let mut out = String::new();
    let mut offset = 0u32;
    for (name, mesh) in meshes {
        out.push_str(&format!("o {name}\n"));
        for i in 0..mesh.vertex_count() {
            out.push_str(&format!(
                "v {} {} {}\n",
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2]
            ));
        }
        for i in 0..mesh.vertex_count() {
            out.push_str(&format!(
                "vn {} {} {}\n",
                mesh.normals[i * 3],
                mesh.normals[i * 3 + 1],
                mesh.normals[i * 3 + 2]
            ));
        }
        for t in 0..mesh.triangle_count() {
            let (a, b, c) = (
                offset + mesh.indices[t * 3] + 1,
                offset + mesh.indices[t * 3 + 1] + 1,
                offset + mesh.indices[t * 3 + 2] + 1,
            );
            out.push_str(&format!("f {a}//{a} {b}//{b} {c}//{c}\n"));
        }
        offset += mesh.vertex_count() as u32;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenon_types::Category;

    fn dims() -> BoxDims {
        BoxDims::from_category(Category::TwoByFour, 400.0)
    }

    #[test]
    fn test_box_mesh_counts() {
        let mesh = piece_mesh(&dims(), 0.0);
        // Two cap triangles each end plus two per side quad.
        assert_eq!(mesh.triangle_count(), 2 + 2 + 4 * 2);
    }

    #[test]
    fn test_chamfered_mesh_counts() {
        let mesh = piece_mesh(&dims(), 5.0);
        // Octagonal caps: 6 triangles each, 8 side quads.
        assert_eq!(mesh.triangle_count(), 6 + 6 + 8 * 2);
    }

    #[test]
    fn test_chamfer_clamps_to_half_section() {
        // A chamfer larger than the section clamps to half the smaller
        // dimension; the two collapsed edges drop their side quads.
        let mesh = piece_mesh(&dims(), 1000.0);
        assert_eq!(mesh.triangle_count(), 6 + 6 + 6 * 2);
    }

    #[test]
    fn test_transformed_moves_positions() {
        let mesh = piece_mesh(&dims(), 0.0);
        let moved = mesh.transformed(&Transform::translation(10.0, 0.0, 0.0));
        assert_eq!(moved.vertex_count(), mesh.vertex_count());
        assert_eq!(moved.positions[0], mesh.positions[0] + 10.0);
        // Normals are directions and do not translate.
        assert_eq!(moved.normals, mesh.normals);
    }

    #[test]
    fn test_obj_output_shape() {
        let mesh = piece_mesh(&dims(), 0.0);
        let obj = mesh_to_obj(&mesh, "stick");
        assert!(obj.starts_with("o stick\n"));
        assert_eq!(
            obj.lines().filter(|l| l.starts_with("v ")).count(),
            mesh.vertex_count()
        );
        assert_eq!(
            obj.lines().filter(|l| l.starts_with("f ")).count(),
            mesh.triangle_count()
        );
    }
}
