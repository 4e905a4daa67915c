//! Isometric SVG rendering of assembly meshes.
//!
//! A painter's-algorithm shaded view: triangles are projected onto an
//! isometric plane, depth-sorted, and filled with a per-depth brightness.
//! Good enough to eyeball a resolved assembly without a CAD viewer.

use crate::TriangleMesh;

/// Simple isometric projection: 3D -> 2D.
fn project(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let angle_x: f64 = 0.6;
    let angle_z: f64 = 0.8;
    let rx = x * angle_z.cos() - y * angle_z.sin();
    let ry = x * angle_z.sin() + y * angle_z.cos();
    let pz = ry * angle_x.sin() + z * angle_x.cos();
    // Depth along the view axis for painter's sorting.
    let depth = ry * angle_x.cos() - z * angle_x.sin();
    (rx, -pz, depth)
}

struct Tri {
    points: [(f64, f64); 3],
    depth: f64,
    brightness: f64,
}

/// Render a set of named world-space meshes as one shaded SVG scene.
pub fn meshes_to_svg(
    meshes: &[(String, TriangleMesh)],
    width: f64,
    height: f64,
    title: &str,
) -> String {
    let mut tris: Vec<Tri> = Vec::new();
    let light = (0.3_f64, -0.5_f64, 0.8_f64);
    let light_len = (light.0 * light.0 + light.1 * light.1 + light.2 * light.2).sqrt();

    for (_, mesh) in meshes {
        let projected: Vec<(f64, f64, f64)> = (0..mesh.vertex_count())
            .map(|i| {
                project(
                    mesh.positions[i * 3] as f64,
                    mesh.positions[i * 3 + 1] as f64,
                    mesh.positions[i * 3 + 2] as f64,
                )
            })
            .collect();

        for t in 0..mesh.triangle_count() {
            let idx = [
                mesh.indices[t * 3] as usize,
                mesh.indices[t * 3 + 1] as usize,
                mesh.indices[t * 3 + 2] as usize,
            ];
            let nx = mesh.normals[idx[0] * 3] as f64;
            let ny = mesh.normals[idx[0] * 3 + 1] as f64;
            let nz = mesh.normals[idx[0] * 3 + 2] as f64;
            let dot = (nx * light.0 + ny * light.1 + nz * light.2) / light_len;
            let brightness = 0.3 + 0.7 * dot.abs().min(1.0);

            let points = [
                (projected[idx[0]].0, projected[idx[0]].1),
                (projected[idx[1]].0, projected[idx[1]].1),
                (projected[idx[2]].0, projected[idx[2]].1),
            ];
            let depth =
                (projected[idx[0]].2 + projected[idx[1]].2 + projected[idx[2]].2) / 3.0;
            tris.push(Tri {
                points,
                depth,
                brightness,
            });
        }
    }

    if tris.is_empty() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\
             <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"14\" fill=\"#ccc\">{title}</text>\
             </svg>"
        );
    }

    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for tri in &tris {
        for (px, py) in tri.points {
            min_x = min_x.min(px);
            max_x = max_x.max(px);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }
    }

    let padding = 40.0;
    let avail_w = width - 2.0 * padding;
    let avail_h = height - 2.0 * padding - 25.0;
    let data_w = (max_x - min_x).max(0.001);
    let data_h = (max_y - min_y).max(0.001);
    let scale = (avail_w / data_w).min(avail_h / data_h);
    let offset_x = padding + (avail_w - data_w * scale) / 2.0;
    let offset_y = padding + 25.0 + (avail_h - data_h * scale) / 2.0;
    let tx = |px: f64| (px - min_x) * scale + offset_x;
    let ty = |py: f64| (py - min_y) * scale + offset_y;

    // Painter's algorithm: far triangles first.
    tris.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:#1a1a2e\">\n\
         <text x=\"{}\" y=\"20\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" text-anchor=\"middle\">{title}</text>\n",
        width / 2.0
    );

    for tri in &tris {
        let b = tri.brightness;
        // Warm wood-ish shading.
        let r = (200.0 * b) as u8;
        let g = (160.0 * b) as u8;
        let bl = (110.0 * b) as u8;
        let p = tri.points;
        svg.push_str(&format!(
            "<polygon points=\"{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}\" \
             fill=\"rgb({r},{g},{bl})\" stroke=\"#2a2a4a\" stroke-width=\"0.5\"/>\n",
            tx(p[0].0),
            ty(p[0].1),
            tx(p[1].0),
            ty(p[1].1),
            tx(p[2].0),
            ty(p[2].1),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
