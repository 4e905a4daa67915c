//! Property-based tests for box-geometry invariants using the `proptest`
//! crate.

use proptest::prelude::*;

use tenon_kernel::boxgeom::{anchor_point, edge_line, face_normal, face_plane, BoxDims};
use tenon_kernel::geometry::point::Point3d;
use tenon_kernel::geometry::transform::{BoundingBox, Transform};
use tenon_kernel::geometry::vector::Vec3;
use tenon_types::{Anchor, Face, Offset};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary non-degenerate box dimensions in millimetre ranges typical of
/// lumber stock.
fn arb_dims() -> impl Strategy<Value = BoxDims> {
    (10.0f64..200.0, 10.0f64..200.0, 50.0f64..3000.0)
        .prop_map(|(w, h, l)| BoxDims::new(w, h, l))
}

/// Any of the six faces.
fn arb_face() -> impl Strategy<Value = Face> {
    prop::sample::select(Face::ALL.to_vec())
}

/// An offset fraction within [0, 1] of whatever extent it is applied to.
fn arb_fraction() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

const TOL: f64 = 1e-9;

// ---------------------------------------------------------------------------
// 1. Face anchors lie on their face plane
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn face_anchor_lies_on_its_plane(
        dims in arb_dims(),
        face in arb_face(),
        frac in arb_fraction(),
    ) {
        let plane = face_plane(&dims, face);
        let anchor = Anchor::on_face(face, Offset::FromMin { value: frac * plane.u_extent });
        let (point, normal) = anchor_point(&dims, &anchor).unwrap();

        let off_plane = (point - plane.origin).dot(&plane.normal);
        prop_assert!(off_plane.abs() < TOL,
            "anchor {point:?} sits {off_plane}mm off the {face} plane");
        prop_assert_eq!(normal.to_array(), plane.normal.to_array());
    }
}

// ---------------------------------------------------------------------------
// 2. Face in-plane axes are orthogonal to the outward normal
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn face_axes_are_orthonormal(dims in arb_dims(), face in arb_face()) {
        let plane = face_plane(&dims, face);
        prop_assert!(plane.u_axis.dot(&plane.normal).abs() < TOL);
        prop_assert!(plane.v_axis.dot(&plane.normal).abs() < TOL);
        prop_assert!(plane.u_axis.dot(&plane.v_axis).abs() < TOL);
        prop_assert!((plane.u_axis.length() - 1.0).abs() < TOL);
        prop_assert!((plane.v_axis.length() - 1.0).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// 3. Opposite faces have antiparallel normals and extents apart
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn opposite_faces_mirror_each_other(dims in arb_dims(), face in arb_face()) {
        let near = face_plane(&dims, face);
        let far = face_plane(&dims, face.opposite());

        let sum = near.normal + far.normal;
        prop_assert!(sum.length() < TOL, "normals must cancel, got {sum:?}");

        let gap = (far.origin - near.origin).dot(&far.normal).abs();
        let extent = dims.extent(face.axis());
        prop_assert!((gap - extent).abs() < TOL,
            "face planes {gap}mm apart, expected {extent}mm");
    }
}

// ---------------------------------------------------------------------------
// 4. Edge lines start and end on box corners
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn edge_endpoints_are_box_corners(
        dims in arb_dims(),
        a in arb_face(),
        b in arb_face(),
    ) {
        prop_assume!(a.is_adjacent_to(&b));
        let line = edge_line(&dims, a, b).unwrap();
        let corners = dims.corners();
        let is_corner = |p: Point3d| corners.iter().any(|c| c.distance_to(&p) < TOL);
        prop_assert!(is_corner(line.origin));
        prop_assert!(is_corner(line.origin + line.direction * line.length));
    }
}

// ---------------------------------------------------------------------------
// 5. Edge anchors stay on both adjacent face planes
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn edge_anchor_lies_on_both_faces(
        dims in arb_dims(),
        a in arb_face(),
        b in arb_face(),
        frac in arb_fraction(),
    ) {
        prop_assume!(a.is_adjacent_to(&b));
        let line = edge_line(&dims, a, b).unwrap();
        let anchor = Anchor::on_edge(a, b, Offset::FromMin { value: frac * line.length });
        let (point, _) = anchor_point(&dims, &anchor).unwrap();

        for face in [a, b] {
            let plane = face_plane(&dims, face);
            let off = (point - plane.origin).dot(&plane.normal);
            prop_assert!(off.abs() < TOL,
                "edge anchor {point:?} sits {off}mm off the {face} plane");
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Quarter-turn frame transforms preserve distance
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn frame_transforms_are_rigid(
        (ax, ay, az) in (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0),
        (bx, by, bz) in (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0),
        (tx, ty, tz) in (-1000.0f64..1000.0, -1000.0f64..1000.0, -1000.0f64..1000.0),
    ) {
        let a = Point3d::new(ax, ay, az);
        let b = Point3d::new(bx, by, bz);
        // A quarter turn about Z carried to an arbitrary origin.
        let t = Transform::from_frame(Vec3::new(tx, ty, tz), Vec3::Y, -Vec3::X, Vec3::Z);

        let d_orig = a.distance_to(&b);
        let d_mapped = t.transform_point(&a).distance_to(&t.transform_point(&b));
        prop_assert!((d_orig - d_mapped).abs() < 1e-6,
            "rigid map changed distance: {d_orig} -> {d_mapped}");

        let round_trip = t.rigid_inverse().transform_point(&t.transform_point(&a));
        prop_assert!(round_trip.distance_to(&a) < 1e-6);
    }
}

// ---------------------------------------------------------------------------
// 7. Anchors always fall inside the box extents
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn anchors_stay_inside_the_box(
        dims in arb_dims(),
        face in arb_face(),
        frac in arb_fraction(),
    ) {
        let plane = face_plane(&dims, face);
        let anchor = Anchor::on_face(face, Offset::FromMax { value: frac * plane.u_extent });
        let (point, _) = anchor_point(&dims, &anchor).unwrap();

        let bb = BoundingBox::from_points(&dims.corners());
        prop_assert!(point.x >= bb.min.x - TOL && point.x <= bb.max.x + TOL);
        prop_assert!(point.y >= bb.min.y - TOL && point.y <= bb.max.y + TOL);
        prop_assert!(point.z >= bb.min.z - TOL && point.z <= bb.max.z + TOL);
    }
}

// ---------------------------------------------------------------------------
// 8. Face normals agree between the plane and the standalone lookup
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn face_normal_lookup_matches_plane(dims in arb_dims(), face in arb_face()) {
        let plane = face_plane(&dims, face);
        prop_assert_eq!(face_normal(face).to_array(), plane.normal.to_array());
    }
}
