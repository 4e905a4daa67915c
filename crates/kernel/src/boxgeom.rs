//! Box geometry: maps symbolic face/edge/anchor descriptions to concrete
//! local-frame points and outward normals.
//!
//! Local frame convention: origin at the minimum corner, X spans the
//! cross-section width, Y the cross-section height, Z the piece length.
//! `top`/`bottom` are the sawn ends; identity pose stands a piece upright.

use tenon_types::{Anchor, AnchorKind, Axis, Category, Edge, Face, InvalidEdge, Offset, Piece};

use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;

/// The three box dimensions of a piece, in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDims {
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

impl BoxDims {
    pub fn new(width: f64, height: f64, length: f64) -> Self {
        Self {
            width,
            height,
            length,
        }
    }

    pub fn of(piece: &Piece) -> Self {
        let (width, height, length) = piece.dims();
        Self {
            width,
            height,
            length,
        }
    }

    pub fn from_category(category: Category, length: f64) -> Self {
        let (width, height) = category.cross_section();
        Self {
            width,
            height,
            length,
        }
    }

    /// Extent of the box along a local axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.length,
        }
    }

    /// The eight corners of the box in the local frame.
    pub fn corners(&self) -> [Point3d; 8] {
        let (w, h, l) = (self.width, self.height, self.length);
        [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(w, 0.0, 0.0),
            Point3d::new(0.0, h, 0.0),
            Point3d::new(w, h, 0.0),
            Point3d::new(0.0, 0.0, l),
            Point3d::new(w, 0.0, l),
            Point3d::new(0.0, h, l),
            Point3d::new(w, h, l),
        ]
    }
}

/// Errors from resolving symbolic geometry against a piece's box.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error(transparent)]
    NoSuchEdge(#[from] InvalidEdge),

    #[error("offset {offset}mm is outside {at} (extent 0..{extent}mm)")]
    OffsetOutOfRange {
        /// Human-readable location, e.g. "face left" or "edge front/left".
        at: String,
        /// The resolved linear offset that fell out of range.
        offset: f64,
        extent: f64,
    },
}

/// Unit vector along a local axis.
pub fn axis_vector(axis: Axis) -> Vec3 {
    match axis {
        Axis::X => Vec3::X,
        Axis::Y => Vec3::Y,
        Axis::Z => Vec3::Z,
    }
}

/// Outward normal of a face in the local frame.
pub fn face_normal(face: Face) -> Vec3 {
    let v = axis_vector(face.axis());
    if face.is_positive() {
        v
    } else {
        -v
    }
}

/// The plane of one box face: its parameter origin, in-plane axes with
/// extents, and outward normal.
///
/// `u_axis` is the face's designated offset axis (side faces measure along
/// the length, end faces along the width); anchor points sit at the centre
/// of `v_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePlane {
    pub origin: Point3d,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
    pub normal: Vec3,
    pub u_extent: f64,
    pub v_extent: f64,
}

/// The plane equation for a face of the given box.
pub fn face_plane(dims: &BoxDims, face: Face) -> FacePlane {
    let (u, v) = face_axes(face);
    let origin = face_origin(dims, face);
    FacePlane {
        origin,
        u_axis: axis_vector(u),
        v_axis: axis_vector(v),
        normal: face_normal(face),
        u_extent: dims.extent(u),
        v_extent: dims.extent(v),
    }
}

/// Designated (u, v) in-plane axes per face.
fn face_axes(face: Face) -> (Axis, Axis) {
    match face.axis() {
        Axis::X => (Axis::Z, Axis::Y),
        Axis::Y => (Axis::Z, Axis::X),
        Axis::Z => (Axis::X, Axis::Y),
    }
}

/// The minimum-coordinate corner of a face.
fn face_origin(dims: &BoxDims, face: Face) -> Point3d {
    let mut p = Point3d::ORIGIN;
    if face.is_positive() {
        match face.axis() {
            Axis::X => p.x = dims.width,
            Axis::Y => p.y = dims.height,
            Axis::Z => p.z = dims.length,
        }
    }
    p
}

/// The parametric line of one box edge: minimum-coordinate end, unit
/// direction, and physical length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLine {
    pub origin: Point3d,
    pub direction: Vec3,
    pub length: f64,
}

/// The parametric line where faces `a` and `b` meet.
///
/// Fails with [`GeometryError::NoSuchEdge`] when the faces are equal or
/// opposite.
pub fn edge_line(dims: &BoxDims, a: Face, b: Face) -> Result<EdgeLine, GeometryError> {
    let edge = Edge::new(a, b)?;
    let axis = edge.direction_axis();
    let mut origin = Point3d::ORIGIN;
    for face in [a, b] {
        if face.is_positive() {
            match face.axis() {
                Axis::X => origin.x = dims.width,
                Axis::Y => origin.y = dims.height,
                Axis::Z => origin.z = dims.length,
            }
        }
    }
    Ok(EdgeLine {
        origin,
        direction: axis_vector(axis),
        length: dims.extent(axis),
    })
}

/// Convert an [`Offset`] into a concrete distance along an extent.
///
/// `at` names the face or edge for error messages. Out-of-range values are
/// rejected, never clamped; `FromMax(0)` resolves to the extent exactly and
/// `Center` to the exact arithmetic midpoint.
pub fn resolve_offset(offset: Offset, extent: f64, at: &str) -> Result<f64, GeometryError> {
    let out_of_range = |d: f64| GeometryError::OffsetOutOfRange {
        at: at.to_string(),
        offset: d,
        extent,
    };
    let check = |d: f64| {
        if (0.0..=extent).contains(&d) {
            Ok(d)
        } else {
            Err(out_of_range(d))
        }
    };
    match offset {
        Offset::FromMin { value } => {
            if value < 0.0 {
                return Err(out_of_range(value));
            }
            check(value)
        }
        Offset::FromMax { value } => {
            if value < 0.0 {
                return Err(out_of_range(extent - value));
            }
            check(extent - value)
        }
        Offset::Center => Ok(extent / 2.0),
        Offset::Value { value } => check(value),
    }
}

/// Resolve an [`Anchor`] to its 3D point and outward face normal in the
/// piece's local frame.
///
/// This is the single entry point higher layers use to turn symbolic joint
/// data into geometry. It is total over well-formed anchors and returns a
/// descriptive [`GeometryError`] for degenerate edges or out-of-range
/// offsets.
pub fn anchor_point(dims: &BoxDims, anchor: &Anchor) -> Result<(Point3d, Vec3), GeometryError> {
    let normal = face_normal(anchor.face);
    match anchor.kind {
        AnchorKind::Face { offset } => {
            let plane = face_plane(dims, anchor.face);
            let at = format!("face {}", anchor.face);
            let u = resolve_offset(offset, plane.u_extent, &at)?;
            let point = plane.origin + plane.u_axis * u + plane.v_axis * (plane.v_extent / 2.0);
            Ok((point, normal))
        }
        AnchorKind::Edge { point } => {
            let line = edge_line(dims, anchor.face, point.other_face)?;
            let at = format!("edge {}/{}", anchor.face, point.other_face);
            let t = resolve_offset(point.offset, line.length, &at)?;
            Ok((line.origin + line.direction * t, normal))
        }
    }
}
