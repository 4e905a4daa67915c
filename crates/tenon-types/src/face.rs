use serde::{Deserialize, Serialize};

/// A local-frame axis of a piece's bounding box.
///
/// X spans the cross-section width, Y the cross-section height,
/// Z the piece length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the six named sides of a piece's bounding box.
///
/// `top`/`bottom` are the sawn ends of the stick (the +Z / -Z faces);
/// the identity transform stands a piece upright with `top` facing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    /// x = 0 plane, outward normal -X.
    Left,
    /// x = width plane, outward normal +X.
    Right,
    /// y = 0 plane, outward normal -Y.
    Front,
    /// y = height plane, outward normal +Y.
    Back,
    /// z = 0 plane, outward normal -Z (the lower sawn end).
    Bottom,
    /// z = length plane, outward normal +Z (the upper sawn end).
    Top,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
        Face::Bottom,
        Face::Top,
    ];

    /// Parse a face name. Static mapping, no reflection.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Face::Left),
            "right" => Some(Face::Right),
            "front" => Some(Face::Front),
            "back" => Some(Face::Back),
            "bottom" => Some(Face::Bottom),
            "top" => Some(Face::Top),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Left => "left",
            Face::Right => "right",
            Face::Front => "front",
            Face::Back => "back",
            Face::Bottom => "bottom",
            Face::Top => "top",
        }
    }

    /// The axis this face's normal runs along.
    pub fn axis(&self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Front | Face::Back => Axis::Y,
            Face::Bottom | Face::Top => Axis::Z,
        }
    }

    /// true if the outward normal points in the positive axis direction.
    pub fn is_positive(&self) -> bool {
        matches!(self, Face::Right | Face::Back | Face::Top)
    }

    pub fn opposite(&self) -> Face {
        match self {
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Bottom => Face::Top,
            Face::Top => Face::Bottom,
        }
    }

    /// Two faces are adjacent when they are neither equal nor opposite,
    /// i.e. their planes meet at one of the twelve box edges.
    pub fn is_adjacent_to(&self, other: &Face) -> bool {
        self.axis() != other.axis()
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error constructing an [`Edge`] from a non-adjacent face pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("faces {a} and {b} do not meet at an edge")]
pub struct InvalidEdge {
    pub a: Face,
    pub b: Face,
}

/// An unordered pair of adjacent faces, naming one of the twelve box edges.
///
/// Construction rejects equal or opposite faces. The stored order is the
/// order given by the caller; equality ignores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    a: Face,
    b: Face,
}

impl Edge {
    pub fn new(a: Face, b: Face) -> Result<Self, InvalidEdge> {
        if a.is_adjacent_to(&b) {
            Ok(Self { a, b })
        } else {
            Err(InvalidEdge { a, b })
        }
    }

    pub fn faces(&self) -> (Face, Face) {
        (self.a, self.b)
    }

    /// The axis the edge line runs along: the one axis lying in both
    /// face planes.
    pub fn direction_axis(&self) -> Axis {
        match (self.a.axis(), self.b.axis()) {
            (Axis::X, Axis::Y) | (Axis::Y, Axis::X) => Axis::Z,
            (Axis::X, Axis::Z) | (Axis::Z, Axis::X) => Axis::Y,
            (Axis::Y, Axis::Z) | (Axis::Z, Axis::Y) => Axis::X,
            // new() guarantees distinct axes
            _ => unreachable!("edge faces share an axis"),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for Edge {}

impl std::fmt::Display for Edge {
    /// Displays as "front/left", the surface syntax for edge anchors.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.a, self.b)
    }
}
