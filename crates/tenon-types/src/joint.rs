use serde::{Deserialize, Serialize};

use crate::face::Face;

/// A linear offset along a face's designated axis or along an edge.
///
/// All variants resolve against the extent of the face axis or edge they
/// are applied to; resolution lives in the kernel (`resolve_offset`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Offset {
    /// Distance from the minimum-coordinate end. Must be non-negative.
    FromMin { value: f64 },
    /// Distance from the maximum-coordinate end. Must be non-negative.
    FromMax { value: f64 },
    /// The arithmetic midpoint of the extent.
    Center,
    /// Signed distance from the parameter origin (the minimum end).
    /// Out-of-range results are errors, never clamped.
    Value { value: f64 },
}

/// A point along one of the twelve box edges: the edge where `face` meets
/// `other_face`, at `offset` from the edge's minimum-coordinate end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgePoint {
    pub other_face: Face,
    pub offset: Offset,
}

/// The location part of an anchor: either a point on the face interior
/// (offset along the face's designated axis, centred transversely) or a
/// point on one of the face's edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnchorKind {
    Face { offset: Offset },
    Edge { point: EdgePoint },
}

/// A symbolic description of one 3D point and its outward normal on a
/// piece: a face plus either a face offset or an edge point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub face: Face,
    pub kind: AnchorKind,
}

impl Anchor {
    /// Face-interior anchor: `face` at `offset` along its designated axis.
    pub fn on_face(face: Face, offset: Offset) -> Self {
        Self {
            face,
            kind: AnchorKind::Face { offset },
        }
    }

    /// Edge anchor on the edge where `face` meets `other_face`.
    pub fn on_edge(face: Face, other_face: Face, offset: Offset) -> Self {
        Self {
            face,
            kind: AnchorKind::Edge {
                point: EdgePoint { other_face, offset },
            },
        }
    }

}

/// Orientation rule for a joint: once joined, the target piece's
/// `target_face` must point along the outward-normal direction of the base
/// piece's `base_direction` face.
///
/// Together with the faces-pressed-together condition (anchor normals made
/// antiparallel) this fixes the target rotation completely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseRule {
    pub target_face: Face,
    pub base_direction: Face,
}

/// A joint: an ordered (base, target) pair of piece identities, an anchor
/// on each side, and the target orientation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub base: String,
    pub target: String,
    pub base_anchor: Anchor,
    pub target_anchor: Anchor,
    pub pose: PoseRule,
}

impl Connection {
    pub fn involves(&self, id: &str) -> bool {
        self.base == id || self.target == id
    }

    /// The ordered identity pair keying this connection in a model.
    pub fn key(&self) -> (&str, &str) {
        (&self.base, &self.target)
    }
}
