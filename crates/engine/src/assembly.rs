use std::collections::HashMap;

use serde::Serialize;
use slotmap::SecondaryMap;
use tracing::info;

use tenon_kernel::{anchor_point, BoundingBox, BoxDims, Point3d, Transform, Vec3};

use crate::model::{Model, PieceKey};
use crate::types::EngineError;

/// A connection's anchor geometry mapped into world space.
///
/// Both points coincide within tolerance after a successful resolution;
/// the normal is the base anchor face's outward normal in world space and
/// gives the axis along which joinery (dowel holes) is drilled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedJoint {
    pub base: String,
    pub target: String,
    pub base_point: Point3d,
    pub target_point: Point3d,
    pub normal: Vec3,
}

/// The fully resolved, read-only result of pose resolution: a world
/// transform for every piece, world anchor geometry for every connection,
/// and world-space extents for spatial queries.
///
/// An assembly is produced once from a model and never mutated; rebuild
/// it from scratch when the model changes.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// (piece identity, world transform), in model insertion order.
    transforms: Vec<(String, Transform)>,
    by_id: HashMap<String, usize>,
    joints: Vec<ResolvedJoint>,
    /// World axis-aligned extents, parallel to `transforms`.
    extents: Vec<BoundingBox>,
}

impl Assembly {
    /// Package resolved transforms with resolved anchor geometry.
    pub(crate) fn build(
        model: &Model,
        placed: SecondaryMap<PieceKey, Transform>,
    ) -> Result<Self, EngineError> {
        let mut transforms = Vec::with_capacity(model.piece_count());
        let mut by_id = HashMap::with_capacity(model.piece_count());
        let mut extents = Vec::with_capacity(model.piece_count());

        for key in model.piece_keys() {
            let piece = model.piece(key);
            let world = placed[key];
            let dims = BoxDims::of(piece);
            let mut bb = BoundingBox::empty();
            for corner in dims.corners() {
                bb.expand_to_include(&world.transform_point(&corner));
            }
            by_id.insert(piece.id.clone(), transforms.len());
            transforms.push((piece.id.clone(), world));
            extents.push(bb);
        }

        let mut joints = Vec::with_capacity(model.connections().len());
        for conn in model.connections() {
            let base_piece = model.piece_by_id(&conn.base).expect("validated at insertion");
            let target_piece = model
                .piece_by_id(&conn.target)
                .expect("validated at insertion");
            let (p_base, n_base) = anchor_point(&BoxDims::of(base_piece), &conn.base_anchor)
                .map_err(|source| EngineError::Geometry {
                    piece: conn.base.clone(),
                    source,
                })?;
            let (p_target, _) = anchor_point(&BoxDims::of(target_piece), &conn.target_anchor)
                .map_err(|source| EngineError::Geometry {
                    piece: conn.target.clone(),
                    source,
                })?;
            let base_world = &transforms[by_id[&conn.base]].1;
            let target_world = &transforms[by_id[&conn.target]].1;
            joints.push(ResolvedJoint {
                base: conn.base.clone(),
                target: conn.target.clone(),
                base_point: base_world.transform_point(&p_base),
                target_point: target_world.transform_point(&p_target),
                normal: base_world.transform_vector(&n_base),
            });
        }

        info!(
            pieces = transforms.len(),
            joints = joints.len(),
            "assembly resolved"
        );
        Ok(Self {
            transforms,
            by_id,
            joints,
            extents,
        })
    }

    pub fn world_transform(&self, id: &str) -> Option<&Transform> {
        self.by_id.get(id).map(|&i| &self.transforms[i].1)
    }

    /// (identity, world transform) pairs in model insertion order.
    pub fn pieces(&self) -> impl Iterator<Item = (&str, &Transform)> {
        self.transforms.iter().map(|(id, t)| (id.as_str(), t))
    }

    pub fn piece_count(&self) -> usize {
        self.transforms.len()
    }

    pub fn joints(&self) -> &[ResolvedJoint] {
        &self.joints
    }

    /// World axis-aligned extents of one piece's box.
    pub fn extents(&self, id: &str) -> Option<&BoundingBox> {
        self.by_id.get(id).map(|&i| &self.extents[i])
    }

    /// Union of all piece extents.
    pub fn bounds(&self) -> BoundingBox {
        self.extents
            .iter()
            .fold(BoundingBox::empty(), |acc, bb| acc.union(bb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use tenon_types::{Anchor, Category, Connection, Face, Offset, Piece, PoseRule};

    fn stacked_pair() -> Model {
        let mut m = Model::new();
        m.add_piece(Piece::new("a", Category::TwoByFour, 400.0)).unwrap();
        m.add_piece(Piece::new("b", Category::TwoByFour, 300.0)).unwrap();
        m.add_connection(Connection {
            base: "a".to_string(),
            target: "b".to_string(),
            base_anchor: Anchor::on_face(Face::Top, Offset::Center),
            target_anchor: Anchor::on_face(Face::Bottom, Offset::Center),
            pose: PoseRule {
                target_face: Face::Right,
                base_direction: Face::Right,
            },
        })
        .unwrap();
        m
    }

    #[test]
    fn test_extents_follow_transform() {
        let asm = resolve(&stacked_pair()).unwrap();
        let a = asm.extents("a").unwrap();
        assert_eq!(a.min, Point3d::new(0.0, 0.0, 0.0));
        assert_eq!(a.max, Point3d::new(89.0, 38.0, 400.0));
        let b = asm.extents("b").unwrap();
        assert_eq!(b.min.z, 400.0);
        assert_eq!(b.max.z, 700.0);
    }

    #[test]
    fn test_bounds_union() {
        let asm = resolve(&stacked_pair()).unwrap();
        let bounds = asm.bounds();
        assert_eq!(bounds.min.z, 0.0);
        assert_eq!(bounds.max.z, 700.0);
    }

    #[test]
    fn test_joint_normal_points_up_for_stack() {
        let asm = resolve(&stacked_pair()).unwrap();
        let joint = &asm.joints()[0];
        assert_eq!(joint.normal.to_array(), [0.0, 0.0, 1.0]);
        assert_eq!(joint.base_point, Point3d::new(44.5, 19.0, 400.0));
    }

    #[test]
    fn test_pieces_iterate_in_insertion_order() {
        let asm = resolve(&stacked_pair()).unwrap();
        let ids: Vec<&str> = asm.pieces().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
