//! Breadth-first pose resolution.
//!
//! Starting from a root piece at the identity transform, every connection
//! contributes a rigid anchor-to-anchor join transform; composing joins
//! along a connectivity path places every reachable piece. Connections are
//! traversed as undirected edges, but their declared (base, target)
//! direction decides which way the join composes.

use std::collections::VecDeque;

use slotmap::SecondaryMap;
use tracing::{debug, instrument};

use tenon_kernel::{anchor_point, boxgeom, BoxDims, Tolerance, Transform, Vec3};
use tenon_types::Connection;

use crate::assembly::Assembly;
use crate::model::{Model, PieceKey};
use crate::types::EngineError;

/// Resolve every piece's world transform, rooting the traversal at the
/// first piece inserted into the model.
pub fn resolve(model: &Model) -> Result<Assembly, EngineError> {
    let root = model.root().ok_or(EngineError::EmptyModel)?.to_string();
    resolve_with_root(model, &root)
}

/// Resolve with an explicit root piece, which receives the identity
/// transform.
#[instrument(skip(model), fields(pieces = model.piece_count()))]
pub fn resolve_with_root(model: &Model, root_id: &str) -> Result<Assembly, EngineError> {
    let root = model.key(root_id).ok_or_else(|| EngineError::UnknownPiece {
        id: root_id.to_string(),
    })?;
    let tolerance = Tolerance::default();

    let mut placed: SecondaryMap<PieceKey, Transform> = SecondaryMap::new();
    placed.insert(root, Transform::identity());

    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(key) = queue.pop_front() {
        for &ci in model.connections_of(key) {
            let conn = &model.connections()[ci];
            if conn.base == conn.target {
                return Err(EngineError::SelfLoop {
                    piece: conn.base.clone(),
                });
            }
            let base_key = model.key(&conn.base).expect("validated at insertion");
            let target_key = model.key(&conn.target).expect("validated at insertion");

            match (
                placed.get(base_key).copied(),
                placed.get(target_key).copied(),
            ) {
                (Some(base_world), None) => {
                    let join = join_transform(model, conn)?;
                    let world = base_world.then(&join);
                    debug!(piece = %conn.target, via = %conn.base, "placed piece");
                    placed.insert(target_key, world);
                    queue.push_back(target_key);
                }
                (None, Some(target_world)) => {
                    // Edge visited against its declared direction: invert
                    // the join so traversal order cannot change placement.
                    let join = join_transform(model, conn)?;
                    let world = target_world.then(&join.rigid_inverse());
                    debug!(piece = %conn.base, via = %conn.target, "placed piece (reverse)");
                    placed.insert(base_key, world);
                    queue.push_back(base_key);
                }
                (Some(base_world), Some(target_world)) => {
                    // Cycle in the undirected graph: the piece was already
                    // reached along another path. Recompute along this one
                    // and require agreement instead of overwriting.
                    let join = join_transform(model, conn)?;
                    let expected = base_world.then(&join);
                    let deviation = expected.max_deviation(&target_world);
                    if deviation > tolerance.coincidence {
                        return Err(EngineError::InconsistentCycle {
                            piece: conn.target.clone(),
                            base: conn.base.clone(),
                            target: conn.target.clone(),
                            deviation,
                        });
                    }
                }
                (None, None) => unreachable!("connection dequeued from an unplaced piece"),
            }
        }
    }

    let unplaced: Vec<String> = model
        .piece_keys()
        .filter(|k| !placed.contains_key(*k))
        .map(|k| model.piece(k).id.clone())
        .collect();
    if !unplaced.is_empty() {
        return Err(EngineError::Disconnected {
            root: root_id.to_string(),
            pieces: unplaced,
        });
    }

    Assembly::build(model, placed)
}

/// The rigid transform placing a connection's target piece in its base
/// piece's local frame.
///
/// The rotation maps the target anchor face normal onto the negated base
/// anchor face normal (faces pressed together) and the pose rule's target
/// face normal onto the designated base direction; both frames are exact
/// unit-axis triples, so the rotation entries are exactly -1, 0 or 1. The
/// translation then brings the rotated target anchor point onto the base
/// anchor point.
pub fn join_transform(model: &Model, conn: &Connection) -> Result<Transform, EngineError> {
    let base_piece = model
        .piece_by_id(&conn.base)
        .ok_or_else(|| EngineError::UnknownPiece {
            id: conn.base.clone(),
        })?;
    let target_piece = model
        .piece_by_id(&conn.target)
        .ok_or_else(|| EngineError::UnknownPiece {
            id: conn.target.clone(),
        })?;

    // The pose rule constrains a second, independent axis: a face parallel
    // to the anchor face (or a direction parallel to the base anchor
    // normal) would conflict with the pressed-together condition.
    if conn.pose.target_face.axis() == conn.target_anchor.face.axis() {
        return Err(EngineError::PoseRuleConflict {
            base: conn.base.clone(),
            target: conn.target.clone(),
            detail: format!(
                "target face {} is parallel to the target anchor face {}",
                conn.pose.target_face, conn.target_anchor.face
            ),
        });
    }
    if conn.pose.base_direction.axis() == conn.base_anchor.face.axis() {
        return Err(EngineError::PoseRuleConflict {
            base: conn.base.clone(),
            target: conn.target.clone(),
            detail: format!(
                "base direction {} is parallel to the base anchor face {}",
                conn.pose.base_direction, conn.base_anchor.face
            ),
        });
    }

    let (p_base, n_base) = anchor_point(&BoxDims::of(base_piece), &conn.base_anchor)
        .map_err(|source| EngineError::Geometry {
            piece: conn.base.clone(),
            source,
        })?;
    let (p_target, n_target) = anchor_point(&BoxDims::of(target_piece), &conn.target_anchor)
        .map_err(|source| EngineError::Geometry {
            piece: conn.target.clone(),
            source,
        })?;

    let d_base = boxgeom::face_normal(conn.pose.base_direction);
    let f_target = boxgeom::face_normal(conn.pose.target_face);

    // Orthonormal frames: target-local (n, f, n x f) must land on
    // base-local (-n_b, d_b, -n_b x d_b).
    let target_frame = Transform::from_frame(
        Vec3::ZERO,
        n_target,
        f_target,
        n_target.cross(&f_target),
    );
    let base_frame = Transform::from_frame(
        Vec3::ZERO,
        -n_base,
        d_base,
        (-n_base).cross(&d_base),
    );
    let rotation = base_frame.then(&target_frame.rigid_inverse());

    let rotated_anchor = rotation.transform_point(&p_target);
    let translation = p_base - rotated_anchor;
    Ok(Transform::from_frame(
        translation,
        rotation.basis(0),
        rotation.basis(1),
        rotation.basis(2),
    ))
}
