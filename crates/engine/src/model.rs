use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tenon_types::{Connection, Piece};

use crate::types::{EngineError, Issue};

new_key_type! {
    /// Arena key for a piece in a model.
    pub struct PieceKey;
}

/// The user-level assembly graph: pieces keyed by identity plus directed
/// connections keyed by their ordered (base, target) pair.
///
/// Pieces live in an arena with a string-identity index on top; all
/// iteration is in insertion order so downstream resolution is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pieces: SlotMap<PieceKey, Piece>,
    index: HashMap<String, PieceKey>,
    order: Vec<PieceKey>,
    connections: Vec<Connection>,
    /// Connection indices touching each piece, in insertion order.
    adjacency: HashMap<PieceKey, Vec<usize>>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a piece. Fails on duplicate identity or non-positive length.
    pub fn add_piece(&mut self, piece: Piece) -> Result<PieceKey, EngineError> {
        if piece.length <= 0.0 {
            return Err(EngineError::NonPositiveLength {
                id: piece.id.clone(),
                length: piece.length,
            });
        }
        if self.index.contains_key(&piece.id) {
            return Err(EngineError::DuplicatePiece { id: piece.id });
        }
        let id = piece.id.clone();
        let key = self.pieces.insert(piece);
        self.index.insert(id, key);
        self.order.push(key);
        Ok(key)
    }

    /// Insert a connection. Fails if either end is unknown or the ordered
    /// (base, target) pair already carries a connection; a single joint
    /// fully constrains the target pose, so a second one could only
    /// conflict.
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), EngineError> {
        let base = self.key_of(&connection.base)?;
        let target = self.key_of(&connection.target)?;
        if self
            .connections
            .iter()
            .any(|c| c.base == connection.base && c.target == connection.target)
        {
            return Err(EngineError::DuplicateConnection {
                base: connection.base,
                target: connection.target,
            });
        }
        let idx = self.connections.len();
        self.connections.push(connection);
        self.adjacency.entry(base).or_default().push(idx);
        if target != base {
            self.adjacency.entry(target).or_default().push(idx);
        }
        Ok(())
    }

    fn key_of(&self, id: &str) -> Result<PieceKey, EngineError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownPiece { id: id.to_string() })
    }

    pub fn key(&self, id: &str) -> Option<PieceKey> {
        self.index.get(id).copied()
    }

    pub fn piece(&self, key: PieceKey) -> &Piece {
        &self.pieces[key]
    }

    pub fn piece_by_id(&self, id: &str) -> Option<&Piece> {
        self.key(id).map(|k| &self.pieces[k])
    }

    /// Pieces in insertion order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.order.iter().map(|&k| &self.pieces[k])
    }

    /// Piece keys in insertion order.
    pub fn piece_keys(&self) -> impl Iterator<Item = PieceKey> + '_ {
        self.order.iter().copied()
    }

    pub fn piece_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Indices into [`connections`](Self::connections) touching a piece.
    pub fn connections_of(&self, key: PieceKey) -> &[usize] {
        self.adjacency.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The default resolution root: the first piece inserted.
    pub fn root(&self) -> Option<&str> {
        self.order.first().map(|&k| self.pieces[k].id.as_str())
    }

    /// Check global graph invariants without mutating anything.
    ///
    /// Reports self-loops and disconnection (undirected reachability from
    /// the root) as distinct issue kinds. An empty vec means the model is
    /// ready for resolution.
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        for conn in &self.connections {
            if conn.base == conn.target {
                issues.push(Issue::SelfLoop {
                    piece: conn.base.clone(),
                });
            }
        }

        if let Some(&root) = self.order.first() {
            let unreachable = self.unreachable_from(root);
            if !unreachable.is_empty() {
                issues.push(Issue::Disconnected {
                    root: self.pieces[root].id.clone(),
                    pieces: unreachable,
                });
            }
        }

        issues
    }

    /// Identities of pieces not reachable from `root` over undirected
    /// connections, in insertion order.
    pub(crate) fn unreachable_from(&self, root: PieceKey) -> Vec<String> {
        let mut seen: std::collections::HashSet<PieceKey> = std::collections::HashSet::new();
        let mut queue = std::collections::VecDeque::new();
        seen.insert(root);
        queue.push_back(root);
        while let Some(key) = queue.pop_front() {
            for &ci in self.connections_of(key) {
                let conn = &self.connections[ci];
                for id in [&conn.base, &conn.target] {
                    let other = self.index[id.as_str()];
                    if seen.insert(other) {
                        queue.push_back(other);
                    }
                }
            }
        }
        self.order
            .iter()
            .filter(|k| !seen.contains(k))
            .map(|&k| self.pieces[k].id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenon_types::{Anchor, Category, Face, Offset, PoseRule};

    fn piece(id: &str) -> Piece {
        Piece::new(id, Category::TwoByFour, 400.0)
    }

    fn connection(base: &str, target: &str) -> Connection {
        Connection {
            base: base.to_string(),
            target: target.to_string(),
            base_anchor: Anchor::on_face(Face::Left, Offset::Center),
            target_anchor: Anchor::on_edge(Face::Front, Face::Left, Offset::FromMin { value: 0.0 }),
            pose: PoseRule {
                target_face: Face::Top,
                base_direction: Face::Top,
            },
        }
    }

    #[test]
    fn test_duplicate_piece_rejected() {
        let mut m = Model::new();
        m.add_piece(piece("a")).unwrap();
        assert!(matches!(
            m.add_piece(piece("a")),
            Err(EngineError::DuplicatePiece { .. })
        ));
    }

    #[test]
    fn test_non_positive_length_rejected() {
        let mut m = Model::new();
        assert!(matches!(
            m.add_piece(Piece::new("a", Category::TwoByFour, 0.0)),
            Err(EngineError::NonPositiveLength { .. })
        ));
    }

    #[test]
    fn test_unknown_piece_rejected() {
        let mut m = Model::new();
        m.add_piece(piece("a")).unwrap();
        assert!(matches!(
            m.add_connection(connection("a", "ghost")),
            Err(EngineError::UnknownPiece { .. })
        ));
    }

    #[test]
    fn test_duplicate_ordered_pair_rejected() {
        let mut m = Model::new();
        m.add_piece(piece("a")).unwrap();
        m.add_piece(piece("b")).unwrap();
        m.add_connection(connection("a", "b")).unwrap();
        assert!(matches!(
            m.add_connection(connection("a", "b")),
            Err(EngineError::DuplicateConnection { .. })
        ));
        // The reversed pair is a different key.
        assert!(m.add_connection(connection("b", "a")).is_ok());
    }

    #[test]
    fn test_validate_reports_self_loop() {
        let mut m = Model::new();
        m.add_piece(piece("a")).unwrap();
        m.add_connection(connection("a", "a")).unwrap();
        assert!(m
            .validate()
            .iter()
            .any(|i| matches!(i, Issue::SelfLoop { piece } if piece == "a")));
    }

    #[test]
    fn test_validate_reports_disconnection() {
        let mut m = Model::new();
        m.add_piece(piece("a")).unwrap();
        m.add_piece(piece("b")).unwrap();
        m.add_piece(piece("loner")).unwrap();
        m.add_connection(connection("a", "b")).unwrap();
        let issues = m.validate();
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            Issue::Disconnected { root, pieces } => {
                assert_eq!(root, "a");
                assert_eq!(pieces, &["loner".to_string()]);
            }
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_clean_model() {
        let mut m = Model::new();
        m.add_piece(piece("a")).unwrap();
        m.add_piece(piece("b")).unwrap();
        m.add_connection(connection("a", "b")).unwrap();
        assert!(m.validate().is_empty());
    }
}
