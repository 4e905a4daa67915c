use tenon_kernel::GeometryError;

/// Errors from model construction and pose resolution.
///
/// Structural errors surface at insertion time; geometric and cyclic ones
/// at resolution time. None is ever silently corrected, and a failed
/// resolution produces no assembly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("piece '{id}' is already defined")]
    DuplicatePiece { id: String },

    #[error("piece '{id}' has non-positive length {length}mm")]
    NonPositiveLength { id: String, length: f64 },

    #[error("connection references unknown piece '{id}'")]
    UnknownPiece { id: String },

    #[error("connection {base} -> {target} is already defined")]
    DuplicateConnection { base: String, target: String },

    #[error("piece '{piece}' is connected to itself")]
    SelfLoop { piece: String },

    #[error("malformed geometry on piece '{piece}': {source}")]
    Geometry {
        piece: String,
        #[source]
        source: GeometryError,
    },

    #[error(
        "pose rule on connection {base} -> {target} conflicts with its anchors: {detail}"
    )]
    PoseRuleConflict {
        base: String,
        target: String,
        detail: String,
    },

    #[error("pieces unreachable from '{root}': {}", pieces.join(", "))]
    Disconnected { root: String, pieces: Vec<String> },

    #[error(
        "conflicting placements for piece '{piece}': the path through connection \
         {base} -> {target} deviates from the earlier placement by {deviation}mm"
    )]
    InconsistentCycle {
        piece: String,
        base: String,
        target: String,
        deviation: f64,
    },

    #[error("model contains no pieces")]
    EmptyModel,
}

/// A finding from [`Model::validate`](crate::Model::validate).
///
/// Disconnection and self-loops are distinct kinds so callers can message
/// them differently. Validation never mutates the graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Issue {
    #[error("piece '{piece}' is connected to itself")]
    SelfLoop { piece: String },

    #[error("pieces unreachable from '{root}': {}", pieces.join(", "))]
    Disconnected { root: String, pieces: Vec<String> },
}
