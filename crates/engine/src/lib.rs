//! Connection model, pose resolver and assembly artifact.
//!
//! A [`Model`] owns the piece/connection graph and validates its
//! structure; [`resolve`] walks the graph breadth-first from a root piece
//! and assigns every piece a world transform; the result is an immutable
//! [`Assembly`].

pub mod assembly;
pub mod model;
pub mod resolve;
pub mod types;

pub use assembly::{Assembly, ResolvedJoint};
pub use model::{Model, PieceKey};
pub use resolve::{resolve, resolve_with_root};
pub use types::{EngineError, Issue};
