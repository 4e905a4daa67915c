use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A single rectangular length of lumber.
///
/// The cross section comes from the category; `length` is the cut length
/// along local Z, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Unique user-supplied identity within a model.
    pub id: String,
    pub category: Category,
    pub length: f64,
}

impl Piece {
    pub fn new(id: impl Into<String>, category: Category, length: f64) -> Self {
        Self {
            id: id.into(),
            category,
            length,
        }
    }

    /// Full local-frame box dimensions as (width, height, length).
    pub fn dims(&self) -> (f64, f64, f64) {
        let (w, h) = self.category.cross_section();
        (w, h, self.length)
    }
}
