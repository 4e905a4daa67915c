pub mod category;
pub mod face;
pub mod joint;
pub mod piece;

pub use category::*;
pub use face::*;
pub use joint::*;
pub use piece::*;
