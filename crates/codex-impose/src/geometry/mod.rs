//! Geometry primitives for imposition
//!
//! Everything the page model needs to reason about positions on paper:
//! - Unit-safe scalars (`Length`, `Angle`) and `Dimensions`
//! - Points and general-form lines, which yield mirror transforms
//! - 2D affine transforms

mod line;
mod transform;
mod units;

pub use line::*;
pub use transform::*;
pub use units::*;
