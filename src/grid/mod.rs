//! Grid coordinates and rectangles.
//!
//! Both types are immutable values with no knowledge of any board.

mod address;
mod range;

pub use address::GridAddress;
pub use range::GridRange;
