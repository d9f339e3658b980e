//! Pieces and their movement.

mod motion;
mod movement;
mod piece;

pub use motion::smooth_damp;
pub use movement::MovementStep;
pub use piece::Piece;
