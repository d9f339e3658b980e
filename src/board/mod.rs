//! Board, tiles, and the host seams they build on.

mod board;
mod factory;
mod selection;
mod tile;

pub use board::Board;
pub use factory::{TileFactory, TileTemplates};
pub use selection::{SelectionMask, SelectionOverlay};
pub use tile::{Occupiers, Tile};
