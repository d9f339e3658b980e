//! Knights versus zombies, the reference game for the engine.
//!
//! A two-seat game exercising every policy family:
//! - Knights auto-deploy on the bottom rows and move one random knight per
//!   turn to any free tile, capturing zombies they land on
//! - Zombies march down the board each turn and land reinforcements on the
//!   top row, either at random or where the host clicks
//!
//! Neither side can be eliminated for good. Captured pieces return to their
//! pool and may come back, so a game runs for as many turns as the host
//! wants.

mod game;

pub use game::ZombieGameBuilder;
