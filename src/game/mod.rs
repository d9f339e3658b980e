//! Turn scheduling and the session that ties a game together.

mod coordinator;
mod session;
mod snapshot;

pub use coordinator::TurnCoordinator;
pub use session::{GameSession, SeatAssignment};
pub use snapshot::{GameSnapshot, PlayerSnapshot, TileOccupancy};
