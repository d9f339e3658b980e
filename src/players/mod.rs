//! Players and the policies that play their turns.
//!
//! `Player` holds the bookkeeping shared by every kind of player. What a
//! player does on its turn is a `TurnPolicy`:
//!
//! - `RandomMovePolicy`: hop one random piece to a random free tile
//! - `SwarmPolicy`: march every piece one way, then deploy at random
//! - `HumanSwarmPolicy`: march like a swarm, deploy where the host clicks

mod human;
mod player;
mod policy;
mod random_move;
mod swarm;

pub use human::HumanSwarmPolicy;
pub use player::{AutoDeploy, Player, Transfer, TurnPhase};
pub use policy::{Direction, PolicyConfig, TurnPolicy};
pub use random_move::RandomMovePolicy;
pub use swarm::SwarmPolicy;
