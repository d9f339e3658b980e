//! Turn policies.
//!
//! A policy decides what a player does with their turn. It drives the
//! shared turn engine in `GameState` and reports back by changing the
//! player's `TurnPhase`:
//!
//! - `take_turn` issues moves and usually enters `Movement`
//! - once the player's pieces settle in `Movement`, the session calls
//!   `on_movement_phase_complete`
//! - once they settle in `Deployment`, the session ends the turn
//!
//! Every hook must leave the player in a different phase or end the turn,
//! otherwise the session will call it again on the next tick.

use serde::{Deserialize, Serialize};

use super::human::HumanSwarmPolicy;
use super::random_move::RandomMovePolicy;
use super::swarm::SwarmPolicy;
use crate::core::{GameError, GameState, PlayerId, Result};
use crate::grid::GridAddress;

pub trait TurnPolicy: std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Prepare before the first turn. Defaults to pacing the whole pool
    /// onto the deployment zone, then signalling ready.
    fn set_up(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        state.begin_auto_deploy(player)
    }

    /// Act at the start of the player's turn.
    fn take_turn(&mut self, state: &mut GameState, player: PlayerId) -> Result<()>;

    /// Every piece moved this turn has settled.
    fn on_movement_phase_complete(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        state.end_turn(player)
    }

    /// Place pool pieces after movement. Defaults to deploying nothing.
    fn initiate_deployment(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        state.end_turn(player)
    }

    /// The host picked a tile while the player was awaiting a selection.
    fn on_tile_selected(&mut self, _state: &mut GameState, _player: PlayerId, _address: GridAddress) -> Result<()> {
        Ok(())
    }
}

/// Cardinal movement direction. `Up` is increasing row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, column) step for one tile in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The address `distance` tiles from `from` in this direction.
    #[must_use]
    pub fn step(self, from: GridAddress, distance: i32) -> GridAddress {
        let (rows, columns) = self.delta();
        from.offset(rows.saturating_mul(distance), columns.saturating_mul(distance))
    }
}

/// Serializable policy selection for configuration files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    RandomMove,
    Swarm {
        direction: Direction,
        #[serde(default = "default_range")]
        range: i32,
        #[serde(default = "default_deploys")]
        deploys_per_turn: usize,
    },
    HumanSwarm {
        direction: Direction,
        #[serde(default = "default_range")]
        range: i32,
        #[serde(default = "default_deploys")]
        deploys_per_turn: usize,
    },
}

fn default_range() -> i32 {
    1
}

fn default_deploys() -> usize {
    4
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            PolicyConfig::RandomMove => Ok(()),
            PolicyConfig::Swarm { range, .. } | PolicyConfig::HumanSwarm { range, .. } => {
                if *range < 1 {
                    return Err(GameError::config(format!("swarm range must be at least 1, got {range}")));
                }
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn build(&self) -> Box<dyn TurnPolicy> {
        match *self {
            PolicyConfig::RandomMove => Box::new(RandomMovePolicy::new()),
            PolicyConfig::Swarm {
                direction,
                range,
                deploys_per_turn,
            } => Box::new(SwarmPolicy::new(direction, range, deploys_per_turn)),
            PolicyConfig::HumanSwarm {
                direction,
                range,
                deploys_per_turn,
            } => Box::new(HumanSwarmPolicy::new(direction, range, deploys_per_turn)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_step() {
        let from = GridAddress::new(2, 2);
        assert_eq!(Direction::Up.step(from, 1), GridAddress::new(3, 2));
        assert_eq!(Direction::Down.step(from, 2), GridAddress::new(0, 2));
        assert_eq!(Direction::Left.step(from, 3), GridAddress::new(2, -1));
        assert_eq!(Direction::Right.step(from, 1), GridAddress::new(2, 3));
    }

    #[test]
    fn test_build_names() {
        assert_eq!(PolicyConfig::RandomMove.build().name(), "random-move");
        let swarm = PolicyConfig::Swarm {
            direction: Direction::Up,
            range: 1,
            deploys_per_turn: 2,
        };
        assert_eq!(swarm.build().name(), "swarm");
        let human = PolicyConfig::HumanSwarm {
            direction: Direction::Up,
            range: 1,
            deploys_per_turn: 2,
        };
        assert_eq!(human.build().name(), "human-swarm");
    }

    #[test]
    fn test_validate_range() {
        let bad = PolicyConfig::Swarm {
            direction: Direction::Left,
            range: 0,
            deploys_per_turn: 1,
        };
        assert!(matches!(bad.validate(), Err(GameError::InvalidConfig { .. })));
        assert!(PolicyConfig::RandomMove.validate().is_ok());
    }

    #[test]
    fn test_serde_defaults() {
        let config: PolicyConfig = serde_json::from_str(r#"{"kind":"swarm","direction":"down"}"#).unwrap();
        assert_eq!(
            config,
            PolicyConfig::Swarm {
                direction: Direction::Down,
                range: 1,
                deploys_per_turn: 4,
            }
        );
    }
}
