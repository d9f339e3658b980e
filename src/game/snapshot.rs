//! Serializable capture of a running game.
//!
//! A snapshot records what a host needs to display or compare a game: board
//! occupancy, each player's collections and phase, whose turn it is, and the
//! RNG position. It does not capture in-flight movement queues.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRngState, GameState, PieceId, PlayerId, Result};
use crate::grid::GridAddress;
use crate::players::TurnPhase;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileOccupancy {
    pub address: GridAddress,
    pub occupiers: Vec<PieceId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub phase: TurnPhase,
    pub ready: bool,
    pub turns_completed: u32,
    pub pool: Vec<PieceId>,
    pub in_play: Vec<PieceId>,
    pub moving: Vec<PieceId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: i32,
    pub cols: i32,
    pub elapsed: f32,
    pub active_turn: Option<PlayerId>,
    pub rng: GameRngState,
    pub players: Vec<PlayerSnapshot>,
    /// Occupied tiles only, row-major.
    pub occupancy: Vec<TileOccupancy>,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let board = state.board();
        let players = state
            .players()
            .iter()
            .map(|(id, player)| PlayerSnapshot {
                id,
                name: player.name().to_string(),
                phase: player.phase(),
                ready: player.is_ready(),
                turns_completed: player.turns_completed(),
                pool: player.pool().to_vec(),
                in_play: player.in_play().to_vec(),
                moving: player.moving(),
            })
            .collect();
        let occupancy = board
            .tiles()
            .filter(|tile| tile.is_occupied())
            .map(|tile| TileOccupancy {
                address: tile.address(),
                occupiers: tile.occupiers().to_vec(),
            })
            .collect();

        Self {
            rows: board.rows(),
            cols: board.cols(),
            elapsed: state.elapsed(),
            active_turn: state.active_turn(),
            rng: state.rng().state(),
            players,
            occupancy,
        }
    }

    /// Occupiers of `address`, empty if the tile is free or off the board.
    #[must_use]
    pub fn occupiers_at(&self, address: GridAddress) -> &[PieceId] {
        self.occupancy
            .iter()
            .find(|entry| entry.address == address)
            .map(|entry| entry.occupiers.as_slice())
            .unwrap_or(&[])
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot {
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot {
            message: e.to_string(),
        })
    }
}
