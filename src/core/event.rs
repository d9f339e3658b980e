//! Notifications raised while the game runs.
//!
//! `GameState` collects events in an outbox; the session drains it once per
//! tick, routes the turn signals to the coordinator and hands the rest to
//! the host.

use serde::{Deserialize, Serialize};

use super::{PieceId, PlayerId};
use crate::grid::GridAddress;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted { player: PlayerId },
    TurnEnded { player: PlayerId },
    /// The player finished setting up and can be scheduled.
    ReadyToPlay { player: PlayerId },
    /// Auto-deploy ran out of pieces or tiles.
    AllPiecesDeployed { player: PlayerId, deployed: usize },
    /// The player's last on-board piece left play.
    LastPieceRemovedFromPlay { player: PlayerId },
    NoMorePiecesMoving { player: PlayerId },
    MoveComplete { piece: PieceId, player: PlayerId },
    PieceCaptured {
        piece: PieceId,
        owner: PlayerId,
        by: PlayerId,
    },
    TileSelected { address: GridAddress },
}

impl GameEvent {
    /// The player the event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::TurnStarted { player }
            | GameEvent::TurnEnded { player }
            | GameEvent::ReadyToPlay { player }
            | GameEvent::AllPiecesDeployed { player, .. }
            | GameEvent::LastPieceRemovedFromPlay { player }
            | GameEvent::NoMorePiecesMoving { player }
            | GameEvent::MoveComplete { player, .. } => Some(*player),
            GameEvent::PieceCaptured { owner, .. } => Some(*owner),
            GameEvent::TileSelected { .. } => None,
        }
    }
}
