//! Engine error type.
//!
//! Hard failures (bad configuration, broken preconditions) come back as a
//! `GameError`. Soft failures, such as asking to deploy from an empty pool,
//! are logged and reported as `Ok(None)` or `Ok(false)` by the operation
//! itself.

use derive_more::{Display, Error};

use super::{PieceId, PlayerId};
use crate::grid::GridAddress;

/// Errors raised by board, piece and player operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Board extents below one.
    #[display("invalid board dimensions {rows}x{cols}")]
    InvalidDimension { rows: i32, cols: i32 },

    /// A tile or occupier index outside its collection.
    #[display("{what} index {index} out of range 0..{bound}")]
    IndexOutOfRange {
        what: &'static str,
        index: i64,
        bound: i64,
    },

    /// Deployment rectangle does not cover any board cell.
    #[display("deployment area {first}..{second} has no cells on the board")]
    InvalidDeployArea {
        first: GridAddress,
        second: GridAddress,
    },

    #[display("{piece} is not in play for {player}")]
    NotInPlay { piece: PieceId, player: PlayerId },

    #[display("no board has been built")]
    NoBoardFound,

    #[display("player {player} starts with pieces but has no default piece")]
    NoDefaultPiece { player: String },

    #[display("tile factory has no tile templates")]
    NoTilesConfigured,

    #[display("unknown piece {piece}")]
    UnknownPiece { piece: PieceId },

    #[display("unknown player {player}")]
    UnknownPlayer { player: PlayerId },

    #[display("{piece} is not owned by {player}")]
    PieceNotOwned { piece: PieceId, player: PlayerId },

    #[display("no seat has a player assigned")]
    NoPlayersAssigned,

    #[display("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[display("snapshot error: {message}")]
    Snapshot { message: String },
}

impl GameError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
