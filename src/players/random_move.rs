//! Move one random piece to a random free tile.

use tracing::{debug, warn};

use super::policy::TurnPolicy;
use super::TurnPhase;
use crate::core::{GameState, PlayerId, Result};
use crate::grid::GridAddress;

/// Each turn: pick a random in-play piece and hop it onto a uniformly
/// random tile that is neither obstructed nor holding a friendly piece.
///
/// Candidates are enumerated up front, so a packed board is detected
/// instead of retried forever. With nothing to move or nowhere to go, the
/// player passes.
#[derive(Clone, Debug, Default)]
pub struct RandomMovePolicy;

impl RandomMovePolicy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Tiles a piece of `player` may move to.
    pub fn candidate_tiles(state: &GameState, player: PlayerId) -> Vec<GridAddress> {
        let pieces = state.pieces();
        state
            .board()
            .tiles()
            .filter(|tile| !tile.is_obstructed(pieces) && !tile.is_held_by(player, pieces))
            .map(|tile| tile.address())
            .collect()
    }
}

impl TurnPolicy for RandomMovePolicy {
    fn name(&self) -> &'static str {
        "random-move"
    }

    fn take_turn(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        let in_play = state.player(player)?.in_play().to_vec();
        let Some(&piece) = state.rng_mut().choose(&in_play) else {
            debug!(%player, "No pieces in play, passing");
            return state.end_turn(player);
        };

        let candidates = Self::candidate_tiles(state, player);
        let Some(&target) = state.rng_mut().choose(&candidates) else {
            warn!(%player, "No free tile to move to, passing");
            return state.end_turn(player);
        };

        state.move_in_play(player, piece, target)?;
        state.set_phase(player, TurnPhase::Movement)
    }
}
