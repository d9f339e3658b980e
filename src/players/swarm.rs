//! Directional swarm: everything marches one way, then reinforcements land.

use tracing::{debug, info};

use super::policy::{Direction, TurnPolicy};
use super::TurnPhase;
use crate::core::{GameState, PlayerId, Result};
use crate::grid::GridAddress;

/// Each turn, move every in-play piece `range` tiles in `direction`.
///
/// A piece whose destination is off the board is returned to the pool
/// instead. After the moves settle, up to `deploys_per_turn` pool pieces are
/// deployed onto random unobstructed, unoccupied tiles of the deployment
/// zone, and the turn ends once those settle.
#[derive(Clone, Debug)]
pub struct SwarmPolicy {
    direction: Direction,
    range: i32,
    deploys_per_turn: usize,
}

impl SwarmPolicy {
    #[must_use]
    pub fn new(direction: Direction, range: i32, deploys_per_turn: usize) -> Self {
        Self {
            direction,
            range,
            deploys_per_turn,
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn range(&self) -> i32 {
        self.range
    }

    #[must_use]
    pub fn deploys_per_turn(&self) -> usize {
        self.deploys_per_turn
    }

    /// Move every in-play piece and enter the movement phase.
    pub(crate) fn advance_swarm(&self, state: &mut GameState, player: PlayerId) -> Result<()> {
        let in_play = state.player(player)?.in_play().to_vec();
        let mut marched = 0;
        let mut retired = 0;

        for piece in in_play {
            let Some(from) = state.piece(piece)?.occupied_tile() else {
                debug!(%piece, "In-play piece has no tile yet, leaving it");
                continue;
            };
            let to = self.direction.step(from, self.range);
            if state.board().is_valid_address(to) {
                state.move_in_play(player, piece, to)?;
                marched += 1;
            } else {
                state.move_to_pool(player, piece)?;
                retired += 1;
            }
        }

        debug!(%player, marched, retired, direction = ?self.direction, "Swarm advanced");
        state.set_phase(player, TurnPhase::Movement)
    }

    /// Unobstructed, unoccupied cells of the player's deployment zone.
    pub(crate) fn free_deploy_tiles(state: &GameState, player: PlayerId) -> Result<Vec<GridAddress>> {
        state.tiles_in_deployment(player, true, true)
    }
}

impl TurnPolicy for SwarmPolicy {
    fn name(&self) -> &'static str {
        "swarm"
    }

    fn set_up(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        state.ready_up(player)
    }

    fn take_turn(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        self.advance_swarm(state, player)
    }

    fn on_movement_phase_complete(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        self.initiate_deployment(state, player)
    }

    fn initiate_deployment(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        let mut free = Self::free_deploy_tiles(state, player)?;
        let mut deployed = 0;

        while deployed < self.deploys_per_turn && !state.player(player)?.pool().is_empty() {
            let Some(index) = state.rng_mut().index(free.len()) else {
                break;
            };
            let address = free.swap_remove(index);
            if state.move_to_play(player, address, None)?.is_some() {
                deployed += 1;
            }
        }

        info!(%player, deployed, "Swarm deployment");
        state.set_phase(player, TurnPhase::Deployment)
    }
}
