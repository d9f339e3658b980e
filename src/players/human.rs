//! Swarm movement with deployments picked by a person.

use tracing::{debug, info};

use super::policy::{Direction, TurnPolicy};
use super::swarm::SwarmPolicy;
use super::TurnPhase;
use crate::core::{GameState, PlayerId, Result};
use crate::grid::GridAddress;

/// Moves like `SwarmPolicy`, but each deployment waits for the host to
/// select a tile through the board's selection overlay.
///
/// The overlay offers the free tiles of the deployment zone. Every pick
/// deploys one piece and switches that tile off. When the per-turn budget or
/// the pool runs out, the overlay is hidden and the turn ends once the new
/// pieces settle.
#[derive(Clone, Debug)]
pub struct HumanSwarmPolicy {
    swarm: SwarmPolicy,
    remaining: usize,
}

impl HumanSwarmPolicy {
    #[must_use]
    pub fn new(direction: Direction, range: i32, deploys_per_turn: usize) -> Self {
        Self {
            swarm: SwarmPolicy::new(direction, range, deploys_per_turn),
            remaining: 0,
        }
    }

    /// Deployments left this turn.
    #[must_use]
    pub fn remaining_deploys(&self) -> usize {
        self.remaining
    }

    fn finish_deployment(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        self.remaining = 0;
        state.board_mut().hide_selection_mask();
        state.set_phase(player, TurnPhase::Deployment)
    }
}

impl TurnPolicy for HumanSwarmPolicy {
    fn name(&self) -> &'static str {
        "human-swarm"
    }

    fn set_up(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        self.swarm.set_up(state, player)
    }

    fn take_turn(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        self.swarm.advance_swarm(state, player)
    }

    fn on_movement_phase_complete(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        self.initiate_deployment(state, player)
    }

    fn initiate_deployment(&mut self, state: &mut GameState, player: PlayerId) -> Result<()> {
        self.remaining = self.swarm.deploys_per_turn();
        let free = SwarmPolicy::free_deploy_tiles(state, player)?;
        if self.remaining == 0 || free.is_empty() || state.player(player)?.pool().is_empty() {
            debug!(%player, free = free.len(), "Nothing to deploy");
            return self.finish_deployment(state, player);
        }

        let board = state.board_mut();
        board.set_selection_mask(&free);
        board.show_selection_mask();
        info!(%player, free = free.len(), budget = self.remaining, "Awaiting deployment selection");
        state.set_phase(player, TurnPhase::AwaitingSelection)
    }

    fn on_tile_selected(&mut self, state: &mut GameState, player: PlayerId, address: GridAddress) -> Result<()> {
        if state.player(player)?.phase() != TurnPhase::AwaitingSelection {
            debug!(%player, %address, "Selection outside deployment, ignoring");
            return Ok(());
        }

        if state.move_to_play(player, address, None)?.is_some() {
            state.board_mut().toggle_selection_tile(address);
            self.remaining = self.remaining.saturating_sub(1);
        }

        let exhausted = self.remaining == 0
            || state.player(player)?.pool().is_empty()
            || state.board().selectable_addresses().is_empty();
        if exhausted {
            return self.finish_deployment(state, player);
        }
        Ok(())
    }
}
