//! Round-robin turn scheduling.
//!
//! The coordinator knows nothing about boards or pieces. It holds an ordered
//! list of seats, some possibly vacant, and answers two questions: who goes
//! first once everyone is ready, and who goes next when a turn ends.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::PlayerId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCoordinator {
    seats: Vec<Option<PlayerId>>,
    current: Option<usize>,
    ready: FxHashSet<PlayerId>,
    started: bool,
}

impl TurnCoordinator {
    #[must_use]
    pub fn new(seats: Vec<Option<PlayerId>>) -> Self {
        Self {
            seats,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn seats(&self) -> &[Option<PlayerId>] {
        &self.seats
    }

    /// Assigned players in seat order.
    pub fn seated(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats.iter().flatten().copied()
    }

    #[must_use]
    pub fn seated_count(&self) -> usize {
        self.seated().count()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_ready(&self, player: PlayerId) -> bool {
        self.ready.contains(&player)
    }

    /// The player whose turn was issued last.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current.and_then(|seat| self.seats.get(seat).copied().flatten())
    }

    /// Record that `player` is ready.
    ///
    /// Returns the first player to act once every seated player is ready.
    pub fn player_ready(&mut self, player: PlayerId) -> Option<PlayerId> {
        if !self.seated().any(|p| p == player) {
            warn!(%player, "Ready signal from a player without a seat");
            return None;
        }
        if !self.ready.insert(player) {
            debug!(%player, "Duplicate ready signal");
        }
        if self.started || self.ready.len() < self.seated_count() {
            return None;
        }

        self.started = true;
        info!(players = self.ready.len(), "All players ready");
        self.advance()
    }

    /// Record that `player` ended their turn.
    ///
    /// Returns the next player to act. Signals from anyone but the current
    /// player are ignored.
    pub fn turn_ended(&mut self, player: PlayerId) -> Option<PlayerId> {
        if !self.started || self.current_player() != Some(player) {
            debug!(%player, "Ignoring turn end from a player not holding the turn");
            return None;
        }
        self.advance()
    }

    fn advance(&mut self) -> Option<PlayerId> {
        let count = self.seats.len();
        let start = self.current.map_or(0, |seat| seat + 1);
        for offset in 0..count {
            let seat = (start + offset) % count;
            if let Some(player) = self.seats[seat] {
                self.current = Some(seat);
                debug!(%player, seat, "Next turn");
                return Some(player);
            }
        }
        None
    }
}
