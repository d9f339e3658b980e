//! A running game: state, policies and coordinator driven by one tick.
//!
//! ## Tick order
//!
//! 1. `GameState::tick`: movement, tints, setup pacing
//! 2. phase advance for the player holding the turn
//! 3. drain events; `ReadyToPlay` and `TurnEnded` go to the coordinator,
//!    which may start the next turn
//!
//! Events raised while handling step 3 stay in the outbox until the next
//! tick, so one tick never runs more than one turn transition per signal.

use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument, warn};

use super::coordinator::TurnCoordinator;
use super::snapshot::GameSnapshot;
use crate::board::{Board, TileFactory};
use crate::core::{GameConfig, GameError, GameEvent, GameState, PlayerId, Result, Seat};
use crate::grid::GridAddress;
use crate::players::{TurnPhase, TurnPolicy};

/// A seated player and the policy that plays for them.
pub type SeatAssignment = Option<(PlayerId, Box<dyn TurnPolicy>)>;

#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    coordinator: TurnCoordinator,
    policies: FxHashMap<PlayerId, Box<dyn TurnPolicy>>,
    ticks: u64,
    started: bool,
}

impl GameSession {
    /// Build the board, add every seated player and build their policies.
    #[instrument(skip_all, fields(seed = config.seed, seats = config.seats.len()))]
    pub fn new(config: &GameConfig, factory: &mut dyn TileFactory) -> Result<Self> {
        config.validate()?;
        if config.seated_count() == 0 {
            return Err(GameError::NoPlayersAssigned);
        }

        let mut state = GameState::new(Board::new(&config.board), config.motion, config.seed);
        state.build_board(factory)?;

        let mut seats = Vec::with_capacity(config.seats.len());
        for seat in &config.seats {
            match seat {
                Seat::Vacant => seats.push(None),
                Seat::Occupied { player, policy } => {
                    let id = state.add_player(player)?;
                    seats.push(Some((id, policy.build())));
                }
            }
        }
        Self::from_parts(state, seats)
    }

    /// Wrap a prepared state. Every seated player must already exist in it.
    pub fn from_parts(state: GameState, seats: Vec<SeatAssignment>) -> Result<Self> {
        let mut order = Vec::with_capacity(seats.len());
        let mut policies = FxHashMap::default();
        for seat in seats {
            match seat {
                Some((player, policy)) => {
                    state.player(player)?;
                    order.push(Some(player));
                    policies.insert(player, policy);
                }
                None => order.push(None),
            }
        }
        if policies.is_empty() {
            return Err(GameError::NoPlayersAssigned);
        }

        Ok(Self {
            state,
            coordinator: TurnCoordinator::new(order),
            policies,
            ticks: 0,
            started: false,
        })
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn coordinator(&self) -> &TurnCoordinator {
        &self.coordinator
    }

    #[must_use]
    pub fn policy(&self, player: PlayerId) -> Option<&dyn TurnPolicy> {
        self.policies.get(&player).map(|policy| policy.as_ref())
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state)
    }

    /// Run every seated player's setup, in seat order.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            warn!("Session already started");
            return Ok(());
        }
        let seated: Vec<_> = self.coordinator.seated().collect();
        for player in seated {
            let policy = self
                .policies
                .get_mut(&player)
                .ok_or(GameError::UnknownPlayer { player })?;
            debug!(%player, policy = policy.name(), "Setting up");
            policy.set_up(&mut self.state, player)?;
        }
        self.started = true;
        info!(players = self.policies.len(), "Session started");
        Ok(())
    }

    /// Advance the game by `dt` seconds and return the events raised.
    pub fn tick(&mut self, dt: f32) -> Result<Vec<GameEvent>> {
        self.state.tick(dt)?;
        self.advance_phases()?;

        let events = self.state.drain_events();
        for event in &events {
            match *event {
                GameEvent::ReadyToPlay { player } => {
                    if let Some(next) = self.coordinator.player_ready(player) {
                        self.begin_turn(next)?;
                    }
                }
                GameEvent::TurnEnded { player } => {
                    if let Some(next) = self.coordinator.turn_ended(player) {
                        self.begin_turn(next)?;
                    }
                }
                _ => {}
            }
        }

        self.ticks += 1;
        Ok(events)
    }

    /// Tick until `done` returns true, up to `max_ticks`.
    ///
    /// `done` sees the session and the events of the tick just run. Returns
    /// the session's tick count when it finished, or `None` at the limit.
    pub fn run_until<F>(&mut self, dt: f32, max_ticks: u64, mut done: F) -> Result<Option<u64>>
    where
        F: FnMut(&GameSession, &[GameEvent]) -> bool,
    {
        for _ in 0..max_ticks {
            let events = self.tick(dt)?;
            if done(self, &events) {
                return Ok(Some(self.ticks));
            }
        }
        Ok(None)
    }

    /// Forward a click on `address` through the selection overlay.
    ///
    /// Returns whether the overlay accepted it. An accepted selection is
    /// passed to the player holding the turn if they are awaiting one.
    pub fn select_tile(&mut self, address: GridAddress) -> Result<bool> {
        let Some(selected) = self.state.board().select(address) else {
            return Ok(false);
        };
        self.state.emit(GameEvent::TileSelected { address: selected });

        let Some(active) = self.state.active_turn() else {
            return Ok(true);
        };
        if self.state.player(active)?.phase() == TurnPhase::AwaitingSelection {
            if let Some(policy) = self.policies.get_mut(&active) {
                policy.on_tile_selected(&mut self.state, active, selected)?;
            }
        }
        Ok(true)
    }

    fn begin_turn(&mut self, player: PlayerId) -> Result<()> {
        self.state.start_turn(player)?;
        let policy = self
            .policies
            .get_mut(&player)
            .ok_or(GameError::UnknownPlayer { player })?;
        debug!(%player, policy = policy.name(), "Taking turn");
        policy.take_turn(&mut self.state, player)
    }

    fn advance_phases(&mut self) -> Result<()> {
        let Some(active) = self.state.active_turn() else {
            return Ok(());
        };
        let player = self.state.player(active)?;
        if !player.is_settled() {
            return Ok(());
        }

        match player.phase() {
            TurnPhase::Movement => {
                let policy = self
                    .policies
                    .get_mut(&active)
                    .ok_or(GameError::UnknownPlayer { player: active })?;
                policy.on_movement_phase_complete(&mut self.state, active)
            }
            TurnPhase::Deployment => self.state.end_turn(active),
            _ => Ok(()),
        }
    }
}
