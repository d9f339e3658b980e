//! Per-player bookkeeping.
//!
//! ## Collections
//!
//! Every piece a player owns is, once settled, in exactly one of:
//! - `pool`: off the board, available to deploy
//! - `in_play`: on the board
//!
//! While a piece is travelling between the two it is in neither, and is
//! tracked only in `moving` with the transfer that will place it on arrival.
//! A piece moving from tile to tile stays in `in_play` and is tracked in
//! `moving` as well.
//!
//! ## Phases
//!
//! `TurnPhase` replaces one-shot "no more pieces moving" listeners. The
//! session checks the active player's phase once per tick and advances it
//! when the player's pieces have settled.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{PieceId, PlayerConfig, PlayerId, Tint, Vec3};
use crate::grid::GridRange;

/// Where a moving piece ends up when it arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transfer {
    ToPool,
    ToPlay,
    InPlay,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Not this player's turn.
    #[default]
    Idle,
    /// Placing the starting pieces before the first turn.
    SettingUp,
    /// Turn started, policy deciding.
    Acting,
    /// Waiting for this turn's moves to settle.
    Movement,
    /// Waiting for this turn's deployments to settle.
    Deployment,
    /// Waiting for the host to pick a tile.
    AwaitingSelection,
}

/// Progress of the paced setup deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoDeploy {
    /// Next cell of the deployment zone to try, row-major.
    pub cursor: u64,
    /// Seconds until the next placement.
    pub cooldown: f32,
    /// Seconds left before signalling ready, once placement is done.
    pub settle: Option<f32>,
    pub placed: usize,
}

#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    tint: Tint,
    pool: Vec<PieceId>,
    in_play: Vec<PieceId>,
    moving: FxHashMap<PieceId, Transfer>,
    deploy_area: GridRange,
    pool_position: Vec3,
    deploy_interval: f32,
    ready_delay: f32,
    phase: TurnPhase,
    ready: bool,
    turns_completed: u32,
    auto_deploy: Option<AutoDeploy>,
}

impl Player {
    /// Create a player with an empty pool.
    ///
    /// `deploy_area` must already be clipped to the board.
    #[must_use]
    pub fn new(id: PlayerId, config: &PlayerConfig, deploy_area: GridRange) -> Self {
        Self {
            id,
            name: config.name.clone(),
            tint: config.tint,
            pool: Vec::new(),
            in_play: Vec::new(),
            moving: FxHashMap::default(),
            deploy_area,
            pool_position: config.pool_position,
            deploy_interval: config.deploy_interval,
            ready_delay: config.ready_delay,
            phase: TurnPhase::Idle,
            ready: false,
            turns_completed: 0,
            auto_deploy: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tint(&self) -> Tint {
        self.tint
    }

    #[must_use]
    pub fn pool(&self) -> &[PieceId] {
        &self.pool
    }

    #[must_use]
    pub fn in_play(&self) -> &[PieceId] {
        &self.in_play
    }

    /// Pieces currently in flight, sorted by id.
    #[must_use]
    pub fn moving(&self) -> Vec<PieceId> {
        let mut ids: Vec<_> = self.moving.keys().copied().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn transfer_of(&self, piece: PieceId) -> Option<Transfer> {
        self.moving.get(&piece).copied()
    }

    #[must_use]
    pub fn is_in_play(&self, piece: PieceId) -> bool {
        self.in_play.contains(&piece)
    }

    #[must_use]
    pub fn is_in_pool(&self, piece: PieceId) -> bool {
        self.pool.contains(&piece)
    }

    /// True when none of this player's pieces are in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.moving.is_empty()
    }

    #[must_use]
    pub fn deploy_area(&self) -> GridRange {
        self.deploy_area
    }

    #[must_use]
    pub fn pool_position(&self) -> Vec3 {
        self.pool_position
    }

    #[must_use]
    pub fn deploy_interval(&self) -> f32 {
        self.deploy_interval
    }

    #[must_use]
    pub fn ready_delay(&self) -> f32 {
        self.ready_delay
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn turns_completed(&self) -> u32 {
        self.turns_completed
    }

    #[must_use]
    pub fn auto_deploy(&self) -> Option<&AutoDeploy> {
        self.auto_deploy.as_ref()
    }

    // === Mutation, driven by GameState ===

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub(crate) fn complete_turn(&mut self) {
        self.turns_completed += 1;
    }

    pub(crate) fn add_to_pool(&mut self, piece: PieceId) {
        self.pool.push(piece);
    }

    pub(crate) fn add_to_play(&mut self, piece: PieceId) {
        self.in_play.push(piece);
    }

    /// Take a piece out of the pool. `None` takes the most recently added.
    pub(crate) fn take_from_pool(&mut self, index: Option<usize>) -> Option<PieceId> {
        let index = match index {
            Some(index) => index,
            None => self.pool.len().checked_sub(1)?,
        };
        (index < self.pool.len()).then(|| self.pool.remove(index))
    }

    pub(crate) fn remove_from_play(&mut self, piece: PieceId) -> bool {
        match self.in_play.iter().position(|&p| p == piece) {
            Some(index) => {
                self.in_play.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn track(&mut self, piece: PieceId, transfer: Transfer) {
        self.moving.insert(piece, transfer);
    }

    pub(crate) fn untrack(&mut self, piece: PieceId) -> Option<Transfer> {
        self.moving.remove(&piece)
    }

    pub(crate) fn take_auto_deploy(&mut self) -> Option<AutoDeploy> {
        self.auto_deploy.take()
    }

    pub(crate) fn set_auto_deploy(&mut self, run: Option<AutoDeploy>) {
        self.auto_deploy = run;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
