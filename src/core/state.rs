//! Game state: board, pieces, players, and everything that moves them.
//!
//! ## Ownership
//!
//! `GameState` owns the board, the piece arena and the players. Tiles and
//! players refer to pieces by `PieceId`, which indexes the arena. All
//! mutation goes through the methods here, which keep three views in
//! agreement: a piece's occupied tile, tile occupier lists, and the player
//! collections.
//!
//! ## Ticking
//!
//! `tick(dt)` advances every piece's movement queue and tint in id order,
//! applies occupation and completion when steps arrive, then advances any
//! player still setting up. Notifications land in an event outbox that the
//! session drains once per tick.

use smallvec::SmallVec;
use tracing::{debug, info, instrument, trace, warn};

use super::config::{MotionConfig, PlayerConfig};
use super::entity::PieceId;
use super::error::{GameError, Result};
use super::event::GameEvent;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use super::vector::Vec3;
use crate::board::{Board, TileFactory};
use crate::grid::{GridAddress, GridRange};
use crate::pieces::{MovementStep, Piece};
use crate::players::{AutoDeploy, Player, Transfer, TurnPhase};
use crate::rules::{CaptureOpponents, Interaction, InteractionRule};

#[derive(Debug)]
pub struct GameState {
    board: Board,
    pieces: Vec<Piece>,
    players: PlayerMap<Player>,
    motion: MotionConfig,
    rules: Box<dyn InteractionRule>,
    active_turn: Option<PlayerId>,
    events: Vec<GameEvent>,
    rng: GameRng,
    elapsed: f32,
}

impl GameState {
    /// Create a state around an unbuilt board, capturing opponents on contact.
    #[must_use]
    pub fn new(board: Board, motion: MotionConfig, seed: u64) -> Self {
        Self {
            board,
            pieces: Vec::new(),
            players: PlayerMap::new(),
            motion,
            rules: Box::new(CaptureOpponents),
            active_turn: None,
            events: Vec::new(),
            rng: GameRng::new(seed),
            elapsed: 0.0,
        }
    }

    /// Replace the interaction rule.
    #[must_use]
    pub fn with_rules(mut self, rules: Box<dyn InteractionRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn build_board(&mut self, factory: &mut dyn TileFactory) -> Result<bool> {
        self.board.build(factory)
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, piece: PieceId) -> Result<&Piece> {
        self.pieces
            .get(piece.index())
            .ok_or(GameError::UnknownPiece { piece })
    }

    pub fn piece_mut(&mut self, piece: PieceId) -> Result<&mut Piece> {
        self.pieces
            .get_mut(piece.index())
            .ok_or(GameError::UnknownPiece { piece })
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    pub fn player(&self, player: PlayerId) -> Result<&Player> {
        self.players
            .get(player)
            .ok_or(GameError::UnknownPlayer { player })
    }

    fn player_mut(&mut self, player: PlayerId) -> Result<&mut Player> {
        self.players
            .get_mut(player)
            .ok_or(GameError::UnknownPlayer { player })
    }

    #[must_use]
    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    #[must_use]
    pub fn rules(&self) -> &dyn InteractionRule {
        self.rules.as_ref()
    }

    /// Whose turn it is. At most one player holds the turn.
    #[must_use]
    pub fn active_turn(&self) -> Option<PlayerId> {
        self.active_turn
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Seconds simulated so far.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// True when no piece has queued movement.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pieces.iter().all(|p| !p.is_moving())
    }

    // === Events ===

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        trace!(?event, "Event");
        self.events.push(event);
    }

    // === Players ===

    /// Add a player and fill their pool.
    ///
    /// The configured deployment rectangle is clipped to the board. A
    /// rectangle with no cell on the board is an `InvalidDeployArea`.
    #[instrument(skip(self, config), fields(player = %config.name))]
    pub fn add_player(&mut self, config: &PlayerConfig) -> Result<PlayerId> {
        if !self.board.is_built() {
            return Err(GameError::NoBoardFound);
        }
        let template = match (&config.default_piece, config.starting_pieces) {
            (Some(template), _) => Some(template.clone()),
            (None, 0) => None,
            (None, _) => {
                return Err(GameError::NoDefaultPiece {
                    player: config.name.clone(),
                })
            }
        };

        let requested = GridRange::new(config.deploy_from, config.deploy_to);
        let deploy_area = requested
            .intersect(&self.board.bounds())
            .ok_or(GameError::InvalidDeployArea {
                first: config.deploy_from,
                second: config.deploy_to,
            })?;
        if deploy_area != requested {
            debug!(%requested, clipped = %deploy_area, "Deployment area clipped to board");
        }

        let id = self
            .players
            .next_id()
            .ok_or_else(|| GameError::config("too many players"))?;
        let mut player = Player::new(id, config, deploy_area);

        if let Some(template) = template {
            for _ in 0..config.starting_pieces {
                let piece_id = PieceId::new(self.pieces.len() as u32);
                let mut piece = Piece::new(piece_id, id, &template, config.pool_position);
                piece.change_colour(config.tint);
                self.pieces.push(piece);
                player.add_to_pool(piece_id);
            }
        }

        info!(%id, pool = player.pool().len(), area = %deploy_area, "Player added");
        self.players.push(player);
        Ok(id)
    }

    // === Occupation ===

    /// Make `piece` occupy the tile at `address`, then resolve interactions.
    ///
    /// The piece leaves its previous tile first, so it never occupies two.
    pub fn occupy_tile(&mut self, piece: PieceId, address: GridAddress) -> Result<()> {
        self.piece(piece)?;
        self.board.tile(address)?;

        self.vacate(piece)?;
        self.board.tile_mut(address)?.add_occupier(piece);
        self.piece_mut(piece)?.set_occupied(Some(address));
        trace!(%piece, %address, "Tile occupied");

        self.interact_on_tile(piece, address)
    }

    /// Remove `piece` from whatever tile it occupies.
    pub fn vacate(&mut self, piece: PieceId) -> Result<Option<GridAddress>> {
        let Some(address) = self.piece(piece)?.occupied_tile() else {
            return Ok(None);
        };
        self.board.tile_mut(address)?.remove_occupier(piece);
        self.piece_mut(piece)?.set_occupied(None);
        Ok(Some(address))
    }

    fn interact_on_tile(&mut self, mover: PieceId, address: GridAddress) -> Result<()> {
        let others: SmallVec<[PieceId; 4]> = self
            .board
            .tile(address)?
            .occupiers()
            .iter()
            .copied()
            .filter(|&other| other != mover)
            .collect();

        for other in others {
            // An earlier capture may already have moved this occupant on.
            if !self.board.tile(address)?.contains(other) {
                continue;
            }
            let occupant = self.piece(other)?;
            let arriving = self.piece(mover)?;
            if self.rules.resolve(occupant, arriving) == Interaction::Capture {
                let owner = occupant.owner();
                let by = arriving.owner();
                info!(piece = %other, %owner, %by, %address, "Piece captured");
                self.emit(GameEvent::PieceCaptured {
                    piece: other,
                    owner,
                    by,
                });
                if let Err(err) = self.move_to_pool(owner, other) {
                    warn!(%err, piece = %other, "Captured piece could not return to pool");
                }
            }
        }
        Ok(())
    }

    // === Piece movement ===

    /// Queue a hop onto the tile at `address`.
    ///
    /// The piece vacates now and lifts, travels above the destination, then
    /// settles onto it. Occupation and completion happen on the final step.
    pub fn move_piece_to_tile(&mut self, piece: PieceId, address: GridAddress) -> Result<()> {
        let destination = self.board.tile(address)?.position();
        self.piece(piece)?;
        self.vacate(piece)?;

        let motion = self.motion;
        let piece = self.piece_mut(piece)?;
        let current = piece.position();
        piece.enqueue(MovementStep::new(
            current + motion.lift,
            motion.lift_smooth_time,
            motion.lift_max_speed,
        ));
        piece.enqueue(MovementStep::new(
            destination + motion.lift,
            motion.move_smooth_time,
            motion.move_max_speed,
        ));
        piece.enqueue(
            MovementStep::new(destination, motion.lift_smooth_time, motion.lift_max_speed)
                .occupying(address)
                .notifying(),
        );
        Ok(())
    }

    /// Queue a single move to `position` off the board.
    ///
    /// With `interrupt`, any queued movement is dropped first, so the piece
    /// heads there immediately.
    pub fn move_piece_off_board(&mut self, piece: PieceId, position: Vec3, interrupt: bool) -> Result<()> {
        self.vacate(piece)?;
        let motion = self.motion;
        let piece = self.piece_mut(piece)?;
        if interrupt {
            let dropped = piece.cancel_movement();
            if dropped > 0 {
                debug!(piece = %piece.id(), dropped, "Movement interrupted");
            }
        }
        piece.enqueue(
            MovementStep::new(position, motion.move_smooth_time, motion.move_max_speed).notifying(),
        );
        Ok(())
    }

    // === Transfers ===

    /// Send an in-play piece back to its owner's pool.
    ///
    /// The piece leaves in-play immediately and joins the pool on arrival.
    /// Emits `LastPieceRemovedFromPlay` as soon as in-play becomes empty.
    pub fn move_to_pool(&mut self, player: PlayerId, piece: PieceId) -> Result<()> {
        if self.piece(piece)?.owner() != player {
            return Err(GameError::PieceNotOwned { piece, player });
        }
        let owner = self.player_mut(player)?;
        if !owner.remove_from_play(piece) {
            return Err(GameError::NotInPlay { piece, player });
        }
        owner.track(piece, Transfer::ToPool);
        let emptied = owner.in_play().is_empty();
        let destination = owner.pool_position();

        self.move_piece_off_board(piece, destination, true)?;
        if emptied {
            info!(%player, "Last piece removed from play");
            self.emit(GameEvent::LastPieceRemovedFromPlay { player });
        }
        Ok(())
    }

    /// Deploy a pool piece onto the tile at `address`.
    ///
    /// `at_index` picks from the pool; `None` takes the most recently added
    /// piece. An invalid address, an empty pool or a bad index is logged
    /// and returns `Ok(None)`.
    pub fn move_to_play(
        &mut self,
        player: PlayerId,
        address: GridAddress,
        at_index: Option<usize>,
    ) -> Result<Option<PieceId>> {
        if !self.board.is_valid_address(address) {
            warn!(%player, %address, "Cannot deploy to an invalid tile");
            return Ok(None);
        }
        let owner = self.player_mut(player)?;
        if owner.pool().is_empty() {
            warn!(%player, "Cannot deploy from an empty pool");
            return Ok(None);
        }
        let Some(piece) = owner.take_from_pool(at_index) else {
            warn!(%player, index = ?at_index, pool = owner.pool().len(), "Pool index out of range");
            return Ok(None);
        };
        owner.track(piece, Transfer::ToPlay);

        self.move_piece_to_tile(piece, address)?;
        debug!(%player, %piece, %address, "Deploying piece");
        Ok(Some(piece))
    }

    /// Move an in-play piece to another tile.
    ///
    /// Fails with `NotInPlay`, changing nothing, if the piece is not in
    /// the player's in-play set.
    pub fn move_in_play(&mut self, player: PlayerId, piece: PieceId, address: GridAddress) -> Result<()> {
        if !self.player(player)?.is_in_play(piece) {
            return Err(GameError::NotInPlay { piece, player });
        }
        self.board.tile(address)?;

        self.player_mut(player)?.track(piece, Transfer::InPlay);
        self.move_piece_to_tile(piece, address)?;
        debug!(%player, %piece, %address, "Moving piece");
        Ok(())
    }

    /// Apply a notifying step's arrival to the owner's collections.
    fn complete_move(&mut self, piece: PieceId) -> Result<()> {
        let owner_id = self.piece(piece)?.owner();
        let owner = self.player_mut(owner_id)?;
        let Some(transfer) = owner.untrack(piece) else {
            debug!(%piece, "Untracked piece arrived");
            return Ok(());
        };
        match transfer {
            Transfer::ToPool => owner.add_to_pool(piece),
            Transfer::ToPlay => owner.add_to_play(piece),
            Transfer::InPlay => {}
        }
        let settled = owner.is_settled();

        self.piece_mut(piece)?.record_move();
        self.emit(GameEvent::MoveComplete {
            piece,
            player: owner_id,
        });
        if settled {
            self.emit(GameEvent::NoMorePiecesMoving { player: owner_id });
        }
        Ok(())
    }

    // === Simulation ===

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        self.elapsed += dt;
        let epsilon = self.motion.arrival_epsilon;

        for index in 0..self.pieces.len() {
            let id = PieceId::new(index as u32);
            self.pieces[index].advance_tint(dt);
            while let Some(step) = self.pieces[index].advance_motion(dt, epsilon) {
                if step.occupy_on_arrival {
                    if let Some(address) = step.tile {
                        self.occupy_tile(id, address)?;
                    }
                }
                if step.notify_on_arrival {
                    self.complete_move(id)?;
                }
            }
        }

        let setting_up: SmallVec<[PlayerId; 4]> = self
            .players
            .iter()
            .filter(|(_, p)| p.phase() == TurnPhase::SettingUp)
            .map(|(id, _)| id)
            .collect();
        for player in setting_up {
            self.advance_setup(player, dt)?;
        }
        Ok(())
    }

    /// Tick until every piece has stopped, up to `max_ticks`.
    ///
    /// Returns the number of ticks run, or `None` if pieces were still
    /// moving at the limit.
    pub fn run_until_settled(&mut self, dt: f32, max_ticks: usize) -> Result<Option<usize>> {
        for ticks in 0..max_ticks {
            if self.is_settled() {
                return Ok(Some(ticks));
            }
            self.tick(dt)?;
        }
        Ok(self.is_settled().then_some(max_ticks))
    }

    // === Setup ===

    /// Start the paced placement of the player's pool across their zone.
    pub fn begin_auto_deploy(&mut self, player: PlayerId) -> Result<()> {
        let owner = self.player_mut(player)?;
        owner.set_phase(TurnPhase::SettingUp);
        owner.set_auto_deploy(Some(AutoDeploy::default()));
        info!(%player, area = %owner.deploy_area(), pool = owner.pool().len(), "Auto-deploy started");
        Ok(())
    }

    fn advance_setup(&mut self, player: PlayerId, dt: f32) -> Result<()> {
        let owner = self.player_mut(player)?;
        let Some(mut run) = owner.take_auto_deploy() else {
            return Ok(());
        };
        let area = owner.deploy_area();
        let interval = owner.deploy_interval();
        let ready_delay = owner.ready_delay();

        match run.settle {
            None => {
                run.cooldown -= dt;
                while run.cooldown <= 0.0 {
                    let next = area.address_at(run.cursor);
                    let pool_empty = self.player(player)?.pool().is_empty();
                    let Some(address) = next.filter(|_| !pool_empty) else {
                        debug!(%player, placed = run.placed, "Auto-deploy exhausted");
                        run.settle = Some(ready_delay);
                        break;
                    };
                    run.cursor += 1;
                    if !self.board.is_valid_address(address) {
                        continue;
                    }
                    if self.move_to_play(player, address, None)?.is_some() {
                        run.placed += 1;
                    }
                    run.cooldown += interval;
                }
            }
            Some(remaining) => {
                let remaining = remaining - dt;
                if remaining <= 0.0 && self.player(player)?.is_settled() {
                    info!(%player, deployed = run.placed, "All pieces deployed");
                    self.emit(GameEvent::AllPiecesDeployed {
                        player,
                        deployed: run.placed,
                    });
                    return self.ready_up(player);
                }
                run.settle = Some(remaining);
            }
        }

        self.player_mut(player)?.set_auto_deploy(Some(run));
        Ok(())
    }

    /// Mark the player ready to be scheduled.
    pub fn ready_up(&mut self, player: PlayerId) -> Result<()> {
        let owner = self.player_mut(player)?;
        owner.set_auto_deploy(None);
        owner.set_phase(TurnPhase::Idle);
        owner.mark_ready();
        info!(%player, "Ready to play");
        self.emit(GameEvent::ReadyToPlay { player });
        Ok(())
    }

    // === Turns ===

    /// Give `player` the turn.
    ///
    /// Whoever held it before is made to end their turn first.
    pub fn start_turn(&mut self, player: PlayerId) -> Result<()> {
        self.player(player)?;
        if let Some(previous) = self.active_turn {
            if previous != player {
                warn!(%previous, next = %player, "Forcing previous turn to end");
                self.end_turn(previous)?;
            }
        }
        self.active_turn = Some(player);
        self.player_mut(player)?.set_phase(TurnPhase::Acting);
        info!(%player, "Turn started");
        self.emit(GameEvent::TurnStarted { player });
        Ok(())
    }

    /// End `player`'s turn. Does nothing if they do not hold it.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<()> {
        if self.active_turn != Some(player) {
            debug!(%player, "Ignoring end of turn from a player without the turn");
            return Ok(());
        }
        let owner = self.player_mut(player)?;
        owner.set_phase(TurnPhase::Idle);
        owner.complete_turn();
        self.active_turn = None;
        info!(%player, "Turn ended");
        self.emit(GameEvent::TurnEnded { player });
        Ok(())
    }

    pub fn set_phase(&mut self, player: PlayerId, phase: TurnPhase) -> Result<()> {
        let owner = self.player_mut(player)?;
        trace!(%player, from = ?owner.phase(), to = ?phase, "Phase change");
        owner.set_phase(phase);
        Ok(())
    }

    // === Queries ===

    /// Cells of the player's deployment zone, optionally skipping obstructed
    /// or occupied tiles.
    pub fn tiles_in_deployment(
        &self,
        player: PlayerId,
        exclude_obstructed: bool,
        exclude_occupied: bool,
    ) -> Result<Vec<GridAddress>> {
        let area = self.player(player)?.deploy_area();
        let mut cells = Vec::new();
        for address in area.addresses() {
            let tile = self.board.tile(address)?;
            if exclude_obstructed && tile.is_obstructed(&self.pieces) {
                continue;
            }
            if exclude_occupied && tile.is_occupied() {
                continue;
            }
            cells.push(address);
        }
        Ok(cells)
    }
}
