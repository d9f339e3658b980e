//! Game configuration types.
//!
//! A game is configured at startup by providing:
//! - `BoardConfig`: board extents and tile palette
//! - `MotionConfig`: movement tuning shared by every piece
//! - `PlayerConfig`: per-player pool, deployment zone and pacing
//! - `GameConfig`: seed, the above, and the ordered seats
//!
//! Every type has working defaults and `with_*` builders. `GameConfig` can
//! also be loaded from TOML.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::{GameError, Result};
use super::tint::Tint;
use super::vector::Vec3;
use crate::grid::GridAddress;
use crate::players::PolicyConfig;

/// Board extents and the palette the tiles cycle through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: i32,
    pub cols: i32,
    /// Tile colours. Tile (row, col) gets `palette[(row + col) % len]`.
    pub palette: Vec<Tint>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            palette: vec![Tint::rgb(0.93, 0.93, 0.88), Tint::rgb(0.46, 0.59, 0.34)],
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Tint>) -> Self {
        self.palette = palette;
        self
    }
}

/// Movement tuning.
///
/// Pieces hop between tiles: they lift by `lift`, travel to a point above the
/// destination, then settle onto it. Each leg converges with a damped spring
/// bounded by a max speed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub move_smooth_time: f32,
    pub move_max_speed: f32,
    pub lift_smooth_time: f32,
    pub lift_max_speed: f32,
    /// Offset applied while a piece is in the air.
    pub lift: Vec3,
    /// A step has arrived once the piece is within this distance.
    pub arrival_epsilon: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_smooth_time: 0.2,
            move_max_speed: 5.0,
            lift_smooth_time: 0.2,
            lift_max_speed: 10.0,
            lift: Vec3::new(0.0, 0.0, -1.0),
            arrival_epsilon: 0.01,
        }
    }
}

/// Template the pool is filled from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTemplate {
    pub name: String,
    /// Obstacles block tiles from being picked as destinations.
    #[serde(default)]
    pub obstacle: bool,
}

impl PieceTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            obstacle: false,
        }
    }

    #[must_use]
    pub fn obstacle(mut self) -> Self {
        self.obstacle = true;
        self
    }
}

impl Default for PieceTemplate {
    fn default() -> Self {
        Self::new("Pawn")
    }
}

/// Per-player setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub tint: Tint,
    /// Pieces created in the pool at setup.
    pub starting_pieces: usize,
    pub default_piece: Option<PieceTemplate>,
    /// One corner of the deployment zone.
    pub deploy_from: GridAddress,
    /// The opposite corner of the deployment zone.
    pub deploy_to: GridAddress,
    /// Where pooled pieces wait off the board.
    pub pool_position: Vec3,
    /// Seconds between auto-deploy placements.
    pub deploy_interval: f32,
    /// Seconds to wait after auto-deploy before signalling ready.
    pub ready_delay: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            tint: Tint::WHITE,
            starting_pieces: 5,
            default_piece: Some(PieceTemplate::default()),
            deploy_from: GridAddress::new(0, 0),
            deploy_to: GridAddress::new(0, 0),
            pool_position: Vec3::new(-6.0, 0.0, 0.0),
            deploy_interval: 0.1,
            ready_delay: 3.0,
        }
    }
}

impl PlayerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    #[must_use]
    pub fn with_starting_pieces(mut self, count: usize) -> Self {
        self.starting_pieces = count;
        self
    }

    #[must_use]
    pub fn with_default_piece(mut self, template: PieceTemplate) -> Self {
        self.default_piece = Some(template);
        self
    }

    #[must_use]
    pub fn without_default_piece(mut self) -> Self {
        self.default_piece = None;
        self
    }

    #[must_use]
    pub fn with_deploy_area(mut self, first: GridAddress, second: GridAddress) -> Self {
        self.deploy_from = first;
        self.deploy_to = second;
        self
    }

    #[must_use]
    pub fn with_pool_position(mut self, position: Vec3) -> Self {
        self.pool_position = position;
        self
    }

    #[must_use]
    pub fn with_deploy_interval(mut self, seconds: f32) -> Self {
        self.deploy_interval = seconds;
        self
    }

    #[must_use]
    pub fn with_ready_delay(mut self, seconds: f32) -> Self {
        self.ready_delay = seconds;
        self
    }
}

/// One slot in the turn order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "seat", rename_all = "snake_case")]
pub enum Seat {
    /// Skipped by the coordinator.
    Vacant,
    Occupied {
        player: PlayerConfig,
        policy: PolicyConfig,
    },
}

/// Complete game configuration.
///
/// ```
/// use project_knight::core::GameConfig;
///
/// let config = GameConfig::from_toml_str(r#"
///     seed = 7
///
///     [board]
///     rows = 6
///     cols = 4
///
///     [[seats]]
///     seat = "occupied"
///     player = { name = "Knights", starting_pieces = 3 }
///     policy = { kind = "random_move" }
///
///     [[seats]]
///     seat = "vacant"
/// "#).unwrap();
///
/// assert_eq!(config.board.rows, 6);
/// assert_eq!(config.seats.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub seats: Vec<Seat>,
}

impl GameConfig {
    /// Create a configuration with default board and motion and no seats.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            board: BoardConfig::default(),
            motion: MotionConfig::default(),
            seats: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Append an occupied seat.
    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig, policy: PolicyConfig) -> Self {
        self.seats.push(Seat::Occupied { player, policy });
        self
    }

    /// Append a vacant seat.
    #[must_use]
    pub fn with_vacant_seat(mut self) -> Self {
        self.seats.push(Seat::Vacant);
        self
    }

    /// Number of seats with a player assigned.
    #[must_use]
    pub fn seated_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|seat| matches!(seat, Seat::Occupied { .. }))
            .count()
    }

    /// Parse and validate a TOML document.
    #[instrument(skip(source))]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| GameError::config(format!("failed to parse game config: {e}")))?;
        config.validate()?;
        debug!(seats = config.seats.len(), "Game config loaded");
        Ok(config)
    }

    /// Check values the engine cannot run with.
    ///
    /// Board extents are left to `Board::build`, which reports them as
    /// `InvalidDimension`.
    pub fn validate(&self) -> Result<()> {
        let motion = &self.motion;
        if motion.move_smooth_time < 0.0 || motion.lift_smooth_time < 0.0 {
            return Err(GameError::config("smooth times must not be negative"));
        }
        if motion.move_max_speed <= 0.0 || motion.lift_max_speed <= 0.0 {
            return Err(GameError::config("max speeds must be positive"));
        }
        if motion.arrival_epsilon <= 0.0 {
            return Err(GameError::config("arrival epsilon must be positive"));
        }

        for seat in &self.seats {
            if let Seat::Occupied { player, policy } = seat {
                if player.deploy_interval < 0.0 || player.ready_delay < 0.0 {
                    return Err(GameError::config(format!(
                        "player {} has a negative deploy pacing",
                        player.name
                    )));
                }
                policy.validate()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::Direction;

    #[test]
    fn test_player_config_builder() {
        let config = PlayerConfig::new("Knights")
            .with_starting_pieces(3)
            .with_deploy_area(GridAddress::new(0, 0), GridAddress::new(1, 4))
            .with_deploy_interval(0.0)
            .with_ready_delay(0.5);

        assert_eq!(config.name, "Knights");
        assert_eq!(config.starting_pieces, 3);
        assert_eq!(config.deploy_to, GridAddress::new(1, 4));
        assert_eq!(config.deploy_interval, 0.0);
        assert_eq!(config.ready_delay, 0.5);
        assert!(config.default_piece.is_some());
    }

    #[test]
    fn test_motion_defaults() {
        let motion = MotionConfig::default();
        assert_eq!(motion.move_smooth_time, 0.2);
        assert_eq!(motion.move_max_speed, 5.0);
        assert_eq!(motion.lift_max_speed, 10.0);
        assert_eq!(motion.lift, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(motion.arrival_epsilon, 0.01);
    }

    #[test]
    fn test_game_config_builder() {
        let config = GameConfig::new(3)
            .with_board(BoardConfig::new(8, 6))
            .with_player(PlayerConfig::new("Knights"), PolicyConfig::RandomMove)
            .with_vacant_seat();

        assert_eq!(config.board.rows, 8);
        assert_eq!(config.seats.len(), 2);
        assert_eq!(config.seated_count(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            seed = 11

            [board]
            rows = 7
            cols = 5

            [motion]
            move_max_speed = 8.0

            [[seats]]
            seat = "occupied"
            [seats.player]
            name = "Zombies"
            starting_pieces = 10
            deploy_from = { row = 6, column = 0 }
            deploy_to = { row = 6, column = 4 }
            [seats.policy]
            kind = "swarm"
            direction = "down"
            range = 1
            deploys_per_turn = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 11);
        assert_eq!(config.board.cols, 5);
        assert_eq!(config.board.palette.len(), 2);
        assert_eq!(config.motion.move_max_speed, 8.0);
        assert_eq!(config.motion.lift_max_speed, 10.0);

        match &config.seats[0] {
            Seat::Occupied { player, policy } => {
                assert_eq!(player.name, "Zombies");
                assert_eq!(player.deploy_from, GridAddress::new(6, 0));
                assert_eq!(player.ready_delay, 3.0);
                assert_eq!(
                    *policy,
                    PolicyConfig::Swarm {
                        direction: Direction::Down,
                        range: 1,
                        deploys_per_turn: 2,
                    }
                );
            }
            Seat::Vacant => panic!("expected an occupied seat"),
        }
    }

    #[test]
    fn test_from_toml_rejects_bad_motion() {
        let err = GameConfig::from_toml_str(
            r#"
            [motion]
            arrival_epsilon = 0.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { .. }));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = GameConfig::from_toml_str("seats = 4").unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { .. }));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = GameConfig::new(1)
            .with_player(PlayerConfig::new("A"), PolicyConfig::RandomMove);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
