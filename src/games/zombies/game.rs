//! Knights versus zombies.

use crate::board::TileTemplates;
use crate::core::{BoardConfig, GameConfig, PieceTemplate, PlayerConfig, Result, Tint, Vec3};
use crate::game::GameSession;
use crate::grid::GridAddress;
use crate::players::{Direction, PolicyConfig};

/// Builder for the knights-versus-zombies preset.
///
/// Knights start on the bottom rows and wander at random. Zombies enter
/// along the top row and shamble down, capturing any knight they land on.
/// A zombie walking off the bottom edge goes back to the zombie pool.
#[derive(Clone, Debug)]
pub struct ZombieGameBuilder {
    rows: i32,
    cols: i32,
    knights: usize,
    knight_rows: i32,
    zombies: usize,
    zombies_per_turn: usize,
    zombie_range: i32,
    human_zombies: bool,
    vacant_first_seat: bool,
}

impl Default for ZombieGameBuilder {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 5,
            knights: 5,
            knight_rows: 1,
            zombies: 12,
            zombies_per_turn: 2,
            zombie_range: 1,
            human_zombies: false,
            vacant_first_seat: false,
        }
    }
}

impl ZombieGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board_size(mut self, rows: i32, cols: i32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn knights(mut self, count: usize) -> Self {
        self.knights = count;
        self
    }

    /// How many rows from the bottom the knights may start on.
    pub fn knight_rows(mut self, rows: i32) -> Self {
        self.knight_rows = rows;
        self
    }

    pub fn zombies(mut self, count: usize) -> Self {
        self.zombies = count;
        self
    }

    pub fn zombies_per_turn(mut self, count: usize) -> Self {
        self.zombies_per_turn = count;
        self
    }

    pub fn zombie_range(mut self, range: i32) -> Self {
        self.zombie_range = range;
        self
    }

    /// Let the host pick zombie deployments through the selection overlay.
    pub fn human_zombies(mut self, human: bool) -> Self {
        self.human_zombies = human;
        self
    }

    /// Put an empty seat before the knights.
    pub fn vacant_first_seat(mut self, vacant: bool) -> Self {
        self.vacant_first_seat = vacant;
        self
    }

    /// Build the configuration.
    pub fn build(self, seed: u64) -> GameConfig {
        let top = self.rows - 1;
        let right = self.cols - 1;

        let knights = PlayerConfig::new("Knights")
            .with_tint(Tint::rgb(0.85, 0.75, 0.3))
            .with_starting_pieces(self.knights)
            .with_default_piece(PieceTemplate::new("Knight"))
            .with_deploy_area(
                GridAddress::new(0, 0),
                GridAddress::new((self.knight_rows - 1).max(0), right),
            )
            .with_pool_position(Vec3::new(-(self.cols as f32), -(self.rows as f32) / 2.0, 0.0));

        let zombies = PlayerConfig::new("Zombies")
            .with_tint(Tint::rgb(0.35, 0.6, 0.3))
            .with_starting_pieces(self.zombies)
            .with_default_piece(PieceTemplate::new("Zombie"))
            .with_deploy_area(GridAddress::new(top, 0), GridAddress::new(top, right))
            .with_pool_position(Vec3::new(self.cols as f32, self.rows as f32 / 2.0, 0.0));

        let zombie_policy = if self.human_zombies {
            PolicyConfig::HumanSwarm {
                direction: Direction::Down,
                range: self.zombie_range,
                deploys_per_turn: self.zombies_per_turn,
            }
        } else {
            PolicyConfig::Swarm {
                direction: Direction::Down,
                range: self.zombie_range,
                deploys_per_turn: self.zombies_per_turn,
            }
        };

        let mut config = GameConfig::new(seed).with_board(BoardConfig::new(self.rows, self.cols));
        if self.vacant_first_seat {
            config = config.with_vacant_seat();
        }
        config
            .with_player(knights, PolicyConfig::RandomMove)
            .with_player(zombies, zombie_policy)
    }

    /// Build the configuration and a ready-to-start session on an in-memory
    /// tile factory.
    pub fn build_session(self, seed: u64) -> Result<GameSession> {
        let config = self.build(seed);
        let mut factory = TileTemplates::new().with_template("Grass");
        GameSession::new(&config, &mut factory)
    }
}
