//! # project-knight
//!
//! A tick-driven turn, movement and occupation engine for grid board games.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: The engine never renders anything. Tiles are created
//!    through a `TileFactory`, selection goes through a `SelectionOverlay`,
//!    and the host advances time by calling `tick` with a delta.
//!
//! 2. **Deterministic**: All randomness flows through a seeded `GameRng`, so
//!    a seed and a sequence of deltas reproduce a game exactly.
//!
//! 3. **Configuration Over Convention**: Games define their board, players
//!    and policies via `GameConfig`. Behaviour differences live in
//!    `TurnPolicy` and `InteractionRule` implementations.
//!
//! ## Architecture
//!
//! - **Arena Ownership**: `GameState` owns every piece and player. Tiles and
//!   players refer to pieces by `PieceId`.
//!
//! - **Events Instead of Callbacks**: Movement completion, captures and turn
//!   changes are queued as `GameEvent`s and drained once per tick.
//!
//! ## Modules
//!
//! - `core`: ids, configuration, errors, events, RNG and the game state
//! - `grid`: grid addresses and rectangles
//! - `board`: the board, its tiles and the selection overlay
//! - `pieces`: pieces and their queued motion
//! - `players`: per-player bookkeeping and turn policies
//! - `rules`: what happens when pieces meet
//! - `game`: the turn coordinator, session and snapshots
//! - `games`: ready-made configurations

pub mod board;
pub mod core;
pub mod game;
pub mod games;
pub mod grid;
pub mod pieces;
pub mod players;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameError, GameEvent, GameRng, GameState, MotionConfig, PieceId, PlayerConfig,
    PlayerId, Result, Seat, Tint, Vec3,
};

pub use crate::grid::{GridAddress, GridRange};

pub use crate::board::{Board, SelectionMask, SelectionOverlay, Tile, TileFactory, TileTemplates};

pub use crate::pieces::{MovementStep, Piece};

pub use crate::players::{
    Direction, HumanSwarmPolicy, Player, PolicyConfig, RandomMovePolicy, SwarmPolicy, Transfer,
    TurnPhase, TurnPolicy,
};

pub use crate::rules::{CaptureOpponents, Coexist, Interaction, InteractionRule};

pub use crate::game::{GameSession, GameSnapshot, TurnCoordinator};

pub use crate::games::zombies::ZombieGameBuilder;
