//! Core engine types: ids, players, configuration, errors, events, RNG and
//! the game state.
//!
//! This module holds the building blocks every game variant shares.
//! Variants configure these via `GameConfig` and swap behaviour in through
//! policies and interaction rules rather than modifying the core.

pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;
pub mod tint;
pub mod vector;

pub use config::{BoardConfig, GameConfig, MotionConfig, PieceTemplate, PlayerConfig, Seat};
pub use entity::{HostHandle, PieceId};
pub use error::{GameError, Result};
pub use event::GameEvent;
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
pub use tint::{Tint, TintTransition};
pub use vector::Vec3;
