//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting up to 255 players.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec`. Players join one at a time while a
//! game is being set up, so the map grows with `push` and hands back the id
//! of the new entry.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Most players a single game can hold.
pub const MAX_PLAYERS: usize = 255;

/// Player identifier.
///
/// Player indices are 0-based: the first player to join is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use project_knight::core::{PlayerId, PlayerMap};
///
/// let mut names: PlayerMap<&str> = PlayerMap::new();
/// let knights = names.push("Knights").unwrap();
/// let zombies = names.push("Zombies").unwrap();
///
/// assert_eq!(knights, PlayerId::new(0));
/// assert_eq!(names[zombies], "Zombies");
/// assert!(names.get(PlayerId::new(5)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> Default for PlayerMap<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> PlayerMap<T> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry for the next player.
    ///
    /// Returns `None` once `MAX_PLAYERS` entries exist.
    pub fn push(&mut self, value: T) -> Option<PlayerId> {
        if self.data.len() >= MAX_PLAYERS {
            return None;
        }
        let id = PlayerId(self.data.len() as u8);
        self.data.push(value);
        Some(id)
    }

    /// The id the next `push` will hand out.
    #[must_use]
    pub fn next_id(&self) -> Option<PlayerId> {
        (self.data.len() < MAX_PLAYERS).then(|| PlayerId(self.data.len() as u8))
    }

    /// Get the number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len()).map(|i| PlayerId(i as u8))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
