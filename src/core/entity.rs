//! Piece and host-object identification.
//!
//! Every piece created by the engine gets a `PieceId`. Ids are handed out
//! sequentially and double as the index into the piece arena held by
//! `GameState`, so a piece is never destroyed once it exists.
//!
//! ## Usage
//!
//! ```
//! use project_knight::core::PieceId;
//!
//! let first = PieceId::new(0);
//! let second = PieceId::new(1);
//!
//! assert_eq!(first.index(), 0);
//! assert_ne!(first, second);
//! assert_eq!(second.to_string(), "Piece(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Position of this piece in the piece arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PieceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Opaque handle to a visual object owned by the host (a tile sprite,
/// a scene node). The engine stores it and hands it back; it never
/// interprets the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostHandle(pub u64);

impl std::fmt::Display for HostHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Host({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_id_index() {
        assert_eq!(PieceId::new(0).index(), 0);
        assert_eq!(PieceId::new(7).index(), 7);
        assert_eq!(PieceId::from(3).raw(), 3);
    }

    #[test]
    fn test_piece_id_ordering() {
        let mut ids = vec![PieceId(4), PieceId(1), PieceId(3)];
        ids.sort();
        assert_eq!(ids, vec![PieceId(1), PieceId(3), PieceId(4)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PieceId(42)), "Piece(42)");
        assert_eq!(format!("{}", HostHandle(9)), "Host(9)");
    }

    #[test]
    fn test_serialization() {
        let id = PieceId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: PieceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
