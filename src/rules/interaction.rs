//! What happens when a piece settles on an occupied tile.
//!
//! When a piece establishes occupation, `GameState` asks the game's
//! `InteractionRule` about every other occupier of the tile. The default
//! rule, `CaptureOpponents`, sends opposing pieces back to their owner's
//! pool. Game variants swap the rule in with `GameState::with_rules`.

use crate::pieces::Piece;

/// Outcome for one existing occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    /// Both pieces share the tile.
    Ignore,
    /// The occupant goes back to its owner's pool.
    Capture,
}

/// Resolves an arriving piece against one occupant.
pub trait InteractionRule: std::fmt::Debug {
    fn resolve(&self, occupant: &Piece, arriving: &Piece) -> Interaction;
}

/// Capture every occupant owned by someone else.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureOpponents;

impl InteractionRule for CaptureOpponents {
    fn resolve(&self, occupant: &Piece, arriving: &Piece) -> Interaction {
        if occupant.owner() != arriving.owner() {
            Interaction::Capture
        } else {
            Interaction::Ignore
        }
    }
}

/// Pieces never interact. Tiles simply stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct Coexist;

impl InteractionRule for Coexist {
    fn resolve(&self, _occupant: &Piece, _arriving: &Piece) -> Interaction {
        Interaction::Ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, PieceTemplate, PlayerId, Vec3};

    fn piece(id: u32, owner: u8) -> Piece {
        Piece::new(PieceId(id), PlayerId(owner), &PieceTemplate::default(), Vec3::ZERO)
    }

    #[test]
    fn test_capture_opponents() {
        let rule = CaptureOpponents;
        assert_eq!(rule.resolve(&piece(0, 0), &piece(1, 1)), Interaction::Capture);
        assert_eq!(rule.resolve(&piece(0, 0), &piece(1, 0)), Interaction::Ignore);
    }

    #[test]
    fn test_coexist() {
        assert_eq!(Coexist.resolve(&piece(0, 0), &piece(1, 1)), Interaction::Ignore);
    }
}
