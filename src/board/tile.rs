//! A single board cell.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::core::{GameError, HostHandle, PieceId, PlayerId, Result, Tint, Vec3};
use crate::grid::GridAddress;
use crate::pieces::Piece;

/// Occupier list. Tiles rarely hold more than a couple of pieces at once.
pub type Occupiers = SmallVec<[PieceId; 4]>;

/// A board cell: where it is, how it looks, and who stands on it.
///
/// A tile refers to its occupiers by id and does not own them. Occupiers
/// are kept in arrival order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tile {
    handle: HostHandle,
    address: GridAddress,
    position: Vec3,
    placed: bool,
    tint: Tint,
    occupiers: Occupiers,
}

impl Tile {
    pub(crate) fn new(handle: HostHandle) -> Self {
        Self {
            handle,
            address: GridAddress::default(),
            position: Vec3::ZERO,
            placed: false,
            tint: Tint::WHITE,
            occupiers: SmallVec::new(),
        }
    }

    /// Fix the tile's address and world position.
    ///
    /// Only the first call takes effect. Returns whether it did.
    pub(crate) fn place(&mut self, position: Vec3, row: i32, column: i32) -> bool {
        if self.placed {
            warn!(address = %self.address, "Tile already placed, ignoring");
            return false;
        }
        self.position = position;
        self.address = GridAddress::new(row, column);
        self.placed = true;
        true
    }

    #[must_use]
    pub fn handle(&self) -> HostHandle {
        self.handle
    }

    #[must_use]
    pub fn address(&self) -> GridAddress {
        self.address
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }

    #[must_use]
    pub fn occupiers(&self) -> &[PieceId] {
        &self.occupiers
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        !self.occupiers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, piece: PieceId) -> bool {
        self.occupiers.contains(&piece)
    }

    pub fn add_occupier(&mut self, piece: PieceId) {
        self.occupiers.push(piece);
    }

    /// Remove `piece` if present. Returns whether it was.
    pub fn remove_occupier(&mut self, piece: PieceId) -> bool {
        match self.occupiers.iter().position(|&p| p == piece) {
            Some(index) => {
                self.occupiers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_occupier_at(&mut self, index: usize) -> Result<PieceId> {
        self.check_index(index)?;
        Ok(self.occupiers.remove(index))
    }

    pub fn occupier_at(&self, index: usize) -> Result<PieceId> {
        self.check_index(index)?;
        Ok(self.occupiers[index])
    }

    /// True if any occupier is an obstacle.
    ///
    /// `pieces` is the piece arena the occupier ids index into.
    #[must_use]
    pub fn is_obstructed(&self, pieces: &[Piece]) -> bool {
        self.occupiers
            .iter()
            .any(|id| pieces.get(id.index()).is_some_and(Piece::is_obstacle))
    }

    /// True if any occupier belongs to `player`.
    #[must_use]
    pub fn is_held_by(&self, player: PlayerId, pieces: &[Piece]) -> bool {
        self.occupiers
            .iter()
            .any(|id| pieces.get(id.index()).is_some_and(|p| p.owner() == player))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.occupiers.len() {
            return Err(GameError::IndexOutOfRange {
                what: "occupier",
                index: index as i64,
                bound: self.occupiers.len() as i64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceTemplate;

    fn tile() -> Tile {
        let mut tile = Tile::new(HostHandle(0));
        tile.place(Vec3::new(0.5, 0.5, 0.0), 2, 3);
        tile
    }

    #[test]
    fn test_place_once() {
        let mut tile = tile();
        assert_eq!(tile.address(), GridAddress::new(2, 3));

        assert!(!tile.place(Vec3::ZERO, 0, 0));
        assert_eq!(tile.address(), GridAddress::new(2, 3));
        assert_eq!(tile.position(), Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_occupier_order() {
        let mut tile = tile();
        tile.add_occupier(PieceId(4));
        tile.add_occupier(PieceId(1));

        assert_eq!(tile.occupiers(), &[PieceId(4), PieceId(1)]);
        assert_eq!(tile.occupier_at(1).unwrap(), PieceId(1));
    }

    #[test]
    fn test_remove_occupier() {
        let mut tile = tile();
        tile.add_occupier(PieceId(4));

        assert!(tile.remove_occupier(PieceId(4)));
        assert!(!tile.remove_occupier(PieceId(4)));
        assert!(!tile.is_occupied());
    }

    #[test]
    fn test_occupier_index_bounds() {
        let mut tile = tile();
        tile.add_occupier(PieceId(0));

        assert!(matches!(
            tile.occupier_at(1),
            Err(GameError::IndexOutOfRange { index: 1, bound: 1, .. })
        ));
        assert!(tile.remove_occupier_at(1).is_err());
        assert_eq!(tile.remove_occupier_at(0).unwrap(), PieceId(0));
        assert!(tile.remove_occupier_at(0).is_err());
    }

    #[test]
    fn test_obstruction() {
        let rock = Piece::new(PieceId(0), PlayerId(0), &PieceTemplate::new("Rock").obstacle(), Vec3::ZERO);
        let pawn = Piece::new(PieceId(1), PlayerId(1), &PieceTemplate::default(), Vec3::ZERO);
        let pieces = vec![rock, pawn];

        let mut tile = tile();
        tile.add_occupier(PieceId(1));
        assert!(!tile.is_obstructed(&pieces));
        assert!(tile.is_held_by(PlayerId(1), &pieces));
        assert!(!tile.is_held_by(PlayerId(0), &pieces));

        tile.add_occupier(PieceId(0));
        assert!(tile.is_obstructed(&pieces));
    }
}
