//! Selectable-tile overlay.
//!
//! The host draws clickable regions over the board; the engine only needs to
//! know which addresses are currently selectable and whether the overlay is
//! showing. `SelectionOverlay` is that seam, and `SelectionMask` is the
//! in-memory implementation the board uses by default.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::grid::{GridAddress, GridRange};

/// Host-side overlay of selectable tiles.
pub trait SelectionOverlay: std::fmt::Debug {
    /// Match the overlay to a rows × cols board. Clears all state.
    fn resize(&mut self, rows: i32, cols: i32);

    fn show(&mut self);

    /// Hide the overlay. Every cell stops being selectable.
    fn hide(&mut self);

    #[must_use]
    fn is_visible(&self) -> bool;

    /// Make exactly `addresses` selectable.
    fn set_selectable(&mut self, addresses: &[GridAddress]);

    /// Flip one cell. Returns whether it is now selectable.
    fn toggle(&mut self, address: GridAddress) -> bool;

    #[must_use]
    fn is_selectable(&self, address: GridAddress) -> bool;

    /// Selectable cells in row-major order.
    #[must_use]
    fn selectable(&self) -> Vec<GridAddress>;
}

#[derive(Clone, Debug)]
pub struct SelectionMask {
    bounds: Option<GridRange>,
    visible: bool,
    active: FxHashSet<GridAddress>,
}

impl Default for SelectionMask {
    fn default() -> Self {
        Self {
            bounds: None,
            visible: false,
            active: FxHashSet::default(),
        }
    }
}

impl SelectionMask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn in_bounds(&self, address: GridAddress) -> bool {
        self.bounds.is_some_and(|b| b.contains(address))
    }
}

impl SelectionOverlay for SelectionMask {
    fn resize(&mut self, rows: i32, cols: i32) {
        self.bounds = (rows > 0 && cols > 0)
            .then(|| GridRange::new(GridAddress::new(0, 0), GridAddress::new(rows - 1, cols - 1)));
        self.active.clear();
        self.visible = false;
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.active.clear();
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_selectable(&mut self, addresses: &[GridAddress]) {
        self.active.clear();
        for &address in addresses {
            if self.in_bounds(address) {
                self.active.insert(address);
            } else {
                debug!(%address, "Ignoring selectable address outside the board");
            }
        }
    }

    fn toggle(&mut self, address: GridAddress) -> bool {
        if !self.in_bounds(address) {
            debug!(%address, "Ignoring toggle outside the board");
            return false;
        }
        if self.active.remove(&address) {
            false
        } else {
            self.active.insert(address);
            true
        }
    }

    fn is_selectable(&self, address: GridAddress) -> bool {
        self.active.contains(&address)
    }

    fn selectable(&self) -> Vec<GridAddress> {
        let mut cells: Vec<_> = self.active.iter().copied().collect();
        cells.sort();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask() -> SelectionMask {
        let mut mask = SelectionMask::new();
        mask.resize(3, 3);
        mask
    }

    #[test]
    fn test_set_selectable_replaces() {
        let mut mask = mask();
        mask.set_selectable(&[GridAddress::new(0, 0), GridAddress::new(1, 1)]);
        mask.set_selectable(&[GridAddress::new(2, 2), GridAddress::new(9, 9)]);

        assert_eq!(mask.selectable(), vec![GridAddress::new(2, 2)]);
    }

    #[test]
    fn test_toggle() {
        let mut mask = mask();
        let cell = GridAddress::new(1, 2);

        assert!(mask.toggle(cell));
        assert!(mask.is_selectable(cell));
        assert!(!mask.toggle(cell));
        assert!(!mask.is_selectable(cell));
        assert!(!mask.toggle(GridAddress::new(-1, 0)));
    }

    #[test]
    fn test_hide_clears() {
        let mut mask = mask();
        mask.set_selectable(&[GridAddress::new(0, 1)]);
        mask.show();
        assert!(mask.is_visible());

        mask.hide();
        assert!(!mask.is_visible());
        assert!(mask.selectable().is_empty());
    }

    #[test]
    fn test_selectable_sorted_row_major() {
        let mut mask = mask();
        mask.set_selectable(&[
            GridAddress::new(2, 0),
            GridAddress::new(0, 2),
            GridAddress::new(0, 1),
        ]);
        assert_eq!(
            mask.selectable(),
            vec![GridAddress::new(0, 1), GridAddress::new(0, 2), GridAddress::new(2, 0)]
        );
    }
}
