//! Rectangular regions of the board.

use serde::{Deserialize, Serialize};

use super::GridAddress;

/// An inclusive rectangle of cells.
///
/// Built from any two opposite corners and normalized so that
/// `bottom_left` holds the smallest row and column and `top_right` the
/// largest. Iteration is row-major, bottom row first.
///
/// ```
/// use project_knight::grid::{GridAddress, GridRange};
///
/// let range = GridRange::new(GridAddress::new(3, 0), GridAddress::new(1, 2));
/// assert_eq!(range.bottom_left(), GridAddress::new(1, 0));
/// assert_eq!(range.top_right(), GridAddress::new(3, 2));
/// assert_eq!(range.area(), 9);
/// assert!(range.contains(GridAddress::new(2, 1)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRange {
    bottom_left: GridAddress,
    top_right: GridAddress,
}

impl GridRange {
    #[must_use]
    pub fn new(a: GridAddress, b: GridAddress) -> Self {
        Self {
            bottom_left: GridAddress::new(a.row().min(b.row()), a.column().min(b.column())),
            top_right: GridAddress::new(a.row().max(b.row()), a.column().max(b.column())),
        }
    }

    #[must_use]
    pub fn bottom_left(&self) -> GridAddress {
        self.bottom_left
    }

    #[must_use]
    pub fn top_right(&self) -> GridAddress {
        self.top_right
    }

    #[must_use]
    pub fn top_left(&self) -> GridAddress {
        GridAddress::new(self.top_right.row(), self.bottom_left.column())
    }

    #[must_use]
    pub fn bottom_right(&self) -> GridAddress {
        GridAddress::new(self.bottom_left.row(), self.top_right.column())
    }

    /// Number of rows covered.
    #[must_use]
    pub fn rows(&self) -> u64 {
        (i64::from(self.top_right.row()) - i64::from(self.bottom_left.row())) as u64 + 1
    }

    /// Number of columns covered.
    #[must_use]
    pub fn columns(&self) -> u64 {
        (i64::from(self.top_right.column()) - i64::from(self.bottom_left.column())) as u64 + 1
    }

    #[must_use]
    pub fn area(&self) -> u64 {
        self.rows() * self.columns()
    }

    #[must_use]
    pub fn contains(&self, address: GridAddress) -> bool {
        self.contains_cell(address.row(), address.column())
    }

    #[must_use]
    pub fn contains_cell(&self, row: i32, column: i32) -> bool {
        (self.bottom_left.row()..=self.top_right.row()).contains(&row)
            && (self.bottom_left.column()..=self.top_right.column()).contains(&column)
    }

    /// The overlap of two ranges, if they share any cell.
    #[must_use]
    pub fn intersect(&self, other: &GridRange) -> Option<GridRange> {
        let bottom = self.bottom_left.row().max(other.bottom_left.row());
        let left = self.bottom_left.column().max(other.bottom_left.column());
        let top = self.top_right.row().min(other.top_right.row());
        let right = self.top_right.column().min(other.top_right.column());

        (bottom <= top && left <= right)
            .then(|| GridRange::new(GridAddress::new(bottom, left), GridAddress::new(top, right)))
    }

    /// The `index`-th cell in row-major order.
    #[must_use]
    pub fn address_at(&self, index: u64) -> Option<GridAddress> {
        if index >= self.area() {
            return None;
        }
        let columns = self.columns();
        let row = i64::from(self.bottom_left.row()) + (index / columns) as i64;
        let column = i64::from(self.bottom_left.column()) + (index % columns) as i64;
        Some(GridAddress::new(row as i32, column as i32))
    }

    /// Every cell, row-major from the bottom-left corner.
    pub fn addresses(&self) -> impl Iterator<Item = GridAddress> + '_ {
        (self.bottom_left.row()..=self.top_right.row()).flat_map(move |row| {
            (self.bottom_left.column()..=self.top_right.column())
                .map(move |column| GridAddress::new(row, column))
        })
    }
}

impl std::fmt::Display for GridRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.bottom_left, self.top_right)
    }
}
