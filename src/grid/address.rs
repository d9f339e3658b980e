//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A (row, column) cell coordinate.
///
/// Row 0 is the bottom of the board and column 0 the left edge. Addresses
/// are plain values: they may point outside any particular board, and the
/// board decides whether one is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridAddress {
    row: i32,
    column: i32,
}

impl GridAddress {
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn column(self) -> i32 {
        self.column
    }

    /// The address `rows` up and `columns` right of this one.
    #[must_use]
    pub const fn offset(self, rows: i32, columns: i32) -> Self {
        Self::new(self.row.saturating_add(rows), self.column.saturating_add(columns))
    }

    /// Number of cells in the rectangle spanned by two corners, inclusive.
    ///
    /// ```
    /// use project_knight::grid::GridAddress;
    ///
    /// let a = GridAddress::new(0, 0);
    /// let b = GridAddress::new(2, -1);
    /// assert_eq!(GridAddress::area_between(a, b), 6);
    /// ```
    #[must_use]
    pub fn area_between(a: GridAddress, b: GridAddress) -> u64 {
        let rows = (i64::from(a.row) - i64::from(b.row)).unsigned_abs() + 1;
        let columns = (i64::from(a.column) - i64::from(b.column)).unsigned_abs() + 1;
        rows * columns
    }
}

impl From<(i32, i32)> for GridAddress {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

impl std::fmt::Display for GridAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_equality() {
        assert_eq!(GridAddress::new(2, 3), GridAddress::from((2, 3)));
        assert_ne!(GridAddress::new(2, 3), GridAddress::new(3, 2));
    }

    #[test]
    fn test_offset() {
        let origin = GridAddress::new(1, 1);
        assert_eq!(origin.offset(1, 0), GridAddress::new(2, 1));
        assert_eq!(origin.offset(0, -2), GridAddress::new(1, -1));
        assert_eq!(GridAddress::new(i32::MAX, 0).offset(1, 0).row(), i32::MAX);
    }

    #[test]
    fn test_area_between_single_cell() {
        let a = GridAddress::new(4, 4);
        assert_eq!(GridAddress::area_between(a, a), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(GridAddress::new(3, -1).to_string(), "(3, -1)");
    }
}
