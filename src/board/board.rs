//! The tile grid.
//!
//! ## Layout
//!
//! Tiles are stored row-major. Tile (row, col) sits at world position
//! `(-(cols / 2) + 0.5 + col, -(rows / 2) + 0.5 + row, 0)` using float
//! division, so the board is centred on the origin. Each tile takes
//! `palette[(row + col) % len]` as its tint, which staggers the colours
//! diagonally.
//!
//! ## Lifecycle
//!
//! A board is built once. Building again logs and does nothing; tiles are
//! never destroyed.

use tracing::{debug, info, instrument, warn};

use super::factory::TileFactory;
use super::selection::{SelectionMask, SelectionOverlay};
use super::tile::Tile;
use crate::core::{BoardConfig, GameError, GameRng, Result, Tint, Vec3};
use crate::grid::{GridAddress, GridRange};

#[derive(Debug)]
pub struct Board {
    rows: i32,
    cols: i32,
    palette: Vec<Tint>,
    tiles: Vec<Tile>,
    built: bool,
    overlay: Box<dyn SelectionOverlay>,
}

impl Board {
    /// Create an unbuilt board with the default selection mask.
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self::with_overlay(config, Box::new(SelectionMask::new()))
    }

    /// Create an unbuilt board that delegates selection to `overlay`.
    #[must_use]
    pub fn with_overlay(config: &BoardConfig, overlay: Box<dyn SelectionOverlay>) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            palette: config.palette.clone(),
            tiles: Vec::new(),
            built: false,
            overlay,
        }
    }

    /// Instantiate and place every tile.
    ///
    /// Returns `Ok(false)` if the board was already built.
    #[instrument(skip(self, factory), fields(rows = self.rows, cols = self.cols))]
    pub fn build(&mut self, factory: &mut dyn TileFactory) -> Result<bool> {
        if self.built {
            warn!("Board already built, ignoring");
            return Ok(false);
        }
        if self.rows < 1 || self.cols < 1 {
            return Err(GameError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if factory.template_count() == 0 {
            return Err(GameError::NoTilesConfigured);
        }

        let start_x = -(self.cols as f32 / 2.0) + 0.5;
        let start_y = -(self.rows as f32 / 2.0) + 0.5;

        let mut tiles = Vec::with_capacity(self.rows as usize * self.cols as usize);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let handle = factory.instantiate(0, GridAddress::new(row, col))?;
                let mut tile = Tile::new(handle);
                tile.place(Vec3::new(start_x + col as f32, start_y + row as f32, 0.0), row, col);
                tile.set_tint(self.palette_tint(row, col));
                tiles.push(tile);
            }
        }

        self.tiles = tiles;
        self.built = true;
        self.overlay.resize(self.rows, self.cols);
        info!(tiles = self.tiles.len(), "Board built");
        Ok(true)
    }

    fn palette_tint(&self, row: i32, col: i32) -> Tint {
        if self.palette.is_empty() {
            return Tint::WHITE;
        }
        let index = (row as usize + col as usize) % self.palette.len();
        self.palette[index]
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// The whole board as a range. Meaningful once built.
    #[must_use]
    pub fn bounds(&self) -> GridRange {
        GridRange::new(
            GridAddress::new(0, 0),
            GridAddress::new(self.rows - 1, self.cols - 1),
        )
    }

    /// Tiles in row-major order. Empty before the board is built.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// True if (row, col) names a tile on this built board.
    #[must_use]
    pub fn is_valid_tile(&self, row: i32, col: i32) -> bool {
        self.built && (0..self.rows).contains(&row) && (0..self.cols).contains(&col)
    }

    #[must_use]
    pub fn is_valid_address(&self, address: GridAddress) -> bool {
        self.is_valid_tile(address.row(), address.column())
    }

    fn index_of(&self, row: i32, col: i32) -> Result<usize> {
        if !self.built {
            return Err(GameError::NoBoardFound);
        }
        if !(0..self.rows).contains(&row) {
            return Err(GameError::IndexOutOfRange {
                what: "row",
                index: i64::from(row),
                bound: i64::from(self.rows),
            });
        }
        if !(0..self.cols).contains(&col) {
            return Err(GameError::IndexOutOfRange {
                what: "column",
                index: i64::from(col),
                bound: i64::from(self.cols),
            });
        }
        Ok(row as usize * self.cols as usize + col as usize)
    }

    pub fn get_tile(&self, row: i32, col: i32) -> Result<&Tile> {
        let index = self.index_of(row, col)?;
        Ok(&self.tiles[index])
    }

    pub fn get_tile_mut(&mut self, row: i32, col: i32) -> Result<&mut Tile> {
        let index = self.index_of(row, col)?;
        Ok(&mut self.tiles[index])
    }

    pub fn tile(&self, address: GridAddress) -> Result<&Tile> {
        self.get_tile(address.row(), address.column())
    }

    pub fn tile_mut(&mut self, address: GridAddress) -> Result<&mut Tile> {
        self.get_tile_mut(address.row(), address.column())
    }

    /// A uniformly random tile address, or `None` before the board is built.
    pub fn random_tile(&self, rng: &mut GameRng) -> Option<GridAddress> {
        if !self.built {
            return None;
        }
        let row = rng.gen_range(0..self.rows);
        let col = rng.gen_range(0..self.cols);
        Some(GridAddress::new(row, col))
    }

    // === Selection ===

    pub fn show_selection_mask(&mut self) {
        self.overlay.show();
    }

    pub fn hide_selection_mask(&mut self) {
        self.overlay.hide();
    }

    #[must_use]
    pub fn is_selection_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn set_selection_mask(&mut self, addresses: &[GridAddress]) {
        self.overlay.set_selectable(addresses);
    }

    pub fn toggle_selection_tile(&mut self, address: GridAddress) -> bool {
        self.overlay.toggle(address)
    }

    #[must_use]
    pub fn selectable_addresses(&self) -> Vec<GridAddress> {
        self.overlay.selectable()
    }

    /// Resolve a click on `address` to a tile.
    ///
    /// Returns the address when the overlay is showing and the tile is
    /// selectable, otherwise `None`.
    #[must_use]
    pub fn select(&self, address: GridAddress) -> Option<GridAddress> {
        if !self.overlay.is_visible() || !self.overlay.is_selectable(address) {
            debug!(%address, "Selection ignored");
            return None;
        }
        self.is_valid_address(address).then_some(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileTemplates;

    fn built(rows: i32, cols: i32) -> Board {
        let mut board = Board::new(&BoardConfig::new(rows, cols));
        let mut factory = TileTemplates::new().with_template("Grass");
        assert!(board.build(&mut factory).unwrap());
        board
    }

    #[test]
    fn test_build_counts() {
        let board = built(3, 4);
        assert_eq!(board.tile_count(), 12);

        let mut addresses: Vec<_> = board.tiles().map(Tile::address).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), 12);
    }

    #[test]
    fn test_build_twice_is_noop() {
        let mut board = built(2, 2);
        let mut factory = TileTemplates::new().with_template("Grass");

        assert!(!board.build(&mut factory).unwrap());
        assert_eq!(factory.issued(), 0);
        assert_eq!(board.tile_count(), 4);
    }

    #[test]
    fn test_build_invalid_dimension() {
        let mut board = Board::new(&BoardConfig::new(0, 3));
        let mut factory = TileTemplates::new().with_template("Grass");
        assert_eq!(
            board.build(&mut factory),
            Err(GameError::InvalidDimension { rows: 0, cols: 3 })
        );
        assert!(!board.is_built());
    }

    #[test]
    fn test_build_without_templates() {
        let mut board = Board::new(&BoardConfig::new(2, 2));
        let mut factory = TileTemplates::new();
        assert_eq!(board.build(&mut factory), Err(GameError::NoTilesConfigured));
    }

    #[test]
    fn test_positions_centered() {
        let board = built(5, 5);
        let corner = board.get_tile(0, 0).unwrap();
        assert_eq!(corner.position(), Vec3::new(-2.0, -2.0, 0.0));

        let far = board.get_tile(4, 4).unwrap();
        assert_eq!(far.position(), Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(board.get_tile(2, 2).unwrap().position(), Vec3::ZERO);
    }

    #[test]
    fn test_positions_centered_uneven() {
        let board = built(3, 4);
        assert_eq!(board.get_tile(0, 0).unwrap().position(), Vec3::new(-1.5, -1.0, 0.0));
        assert_eq!(board.get_tile(2, 3).unwrap().position(), Vec3::new(1.5, 1.0, 0.0));

        let sum = board
            .tiles()
            .fold(Vec3::ZERO, |acc, tile| acc + tile.position());
        assert_eq!(sum, Vec3::ZERO);
    }

    #[test]
    fn test_palette_staggers() {
        let a = Tint::BLACK;
        let b = Tint::WHITE;
        let mut board = Board::new(&BoardConfig::new(2, 3).with_palette(vec![a, b]));
        board.build(&mut TileTemplates::new().with_template("Grass")).unwrap();

        assert_eq!(board.get_tile(0, 0).unwrap().tint(), a);
        assert_eq!(board.get_tile(0, 1).unwrap().tint(), b);
        assert_eq!(board.get_tile(1, 0).unwrap().tint(), b);
        assert_eq!(board.get_tile(1, 1).unwrap().tint(), a);
    }

    #[test]
    fn test_get_tile_bounds() {
        let board = built(3, 2);

        for (row, col) in [(-1, 0), (3, 0), (0, -1), (0, 2)] {
            assert!(matches!(
                board.get_tile(row, col),
                Err(GameError::IndexOutOfRange { .. })
            ));
            assert!(!board.is_valid_tile(row, col));
        }

        let tile = board.get_tile(2, 1).unwrap();
        assert_eq!(tile.address(), GridAddress::new(2, 1));
        assert!(board.is_valid_tile(2, 1));
    }

    #[test]
    fn test_unbuilt_board() {
        let board = Board::new(&BoardConfig::new(3, 3));
        assert!(!board.is_valid_tile(0, 0));
        assert_eq!(board.get_tile(0, 0).unwrap_err(), GameError::NoBoardFound);
        assert!(board.random_tile(&mut GameRng::new(1)).is_none());
    }

    #[test]
    fn test_random_tile_in_bounds() {
        let board = built(4, 2);
        let mut rng = GameRng::new(9);
        for _ in 0..100 {
            let address = board.random_tile(&mut rng).unwrap();
            assert!(board.is_valid_address(address));
        }
    }

    #[test]
    fn test_select_requires_visible_mask() {
        let mut board = built(3, 3);
        let cell = GridAddress::new(1, 1);

        board.set_selection_mask(&[cell]);
        assert_eq!(board.select(cell), None);

        board.show_selection_mask();
        assert_eq!(board.select(cell), Some(cell));
        assert_eq!(board.select(GridAddress::new(0, 0)), None);

        assert!(!board.toggle_selection_tile(cell));
        assert_eq!(board.select(cell), None);

        board.hide_selection_mask();
        assert!(board.selectable_addresses().is_empty());
    }
}
