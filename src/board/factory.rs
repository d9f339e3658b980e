//! Tile instantiation seam.
//!
//! The board never creates visuals itself. It asks a `TileFactory` for one
//! host object per cell and keeps the returned handle on the tile.

use tracing::trace;

use crate::core::{GameError, HostHandle, Result};
use crate::grid::GridAddress;

/// Supplies host visuals for tiles.
pub trait TileFactory {
    /// Number of tile templates available. Zero means the factory is not
    /// configured and the board refuses to build.
    fn template_count(&self) -> usize;

    /// Create the visual for the tile at `address` from template `template`.
    fn instantiate(&mut self, template: usize, address: GridAddress) -> Result<HostHandle>;
}

/// In-memory factory that hands out sequential handles.
///
/// Used by the simulator and tests, where nothing is drawn.
#[derive(Clone, Debug, Default)]
pub struct TileTemplates {
    names: Vec<String>,
    issued: u64,
}

impl TileTemplates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Handles issued so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl TileFactory for TileTemplates {
    fn template_count(&self) -> usize {
        self.names.len()
    }

    fn instantiate(&mut self, template: usize, address: GridAddress) -> Result<HostHandle> {
        let Some(name) = self.names.get(template) else {
            return Err(GameError::IndexOutOfRange {
                what: "tile template",
                index: template as i64,
                bound: self.names.len() as i64,
            });
        };
        let handle = HostHandle(self.issued);
        self.issued += 1;
        trace!(%address, template = %name, %handle, "Tile instantiated");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_handles() {
        let mut factory = TileTemplates::new().with_template("Grass");
        let a = factory.instantiate(0, GridAddress::new(0, 0)).unwrap();
        let b = factory.instantiate(0, GridAddress::new(0, 1)).unwrap();

        assert_ne!(a, b);
        assert_eq!(factory.issued(), 2);
    }

    #[test]
    fn test_unknown_template() {
        let mut factory = TileTemplates::new();
        assert_eq!(factory.template_count(), 0);
        let err = factory.instantiate(0, GridAddress::new(0, 0)).unwrap_err();
        assert!(matches!(err, GameError::IndexOutOfRange { .. }));
    }
}
