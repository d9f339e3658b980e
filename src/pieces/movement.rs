//! Queued movement steps.

use serde::{Deserialize, Serialize};

use crate::core::Vec3;
use crate::grid::GridAddress;

/// One leg of a piece's movement queue.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementStep {
    pub target: Vec3,
    /// Tile this step lands on, if any.
    pub tile: Option<GridAddress>,
    pub smooth_time: f32,
    pub max_speed: f32,
    /// Occupy `tile` on arrival.
    pub occupy_on_arrival: bool,
    /// Tell the owning player when this step arrives.
    pub notify_on_arrival: bool,
}

impl MovementStep {
    /// A silent step to `target` that touches no tile.
    #[must_use]
    pub fn new(target: Vec3, smooth_time: f32, max_speed: f32) -> Self {
        Self {
            target,
            tile: None,
            smooth_time,
            max_speed,
            occupy_on_arrival: false,
            notify_on_arrival: false,
        }
    }

    /// Occupy `tile` when this step arrives.
    #[must_use]
    pub fn occupying(mut self, tile: GridAddress) -> Self {
        self.tile = Some(tile);
        self.occupy_on_arrival = true;
        self
    }

    #[must_use]
    pub fn notifying(mut self) -> Self {
        self.notify_on_arrival = true;
        self
    }
}
