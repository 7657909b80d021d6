//! Viewport measurements supplied by the layout pass.

use serde::{Deserialize, Serialize};

/// Pixel measurements the layout collaborator hands to the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Measured toolbar height; the collapsed card sits right below it.
    pub toolbar_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, toolbar_height: f32) -> Self {
        Self {
            width,
            height,
            toolbar_height,
        }
    }

    /// Horizontal offset of the fully opened drawer.
    pub fn drawer_open_offset(&self, open_fraction: f32) -> f32 {
        self.width * open_fraction
    }

    /// Vertical offset of the collapsed card.
    pub fn card_collapsed_offset(&self) -> f32 {
        self.toolbar_height
    }

    /// Vertical offset of the expanded card.
    pub fn card_expanded_offset(&self, expanded_ratio: f32) -> f32 {
        self.toolbar_height * expanded_ratio
    }
}
