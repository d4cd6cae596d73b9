//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Container and catcher geometry (measured from the DOM on web)
//! - Keyboard input (held arrow keys)

pub mod input;

pub use input::InputState;

use crate::consts::NARROW_VIEWPORT_MAX;

/// Geometry of the play area, in container-relative pixels.
///
/// Measured by the front-end and replaced wholesale on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub container_width: f32,
    pub container_height: f32,
    pub catcher_width: f32,
    pub catcher_height: f32,
    /// Distance from the container top to the catcher top
    pub catcher_top: f32,
    /// Window width, selects the drop size bucket
    pub viewport_width: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(800.0, 600.0, 120.0, 90.0, 800.0)
    }
}

impl Layout {
    /// Layout with the catcher resting on the container floor
    pub fn new(
        container_width: f32,
        container_height: f32,
        catcher_width: f32,
        catcher_height: f32,
        viewport_width: f32,
    ) -> Self {
        Self {
            container_width,
            container_height,
            catcher_width,
            catcher_height,
            catcher_top: (container_height - catcher_height).max(0.0),
            viewport_width,
        }
    }

    /// Narrow viewports get the smaller drop sizes
    pub fn is_narrow(&self) -> bool {
        self.viewport_width <= NARROW_VIEWPORT_MAX
    }

    /// Rightmost x the catcher's left edge may take
    pub fn catcher_max_x(&self) -> f32 {
        (self.container_width - self.catcher_width).max(0.0)
    }
}
