//! The player-controlled catcher

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::platform::{InputState, Layout};

/// Horizontal position of the catcher's left edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Catcher {
    pub x: f32,
}

impl Catcher {
    /// Catcher centered in the container
    pub fn centered(layout: &Layout) -> Self {
        let mut catcher = Self { x: 0.0 };
        catcher.recenter(layout);
        catcher
    }

    pub fn recenter(&mut self, layout: &Layout) {
        self.x = layout.catcher_max_x() / 2.0;
    }

    /// Advance one animation frame
    pub fn step(&mut self, input: &InputState, layout: &Layout, speed: f32) {
        self.x = (self.x + input.direction() * speed).clamp(0.0, layout.catcher_max_x());
    }

    pub fn rect(&self, layout: &Layout) -> Rect {
        Rect::new(
            self.x,
            layout.catcher_top,
            layout.catcher_width,
            layout.catcher_height,
        )
    }
}
