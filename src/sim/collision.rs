//! Collision detection between drops and the catcher
//!
//! Everything is an axis-aligned box in container coordinates (y grows
//! downward). The catcher only accepts drops through its mouth: the top 40%
//! of its height and the left 80% of its width.

use glam::Vec2;

use crate::consts::{CATCH_ZONE_DEPTH, CATCH_ZONE_WIDTH};

/// Axis-aligned rectangle (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(left + width, top + height),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// The part of the catcher that can actually catch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchZone {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl CatchZone {
    pub fn from_catcher(catcher: &Rect) -> Self {
        let size = catcher.size();
        Self {
            left: catcher.left(),
            right: catcher.left() + CATCH_ZONE_WIDTH * size.x,
            top: catcher.top(),
            bottom: catcher.top() + CATCH_ZONE_DEPTH * size.y,
        }
    }

    /// A drop is caught when it overlaps the zone horizontally and its
    /// bottom edge lies inside the zone's vertical band (inclusive).
    pub fn catches(&self, drop: &Rect) -> bool {
        let horizontal = drop.right() > self.left && drop.left() < self.right;
        let vertical = drop.bottom() >= self.top && drop.bottom() <= self.bottom;
        horizontal && vertical
    }
}

/// Check whether `drop` is caught by the catcher occupying `catcher`
pub fn drop_caught(drop: &Rect, catcher: &Rect) -> bool {
    CatchZone::from_catcher(catcher).catches(drop)
}
