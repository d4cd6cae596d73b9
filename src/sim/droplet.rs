//! Falling droplets and the factory that spawns them

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::ledger::RecentPositions;
use crate::consts::*;
use crate::platform::Layout;
use crate::settings::DifficultySettings;

/// What fell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropKind {
    /// Clean water - the only good drop
    Clean,
    Banana,
    Dirty,
    Fly,
    SodaCan,
}

impl DropKind {
    /// The bad kinds, equally likely among themselves
    pub const BAD: [DropKind; 4] = [
        DropKind::Banana,
        DropKind::Dirty,
        DropKind::Fly,
        DropKind::SodaCan,
    ];

    pub fn is_good(&self) -> bool {
        *self == DropKind::Clean
    }

    /// Kinds drawn at a random angle
    pub fn is_rotated(&self) -> bool {
        matches!(self, DropKind::Banana | DropKind::Fly | DropKind::SodaCan)
    }

    /// Diameter in pixels for the viewport bucket
    pub fn size(&self, narrow: bool) -> f32 {
        match (self, narrow) {
            (DropKind::Banana, true) => BANANA_SIZE_NARROW,
            (DropKind::Banana, false) => BANANA_SIZE_WIDE,
            (_, true) => DROP_SIZE_NARROW,
            (_, false) => DROP_SIZE_WIDE,
        }
    }

    /// Sprite path
    pub fn image(&self) -> &'static str {
        match self {
            DropKind::Clean => "img/CleanDrop.svg",
            DropKind::Banana => "img/Banana.svg",
            DropKind::Dirty => "img/DirtyDrop.svg",
            DropKind::Fly => "img/Fly.svg",
            DropKind::SodaCan => "img/SodaCan.svg",
        }
    }

    /// Alt text
    pub fn label(&self) -> &'static str {
        match self {
            DropKind::Clean => "Clean Drop",
            DropKind::Banana => "Banana",
            DropKind::Dirty => "Dirty Drop",
            DropKind::Fly => "Fly",
            DropKind::SodaCan => "Soda Can",
        }
    }

    /// Weighted draw: 70% clean, 7.5% for each bad kind
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        if rng.random::<f64>() < CLEAN_DROP_CHANCE {
            DropKind::Clean
        } else {
            Self::BAD[rng.random_range(0..Self::BAD.len())]
        }
    }
}

/// Lifecycle of a droplet. Caught and Expired are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropState {
    Falling,
    Caught,
    Expired,
}

/// A falling droplet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Droplet {
    pub id: u32,
    pub kind: DropKind,
    /// Left edge, fixed at spawn
    pub spawn_x: f32,
    /// Diameter
    pub size: f32,
    /// Sprite rotation in degrees (0 for unrotated kinds)
    pub rotation: u16,
    pub fall_duration_ms: f64,
    pub spawned_at_ms: f64,
    /// Last sampled top edge; stays put once the round freezes
    pub top: f32,
    pub state: DropState,
}

impl Droplet {
    /// New droplet just above the container
    pub fn new(
        id: u32,
        kind: DropKind,
        spawn_x: f32,
        size: f32,
        rotation: u16,
        fall_duration_ms: f64,
        spawned_at_ms: f64,
    ) -> Self {
        Self {
            id,
            kind,
            spawn_x,
            size,
            rotation,
            fall_duration_ms,
            spawned_at_ms,
            top: -size,
            state: DropState::Falling,
        }
    }

    /// Fraction of the fall completed at `now_ms`, in [0, 1]
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.fall_duration_ms <= 0.0 {
            return 1.0;
        }
        (((now_ms - self.spawned_at_ms) / self.fall_duration_ms) as f32).clamp(0.0, 1.0)
    }

    /// Top edge at `now_ms`: linear from `-size` to `container_height`
    pub fn top_at(&self, now_ms: f64, container_height: f32) -> f32 {
        -self.size + (container_height + self.size) * self.progress(now_ms)
    }

    /// Move to the position for `now_ms`; returns true once the fall is over
    pub fn sample(&mut self, now_ms: f64, container_height: f32) -> bool {
        self.top = self.top_at(now_ms, container_height);
        self.progress(now_ms) >= 1.0
    }

    /// Bounding box at the last sampled position
    pub fn rect(&self) -> Rect {
        Rect::new(self.spawn_x, self.top, self.size, self.size)
    }

    pub fn is_falling(&self) -> bool {
        self.state == DropState::Falling
    }

    /// Leave the Falling state. Returns false (and changes nothing) if the
    /// droplet was already finalized.
    pub fn finalize(&mut self, state: DropState) -> bool {
        if !self.is_falling() || state == DropState::Falling {
            return false;
        }
        self.state = state;
        true
    }
}

/// Build a droplet of a random kind at a sampled position
pub fn spawn_droplet<R: Rng>(
    id: u32,
    rng: &mut R,
    ledger: &mut RecentPositions,
    layout: &Layout,
    difficulty: DifficultySettings,
    now_ms: f64,
) -> Droplet {
    let kind = DropKind::roll(rng);
    let size = kind.size(layout.is_narrow());
    let position = ledger.sample(rng, layout.container_width, size, now_ms);
    if !position.clear {
        log::debug!(
            "Droplet {} spawned near a recent drop after {} attempts",
            id,
            position.attempts
        );
    }
    let rotation = if kind.is_rotated() {
        rng.random_range(0..360u16)
    } else {
        0
    };

    Droplet::new(
        id,
        kind,
        position.x,
        size,
        rotation,
        difficulty.fall_duration_ms,
        now_ms,
    )
}
