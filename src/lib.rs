//! Drop Catch - A falling-drop catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, collisions, round state)
//! - `platform`: Layout and keyboard input abstraction
//! - `settings`: Difficulty table and audio preferences
//! - `audio`: Sound effects for game events (Web Audio on wasm)

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, DifficultySettings, Settings};

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const ROUND_SECONDS: u32 = 30;
    /// Lives at the start of a round
    pub const STARTING_LIVES: u8 = 3;
    /// Countdown period (one tick per second)
    pub const COUNTDOWN_PERIOD_MS: f64 = 1000.0;

    /// Catcher movement per animation frame while a key is held
    pub const CATCHER_SPEED: f32 = 8.0;
    /// Fraction of the catcher height (from its top) that counts as the mouth
    pub const CATCH_ZONE_DEPTH: f32 = 0.4;
    /// Fraction of the catcher width (from its left) that can catch drops
    pub const CATCH_ZONE_WIDTH: f32 = 0.8;

    /// Probability that a spawned drop is clean
    pub const CLEAN_DROP_CHANCE: f64 = 0.7;
    /// Viewports at or below this width use the small drop sizes
    pub const NARROW_VIEWPORT_MAX: f32 = 576.0;
    /// Drop diameters (narrow viewport)
    pub const DROP_SIZE_NARROW: f32 = 52.0;
    pub const BANANA_SIZE_NARROW: f32 = 78.0;
    /// Drop diameters (wide viewport)
    pub const DROP_SIZE_WIDE: f32 = 60.0;
    pub const BANANA_SIZE_WIDE: f32 = 90.0;

    /// Minimum horizontal distance between drops spawned close together
    pub const MIN_DROP_DISTANCE: f32 = 80.0;
    /// How long a spawn position blocks its neighbourhood
    pub const RECENT_DROP_TTL_MS: f64 = 1000.0;
    /// Redraws allowed before accepting an overlapping position
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10;
}
