//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit millisecond clock passed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (droplets in spawn order)
//! - No rendering or platform dependencies

pub mod catcher;
pub mod collision;
pub mod droplet;
pub mod ledger;
pub mod state;
pub mod tick;
pub mod timer;

pub use catcher::Catcher;
pub use collision::{CatchZone, Rect, drop_caught};
pub use droplet::{DropKind, DropState, Droplet, spawn_droplet};
pub use ledger::{RecentPositions, SpawnPosition};
pub use state::{GameEvent, GameState, Round, RoundOutcome, RoundPhase};
pub use tick::{
    advance, catch_droplet, countdown_tick, frame, replay, resize, spawn_tick, start_round,
};
pub use timer::Interval;
