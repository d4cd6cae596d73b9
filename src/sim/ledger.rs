//! Spawn position sampling
//!
//! Drops spawned close together in time should not overlap visually. Every
//! accepted x position is remembered for a short while and new candidates
//! too close to a remembered one are redrawn, up to a fixed attempt budget.

use rand::Rng;

use crate::consts::{MAX_SPAWN_ATTEMPTS, MIN_DROP_DISTANCE, RECENT_DROP_TTL_MS};

/// A remembered spawn position
#[derive(Debug, Clone, Copy, PartialEq)]
struct RecentPosition {
    x: f32,
    expires_at_ms: f64,
}

/// Short-lived record of recent spawn positions
#[derive(Debug, Clone, Default)]
pub struct RecentPositions {
    entries: Vec<RecentPosition>,
}

/// Outcome of sampling a spawn position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPosition {
    pub x: f32,
    /// Number of candidates drawn (1..=MAX_SPAWN_ATTEMPTS)
    pub attempts: u32,
    /// False when the attempt budget ran out and `x` is too close to a
    /// recent drop
    pub clear: bool,
}

impl RecentPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop entries whose time-to-live has passed
    pub fn prune(&mut self, now_ms: f64) {
        self.entries.retain(|e| e.expires_at_ms > now_ms);
    }

    /// Remember `x` until `now_ms + RECENT_DROP_TTL_MS`
    pub fn insert(&mut self, x: f32, now_ms: f64) {
        self.entries.push(RecentPosition {
            x,
            expires_at_ms: now_ms + RECENT_DROP_TTL_MS,
        });
    }

    /// Is `x` at least `MIN_DROP_DISTANCE` from every live entry?
    pub fn is_clear(&self, x: f32) -> bool {
        self.entries
            .iter()
            .all(|e| (e.x - x).abs() >= MIN_DROP_DISTANCE)
    }

    /// Live positions, oldest first
    pub fn positions(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|e| e.x)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pick a spawn x in `[0, container_width - size]` away from recent
    /// drops, and remember it.
    ///
    /// Gives up after `MAX_SPAWN_ATTEMPTS` draws and keeps the last candidate.
    pub fn sample<R: Rng>(
        &mut self,
        rng: &mut R,
        container_width: f32,
        size: f32,
        now_ms: f64,
    ) -> SpawnPosition {
        self.prune(now_ms);

        let span = (container_width - size).max(0.0);
        let mut attempts = 0;
        let (x, clear) = loop {
            let candidate = rng.random::<f32>() * span;
            attempts += 1;
            let clear = self.is_clear(candidate);
            if clear || attempts >= MAX_SPAWN_ATTEMPTS {
                break (candidate, clear);
            }
        };

        self.insert(x, now_ms);
        SpawnPosition { x, attempts, clear }
    }
}
