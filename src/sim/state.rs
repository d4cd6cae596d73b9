//! Game state and core simulation types
//!
//! One owned struct holds everything a round touches: round counters, the
//! droplet collection, the spawn ledger, the catcher and both timers.
//! Handlers in `tick` mutate it by `&mut`; the front-end only reads it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catcher::Catcher;
use super::droplet::{DropKind, Droplet, spawn_droplet};
use super::ledger::RecentPositions;
use super::timer::Interval;
use crate::consts::*;
use crate::platform::Layout;
use crate::settings::{Difficulty, DifficultySettings, Settings};

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Countdown ran out with lives left
    Win,
    /// Lives ran out
    Loss,
}

/// Round lifecycle: Idle -> Running -> Ended -> (replay) -> Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Start overlay showing, nothing moves
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Round over; droplets frozen, summary showing
    Ended(RoundOutcome),
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { difficulty: Difficulty },
    DropSpawned { id: u32, kind: DropKind },
    DropCaught { id: u32, kind: DropKind },
    DropExpired { id: u32 },
    CountdownTick { time_left: u32 },
    RoundEnded { outcome: RoundOutcome, score: u32 },
}

/// Per-round counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub phase: RoundPhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub lives: u8,
    /// Seconds remaining
    pub time_left: u32,
}

impl Default for Round {
    fn default() -> Self {
        Self {
            phase: RoundPhase::Idle,
            difficulty: Difficulty::default(),
            score: 0,
            lives: STARTING_LIVES,
            time_left: ROUND_SECONDS,
        }
    }
}

impl Round {
    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    pub layout: Layout,
    pub round: Round,
    pub catcher: Catcher,
    /// Live droplets, in spawn order
    pub droplets: Vec<Droplet>,
    /// Recent spawn positions
    pub ledger: RecentPositions,
    pub spawn_timer: Interval,
    pub countdown_timer: Interval,
    /// Pending events for the presentation layer
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game
    pub fn new(seed: u64, settings: Settings, layout: Layout) -> Self {
        let spawn_period = settings.difficulty(Difficulty::default()).spawn_interval_ms;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            catcher: Catcher::centered(&layout),
            layout,
            round: Round::default(),
            droplets: Vec::new(),
            ledger: RecentPositions::new(),
            spawn_timer: Interval::new(spawn_period),
            countdown_timer: Interval::new(COUNTDOWN_PERIOD_MS),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build the next droplet for the current difficulty and layout
    pub fn make_droplet(&mut self, now_ms: f64) -> Droplet {
        let id = self.next_entity_id();
        let difficulty = self.difficulty_settings();
        spawn_droplet(
            id,
            &mut self.rng,
            &mut self.ledger,
            &self.layout,
            difficulty,
            now_ms,
        )
    }

    pub fn is_running(&self) -> bool {
        self.round.is_running()
    }

    /// Spawn cadence and fall duration for the current round
    pub fn difficulty_settings(&self) -> DifficultySettings {
        self.settings.difficulty(self.round.difficulty)
    }

    pub fn droplet(&self, id: u32) -> Option<&Droplet> {
        self.droplets.iter().find(|d| d.id == id)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Back to a fresh idle round: counters, droplets, ledger, timers and
    /// catcher position all reset. The RNG keeps its stream.
    pub fn reset(&mut self) {
        self.spawn_timer.cancel();
        self.countdown_timer.cancel();
        self.round = Round {
            difficulty: self.round.difficulty,
            ..Round::default()
        };
        self.droplets.clear();
        self.ledger.clear();
        self.catcher.recenter(&self.layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1, Settings::default(), Layout::default());
        assert_eq!(state.round.phase, RoundPhase::Idle);
        assert_eq!(state.round.score, 0);
        assert_eq!(state.round.lives, 3);
        assert_eq!(state.round.time_left, 30);
        assert!(state.droplets.is_empty());
        assert!(!state.spawn_timer.is_active());
        assert!(!state.countdown_timer.is_active());
        assert_eq!(state.catcher, Catcher::centered(&state.layout));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1, Settings::default(), Layout::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_drain_events() {
        let mut state = GameState::new(1, Settings::default(), Layout::default());
        state.push_event(GameEvent::DropExpired { id: 4 });
        assert_eq!(state.drain_events(), vec![GameEvent::DropExpired { id: 4 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_round_outcome() {
        let mut round = Round::default();
        assert_eq!(round.outcome(), None);
        round.phase = RoundPhase::Ended(RoundOutcome::Loss);
        assert_eq!(round.outcome(), Some(RoundOutcome::Loss));
        assert!(!round.is_running());
    }
}
