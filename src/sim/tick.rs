//! Round controller and per-frame simulation
//!
//! Three clocks drive the game: the spawn interval, the one-second
//! countdown, and the display's animation frame. Each handler below runs
//! to completion and re-checks the running flag, so a tick that was
//! already due when the round ended is a no-op.

use super::collision::drop_caught;
use super::droplet::{DropState, Droplet};
use super::state::{GameEvent, GameState, RoundOutcome, RoundPhase};
use crate::consts::COUNTDOWN_PERIOD_MS;
use crate::platform::{InputState, Layout};
use crate::settings::Difficulty;

/// Start a round. Ignored while a round is already running.
///
/// Starting from an ended round resets it first, same as `replay`.
pub fn start_round(state: &mut GameState, difficulty: Difficulty, now_ms: f64) -> bool {
    if state.is_running() {
        log::debug!("Start ignored: round already running");
        return false;
    }

    state.reset();
    state.round.difficulty = difficulty;
    state.round.phase = RoundPhase::Running;

    let spawn_interval = state.difficulty_settings().spawn_interval_ms;
    state.spawn_timer.start(spawn_interval, now_ms);
    state.countdown_timer.start(COUNTDOWN_PERIOD_MS, now_ms);

    state.push_event(GameEvent::RoundStarted { difficulty });
    log::info!(
        "Round started ({}, spawn every {}ms, seed {})",
        difficulty.as_str(),
        spawn_interval,
        state.seed
    );
    true
}

/// Return to the idle start screen from any phase
pub fn replay(state: &mut GameState) {
    state.reset();
    log::info!("Replay: round reset");
}

/// Replace the layout (window resize) and re-center the catcher
pub fn resize(state: &mut GameState, layout: Layout) {
    state.layout = layout;
    state.catcher.recenter(&state.layout);
}

/// Spawn interval handler
pub fn spawn_tick(state: &mut GameState, now_ms: f64) {
    if !state.is_running() {
        return;
    }

    let droplet = state.make_droplet(now_ms);
    let id = droplet.id;
    log::debug!(
        "Spawned {:?} #{} at x={:.0} (rotation {})",
        droplet.kind,
        id,
        droplet.spawn_x,
        droplet.rotation
    );
    state.push_event(GameEvent::DropSpawned {
        id,
        kind: droplet.kind,
    });
    state.droplets.push(droplet);
}

/// Countdown handler (once per second)
pub fn countdown_tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    state.round.time_left = state.round.time_left.saturating_sub(1);
    let time_left = state.round.time_left;
    state.push_event(GameEvent::CountdownTick { time_left });

    if time_left == 0 && state.round.lives > 0 {
        end_round(state, RoundOutcome::Win);
    }
}

/// Animation frame handler: move the catcher, then one pass over the
/// droplets resolving catches and expiries.
pub fn frame(state: &mut GameState, input: &InputState, now_ms: f64) {
    if !state.is_running() {
        return;
    }

    let speed = state.settings.catcher_speed;
    state.catcher.step(input, &state.layout, speed);
    let catcher_rect = state.catcher.rect(&state.layout);
    let container_height = state.layout.container_height;

    let mut i = 0;
    while i < state.droplets.len() {
        // A loss earlier in this pass freezes everything after it
        if !state.is_running() {
            break;
        }

        let droplet = &mut state.droplets[i];
        let landed = droplet.sample(now_ms, container_height);

        if drop_caught(&droplet.rect(), &catcher_rect) {
            let droplet = state.droplets.remove(i);
            resolve_catch(state, droplet);
        } else if landed {
            let mut droplet = state.droplets.remove(i);
            if droplet.finalize(DropState::Expired) {
                log::debug!("Droplet #{} reached the bottom", droplet.id);
                state.push_event(GameEvent::DropExpired { id: droplet.id });
            }
        } else {
            i += 1;
        }
    }
}

/// Resolve the live droplet `id` as caught. Returns false if there is no
/// such droplet or the round is not running.
pub fn catch_droplet(state: &mut GameState, id: u32) -> bool {
    if !state.is_running() {
        return false;
    }
    let Some(index) = state.droplets.iter().position(|d| d.id == id) else {
        return false;
    };
    let droplet = state.droplets.remove(index);
    resolve_catch(state, droplet)
}

/// Fire every timer tick due by `now_ms` in due-time order, then run the
/// animation frame.
pub fn advance(state: &mut GameState, input: &InputState, now_ms: f64) {
    loop {
        let spawn_due = state.spawn_timer.next_due().filter(|t| *t <= now_ms);
        let countdown_due = state.countdown_timer.next_due().filter(|t| *t <= now_ms);

        match (spawn_due, countdown_due) {
            (None, None) => break,
            (Some(spawn), Some(countdown)) if countdown <= spawn => {
                state.countdown_timer.take_due(now_ms);
                countdown_tick(state);
            }
            (Some(_), _) => {
                if let Some(due) = state.spawn_timer.take_due(now_ms) {
                    spawn_tick(state, due);
                }
            }
            (None, Some(_)) => {
                state.countdown_timer.take_due(now_ms);
                countdown_tick(state);
            }
        }
    }

    frame(state, input, now_ms);
}

fn resolve_catch(state: &mut GameState, mut droplet: Droplet) -> bool {
    if !droplet.finalize(DropState::Caught) {
        return false;
    }

    let kind = droplet.kind;
    if kind.is_good() {
        state.round.score += 1;
    } else if state.round.lives > 0 {
        state.round.lives -= 1;
    }
    log::debug!(
        "Caught {:?} #{} (score {}, lives {})",
        kind,
        droplet.id,
        state.round.score,
        state.round.lives
    );
    state.push_event(GameEvent::DropCaught {
        id: droplet.id,
        kind,
    });

    if !kind.is_good() && state.round.lives == 0 {
        end_round(state, RoundOutcome::Loss);
    }
    true
}

/// Stop both timers and freeze the remaining droplets where they are
fn end_round(state: &mut GameState, outcome: RoundOutcome) {
    if !state.is_running() {
        return;
    }
    state.spawn_timer.cancel();
    state.countdown_timer.cancel();
    state.round.phase = RoundPhase::Ended(outcome);

    let score = state.round.score;
    state.push_event(GameEvent::RoundEnded { outcome, score });
    log::info!(
        "Round ended: {:?} with score {} ({} droplets frozen)",
        outcome,
        score,
        state.droplets.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::droplet::DropKind;

    fn layout() -> Layout {
        // Catcher 100x50 at the floor of a 800x600 container: top 550
        Layout::new(800.0, 600.0, 100.0, 50.0, 1280.0)
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, Settings::default(), layout());
        assert!(start_round(&mut state, Difficulty::Normal, 0.0));
        state
    }

    /// A droplet whose bottom sits in the catch zone at `now_ms`
    fn droplet_in_mouth(state: &mut GameState, kind: DropKind, now_ms: f64) -> u32 {
        let id = state.next_entity_id();
        let catcher_x = state.catcher.x;
        // 60px droplet falling 660px over 6600ms: top = -60 + t/10
        // bottom at 560 (inside [550, 570]) when t = 5600
        let droplet = Droplet::new(id, kind, catcher_x + 10.0, 60.0, 0, 6600.0, now_ms - 5600.0);
        state.droplets.push(droplet);
        id
    }

    #[test]
    fn test_start_is_not_reentrant() {
        let mut state = running_state();
        state.round.score = 4;
        assert!(!start_round(&mut state, Difficulty::Hard, 10.0));
        assert_eq!(state.round.score, 4);
        assert_eq!(state.round.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_spawn_cadence_follows_difficulty() {
        let mut state = GameState::new(1, Settings::default(), layout());
        start_round(&mut state, Difficulty::Hard, 0.0);
        let input = InputState::default();
        advance(&mut state, &input, 749.0);
        assert!(state.droplets.is_empty());
        advance(&mut state, &input, 750.0);
        assert_eq!(state.droplets.len(), 1);
        assert_eq!(state.droplets[0].fall_duration_ms, 3000.0);
        advance(&mut state, &input, 1500.0);
        assert_eq!(state.droplets.len(), 2);
    }

    #[test]
    fn test_frame_catches_droplet_in_mouth() {
        let mut state = running_state();
        let id = droplet_in_mouth(&mut state, DropKind::Clean, 2000.0);
        frame(&mut state, &InputState::default(), 2000.0);
        assert_eq!(state.round.score, 1);
        assert!(state.droplet(id).is_none());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::DropCaught { id, kind: DropKind::Clean })
        );
    }

    #[test]
    fn test_frame_expires_missed_droplet() {
        let mut state = running_state();
        let id = state.next_entity_id();
        // Far left of the catcher; lands at 4000ms
        state
            .droplets
            .push(Droplet::new(id, DropKind::Dirty, 0.0, 60.0, 0, 4000.0, 0.0));
        let input = InputState::default();
        frame(&mut state, &input, 3999.0);
        assert_eq!(state.droplets.len(), 1);
        frame(&mut state, &input, 4000.0);
        assert!(state.droplets.is_empty());
        assert_eq!(state.round.lives, 3);
        assert_eq!(state.round.score, 0);
        assert!(state.drain_events().contains(&GameEvent::DropExpired { id }));
    }

    #[test]
    fn test_catch_twice_is_impossible() {
        let mut state = running_state();
        let id = droplet_in_mouth(&mut state, DropKind::Clean, 0.0);
        assert!(catch_droplet(&mut state, id));
        assert!(!catch_droplet(&mut state, id));
        frame(&mut state, &InputState::default(), 0.0);
        assert_eq!(state.round.score, 1);
    }

    #[test]
    fn test_loss_freezes_rest_of_frame() {
        let mut state = running_state();
        state.round.lives = 1;
        let now = 2000.0;
        let first = droplet_in_mouth(&mut state, DropKind::Fly, now);
        let second = droplet_in_mouth(&mut state, DropKind::Banana, now);
        let clean = droplet_in_mouth(&mut state, DropKind::Clean, now);
        frame(&mut state, &InputState::default(), now);

        assert_eq!(state.round.phase, RoundPhase::Ended(RoundOutcome::Loss));
        assert_eq!(state.round.lives, 0);
        assert_eq!(state.round.score, 0);
        assert!(state.droplet(first).is_none());
        // Frozen, still falling
        assert!(state.droplet(second).is_some_and(|d| d.is_falling()));
        assert!(state.droplet(clean).is_some());

        let ended = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RoundEnded { .. }))
            .count();
        assert_eq!(ended, 1);
        assert!(!state.spawn_timer.is_active());
        assert!(!state.countdown_timer.is_active());
    }

    #[test]
    fn test_frozen_droplets_do_not_move() {
        let mut state = running_state();
        state.round.lives = 1;
        let frozen = state.next_entity_id();
        state
            .droplets
            .push(Droplet::new(frozen, DropKind::Clean, 0.0, 60.0, 0, 4000.0, 0.0));
        frame(&mut state, &InputState::default(), 1000.0);
        let top = state.droplet(frozen).map(|d| d.top);

        let bad = droplet_in_mouth(&mut state, DropKind::Dirty, 1500.0);
        assert!(catch_droplet(&mut state, bad));
        assert!(!state.is_running());

        frame(&mut state, &InputState::default(), 9000.0);
        advance(&mut state, &InputState::default(), 20_000.0);
        assert_eq!(state.droplet(frozen).map(|d| d.top), top);
    }

    #[test]
    fn test_stray_countdown_tick_is_noop() {
        let mut state = running_state();
        state.round.lives = 1;
        let bad = droplet_in_mouth(&mut state, DropKind::SodaCan, 0.0);
        catch_droplet(&mut state, bad);
        let time_left = state.round.time_left;
        countdown_tick(&mut state);
        spawn_tick(&mut state, 500.0);
        assert_eq!(state.round.time_left, time_left);
        assert_eq!(state.droplets.len(), 0);
    }

    #[test]
    fn test_catcher_idle_when_not_running() {
        let mut state = GameState::new(1, Settings::default(), layout());
        let x = state.catcher.x;
        let input = InputState {
            left: true,
            right: false,
        };
        frame(&mut state, &input, 16.0);
        assert_eq!(state.catcher.x, x);

        start_round(&mut state, Difficulty::Easy, 0.0);
        frame(&mut state, &input, 16.0);
        assert_eq!(state.catcher.x, x - state.settings.catcher_speed);
    }

    #[test]
    fn test_resize_recenters_catcher() {
        let mut state = running_state();
        state.catcher.x = 0.0;
        resize(&mut state, Layout::new(400.0, 500.0, 80.0, 40.0, 400.0));
        assert_eq!(state.catcher.x, 160.0);
        assert!(state.layout.is_narrow());
    }

    #[test]
    fn test_advance_fires_countdown_before_spawn_at_same_time() {
        let mut state = running_state();
        advance(&mut state, &InputState::default(), 1000.0);
        let events = state.drain_events();
        let countdown = events
            .iter()
            .position(|e| matches!(e, GameEvent::CountdownTick { .. }));
        let spawn = events
            .iter()
            .position(|e| matches!(e, GameEvent::DropSpawned { .. }));
        assert!(countdown.is_some() && spawn.is_some());
        assert!(countdown < spawn);
        assert_eq!(state.round.time_left, 29);
    }
}
