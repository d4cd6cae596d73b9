//! Sound effects for game events
//!
//! Which event makes which sound is plain logic and lives at the top; the
//! Web Audio player below it is procedural (oscillators only, no files) and
//! exists on wasm only.

use serde::{Deserialize, Serialize};

use crate::settings::RoundEndCues;
use crate::sim::{GameEvent, RoundOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Clean drop caught
    Catch,
    /// Bad drop caught (a life lost)
    Miss,
    /// Countdown finished with lives left
    RoundWin,
    /// Lives ran out
    RoundLoss,
}

/// Sound to play for an event, if any
pub fn cue_for_event(event: &GameEvent, cues: &RoundEndCues) -> Option<SoundEffect> {
    match event {
        GameEvent::DropCaught { kind, .. } if kind.is_good() => Some(SoundEffect::Catch),
        GameEvent::DropCaught { .. } => Some(SoundEffect::Miss),
        GameEvent::RoundEnded {
            outcome: RoundOutcome::Win,
            ..
        } => cues.win,
        GameEvent::RoundEnded {
            outcome: RoundOutcome::Loss,
            ..
        } => cues.loss,
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_volume(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Play a sound effect; fire and forget
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Catch => self.play_catch(ctx, vol),
                SoundEffect::Miss => self.play_miss(ctx, vol),
                SoundEffect::RoundWin => self.play_round_win(ctx, vol),
                SoundEffect::RoundLoss => self.play_round_loss(ctx, vol),
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// One decaying note starting `delay` seconds from now
        fn note(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            gain_level: f32,
            delay: f64,
            length: f64,
        ) {
            if let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(gain_level, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + length)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + length + 0.05).ok();
            }
        }

        /// Catch - bright water "plink" sliding up
        fn play_catch(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(700.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1400.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        /// Miss - low buzz
        fn play_miss(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.25)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Round win - rising fanfare
        fn play_round_win(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                self.note(ctx, *freq, OscillatorType::Triangle, vol * 0.3, i as f64 * 0.1, 0.4);
            }
        }

        /// Round loss - sad descending
        fn play_round_loss(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                self.note(ctx, *freq, OscillatorType::Sine, vol * 0.3, i as f64 * 0.2, 0.3);
            }
        }
    }
}
