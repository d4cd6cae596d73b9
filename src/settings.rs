//! Game settings and difficulty presets
//!
//! Everything here is plain data; the browser front-end may override the
//! defaults with a JSON document embedded in the page.

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::consts::CATCHER_SPEED;

/// Difficulty presets selectable from the start overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Spawn cadence and fall speed for one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Time between drop spawns
    pub spawn_interval_ms: f64,
    /// Time for a drop to fall the full container height
    pub fall_duration_ms: f64,
}

/// Difficulty lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: DifficultySettings,
    pub normal: DifficultySettings,
    pub hard: DifficultySettings,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultySettings {
                spawn_interval_ms: 1200.0,
                fall_duration_ms: 5000.0,
            },
            normal: DifficultySettings {
                spawn_interval_ms: 1000.0,
                fall_duration_ms: 4000.0,
            },
            hard: DifficultySettings {
                spawn_interval_ms: 750.0,
                fall_duration_ms: 3000.0,
            },
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> DifficultySettings {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Which sound plays at the end of a round.
///
/// Win and loss are configured separately so a lost round can sound
/// different from a finished one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundEndCues {
    pub win: Option<SoundEffect>,
    pub loss: Option<SoundEffect>,
}

impl Default for RoundEndCues {
    fn default() -> Self {
        Self {
            win: Some(SoundEffect::RoundWin),
            loss: Some(SoundEffect::RoundLoss),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spawn cadence and fall duration per difficulty
    pub difficulties: DifficultyTable,
    /// Catcher movement per frame
    pub catcher_speed: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// End-of-round sounds
    pub round_end_cues: RoundEndCues,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulties: DifficultyTable::default(),
            catcher_speed: CATCHER_SPEED,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            round_end_cues: RoundEndCues::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse settings from JSON, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from JSON");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Settings for the given difficulty
    pub fn difficulty(&self, difficulty: Difficulty) -> DifficultySettings {
        self.difficulties.get(difficulty)
    }

    /// Effective sound effect volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str(" normal "), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_harder_is_faster() {
        let table = DifficultyTable::default();
        let easy = table.get(Difficulty::Easy);
        let normal = table.get(Difficulty::Normal);
        let hard = table.get(Difficulty::Hard);
        assert!(easy.spawn_interval_ms > normal.spawn_interval_ms);
        assert!(normal.spawn_interval_ms > hard.spawn_interval_ms);
        assert!(easy.fall_duration_ms > normal.fall_duration_ms);
        assert!(normal.fall_duration_ms > hard.fall_duration_ms);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(
            r#"{ "muted": true, "difficulties": { "hard": { "spawn_interval_ms": 500, "fall_duration_ms": 2000 } } }"#,
        )
        .unwrap();
        assert!(settings.muted);
        assert_eq!(settings.effective_volume(), 0.0);
        assert_eq!(settings.difficulty(Difficulty::Hard).spawn_interval_ms, 500.0);
        assert_eq!(
            settings.difficulty(Difficulty::Easy),
            DifficultyTable::default().easy
        );
        assert_eq!(settings.catcher_speed, CATCHER_SPEED);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(Settings::from_json("{ nope").is_err());
        let settings = Settings::from_json_or_default("{ nope");
        assert_eq!(settings.difficulties, DifficultyTable::default());
    }

    #[test]
    fn test_round_end_cues_are_independent() {
        let settings = Settings::from_json(r#"{ "round_end_cues": { "loss": null } }"#).unwrap();
        assert_eq!(settings.round_end_cues.win, Some(SoundEffect::RoundWin));
        assert_eq!(settings.round_end_cues.loss, None);
    }
}
