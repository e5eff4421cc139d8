//! Presentation settings and preferences
//!
//! Persisted separately from progress under `SETTINGS_KEY`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{self, SETTINGS_KEY, Storage};

/// How quickly the games move along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Pace {
    /// Longer reveals for the youngest players
    Relaxed,
    #[default]
    Normal,
    Brisk,
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Relaxed => "Relaxed",
            Pace::Normal => "Normal",
            Pace::Brisk => "Brisk",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "slow" => Some(Pace::Relaxed),
            "normal" => Some(Pace::Normal),
            "brisk" | "fast" => Some(Pace::Brisk),
            _ => None,
        }
    }

    /// Multiplier (percent) applied to reveal and notice durations
    pub fn timing_percent(&self) -> u32 {
        match self {
            Pace::Relaxed => 200,
            Pace::Normal => 100,
            Pace::Brisk => 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pace: Pace,

    // === Timing (ms) ===
    /// How long a notice stays on screen
    pub notice_duration_ms: u32,
    /// How long a mismatched memory pair stays face up
    pub mismatch_reveal_ms: u32,
    /// Pause before the memory round-complete bonus
    pub celebration_delay_ms: u32,
    /// Pause between a puzzle swap and the redraw
    pub swap_settle_ms: u32,

    // === Puzzle ===
    /// Artwork cut into the 3×3 puzzle
    pub puzzle_image_url: String,
    /// Edge length of one puzzle tile (px)
    pub puzzle_tile_px: u32,

    // === Accessibility ===
    /// Skip decorative pauses (celebration, swap animation)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pace: Pace::Normal,

            notice_duration_ms: 3000,
            mismatch_reveal_ms: MISMATCH_REVEAL_MS,
            celebration_delay_ms: CELEBRATION_DELAY_MS,
            swap_settle_ms: SWAP_SETTLE_MS,

            puzzle_image_url: "https://i.imgur.com/vj7p1yL.jpeg".to_string(),
            puzzle_tile_px: 100,

            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn from_pace(pace: Pace) -> Self {
        Self {
            pace,
            ..Self::default()
        }
    }

    fn scaled(&self, ms: u32) -> u32 {
        ms.saturating_mul(self.pace.timing_percent()) / 100
    }

    /// Effective notice duration (scaled by pace)
    pub fn effective_notice_duration_ms(&self) -> u32 {
        self.scaled(self.notice_duration_ms)
    }

    /// Effective mismatch reveal (scaled by pace)
    pub fn effective_mismatch_reveal_ms(&self) -> u32 {
        self.scaled(self.mismatch_reveal_ms)
    }

    /// Effective celebration pause (respects reduced_motion)
    pub fn effective_celebration_delay_ms(&self) -> u32 {
        if self.reduced_motion {
            0
        } else {
            self.celebration_delay_ms
        }
    }

    /// Effective swap pause (respects reduced_motion)
    pub fn effective_swap_settle_ms(&self) -> u32 {
        if self.reduced_motion {
            0
        } else {
            self.swap_settle_ms
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json(storage, SETTINGS_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring saved settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match persistence::save_json(storage, SETTINGS_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}
