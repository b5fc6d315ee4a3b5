//! Player preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// All sound off
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (skip landing flashes, keep debris short)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "stack_tower_settings";

    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Gain for sound effects (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Gain for background music (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Whether landing flashes should play
    pub fn landing_effects(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from LocalStorage (defaults on native)
    pub fn load() -> Self {
        storage::load_or_default(Self::STORAGE_KEY)
    }

    /// Save settings to LocalStorage (no-op on native)
    pub fn save(&self) {
        storage::save_or_warn(Self::STORAGE_KEY, self);
    }
}
