//! Stack Tower - A 3D stack-the-blocks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game-state engine (drop geometry, scoring, phases)
//! - `tuning`: Data-driven game balance
//! - `debris`: Display-only animation of cut-off pieces
//! - `highscores` / `settings`: Persisted player data
//! - `storage`: LocalStorage JSON helpers (no-op on native)
//! - `web`: wasm-bindgen facade for a JavaScript renderer

pub mod debris;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod storage;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{EngineError, StorageError};
pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::{GameEngine, GameState};
pub use tuning::Tuning;

/// Fixed tower geometry
pub mod consts {
    /// Every box is one unit tall
    pub const BOX_HEIGHT: f32 = 1.0;
    /// Vertical center of the base platform
    pub const BASE_Y: f32 = 0.5;
    /// Footprint of the base platform and of the first moving box
    pub const INITIAL_WIDTH: f32 = 2.0;
    pub const INITIAL_DEPTH: f32 = 2.0;
    /// Hue of the base platform
    pub const BASE_HUE: u16 = 200;
    /// Hue the first session starts from (the first placed box is one step past it)
    pub const START_HUE: u16 = 220;
}

/// Advance a hue by `step` degrees, wrapping into [0, 360)
#[inline]
pub fn advance_hue(hue: u16, step: u16) -> u16 {
    ((u32::from(hue) + u32::from(step)) % 360) as u16
}
