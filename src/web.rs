//! Browser bindings
//!
//! The JavaScript side owns the canvas, the 3D scene and the frame loop.
//! Each frame it calls `tick(dt)`, reads the snapshot and debris poses, and
//! forwards clicks to `click()`. Everything it needs comes across as JSON.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::debris::DebrisField;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{DropOutcome, GameEngine, GamePhase, Oscillator};

/// WASM entry point: panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Stack Tower starting...");
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Pose of one falling piece, for the renderer
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DebrisPoseJson {
    id: u32,
    position: [f32; 3],
    rotation_x: f32,
    rotation_z: f32,
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    engine: GameEngine,
    oscillator: Oscillator,
    debris: DebrisField,
    settings: Settings,
    high_scores: HighScores,
    /// Seconds since the game was created
    clock: f64,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        let engine = GameEngine::new(seed);
        let oscillator = engine.oscillator();
        WebGame {
            engine,
            oscillator,
            debris: DebrisField::new(),
            settings: Settings::load(),
            high_scores: HighScores::load(),
            clock: 0.0,
        }
    }

    /// Advance the moving box and debris timeline by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        // Long stalls (background tab) should not teleport the box
        let dt = dt.clamp(0.0, 0.1);
        self.clock += f64::from(dt);

        if self.engine.phase() == GamePhase::Playing {
            self.oscillator.step(dt);
        }

        self.debris
            .sync(&self.engine.state().falling_pieces, self.clock);
        for id in self.debris.finished(self.clock) {
            self.engine.remove_falling_piece(id);
        }
    }

    /// Click/tap: start from idle, drop while playing, ignored after game over
    pub fn click(&mut self) {
        match self.engine.phase() {
            GamePhase::Idle => {
                self.engine.start();
                self.oscillator = self.engine.oscillator();
            }
            GamePhase::Playing => {
                let (x, z) = self.oscillator.drop_coords();
                match self.engine.drop(x, z) {
                    DropOutcome::Placed { .. } => {
                        self.oscillator = self.engine.oscillator();
                    }
                    DropOutcome::GameOver { score, .. } => self.record_score(score),
                    DropOutcome::Ignored => {}
                }
            }
            GamePhase::GameOver => {}
        }
    }

    /// Start a new run right away
    pub fn retry(&mut self) {
        self.engine.retry();
        self.oscillator = self.engine.oscillator();
        self.debris.sync(&[], self.clock);
    }

    /// Back to the title screen
    pub fn reset(&mut self) {
        self.engine.reset();
        self.oscillator = self.engine.oscillator();
        self.debris.sync(&[], self.clock);
    }

    /// Full `GameState` snapshot
    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(self.engine.state())
    }

    /// Center of the moving box as `[x, y, z]`
    pub fn moving_box_json(&self) -> Result<String, JsValue> {
        to_json(&self.oscillator.position().to_array())
    }

    /// Poses of all falling pieces at the current clock
    pub fn debris_json(&self) -> Result<String, JsValue> {
        let poses: Vec<DebrisPoseJson> = self
            .debris
            .poses(self.clock)
            .map(|(id, pose)| DebrisPoseJson {
                id,
                position: pose.position.to_array(),
                rotation_x: pose.rotation_x,
                rotation_z: pose.rotation_z,
            })
            .collect();
        to_json(&poses)
    }

    /// Events since the last call (landing effects, sound cues)
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        to_json(&self.engine.drain_events())
    }

    pub fn high_scores_json(&self) -> Result<String, JsValue> {
        to_json(&self.high_scores)
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        to_json(&self.settings)
    }

    /// Flip mute and persist it; returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        self.settings.save();
        muted
    }

    pub fn sfx_volume(&self) -> f32 {
        self.settings.effective_sfx_volume()
    }

    pub fn music_volume(&self) -> f32 {
        self.settings.effective_music_volume()
    }
}

impl WebGame {
    fn record_score(&mut self, score: u32) {
        let height = self.engine.state().height();
        if let Some(rank) = self
            .high_scores
            .add_score(score, height, js_sys::Date::now())
        {
            log::info!("New high score #{}: {} (height {})", rank, score, height);
            self.high_scores.save();
        }
    }
}
