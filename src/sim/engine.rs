//! Game engine: the only writer of `GameState`
//!
//! Every operation builds a brand-new snapshot from the previous one and
//! swaps it in, so a reader holding an old snapshot never sees a partial
//! transition.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::resolve_drop;
use super::oscillator::Oscillator;
use super::state::{
    Axis, DropQuality, FallingPiece, GameEvent, GamePhase, GameState, StackedBox,
};
use crate::consts::BOX_HEIGHT;
use crate::error::EngineError;
use crate::tuning::Tuning;

/// What a call to `drop` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Not playing; nothing changed
    Ignored,
    /// A new box joined the tower
    Placed {
        box_id: u32,
        quality: DropQuality,
        /// Cut-off remainder, if one was big enough to spawn
        piece_id: Option<u32>,
        points: u32,
    },
    /// Overlap was below the game-over threshold; the run ended
    GameOver { score: u32, new_best: bool },
}

/// Owns the authoritative game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    tuning: Tuning,
    /// Seeded so a session replays identically, debris spin included
    rng: Pcg32,
    /// Pending presentation events (drained by the host each frame)
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create an engine with default tuning
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(),
            tuning: Tuning::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Create an engine with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, EngineError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            ..Self::new(seed)
        })
    }

    /// Current snapshot
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Sweep for the box that is about to be dropped
    pub fn oscillator(&self) -> Oscillator {
        Oscillator::for_state(&self.state, &self.tuning)
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Idle -> Playing. Returns false (and does nothing) in any other phase.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }
        self.state = GameState {
            phase: GamePhase::Playing,
            ..self.state.clone()
        };
        self.events.push(GameEvent::Started);
        log::info!("Game started");
        true
    }

    /// Drop the moving box at its current world position.
    ///
    /// Only the coordinate on the current sweep axis matters; the box is
    /// aligned with the tower on the other one. Ignored unless playing.
    pub fn drop(&mut self, moving_x: f32, moving_z: f32) -> DropOutcome {
        if self.state.phase != GamePhase::Playing {
            return DropOutcome::Ignored;
        }

        let (next, outcome) = drop_box(&self.state, moving_x, moving_z, &self.tuning, &mut self.rng);
        self.state = next;

        match outcome {
            DropOutcome::Placed {
                box_id,
                quality,
                piece_id,
                points,
            } => {
                log::debug!(
                    "Placed box {} ({:?}, +{}, piece {:?}), score {}",
                    box_id,
                    quality,
                    points,
                    piece_id,
                    self.state.score
                );
                self.events.push(GameEvent::Placed { box_id, quality });
            }
            DropOutcome::GameOver { score, new_best } => {
                log::info!(
                    "Game over at height {} with score {} (best {})",
                    self.state.height(),
                    score,
                    self.state.best_score
                );
                self.events.push(GameEvent::GameOver { score, new_best });
            }
            DropOutcome::Ignored => {}
        }

        outcome
    }

    /// Like `drop`, but reports a wrong-phase call as an error
    pub fn try_drop(&mut self, moving_x: f32, moving_z: f32) -> Result<DropOutcome, EngineError> {
        if self.state.phase != GamePhase::Playing {
            return Err(EngineError::InvalidPhase {
                expected: GamePhase::Playing,
                actual: self.state.phase,
            });
        }
        Ok(self.drop(moving_x, moving_z))
    }

    /// Forget a falling piece once its animation is done. Unknown IDs are ignored.
    pub fn remove_falling_piece(&mut self, id: u32) -> bool {
        if !self.state.falling_pieces.iter().any(|p| p.id == id) {
            return false;
        }
        self.state = GameState {
            falling_pieces: self
                .state
                .falling_pieces
                .iter()
                .filter(|p| p.id != id)
                .cloned()
                .collect(),
            ..self.state.clone()
        };
        true
    }

    /// Back to Idle with a fresh tower; keeps the best score
    pub fn reset(&mut self) {
        self.state = GameState::reset_from(&self.state);
        self.events.push(GameEvent::Reset);
        log::info!("Game reset (best {})", self.state.best_score);
    }

    /// Reset and start playing immediately
    pub fn retry(&mut self) {
        self.reset();
        self.start();
    }
}

/// Compute the state after dropping the moving box at (`moving_x`, `moving_z`).
///
/// Assumes `prev` is playing.
fn drop_box(
    prev: &GameState,
    moving_x: f32,
    moving_z: f32,
    tuning: &Tuning,
    rng: &mut Pcg32,
) -> (GameState, DropOutcome) {
    let top = prev.top();
    let axis = prev.current_axis;
    let moving_center = axis.component(Vec3::new(moving_x, 0.0, moving_z));
    let geometry = resolve_drop(top, axis, moving_center, prev.current_extent());

    if geometry.is_miss(tuning.game_over_threshold) {
        // A tie with the best still counts as a new best
        let new_best = prev.score > 0 && prev.score >= prev.best_score;
        let next = GameState {
            phase: GamePhase::GameOver,
            best_score: prev.score.max(prev.best_score),
            last_drop_perfect: false,
            last_drop_quality: None,
            ..prev.clone()
        };
        let outcome = DropOutcome::GameOver {
            score: prev.score,
            new_best,
        };
        return (next, outcome);
    }

    let perfect = geometry.is_perfect(tuning.perfect_threshold);
    let quality = if perfect {
        DropQuality::Perfect
    } else if geometry.overlap_ratio() >= tuning.good_ratio {
        DropQuality::Good
    } else {
        DropQuality::Okay
    };

    let mut next = prev.clone();
    let hue = prev.next_hue(tuning.hue_step);
    let y = top.center.y + BOX_HEIGHT;

    // Static axis: aligned with the top box, size carried over.
    // Perfect drops copy the top box exactly.
    let (placed_center, placed_size) = if perfect {
        (axis.component(top.center), top.extent(axis))
    } else {
        (geometry.overlap.center(), geometry.overlap_length())
    };
    let mut center = top.center;
    center.y = y;
    center = axis.with_component(center, placed_center);
    let (width, depth) = match axis {
        Axis::X => (placed_size, prev.current_box_depth),
        Axis::Z => (prev.current_box_width, placed_size),
    };

    let box_id = next.next_entity_id();
    next.stack.push(StackedBox {
        id: box_id,
        center,
        width,
        depth,
        hue,
    });

    let mut piece_id = None;
    if !perfect && geometry.cut > tuning.min_debris_size {
        let cut = geometry.cut_span();
        let (piece_width, piece_depth) = match axis {
            Axis::X => (cut.length(), prev.current_box_depth),
            Axis::Z => (prev.current_box_width, cut.length()),
        };
        let rotation_speed = if tuning.max_debris_spin > 0.0 {
            rng.random_range(-tuning.max_debris_spin..tuning.max_debris_spin)
        } else {
            0.0
        };
        let id = next.next_entity_id();
        next.falling_pieces.push(FallingPiece {
            id,
            center: axis.with_component(center, cut.center()),
            width: piece_width,
            depth: piece_depth,
            hue,
            rotation_speed,
        });
        piece_id = Some(id);
    }

    let points = if perfect {
        tuning.perfect_points
    } else {
        tuning.landing_points
    };
    next.score = prev.score + points;
    next.current_hue = hue;
    next.current_box_width = width;
    next.current_box_depth = depth;
    next.current_axis = axis.flip();
    next.last_drop_perfect = perfect;
    next.last_drop_quality = Some(quality);

    let outcome = DropOutcome::Placed {
        box_id,
        quality,
        piece_id,
        points,
    };
    (next, outcome)
}
