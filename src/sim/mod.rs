//! Deterministic game-state engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Transitions are total functions of (state, input)
//! - Seeded RNG only (debris spin)
//! - No timers, rendering or platform dependencies

pub mod engine;
pub mod geometry;
pub mod oscillator;
pub mod state;

pub use engine::{DropOutcome, GameEngine};
pub use geometry::{CutSide, DropGeometry, Span, resolve_drop};
pub use oscillator::Oscillator;
pub use state::{
    Axis, DropQuality, FallingPiece, GameEvent, GamePhase, GameState, StackedBox,
};
