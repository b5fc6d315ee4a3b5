//! Moving box sweep
//!
//! The box bounces linearly between `pivot - amplitude` and
//! `pivot + amplitude` on its sweep axis (a triangle wave, not a sine), and
//! sits on the pivot on the other axis. The engine never reads this: callers
//! pass whatever position they show to `drop`, which keeps the engine testable
//! with synthetic coordinates.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Axis, GameState};
use crate::consts::BOX_HEIGHT;
use crate::tuning::Tuning;

/// Triangle-wave sweep of the moving box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub axis: Axis,
    /// Sweep center; also the box position on the static axis
    pub pivot: Vec3,
    pub amplitude: f32,
    /// Units per second
    pub speed: f32,
    /// Signed distance from the pivot, [-amplitude, amplitude]
    offset: f32,
    /// +1 toward the high bound, -1 toward the low bound
    direction: f32,
}

impl Oscillator {
    /// Start at the low bound, heading toward the high bound
    pub fn new(axis: Axis, pivot: Vec3, amplitude: f32, speed: f32) -> Self {
        Self {
            axis,
            pivot,
            amplitude,
            speed,
            offset: -amplitude,
            direction: 1.0,
        }
    }

    /// Sweep for the next box of `state`: one box above the top, pivoting on
    /// its center
    pub fn for_state(state: &GameState, tuning: &Tuning) -> Self {
        let top = state.top();
        let pivot = top.center + Vec3::Y * BOX_HEIGHT;
        Self::new(
            state.current_axis,
            pivot,
            tuning.oscillator_amplitude,
            tuning.oscillator_speed,
        )
    }

    /// Advance by `dt` seconds. Reaching a bound stops the box there and
    /// turns it around.
    pub fn step(&mut self, dt: f32) {
        let next = self.offset + self.direction * self.speed * dt;
        if next >= self.amplitude {
            self.offset = self.amplitude;
            self.direction = -1.0;
        } else if next <= -self.amplitude {
            self.offset = -self.amplitude;
            self.direction = 1.0;
        } else {
            self.offset = next;
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Signed distance from the pivot along the sweep axis
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current world position of the moving box center
    pub fn position(&self) -> Vec3 {
        let along = self.axis.component(self.pivot) + self.offset;
        self.axis.with_component(self.pivot, along)
    }

    /// Position `t` seconds into an unbroken sweep from the low bound.
    ///
    /// `step` follows this exactly as long as every bound is reached on a
    /// step boundary; a step that would overshoot stops at the bound instead.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let offset = if self.amplitude > 0.0 {
            let travel = (self.speed * t.max(0.0)).rem_euclid(4.0 * self.amplitude);
            if travel <= 2.0 * self.amplitude {
                travel - self.amplitude
            } else {
                3.0 * self.amplitude - travel
            }
        } else {
            0.0
        };
        let along = self.axis.component(self.pivot) + offset;
        self.axis.with_component(self.pivot, along)
    }

    /// The (x, z) pair to hand to `GameEngine::drop`
    pub fn drop_coords(&self) -> (f32, f32) {
        let p = self.position();
        (p.x, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameEngine;

    fn sweep() -> Oscillator {
        Oscillator::new(Axis::X, Vec3::new(0.0, 1.5, 0.0), 4.0, 6.0)
    }

    #[test]
    fn test_starts_at_low_bound() {
        let osc = sweep();
        assert!((osc.position().x - -4.0).abs() < 1e-6);
        assert_eq!(osc.direction(), 1.0);
        assert!((osc.position().y - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_bounces_off_high_bound() {
        let mut osc = sweep();
        osc.step(1.0);
        assert!((osc.position().x - 2.0).abs() < 1e-6);
        assert_eq!(osc.direction(), 1.0);

        // Landing exactly on the bound turns around too
        let mut exact = Oscillator::new(Axis::X, Vec3::new(0.0, 1.5, 0.0), 4.0, 8.0);
        exact.step(1.0);
        assert_eq!(exact.position().x, 4.0);
        assert_eq!(exact.direction(), -1.0);

        // Would reach 8: stops at the bound and turns around
        osc.step(1.0);
        assert_eq!(osc.position().x, 4.0);
        assert_eq!(osc.direction(), -1.0);

        osc.step(0.5);
        assert!((osc.position().x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_overshoot_clamps_to_bound() {
        let mut osc = sweep();
        // 9 units of travel from -4 would end at 5
        osc.step(1.5);
        assert_eq!(osc.position().x, 4.0);
        assert_eq!(osc.direction(), -1.0);

        // And the low bound the same way
        osc.step(10.0);
        assert_eq!(osc.position().x, -4.0);
        assert_eq!(osc.direction(), 1.0);
    }

    #[test]
    fn test_stays_within_bounds() {
        let mut osc = Oscillator::new(Axis::Z, Vec3::new(0.3, 2.5, -0.2), 4.0, 6.0);
        for _ in 0..2000 {
            osc.step(1.0 / 60.0);
            let p = osc.position();
            assert!(p.z >= -4.2 - 1e-4 && p.z <= 3.8 + 1e-4);
            assert!((p.x - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn test_stepped_matches_closed_form() {
        // Unit steps land exactly on both bounds
        let fresh = || Oscillator::new(Axis::X, Vec3::new(0.0, 1.5, 0.0), 4.0, 8.0);
        let mut osc = fresh();
        let dt = 0.125;
        for i in 1..=100 {
            osc.step(dt);
            let expected = fresh().position_at(i as f32 * dt);
            assert!((osc.position().x - expected.x).abs() < 1e-5);
        }
    }

    #[test]
    fn test_for_state_pivots_on_top() {
        let mut engine = GameEngine::new(1);
        engine.start();
        let osc = Oscillator::for_state(engine.state(), engine.tuning());
        assert_eq!(osc.axis, Axis::X);
        assert!((osc.pivot.y - 1.5).abs() < 1e-6);

        let (x, z) = (0.0, 0.0);
        engine.drop(x, z);
        let osc = Oscillator::for_state(engine.state(), engine.tuning());
        assert_eq!(osc.axis, Axis::Z);
        assert!((osc.pivot.y - 2.5).abs() < 1e-6);
        let (_, z) = osc.drop_coords();
        assert!((z - -4.0).abs() < 1e-6);
    }
}
