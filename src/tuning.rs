//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can load an alternative
//! balance from JSON without touching the engine.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Drops with less overlap than this end the run
    pub game_over_threshold: f32,
    /// Cuts smaller than this count as a perfect landing (snapped, no debris)
    pub perfect_threshold: f32,
    /// Cuts must exceed this to spawn a falling piece
    pub min_debris_size: f32,
    /// Overlap ratio at or above which a non-perfect drop grades as Good
    pub good_ratio: f32,
    /// Points for a perfect landing
    pub perfect_points: u32,
    /// Points for any other successful landing
    pub landing_points: u32,
    /// Hue step (degrees) per placed box
    pub hue_step: u16,
    /// Half-width of the moving box's sweep around the pivot
    pub oscillator_amplitude: f32,
    /// Sweep speed in units per second
    pub oscillator_speed: f32,
    /// Falling pieces spin at up to this many radians per second either way
    pub max_debris_spin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_over_threshold: 0.3,
            perfect_threshold: 0.05,
            min_debris_size: 0.01,
            good_ratio: 0.72,
            perfect_points: 5,
            landing_points: 1,
            hue_step: 25,
            oscillator_amplitude: 4.0,
            oscillator_speed: 6.0,
            max_debris_spin: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the drop algorithm cannot work with
    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = [
            ("game_over_threshold", self.game_over_threshold),
            ("perfect_threshold", self.perfect_threshold),
            ("oscillator_amplitude", self.oscillator_amplitude),
            ("oscillator_speed", self.oscillator_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EngineError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.min_debris_size.is_finite() && self.min_debris_size >= 0.0) {
            return Err(EngineError::InvalidTuning(format!(
                "min_debris_size must not be negative, got {}",
                self.min_debris_size
            )));
        }
        if !(0.0..=1.0).contains(&self.good_ratio) {
            return Err(EngineError::InvalidTuning(format!(
                "good_ratio must be within [0, 1], got {}",
                self.good_ratio
            )));
        }
        if !(self.max_debris_spin.is_finite() && self.max_debris_spin >= 0.0) {
            return Err(EngineError::InvalidTuning(format!(
                "max_debris_spin must not be negative, got {}",
                self.max_debris_spin
            )));
        }
        if self.game_over_threshold > crate::consts::INITIAL_WIDTH.min(crate::consts::INITIAL_DEPTH)
        {
            return Err(EngineError::InvalidTuning(format!(
                "game_over_threshold {} exceeds the base platform",
                self.game_over_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let tuning = Tuning::from_json(r#"{ "perfect_points": 10 }"#).unwrap();
        assert_eq!(tuning.perfect_points, 10);
        assert_eq!(tuning.landing_points, 1);
        assert!((tuning.game_over_threshold - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "oscillator_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTuning(_)));

        let err = Tuning::from_json(r#"{ "good_ratio": 1.5 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTuning(_)));

        let err = Tuning::from_json(r#"{ "game_over_threshold": 3.0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTuning(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EngineError::Tuning(_)));
    }
}
