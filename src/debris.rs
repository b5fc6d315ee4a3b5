//! Display-only animation of cut-off pieces
//!
//! Pieces fall from their spawn position under constant gravity and spin as
//! they go. Nothing here feeds back into scoring: once a piece has dropped
//! out of view the tracker reports its ID and the host removes it from the
//! engine.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::sim::FallingPiece;

/// Downward acceleration (units/s²)
pub const GRAVITY: f32 = -15.0;
/// Pieces below this height are off screen
pub const REMOVE_Y: f32 = -25.0;
/// Spin around Z relative to spin around X
const Z_SPIN_RATIO: f32 = 0.7;

/// Where a piece is drawn at a given moment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebrisPose {
    pub position: Vec3,
    /// Euler rotation around X and Z (radians)
    pub rotation_x: f32,
    pub rotation_z: f32,
}

/// One falling piece's timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebrisAnimation {
    pub id: u32,
    pub spawn_position: Vec3,
    /// Host clock (seconds) when the piece was first seen
    pub spawn_time: f64,
    pub rotation_speed: f32,
}

impl DebrisAnimation {
    pub fn new(piece: &FallingPiece, spawn_time: f64) -> Self {
        Self {
            id: piece.id,
            spawn_position: piece.center,
            spawn_time,
            rotation_speed: piece.rotation_speed,
        }
    }

    fn elapsed(&self, now: f64) -> f32 {
        (now - self.spawn_time).max(0.0) as f32
    }

    /// Pose at host time `now`
    pub fn pose_at(&self, now: f64) -> DebrisPose {
        let t = self.elapsed(now);
        let drop = 0.5 * GRAVITY * t * t;
        DebrisPose {
            position: self.spawn_position + Vec3::Y * drop,
            rotation_x: self.rotation_speed * t,
            rotation_z: self.rotation_speed * Z_SPIN_RATIO * t,
        }
    }

    /// Seconds from spawn until the piece passes `REMOVE_Y`
    pub fn lifetime(&self) -> f32 {
        let fall = (self.spawn_position.y - REMOVE_Y).max(0.0);
        (2.0 * fall / -GRAVITY).sqrt()
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.pose_at(now).position.y < REMOVE_Y
    }
}

/// Animations for every piece in the latest snapshot, keyed by piece ID
#[derive(Debug, Clone, Default)]
pub struct DebrisField {
    animations: BTreeMap<u32, DebrisAnimation>,
}

impl DebrisField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timelines for new pieces and drop ones the engine no longer has
    pub fn sync(&mut self, pieces: &[FallingPiece], now: f64) {
        self.animations
            .retain(|id, _| pieces.iter().any(|p| p.id == *id));
        for piece in pieces {
            self.animations
                .entry(piece.id)
                .or_insert_with(|| DebrisAnimation::new(piece, now));
        }
    }

    /// IDs of pieces whose animation has finished, in ID order.
    ///
    /// They stay tracked until the next `sync` after the engine removes them.
    pub fn finished(&self, now: f64) -> Vec<u32> {
        self.animations
            .values()
            .filter(|a| a.is_finished(now))
            .map(|a| a.id)
            .collect()
    }

    pub fn get(&self, id: u32) -> Option<&DebrisAnimation> {
        self.animations.get(&id)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Poses of every tracked piece at `now`
    pub fn poses(&self, now: f64) -> impl Iterator<Item = (u32, DebrisPose)> + '_ {
        self.animations.values().map(move |a| (a.id, a.pose_at(now)))
    }
}
