//! Game state and core tower types
//!
//! `GameState` is a snapshot: the engine builds a new one for every
//! transition and readers never mutate it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Waiting for the first click
    #[default]
    Idle,
    /// Box is oscillating, clicks drop it
    Playing,
    /// Run ended; only reset/retry leave this phase
    GameOver,
}

/// Horizontal axis the moving box sweeps along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    #[default]
    X,
    Z,
}

impl Axis {
    /// The other horizontal axis
    pub fn flip(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Coordinate of `v` along this axis
    #[inline]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    /// Copy of `v` with this axis' coordinate replaced
    #[inline]
    pub fn with_component(self, mut v: Vec3, value: f32) -> Vec3 {
        match self {
            Axis::X => v.x = value,
            Axis::Z => v.z = value,
        }
        v
    }

    /// Pick the extent along this axis from a (width, depth) pair
    #[inline]
    pub fn extent(self, width: f32, depth: f32) -> f32 {
        match self {
            Axis::X => width,
            Axis::Z => depth,
        }
    }
}

/// How well a successful drop landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropQuality {
    Perfect,
    Good,
    Okay,
}

/// A permanently placed tower segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedBox {
    pub id: u32,
    /// Center in world space (y is the vertical center)
    pub center: Vec3,
    /// Extent along X
    pub width: f32,
    /// Extent along Z
    pub depth: f32,
    /// Presentation hue in degrees, [0, 360)
    pub hue: u16,
}

impl StackedBox {
    /// The base platform every tower starts from
    pub fn platform() -> Self {
        Self {
            id: 0,
            center: Vec3::new(0.0, BASE_Y, 0.0),
            width: INITIAL_WIDTH,
            depth: INITIAL_DEPTH,
            hue: BASE_HUE,
        }
    }

    /// Extent along `axis`
    pub fn extent(&self, axis: Axis) -> f32 {
        axis.extent(self.width, self.depth)
    }
}

/// The cut-off remainder of a drop, falling away from the tower.
///
/// Not part of the scored state: the renderer animates it and removes it
/// through the engine once the animation finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallingPiece {
    pub id: u32,
    /// Spawn position; the piece starts level with the box placed alongside it
    pub center: Vec3,
    pub width: f32,
    pub depth: f32,
    pub hue: u16,
    /// Spin in radians per second
    pub rotation_speed: f32,
}

/// Notifications for presentation (landing effects, sound cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum GameEvent {
    Started,
    #[serde(rename_all = "camelCase")]
    Placed {
        box_id: u32,
        quality: DropQuality,
    },
    #[serde(rename_all = "camelCase")]
    GameOver {
        score: u32,
        new_best: bool,
    },
    Reset,
}

/// Complete game state snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// Best score seen by this engine; survives resets
    pub best_score: u32,
    /// Placed boxes, base platform first; never empty
    pub stack: Vec<StackedBox>,
    pub falling_pieces: Vec<FallingPiece>,
    /// Hue of the most recently placed box (the next one is one step past it)
    pub current_hue: u16,
    /// Footprint of the next moving box
    pub current_box_width: f32,
    pub current_box_depth: f32,
    /// Axis the next moving box sweeps along
    pub current_axis: Axis,
    pub last_drop_perfect: bool,
    pub last_drop_quality: Option<DropQuality>,
    /// Next entity ID; keeps counting across resets so IDs are never reused.
    /// Engine bookkeeping, left out of snapshots.
    #[serde(skip, default = "first_entity_id")]
    pub(crate) next_id: u32,
}

fn first_entity_id() -> u32 {
    1
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh state for a brand-new engine
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            best_score: 0,
            stack: vec![StackedBox::platform()],
            falling_pieces: Vec::new(),
            current_hue: START_HUE,
            current_box_width: INITIAL_WIDTH,
            current_box_depth: INITIAL_DEPTH,
            current_axis: Axis::X,
            last_drop_perfect: false,
            last_drop_quality: None,
            next_id: first_entity_id(),
        }
    }

    /// Initial state for a new session, keeping the best score and ID counter
    pub fn reset_from(prev: &GameState) -> Self {
        Self {
            best_score: prev.best_score,
            next_id: prev.next_id,
            ..Self::new()
        }
    }

    /// Top of the tower
    pub fn top(&self) -> &StackedBox {
        // The stack always holds at least the platform
        &self.stack[self.stack.len() - 1]
    }

    /// Number of boxes placed on top of the platform
    pub fn height(&self) -> u32 {
        (self.stack.len() - 1) as u32
    }

    /// Size of the next moving box along its sweep axis
    pub fn current_extent(&self) -> f32 {
        self.current_axis
            .extent(self.current_box_width, self.current_box_depth)
    }

    /// Hue the next placed box will get
    pub fn next_hue(&self, step: u16) -> u16 {
        crate::advance_hue(self.current_hue, step)
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
