//! Drop geometry along the sweep axis
//!
//! A drop only ever cuts along one axis: the moving box is aligned with the
//! top of the tower on the other one. So the whole problem reduces to
//! intersecting two 1-D spans.

use serde::{Deserialize, Serialize};

use super::state::{Axis, StackedBox};

/// A closed interval on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Span of a box of `size` centered at `center`
    #[inline]
    pub fn centered(center: f32, size: f32) -> Self {
        Self::new(center - size / 2.0, center + size / 2.0)
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.min + self.max) / 2.0
    }

    /// Length (negative when the span is inverted)
    #[inline]
    pub fn length(&self) -> f32 {
        self.max - self.min
    }

    /// Intersection; inverted (negative length) when the spans are disjoint
    #[inline]
    pub fn intersect(&self, other: &Span) -> Span {
        Span::new(self.min.max(other.min), self.max.min(other.max))
    }
}

/// Which end of the moving box hangs past the tower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutSide {
    /// The overhang is below the top box's min edge
    Low,
    /// The overhang is above the top box's max edge
    High,
}

/// Result of dropping a moving box onto the top of the tower
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropGeometry {
    pub axis: Axis,
    /// Moving box on the sweep axis
    pub moving: Span,
    /// Top box on the sweep axis
    pub support: Span,
    /// Overlapping part; inverted when the box missed entirely
    pub overlap: Span,
    /// Portion of the moving box hanging over the edge
    pub cut: f32,
    pub cut_side: CutSide,
}

/// Intersect the moving box with the top of the tower along `axis`.
///
/// `moving_center` is the moving box's coordinate on `axis`, `moving_size` its
/// extent on that axis.
pub fn resolve_drop(top: &StackedBox, axis: Axis, moving_center: f32, moving_size: f32) -> DropGeometry {
    let moving = Span::centered(moving_center, moving_size);
    let support = Span::centered(axis.component(top.center), top.extent(axis));
    let overlap = moving.intersect(&support);
    let cut_side = if moving.min < support.min {
        CutSide::Low
    } else {
        CutSide::High
    };

    DropGeometry {
        axis,
        moving,
        support,
        overlap,
        cut: moving_size - overlap.length(),
        cut_side,
    }
}

impl DropGeometry {
    /// Overlap length along the sweep axis
    #[inline]
    pub fn overlap_length(&self) -> f32 {
        self.overlap.length()
    }

    /// Too little (or no, or non-finite) overlap to keep stacking
    pub fn is_miss(&self, threshold: f32) -> bool {
        // f32::min/max skip NaN, so a NaN position would otherwise look aligned
        let finite = self.moving.min.is_finite() && self.moving.max.is_finite();
        !finite || !(self.overlap_length() >= threshold)
    }

    /// Overhang small enough to snap onto the top box
    pub fn is_perfect(&self, threshold: f32) -> bool {
        self.cut < threshold
    }

    /// Overlap as a fraction of the moving box
    pub fn overlap_ratio(&self) -> f32 {
        let size = self.moving.length();
        if size > 0.0 {
            self.overlap_length() / size
        } else {
            0.0
        }
    }

    /// Span of the piece that falls off, contiguous with the placed box
    pub fn cut_span(&self) -> Span {
        match self.cut_side {
            CutSide::Low => Span::new(self.moving.min, self.moving.min + self.cut),
            CutSide::High => Span::new(self.overlap.max, self.overlap.max + self.cut),
        }
    }
}
