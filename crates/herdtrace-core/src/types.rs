//! Canonical data types used across the herdtrace pipeline.
//!
//! Re-exported at the crate root so callers can write
//! `herdtrace_core::StepDelta`, `herdtrace_core::PositionRecord`, etc.

use serde::{Deserialize, Serialize};

/// Simulated node identifier (`%d` in the output trace).
pub type NodeId = u32;

/// One recorded observation, already divided by the layout scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawSample {
    /// Easting after scaling.
    pub x: f64,
    /// Northing after scaling.
    pub y: f64,
}

impl RawSample {
    /// Create a sample.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Step from `self` to `next`: Euclidean distance and `atan2` bearing.
    #[inline]
    #[must_use]
    pub fn step_to(&self, next: &Self) -> StepDelta {
        let dx = next.x - self.x;
        let dy = next.y - self.y;
        StepDelta {
            distance: dx.hypot(dy),
            bearing: dy.atan2(dx),
        }
    }
}

/// Movement between two consecutive samples, in file order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct StepDelta {
    /// Euclidean distance.
    pub distance: f64,
    /// Direction of travel in radians, `(-π, π]`.
    pub bearing: f64,
}

/// Raw signed change in bearing between consecutive steps.
///
/// Not normalized: values outside `[-π, π]` occur whenever the bearing wraps.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TurnDelta(pub f64);

impl TurnDelta {
    /// Angle in radians.
    #[inline]
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.0
    }
}

/// The empirical distributions extracted from one recorded track.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Deltas {
    /// Steps in file order (length = samples − 1).
    pub steps: Vec<StepDelta>,
}

impl Deltas {
    /// Number of steps.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step was extracted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step distances in file order.
    #[must_use]
    pub fn distances(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.distance).collect()
    }

    /// Step bearings in file order.
    #[must_use]
    pub fn bearings(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.bearing).collect()
    }
}

/// Mutable per-node walk state. Lives for one node's trajectory only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeState {
    /// Node id.
    pub id: NodeId,
    /// Current x.
    pub x: f64,
    /// Current y.
    pub y: f64,
    /// Current heading in radians (unbounded; turns accumulate).
    pub heading: f64,
    /// Elapsed simulated time.
    pub time: f64,
}

impl NodeState {
    /// Record for the current position.
    #[inline]
    #[must_use]
    pub const fn record(&self) -> PositionRecord {
        PositionRecord {
            time: self.time,
            node: self.id,
            x: self.x,
            y: self.y,
        }
    }
}

/// One emitted trace line `time node_id x y` (z is always 0).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PositionRecord {
    /// Simulated time.
    pub time: f64,
    /// Node id.
    pub node: NodeId,
    /// x after reflection.
    pub x: f64,
    /// y after reflection.
    pub y: f64,
}

/// Trace header: `start end min_x max_x min_y max_y min_z max_z`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Header {
    /// Start time (always 0).
    pub start: f64,
    /// End time (the horizon).
    pub end: f64,
    /// Area width; x spans `[0, width]`.
    pub width: f64,
    /// Area height; y spans `[0, height]`.
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn step_to_east_then_north() {
        let a = RawSample::new(0.0, 0.0);
        let b = RawSample::new(6.0, 0.0);
        let c = RawSample::new(6.0, 6.0);

        let ab = a.step_to(&b);
        assert!((ab.distance - 6.0).abs() < 1e-12);
        assert!(ab.bearing.abs() < 1e-12);

        let bc = b.step_to(&c);
        assert!((bc.distance - 6.0).abs() < 1e-12);
        assert!((bc.bearing - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn zero_step_has_zero_bearing() {
        let a = RawSample::new(3.0, 4.0);
        let s = a.step_to(&a);
        assert_eq!(s.distance, 0.0);
        assert_eq!(s.bearing, 0.0);
    }
}
