//! Run-level accumulators: coordinate/time extents and speed extremes.
//!
//! One `RangeTracker` and one `SpeedStats` are owned by a run and folded
//! into a serializable [`RunSummary`] at the end.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::PositionRecord;

/// Closed `[min, max]` over observed values; `None` until the first value.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Extent {
    /// Smallest value seen.
    pub min: Option<f64>,
    /// Largest value seen.
    pub max: Option<f64>,
}

impl Extent {
    /// Widen the extent to include `v`.
    #[inline]
    pub fn observe(&mut self, v: f64) {
        self.min = Some(self.min.map_or(v, |m| m.min(v)));
        self.max = Some(self.max.map_or(v, |m| m.max(v)));
    }

    /// Both bounds, if anything was observed.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.min.zip(self.max)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds() {
            Some((lo, hi)) => write!(f, "{lo} {hi}"),
            None => f.write_str("(none)"),
        }
    }
}

/// Per-axis and time extents of every emitted record.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeTracker {
    /// x extent.
    pub x: Extent,
    /// y extent.
    pub y: Extent,
    /// z extent (always 0 for a 2D run).
    pub z: Extent,
    /// Time extent.
    pub time: Extent,
}

impl RangeTracker {
    /// Fold one record in.
    pub fn observe(&mut self, r: &PositionRecord) {
        self.x.observe(r.x);
        self.y.observe(r.y);
        self.z.observe(0.0);
        self.time.observe(r.time);
    }
}

/// Extremes of instantaneous speed over all steps of all nodes.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeedStats {
    /// Fastest step.
    pub max: Option<f64>,
    /// Slowest step.
    pub min: Option<f64>,
}

impl SpeedStats {
    /// Fold one speed in.
    #[inline]
    pub fn observe(&mut self, speed: f64) {
        self.max = Some(self.max.map_or(speed, |m| m.max(speed)));
        self.min = Some(self.min.map_or(speed, |m| m.min(speed)));
    }
}

/// Everything a run reports once all nodes are written.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Shared time increment between records.
    pub offset: f64,
    /// Nodes synthesized.
    pub nodes: u32,
    /// Records emitted, including one start record per node.
    pub records: u64,
    /// Speed extremes.
    pub speed: SpeedStats,
    /// Coordinate and time extents.
    pub ranges: RangeTracker,
}
