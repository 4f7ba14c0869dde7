//! Walk synthesis: resample recorded steps and turns into bounded walks.
//!
//! Every node starts at a uniform position in the area with a uniform
//! heading in `[0, 2π)`, emits a record at time 0, then repeatedly:
//!
//! 1. draws a distance (with replacement) from the recorded steps,
//! 2. moves along its heading and reflects each axis back into the area,
//! 3. advances its clock by the run's shared sampling offset and emits,
//! 4. adds a turn drawn (with replacement) from the recorded turns.
//!
//! A node stops once its clock has passed the horizon (the record that
//! crosses it is still emitted) or after `step_multiplier × steps` moves.
//!
//! Reflection is one-sided per axis: overflow past the upper bound is
//! mirrored back, and a negative value is then negated. A negated value is
//! not re-checked against the upper bound, so steps longer than the area can
//! leave it; recorded steps are far shorter than that in practice.

use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::stats::{RangeTracker, RunSummary, SpeedStats};
use crate::types::{Deltas, Header, NodeId, NodeState, PositionRecord, TurnDelta};
use crate::turn::turn_deltas;
use crate::writer::RecordSink;
use anyhow::Result;
use rand::Rng;
use std::f64::consts::TAU;
use tracing::{debug, info};

/// Reflect one coordinate into `[0, upper]` the one-sided way.
#[inline]
#[must_use]
pub fn reflect_axis(v: f64, upper: f64) -> f64 {
    let mut v = v;
    if v > upper {
        v = upper - (v - upper);
    }
    if v < 0.0 {
        v = -v;
    }
    v
}

/// Mutable state threaded through one run.
#[derive(Debug, Default)]
struct RunState {
    speed: SpeedStats,
    ranges: RangeTracker,
    records: u64,
}

impl RunState {
    fn emit<S: RecordSink + ?Sized>(&mut self, sink: &mut S, rec: &PositionRecord) -> Result<()> {
        self.ranges.observe(rec);
        self.records += 1;
        sink.record(rec)
    }
}

/// Random-walk generator over the empirical step and turn distributions.
#[derive(Clone, Debug)]
pub struct WalkSynthesizer {
    distances: Vec<f64>,
    turns: Vec<TurnDelta>,
    cfg: SynthConfig,
    max_steps: usize,
}

impl WalkSynthesizer {
    /// Build from extracted deltas. Needs at least one step and one turn.
    pub fn new(deltas: &Deltas, cfg: &SynthConfig) -> Result<Self, SynthError> {
        let turns = turn_deltas(&deltas.bearings());
        Self::from_parts(deltas.distances(), turns, cfg)
    }

    /// Build from explicit distributions.
    pub fn from_parts(
        distances: Vec<f64>,
        turns: Vec<TurnDelta>,
        cfg: &SynthConfig,
    ) -> Result<Self, SynthError> {
        cfg.validate()?;
        if distances.is_empty() {
            return Err(SynthError::EmptyDistribution { what: "distance", needed: 2 });
        }
        if turns.is_empty() {
            return Err(SynthError::EmptyDistribution { what: "turn", needed: 3 });
        }
        let max_steps = cfg.step_multiplier.saturating_mul(distances.len());
        Ok(Self {
            distances,
            turns,
            cfg: cfg.clone(),
            max_steps,
        })
    }

    /// Step bound per node.
    #[inline]
    #[must_use]
    pub const fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Distances resampled from.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Turns resampled from.
    #[must_use]
    pub fn turns(&self) -> &[TurnDelta] {
        &self.turns
    }

    /// Header describing this run's area and horizon.
    #[must_use]
    pub const fn header(&self) -> Header {
        Header {
            start: 0.0,
            end: self.cfg.horizon,
            width: self.cfg.width,
            height: self.cfg.height,
        }
    }

    /// Draw the run's sampling offset from `[0, max_offset)`.
    pub fn draw_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(0.0..self.cfg.max_offset)
    }

    /// Fresh node at a uniform position and heading, clock at 0.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R, id: NodeId) -> NodeState {
        let x = rng.random_range(0.0..self.cfg.width);
        let y = rng.random_range(0.0..self.cfg.height);
        let heading = rng.random_range(0.0..TAU);
        NodeState { id, x, y, heading, time: 0.0 }
    }

    /// Move `node` by one resampled distance along its heading, reflect, and
    /// advance its clock. Returns the distance moved.
    pub fn advance<R: Rng + ?Sized>(&self, rng: &mut R, node: &mut NodeState, offset: f64) -> f64 {
        let d = self.distances[rng.random_range(0..self.distances.len())];
        node.x = reflect_axis(node.x + d * node.heading.cos(), self.cfg.width);
        node.y = reflect_axis(node.y + d * node.heading.sin(), self.cfg.height);
        node.time += offset;
        d
    }

    /// Add one resampled turn to `node`'s heading.
    pub fn turn<R: Rng + ?Sized>(&self, rng: &mut R, node: &mut NodeState) {
        node.heading += self.turns[rng.random_range(0..self.turns.len())].radians();
    }

    fn walk_node<R, S>(
        &self,
        rng: &mut R,
        id: NodeId,
        offset: f64,
        sink: &mut S,
        st: &mut RunState,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
        S: RecordSink + ?Sized,
    {
        let mut node = self.spawn(rng, id);
        st.emit(sink, &node.record())?;

        let mut steps = 0usize;
        while steps < self.max_steps && node.time <= self.cfg.horizon {
            let d = self.advance(rng, &mut node, offset);
            st.speed.observe(d / self.cfg.speed_divisor);
            st.emit(sink, &node.record())?;
            self.turn(rng, &mut node);
            steps += 1;
        }

        debug!(node = id, steps, end_time = node.time, "node walk done");
        Ok(())
    }

    /// Synthesize `nodes` walks into `sink`, drawing the offset from `rng`.
    pub fn run<R, S>(&self, rng: &mut R, nodes: u32, sink: &mut S) -> Result<RunSummary>
    where
        R: Rng + ?Sized,
        S: RecordSink + ?Sized,
    {
        let offset = self.draw_offset(rng);
        self.run_with_offset(rng, nodes, offset, sink)
    }

    /// Synthesize `nodes` walks with a caller-chosen sampling offset.
    pub fn run_with_offset<R, S>(
        &self,
        rng: &mut R,
        nodes: u32,
        offset: f64,
        sink: &mut S,
    ) -> Result<RunSummary>
    where
        R: Rng + ?Sized,
        S: RecordSink + ?Sized,
    {
        info!(nodes, offset, max_steps = self.max_steps, "synthesizing walks");

        sink.header(&self.header())?;
        let mut st = RunState::default();
        for id in 0..nodes {
            self.walk_node(rng, id, offset, sink, &mut st)?;
        }
        sink.finish()?;

        Ok(RunSummary {
            offset,
            nodes,
            records: st.records,
            speed: st.speed,
            ranges: st.ranges,
        })
    }
}
