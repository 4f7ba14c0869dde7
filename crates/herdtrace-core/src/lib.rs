//! herdtrace-core — empirical random-walk synthesis of mobility traces.
//!
//! A single recorded track (one animal, one GPS logger) is reduced to two
//! empirical distributions, step distance and turning angle, which are then
//! resampled to drive independent walks for any number of simulated nodes.
//! The result is written as an ns-2 movement trace readable by the ONE
//! simulator.
//!
//! The pipeline is linear:
//! - [`extract`]: parse raw samples and derive `StepDelta`s (distance, bearing),
//! - [`turn`]: derive `TurnDelta`s from consecutive bearings,
//! - [`walk`]: synthesize bounded walks with boundary reflection,
//! - [`writer`]: serialize records through a [`writer::RecordSink`].
//!
//! ```no_run
//! use herdtrace_core::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let cfg = SynthConfig::default();
//! let deltas = read_deltas("baseoutUTM1.txt", &cfg.layout)?;
//! let synth = WalkSynthesizer::new(&deltas, &cfg)?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut sink = Vec::<PositionRecord>::new();
//! let summary = synth.run(&mut rng, 10, &mut sink)?;
//! # let _ = summary;
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Run parameters (area, horizon, offsets) and input field layout.
pub mod config;
/// Typed errors for malformed records and empty distributions.
pub mod error;
/// Delta extraction from raw trace lines.
pub mod extract;
/// Range and speed accumulators for the run summary.
pub mod stats;
/// Turn model: bearing differences.
pub mod turn;
/// Canonical data types shared across the pipeline.
pub mod types;
/// Walk synthesis with boundary reflection.
pub mod walk;
/// ns-2 trace writers and the `RecordSink` seam.
pub mod writer;

pub use config::{FieldLayout, SynthConfig};
pub use error::{RecordError, SynthError};
pub use types::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use herdtrace_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        config::{FieldLayout, SynthConfig},
        extract::{extract_deltas, read_deltas},
        stats::{RangeTracker, RunSummary, SpeedStats},
        turn::turn_deltas,
        types::*,
        walk::WalkSynthesizer,
        writer::{Ns2Writer, RecordSink, SplitWriter},
    };
}
