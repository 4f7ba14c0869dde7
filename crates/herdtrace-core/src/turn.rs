//! Turn model: signed bearing changes between consecutive steps.

use crate::types::TurnDelta;

/// `bearings[i] - bearings[i - 1]` for every `i >= 1`, in order.
///
/// The difference is kept raw. A turn across the ±π seam (e.g. from 3.0 to
/// -3.0) comes out as -6.0, not as the short way round; downstream headings
/// only ever feed `cos`/`sin`, and the resampled distribution must match
/// the recorded one.
#[must_use]
pub fn turn_deltas(bearings: &[f64]) -> Vec<TurnDelta> {
    bearings
        .windows(2)
        .map(|w| TurnDelta(w[1] - w[0]))
        .collect()
}
