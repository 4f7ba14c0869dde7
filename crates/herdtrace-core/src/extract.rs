//! Delta extraction: raw trace lines → `RawSample` → `StepDelta`.
//!
//! Lines are streamed in file order. Every sample after the first yields one
//! `StepDelta` relative to the sample immediately before it, so a file with
//! `n` well-formed lines gives `n - 1` steps.

use crate::config::FieldLayout;
use crate::error::RecordError;
use crate::types::{Deltas, RawSample};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Parse one raw line into a scaled sample.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_sample(
    line: &str,
    line_no: usize,
    layout: &FieldLayout,
) -> Result<RawSample, RecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let x = numeric_field(&fields, layout.x_field, line_no)?;
    let y = numeric_field(&fields, layout.y_field, line_no)?;
    Ok(RawSample::new(x / layout.scale, y / layout.scale))
}

fn numeric_field(fields: &[&str], index: usize, line: usize) -> Result<f64, RecordError> {
    let raw = fields.get(index).ok_or(RecordError::MissingField {
        line,
        index,
        found: fields.len(),
    })?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RecordError::InvalidNumber {
            line,
            index,
            value: (*raw).to_string(),
        }),
    }
}

/// Stream samples from `rdr` and derive consecutive step deltas.
///
/// A malformed line aborts with a [`RecordError`] unless
/// `layout.skip_malformed` is set, in which case it is logged and dropped;
/// the next good sample is then paired with the last good one.
pub fn extract_deltas<R: BufRead>(rdr: R, layout: &FieldLayout) -> Result<Deltas> {
    let mut prev: Option<RawSample> = None;
    let mut deltas = Deltas::default();
    let mut skipped = 0usize;

    for (i, line) in rdr.lines().enumerate() {
        let line_no = i + 1;
        let line = line.with_context(|| format!("read line {line_no}"))?;
        let sample = match parse_sample(&line, line_no, layout) {
            Ok(s) => s,
            Err(e) if layout.skip_malformed => {
                warn!(%e, "skipping malformed record");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(p) = prev {
            deltas.steps.push(p.step_to(&sample));
        }
        prev = Some(sample);
    }

    info!(steps = deltas.len(), skipped, "extracted step deltas");
    Ok(deltas)
}

/// Open `path` and extract its step deltas.
pub fn read_deltas<P: AsRef<Path>>(path: P, layout: &FieldLayout) -> Result<Deltas> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    extract_deltas(BufReader::new(f), layout)
        .with_context(|| format!("extract deltas from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    use std::io::Cursor;

    /// A raw line with x/y at fields 9/10, as the logger writes them.
    fn line(x: &str, y: &str) -> String {
        format!("8 2007-01-01 00:00 a b c d e f {x} {y} tail")
    }

    #[test]
    fn parses_and_scales_fields_nine_and_ten() {
        let s = parse_sample(&line("36", "-12"), 1, &FieldLayout::default()).unwrap();
        assert_eq!(s, RawSample::new(6.0, -2.0));
    }

    #[test]
    fn three_lines_give_two_steps() {
        let src = [line("0", "0"), line("36", "0"), line("36", "36")].join("\n");
        let d = extract_deltas(Cursor::new(src), &FieldLayout::default()).unwrap();
        assert_eq!(d.distances(), vec![6.0, 6.0]);
        let b = d.bearings();
        assert_eq!(b[0], 0.0);
        assert!((b[1] - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn missing_field_is_fatal_with_line_number() {
        let src = format!("{}\n1 2 3\n", line("0", "0"));
        let err = extract_deltas(Cursor::new(src), &FieldLayout::default()).unwrap_err();
        let rec = err.downcast_ref::<RecordError>().unwrap();
        assert_eq!(
            rec,
            &RecordError::MissingField { line: 2, index: 9, found: 3 }
        );
    }

    #[test]
    fn non_numeric_field_is_fatal() {
        let src = format!("{}\n{}\n", line("0", "0"), line("12", "abc"));
        let err = extract_deltas(Cursor::new(src), &FieldLayout::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::InvalidNumber { line: 2, index: 10, .. })
        ));
    }

    #[test]
    fn skip_mode_drops_bad_lines_without_corrupting_order() {
        let layout = FieldLayout { skip_malformed: true, ..FieldLayout::default() };
        let src = [line("0", "0"), String::new(), line("36", "0"), line("nan", "1")].join("\n");
        let d = extract_deltas(Cursor::new(src), &layout).unwrap();
        assert_eq!(d.distances(), vec![6.0]);
    }

    #[test]
    fn empty_input_has_no_steps() {
        let d = extract_deltas(Cursor::new(""), &FieldLayout::default()).unwrap();
        assert!(d.is_empty());
    }
}
