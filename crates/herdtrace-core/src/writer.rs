//! ns-2 movement trace output.
//!
//! The synthesizer pushes records into a [`RecordSink`]; the sinks here
//! decide where they land:
//!
//! - [`Ns2Writer`]: one stream, header line first, then every record in
//!   emission order (node 0's full walk, then node 1's, …).
//! - [`SplitWriter`]: the same stream plus one file per node, named after
//!   the input (`baseoutUTM1.txt` → `baseoutUTM1.n0`, `baseoutUTM1.n1`, …).
//!   The header goes into node 0's file only, so `cat`-ing the per-node
//!   files in id order reproduces the combined trace byte for byte.
//! - `Vec<PositionRecord>`: in-memory capture for tests and tools.
//!
//! Line formats:
//!
//! ```text
//! 0 56000 0 1000 0 1000 0 0        start end minX maxX minY maxY minZ maxZ
//! 112.503210 3 417.020813 88.114129 time node x y
//! ```

use crate::stats::RunSummary;
use crate::types::{Header, NodeId, PositionRecord};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for synthesized records.
///
/// `header` is called exactly once, before any record. Records arrive grouped
/// by node in ascending id order and in time order within a node.
pub trait RecordSink {
    /// Accept the trace header.
    fn header(&mut self, header: &Header) -> Result<()>;

    /// Accept one record.
    fn record(&mut self, rec: &PositionRecord) -> Result<()>;

    /// Flush buffered output. Called once after the last record.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl RecordSink for Vec<PositionRecord> {
    fn header(&mut self, _header: &Header) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, rec: &PositionRecord) -> Result<()> {
        self.push(*rec);
        Ok(())
    }
}

/// Header line, newline included.
#[must_use]
pub fn format_header(h: &Header) -> String {
    format!("{} {} 0 {} 0 {} 0 0\n", h.start, h.end, h.width, h.height)
}

/// Record line, newline included. Floats use six decimals, node id is an integer.
#[must_use]
pub fn format_record(r: &PositionRecord) -> String {
    format!("{:.6} {} {:.6} {:.6}\n", r.time, r.node, r.x, r.y)
}

/// Single-stream ns-2 writer.
pub struct Ns2Writer<W: Write> {
    w: W,
}

impl Ns2Writer<BufWriter<File>> {
    /// Create (truncate) `path` and write to it through a buffer.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
        Ok(Self::new(BufWriter::new(f)))
    }
}

impl<W: Write> Ns2Writer<W> {
    /// Wrap any writer.
    pub const fn new(w: W) -> Self {
        Self { w }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.w
    }
}

impl<W: Write> RecordSink for Ns2Writer<W> {
    fn header(&mut self, header: &Header) -> Result<()> {
        self.w
            .write_all(format_header(header).as_bytes())
            .context("write trace header")
    }

    fn record(&mut self, rec: &PositionRecord) -> Result<()> {
        self.w
            .write_all(format_record(rec).as_bytes())
            .with_context(|| format!("write record for node {}", rec.node))
    }

    fn finish(&mut self) -> Result<()> {
        self.w.flush().context("flush trace writer")
    }
}

/// Per-node file name derived from the input path.
///
/// Every `txt` in the file name becomes `n<id>`; a name without `txt` gets
/// `.n<id>` appended. The directory part is left alone.
#[must_use]
pub fn per_node_path(input: &Path, id: NodeId) -> PathBuf {
    let tag = format!("n{id}");
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let new_name = if name.contains("txt") {
        name.replace("txt", &tag)
    } else {
        format!("{name}.{tag}")
    };
    input.with_file_name(new_name)
}

/// Combined stream plus one file per node.
pub struct SplitWriter<W: Write> {
    combined: Ns2Writer<W>,
    base: PathBuf,
    current: Option<(NodeId, BufWriter<File>)>,
    pending_header: Option<Header>,
    files: Vec<PathBuf>,
}

impl<W: Write> SplitWriter<W> {
    /// `base` is the input path the per-node names derive from.
    pub fn new(combined: Ns2Writer<W>, base: impl Into<PathBuf>) -> Self {
        Self {
            combined,
            base: base.into(),
            current: None,
            pending_header: None,
            files: Vec::new(),
        }
    }

    /// Per-node files written so far, in node order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    fn close_current(&mut self) -> Result<()> {
        if let Some((id, mut w)) = self.current.take() {
            w.flush()
                .with_context(|| format!("flush per-node trace for node {id}"))?;
        }
        Ok(())
    }

    fn open_node(&mut self, id: NodeId) -> Result<()> {
        self.close_current()?;
        let path = per_node_path(&self.base, id);
        let f = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        let mut w = BufWriter::new(f);
        if let Some(h) = self.pending_header.take() {
            w.write_all(format_header(&h).as_bytes())
                .with_context(|| format!("write header to {}", path.display()))?;
        }
        self.files.push(path);
        self.current = Some((id, w));
        Ok(())
    }
}

impl<W: Write> RecordSink for SplitWriter<W> {
    fn header(&mut self, header: &Header) -> Result<()> {
        self.pending_header = Some(*header);
        self.combined.header(header)
    }

    fn record(&mut self, rec: &PositionRecord) -> Result<()> {
        self.combined.record(rec)?;
        if self.current.as_ref().map(|(id, _)| *id) != Some(rec.node) {
            self.open_node(rec.node)?;
        }
        if let Some((_, w)) = self.current.as_mut() {
            w.write_all(format_record(rec).as_bytes())
                .with_context(|| format!("write per-node record for node {}", rec.node))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.close_current()?;
        self.combined.finish()
    }
}

/// Write the run summary as pretty JSON.
pub fn write_summary_json<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, summary).context("serialize run summary")?;
    w.write_all(b"\n").context("write newline")?;
    w.flush().context("flush summary writer")?;
    Ok(())
}
