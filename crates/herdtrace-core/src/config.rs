//! Run parameters and the input field layout.
//!
//! Defaults reproduce the constants the ONE zebra traces were generated with
//! (1000×1000 area, horizon 56000, offset in `[0, 200)`, speed divisor 8), so
//! a run without a config file is output-compatible with earlier traces.
//! A TOML file may override any subset:
//!
//! ```toml
//! horizon = 86400
//! seed = 42
//!
//! [layout]
//! skip_malformed = true
//! ```

use crate::error::SynthError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where x/y live in a raw line and how they are scaled.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FieldLayout {
    /// 0-based whitespace field holding x.
    pub x_field: usize,
    /// 0-based whitespace field holding y.
    pub y_field: usize,
    /// Raw values are divided by this.
    pub scale: f64,
    /// Skip malformed lines with a warning instead of aborting.
    pub skip_malformed: bool,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            x_field: 9,
            y_field: 10,
            scale: 6.0,
            skip_malformed: false,
        }
    }
}

/// Parameters of one synthesis run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Area width (x in `[0, width]`).
    pub width: f64,
    /// Area height (y in `[0, height]`).
    pub height: f64,
    /// A node stops once its clock exceeds this.
    pub horizon: f64,
    /// The per-run sampling offset is drawn from `[0, max_offset)`.
    pub max_offset: f64,
    /// Speed = distance / speed_divisor (recording interval of the source track).
    pub speed_divisor: f64,
    /// Step bound per node = step_multiplier × number of steps in the track.
    pub step_multiplier: usize,
    /// Seed for the run's generator; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Input field layout.
    pub layout: FieldLayout,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            horizon: 56000.0,
            max_offset: 200.0,
            speed_divisor: 8.0,
            step_multiplier: 100,
            seed: None,
            layout: FieldLayout::default(),
        }
    }
}

impl SynthConfig {
    /// Parse a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(src).context("parse config toml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("load config {}", path.display()))
    }

    /// Reject values the walk cannot run with.
    pub fn validate(&self) -> Result<(), SynthError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("max_offset", self.max_offset),
            ("speed_divisor", self.speed_divisor),
            ("layout.scale", self.layout.scale),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(SynthError::InvalidConfig(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        if !(self.horizon.is_finite() && self.horizon >= 0.0) {
            return Err(SynthError::InvalidConfig(format!(
                "horizon must be finite and >= 0 (got {})",
                self.horizon
            )));
        }
        if self.step_multiplier == 0 {
            return Err(SynthError::InvalidConfig("step_multiplier must be > 0".into()));
        }
        Ok(())
    }
}
