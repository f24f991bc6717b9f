//! Snowdrift ridge generation.
//!
//! The viewport width is split into `count` equal buckets. Each drift starts
//! somewhere in the first half of its bucket and extends by an independent
//! random length, so drifts run roughly left to right and may overlap their
//! neighbours. Each drift is a single cubic curve rising above a shared
//! baseline; even drifts lean right, odd drifts lean left.

use frostline_common::{HexColor, RangeError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rng::{clamp_below, RandomSource};
use crate::theme::ColorTheme;

/// Default number of drifts.
pub const DEFAULT_DUNE_COUNT: u32 = 8;

/// Default minimum drift length, in viewbox units.
pub const DEFAULT_MIN_DUNE_LENGTH: f32 = 300.0;

/// Default maximum drift length, in viewbox units.
pub const DEFAULT_MAX_DUNE_LENGTH: f32 = 1000.0;

/// Default viewbox width.
pub const DEFAULT_VIEWBOX_WIDTH: f32 = 3000.0;

/// Default viewbox height.
pub const DEFAULT_VIEWBOX_HEIGHT: f32 = 400.0;

/// Y coordinate every drift starts and ends on.
pub const DUNE_BASELINE_Y: f32 = 100.0;

/// Second control point, relative to the drift start.
pub const FIXED_CONTROL_POINT: (f32, f32) = (400.0, 0.0);

/// Which way a drift's crest leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveFamily {
    /// Free control point confined to the first half of the drift.
    RightCurve,
    /// Free control point anywhere along the drift.
    LeftCurve,
}

impl CurveFamily {
    /// Family for the drift at `index`: even leans right, odd leans left.
    #[must_use]
    pub const fn for_index(index: u32) -> Self {
        if index % 2 == 0 {
            Self::RightCurve
        } else {
            Self::LeftCurve
        }
    }
}

/// One drift silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuneSegment {
    /// Position in the ridge, left to right by bucket.
    pub index: u32,
    /// Absolute x of the drift start.
    pub start_x: f32,
    /// Horizontal extent of the drift.
    pub length: f32,
    /// Crest lean.
    pub curve: CurveFamily,
    /// Free control point, relative to the start. `y` is always `<= 0`.
    pub control_point: (f32, f32),
    /// Fill color at creation time.
    pub fill: HexColor,
}

impl DuneSegment {
    /// Second control point, relative to the start.
    #[must_use]
    pub const fn control_point_2(&self) -> (f32, f32) {
        FIXED_CONTROL_POINT
    }

    /// End point, relative to the start.
    #[must_use]
    pub const fn end_offset(&self) -> (f32, f32) {
        (self.length, 0.0)
    }

    /// SVG path data for the drift.
    #[must_use]
    pub fn path_data(&self) -> String {
        let (x1, y1) = self.control_point;
        let (x2, y2) = self.control_point_2();
        let (x, y) = self.end_offset();
        format!(
            "M {} {DUNE_BASELINE_Y} c {x1},{y1} {x2},{y2} {x},{y}",
            self.start_x
        )
    }
}

/// Drift ridge parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuneConfig {
    /// Number of drifts (and buckets).
    pub count: u32,
    /// Inclusive lower bound on drift length.
    pub min_length: f32,
    /// Exclusive upper bound on drift length.
    pub max_length: f32,
    /// Viewbox width the buckets partition.
    pub viewport_width: f32,
    /// Viewbox height.
    pub viewport_height: f32,
}

impl Default for DuneConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_DUNE_COUNT,
            min_length: DEFAULT_MIN_DUNE_LENGTH,
            max_length: DEFAULT_MAX_DUNE_LENGTH,
            viewport_width: DEFAULT_VIEWBOX_WIDTH,
            viewport_height: DEFAULT_VIEWBOX_HEIGHT,
        }
    }
}

impl DuneConfig {
    /// Checks the length range is non-empty and the viewport is usable.
    pub fn validate(&self) -> Result<(), RangeError> {
        // Written so NaN on either side fails.
        if !(self.max_length >= self.min_length) {
            return Err(RangeError::InvertedLength {
                min: self.min_length,
                max: self.max_length,
            });
        }
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(RangeError::InvalidViewport(self.viewport_width));
        }
        Ok(())
    }

    /// Width of each placement bucket.
    #[must_use]
    pub fn bucket_width(&self) -> f32 {
        if self.count == 0 {
            return self.viewport_width;
        }
        self.viewport_width / self.count as f32
    }
}

/// Drift ridge generator.
#[derive(Debug, Clone)]
pub struct DuneRidgeGenerator {
    config: DuneConfig,
}

impl DuneRidgeGenerator {
    /// Creates a generator, rejecting an empty length range or bad viewport.
    pub fn new(config: DuneConfig) -> Result<Self, RangeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &DuneConfig {
        &self.config
    }

    /// Generates `count` drifts in index order.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        theme: &ColorTheme,
        rng: &mut R,
    ) -> Vec<DuneSegment> {
        let bucket_width = self.config.bucket_width();
        let dunes: Vec<_> = (0..self.config.count)
            .map(|index| self.segment(index, bucket_width, theme.snow_color, rng))
            .collect();

        debug!(count = dunes.len(), bucket_width, "Generated drift ridge");
        dunes
    }

    fn segment<R: RandomSource + ?Sized>(
        &self,
        index: u32,
        bucket_width: f32,
        fill: HexColor,
        rng: &mut R,
    ) -> DuneSegment {
        let bucket_start = bucket_width * index as f32;
        let start_x = clamp_below(
            rng.range(0.0, bucket_width / 2.0) + bucket_start,
            bucket_start + bucket_width / 2.0,
        );
        let length = rng.range(self.config.min_length, self.config.max_length);

        let curve = CurveFamily::for_index(index);
        let x1 = match curve {
            CurveFamily::RightCurve => rng.range(0.0, length / 2.0),
            CurveFamily::LeftCurve => rng.range(0.0, length),
        };
        let y1 = rng.range(-length / 2.0, 0.0);

        DuneSegment {
            index,
            start_x,
            length,
            curve,
            control_point: (x1, y1),
            fill,
        }
    }
}
