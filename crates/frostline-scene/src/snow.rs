//! Snowfall particle generation.
//!
//! Produces one batch of immutable particle descriptors. Particles are
//! spread round-robin across depth layers: layer 0 is the nearest, fastest
//! and most opaque, each further layer is slower and fainter. Continuous
//! motion is left to the rendering layer as a looping animation.

use frostline_common::{RangeError, Rgb};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rng::{clamp_below, RandomSource};
use crate::theme::ColorTheme;

/// Default number of particles.
pub const DEFAULT_SNOW_COUNT: u32 = 200;

/// Default number of depth layers.
pub const DEFAULT_SNOW_LAYERS: u32 = 4;

/// Maximum horizontal drift either side of the start position, in pixels.
pub const MAX_DRIFT_PX: f32 = 10.0;

/// Furthest a particle can start above the viewport, in viewport heights (%).
pub const MAX_START_OFFSET_PERCENT: f32 = 500.0;

/// Exclusive upper bound on particle size, in pixels.
pub const MAX_SIZE_PX: f32 = 10.0;

/// Base animation duration added to the layer index, in seconds.
pub const BASE_DURATION_SECS: f32 = 5.0;

/// Random jitter added to each particle's duration, in seconds.
pub const DURATION_JITTER_SECS: f32 = 2.0;

/// Maximum opacity contributed per layer of nearness.
pub const OPACITY_PER_LAYER: f32 = 1.0 / 3.0;

/// Horizontal easing curve a particle sways along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionFamily {
    /// Gentle, nearly linear sway.
    Steep,
    /// Overshooting sway that swings well past the drift distance.
    Wide,
}

impl MotionFamily {
    /// CSS timing function for the horizontal animation.
    #[must_use]
    pub const fn easing(self) -> &'static str {
        match self {
            Self::Steep => "cubic-bezier(.2,.48,.83,.67)",
            Self::Wide => "cubic-bezier(.5, 10, .5, -10)",
        }
    }
}

/// One falling snow particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnowParticle {
    /// Horizontal start position in `[0, 100)` percent of viewport width.
    pub horizontal_position_percent: f32,
    /// Horizontal sway distance in `[-10, 10)` pixels.
    pub horizontal_drift_px: f32,
    /// Start offset in `(-500, 0]` percent of viewport height.
    pub vertical_start_offset_percent: f32,
    /// Diameter in `[0, 10)` pixels.
    pub size_px: f32,
    /// Depth layer, `particle index % layer count`.
    pub layer_index: u32,
    /// Duration of one fall, at least `layer_index + 5` seconds.
    pub animation_duration_secs: f32,
    /// Alpha in `[0, (layers - layer_index) / 3)`.
    pub opacity_alpha: f32,
    /// Horizontal easing curve.
    pub motion: MotionFamily,
    /// Snow color at creation time.
    pub color: Rgb,
}

/// Snowfall parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowConfig {
    /// Number of particles.
    pub count: u32,
    /// Number of depth layers.
    pub layers: u32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SNOW_COUNT,
            layers: DEFAULT_SNOW_LAYERS,
        }
    }
}

impl SnowConfig {
    /// Checks the layer count can hold the particles.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.layers == 0 && self.count > 0 {
            return Err(RangeError::ZeroLayers { count: self.count });
        }
        Ok(())
    }
}

/// Snowfall generator.
#[derive(Debug, Clone)]
pub struct SnowFieldGenerator {
    config: SnowConfig,
}

impl SnowFieldGenerator {
    /// Creates a generator, rejecting unusable parameters.
    pub fn new(config: SnowConfig) -> Result<Self, RangeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generates exactly `count` particles.
    ///
    /// Layer assignment is by creation index; every other attribute is an
    /// independent uniform draw, so no particle depends on another.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        theme: &ColorTheme,
        rng: &mut R,
    ) -> Vec<SnowParticle> {
        let SnowConfig { count, layers } = self.config;
        let color = theme.decompose_snow_color();

        let particles: Vec<_> = (0..count)
            .map(|index| Self::particle(index % layers, layers, color, rng))
            .collect();

        debug!(count, layers, "Generated snowfall");
        particles
    }

    fn particle<R: RandomSource + ?Sized>(
        layer_index: u32,
        layers: u32,
        color: Rgb,
        rng: &mut R,
    ) -> SnowParticle {
        let horizontal_position_percent = rng.range(0.0, 100.0);
        let horizontal_drift_px = rng.range(-MAX_DRIFT_PX, MAX_DRIFT_PX);
        let base_duration = layer_index as f32 + BASE_DURATION_SECS;
        let animation_duration_secs = clamp_below(
            rng.range(0.0, DURATION_JITTER_SECS) + base_duration,
            base_duration + DURATION_JITTER_SECS,
        );
        let size_px = rng.range(0.0, MAX_SIZE_PX);
        let motion = if rng.next_unit() > 0.5 {
            MotionFamily::Wide
        } else {
            MotionFamily::Steep
        };
        let nearness = (layers - layer_index) as f32;
        let opacity_alpha = clamp_below(
            rng.range(0.0, OPACITY_PER_LAYER) * nearness,
            OPACITY_PER_LAYER * nearness,
        );
        let vertical_start_offset_percent = -rng.range(0.0, MAX_START_OFFSET_PERCENT);

        SnowParticle {
            horizontal_position_percent,
            horizontal_drift_px,
            vertical_start_offset_percent,
            size_px,
            layer_index,
            animation_duration_secs,
            opacity_alpha,
            motion,
            color,
        }
    }
}
