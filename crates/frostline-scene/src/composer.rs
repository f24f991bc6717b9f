//! Scene composition.
//!
//! Paints the sky, runs both generators and realizes their descriptors onto
//! a `RenderSurface`. The sky is always painted first; snowfall and drifts
//! live in separate containers so their relative order does not matter.

use frostline_common::RangeError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dunes::{DuneConfig, DuneRidgeGenerator, DuneSegment};
use crate::rng::RandomSource;
use crate::snow::{SnowConfig, SnowFieldGenerator, SnowParticle};
use crate::surface::{Container, Element, ElementKind, RenderSurface, StyleMap};
use crate::theme::ColorTheme;

/// Style class of snow particle elements.
pub const SNOW_CLASS: &str = "snow";

/// Everything generated for one scene load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Theme the scene was generated and painted with.
    pub theme: ColorTheme,
    /// Ridge viewbox `(width, height)`.
    pub viewbox: (f32, f32),
    /// Snow particles, in creation order.
    pub particles: Vec<SnowParticle>,
    /// Drifts, in index order.
    pub dunes: Vec<DuneSegment>,
}

impl Scene {
    /// Same descriptors under a new sky.
    ///
    /// Particle and drift colors are baked in, so only the sky changes.
    #[must_use]
    pub fn with_sky(mut self, theme: &ColorTheme) -> Self {
        self.theme = self
            .theme
            .apply_sky_only(Some(theme.sky_top), Some(theme.sky_bottom));
        self
    }
}

/// Sky background for a theme.
#[must_use]
pub fn sky_style(theme: &ColorTheme) -> StyleMap {
    StyleMap::new().with(
        "background",
        format!(
            "linear-gradient(0deg, {} 0%, {} 100%)",
            theme.sky_top, theme.sky_bottom
        ),
    )
}

/// Element for one snow particle.
#[must_use]
pub fn particle_element(particle: &SnowParticle) -> Element {
    let duration = particle.animation_duration_secs;
    let style = StyleMap::new()
        .with(
            "background-color",
            particle.color.to_rgba_css(particle.opacity_alpha),
        )
        .with("height", format!("{}px", particle.size_px))
        .with("width", format!("{}px", particle.size_px))
        .with("--x", format!("{}vw", particle.horizontal_position_percent))
        .with("--y", format!("{}vh", particle.vertical_start_offset_percent))
        .with("--x-travel", format!("{}px", particle.horizontal_drift_px))
        .with(
            "animation",
            format!(
                "snowfall-x {duration}s infinite {}, snowfall-y {duration}s infinite linear",
                particle.motion.easing()
            ),
        );

    Element::new(ElementKind::Block)
        .with_class(SNOW_CLASS)
        .with_style(style)
}

/// Element for one drift.
#[must_use]
pub fn dune_element(dune: &DuneSegment) -> Element {
    Element::new(ElementKind::Path)
        .with_attribute("d", dune.path_data())
        .with_attribute("fill", dune.fill.to_string())
}

/// Orchestrates sky, snowfall and drift generation.
#[derive(Debug, Clone)]
pub struct SceneComposer {
    snow: SnowFieldGenerator,
    dunes: DuneRidgeGenerator,
}

impl SceneComposer {
    /// Creates a composer, validating both generator configs.
    pub fn new(snow: SnowConfig, dunes: DuneConfig) -> Result<Self, RangeError> {
        Ok(Self {
            snow: SnowFieldGenerator::new(snow)?,
            dunes: DuneRidgeGenerator::new(dunes)?,
        })
    }

    /// Replaces the surface background with the theme's sky gradient.
    pub fn paint_sky<S: RenderSurface + ?Sized>(surface: &mut S, theme: &ColorTheme) {
        surface.set_container_style(Container::Canvas, sky_style(theme));
    }

    /// Generates descriptors without touching any surface.
    pub fn generate<R: RandomSource + ?Sized>(&self, theme: &ColorTheme, rng: &mut R) -> Scene {
        let particles = self.snow.generate(theme, rng);
        let dunes = self.dunes.generate(theme, rng);
        let config = self.dunes.config();

        Scene {
            theme: *theme,
            viewbox: (config.viewport_width, config.viewport_height),
            particles,
            dunes,
        }
    }

    /// Appends a scene's particles and drifts to the surface.
    pub fn realize<S: RenderSurface + ?Sized>(surface: &mut S, scene: &Scene) {
        let (width, height) = scene.viewbox;
        surface.set_container_attribute(
            Container::Ridges,
            "viewBox",
            &format!("0 0 {width} {height}"),
        );

        for particle in &scene.particles {
            surface.append(Container::Particles, particle_element(particle));
        }
        for dune in &scene.dunes {
            surface.append(Container::Ridges, dune_element(dune));
        }
    }

    /// Paints the sky, generates snowfall and drifts, and realizes them.
    pub fn build_scene<S, R>(&self, surface: &mut S, theme: &ColorTheme, rng: &mut R) -> Scene
    where
        S: RenderSurface + ?Sized,
        R: RandomSource + ?Sized,
    {
        Self::paint_sky(surface, theme);
        let scene = self.generate(theme, rng);
        Self::realize(surface, &scene);

        info!(
            particles = scene.particles.len(),
            dunes = scene.dunes.len(),
            sky_top = %theme.sky_top,
            sky_bottom = %theme.sky_bottom,
            snow = %theme.snow_color,
            "Scene built"
        );
        scene
    }

    /// Swaps the sky of a scene already realized on `surface`.
    ///
    /// Only the canvas background is rewritten; particles and drifts on the
    /// surface are left as they are.
    pub fn repaint<S: RenderSurface + ?Sized>(
        surface: &mut S,
        scene: Scene,
        theme: &ColorTheme,
    ) -> Scene {
        let scene = scene.with_sky(theme);
        Self::paint_sky(surface, &scene.theme);
        info!(sky_top = %scene.theme.sky_top, sky_bottom = %scene.theme.sky_bottom, "Sky repainted");
        scene
    }
}
