//! Color theme resolution.
//!
//! A `ColorTheme` is resolved once per scene load from persisted
//! preferences layered over defaults, then passed by value into every
//! generator call. It is never mutated in place; changes produce a new
//! theme.

use frostline_common::{HexColor, Rgb};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::prefs::PreferenceStore;

/// Default top-of-gradient sky color.
pub const DEFAULT_SKY_TOP: HexColor = HexColor::from_u32(0x0009_0979);

/// Default bottom-of-gradient sky color.
pub const DEFAULT_SKY_BOTTOM: HexColor = HexColor::from_u32(0x0002_0024);

/// Default snow color.
pub const DEFAULT_SNOW_COLOR: HexColor = HexColor::from_u32(0x00FF_FFFF);

/// One of the three themeable colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeField {
    /// First gradient stop (0%).
    SkyTop,
    /// Second gradient stop (100%).
    SkyBottom,
    /// Particle and drift color.
    SnowColor,
}

impl ThemeField {
    /// All fields, in settings-form order.
    pub const ALL: [Self; 3] = [Self::SkyTop, Self::SkyBottom, Self::SnowColor];

    /// Preference key the field is persisted under.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SkyTop => "skyGradient1",
            Self::SkyBottom => "skyGradient2",
            Self::SnowColor => "snowColor",
        }
    }

    /// Whether changing this field only requires repainting the sky.
    #[must_use]
    pub const fn is_sky(self) -> bool {
        matches!(self, Self::SkyTop | Self::SkyBottom)
    }
}

/// Active sky gradient and snow color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorTheme {
    /// Gradient color at 0%.
    pub sky_top: HexColor,
    /// Gradient color at 100%.
    pub sky_bottom: HexColor,
    /// Color baked into every particle and drift.
    pub snow_color: HexColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            sky_top: DEFAULT_SKY_TOP,
            sky_bottom: DEFAULT_SKY_BOTTOM,
            snow_color: DEFAULT_SNOW_COLOR,
        }
    }
}

/// Raw, possibly missing or malformed, persisted color strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialColorTheme {
    /// Persisted `skyGradient1`.
    pub sky_top: Option<String>,
    /// Persisted `skyGradient2`.
    pub sky_bottom: Option<String>,
    /// Persisted `snowColor`.
    pub snow_color: Option<String>,
}

impl PartialColorTheme {
    /// Reads the three theme keys from a preference store.
    pub fn load<P: PreferenceStore + ?Sized>(store: &P) -> Self {
        Self {
            sky_top: store.get(ThemeField::SkyTop.key()),
            sky_bottom: store.get(ThemeField::SkyBottom.key()),
            snow_color: store.get(ThemeField::SnowColor.key()),
        }
    }

    /// Returns the raw value for a field.
    #[must_use]
    pub fn field(&self, field: ThemeField) -> Option<&str> {
        match field {
            ThemeField::SkyTop => self.sky_top.as_deref(),
            ThemeField::SkyBottom => self.sky_bottom.as_deref(),
            ThemeField::SnowColor => self.snow_color.as_deref(),
        }
    }
}

impl ColorTheme {
    /// Creates a theme from three colors.
    #[must_use]
    pub const fn new(sky_top: HexColor, sky_bottom: HexColor, snow_color: HexColor) -> Self {
        Self {
            sky_top,
            sky_bottom,
            snow_color,
        }
    }

    /// Layers persisted values over `defaults`.
    ///
    /// Each field independently uses the persisted value when it is present
    /// and a valid hex color, otherwise the default. Missing values are
    /// normal; malformed ones are logged and ignored.
    #[must_use]
    pub fn resolve(persisted: &PartialColorTheme, defaults: &ColorTheme) -> Self {
        let pick = |field: ThemeField| {
            let fallback = defaults.get(field);
            match persisted.field(field).filter(|raw| !raw.is_empty()) {
                None => fallback,
                Some(raw) => HexColor::parse(raw).unwrap_or_else(|err| {
                    warn!(key = field.key(), %err, "Ignoring persisted color");
                    fallback
                }),
            }
        };

        Self {
            sky_top: pick(ThemeField::SkyTop),
            sky_bottom: pick(ThemeField::SkyBottom),
            snow_color: pick(ThemeField::SnowColor),
        }
    }

    /// Returns a copy with only the sky colors replaced.
    ///
    /// Used when the gradient changes; snow and drifts keep their baked
    /// colors and need not be regenerated.
    #[must_use]
    pub fn apply_sky_only(&self, sky_top: Option<HexColor>, sky_bottom: Option<HexColor>) -> Self {
        Self {
            sky_top: sky_top.unwrap_or(self.sky_top),
            sky_bottom: sky_bottom.unwrap_or(self.sky_bottom),
            snow_color: self.snow_color,
        }
    }

    /// Returns a copy with one field replaced.
    #[must_use]
    pub fn with(&self, field: ThemeField, color: HexColor) -> Self {
        let mut theme = *self;
        match field {
            ThemeField::SkyTop => theme.sky_top = color,
            ThemeField::SkyBottom => theme.sky_bottom = color,
            ThemeField::SnowColor => theme.snow_color = color,
        }
        theme
    }

    /// Returns the color for a field.
    #[must_use]
    pub const fn get(&self, field: ThemeField) -> HexColor {
        match field {
            ThemeField::SkyTop => self.sky_top,
            ThemeField::SkyBottom => self.sky_bottom,
            ThemeField::SnowColor => self.snow_color,
        }
    }

    /// Snow color split into integer channels.
    #[must_use]
    pub const fn decompose_snow_color(&self) -> Rgb {
        self.snow_color.to_rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{MemoryPreferences, PreferenceStore};

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).expect("valid color")
    }

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.sky_top.to_string(), "#090979");
        assert_eq!(theme.sky_bottom.to_string(), "#020024");
        assert_eq!(theme.snow_color.to_string(), "#ffffff");
    }

    #[test]
    fn test_resolve_partial_overrides_one_field() {
        let persisted = PartialColorTheme {
            sky_top: Some("#123456".to_string()),
            ..Default::default()
        };
        let theme = ColorTheme::resolve(&persisted, &ColorTheme::default());

        assert_eq!(theme.sky_top, hex("#123456"));
        assert_eq!(theme.sky_bottom, hex("#020024"));
        assert_eq!(theme.snow_color, hex("#ffffff"));
    }

    #[test]
    fn test_resolve_with_nothing_persisted_is_defaults() {
        let theme = ColorTheme::resolve(&PartialColorTheme::default(), &ColorTheme::default());
        assert_eq!(theme, ColorTheme::default());
    }

    #[test]
    fn test_resolve_ignores_invalid_and_empty() {
        let persisted = PartialColorTheme {
            sky_top: Some("navy".to_string()),
            sky_bottom: Some(String::new()),
            snow_color: Some("#EEEEEE".to_string()),
        };
        let theme = ColorTheme::resolve(&persisted, &ColorTheme::default());

        assert_eq!(theme.sky_top, DEFAULT_SKY_TOP);
        assert_eq!(theme.sky_bottom, DEFAULT_SKY_BOTTOM);
        assert_eq!(theme.snow_color, hex("#eeeeee"));
    }

    #[test]
    fn test_partial_load_from_store() {
        let mut store = MemoryPreferences::default();
        store
            .set(ThemeField::SnowColor.key(), "#ff8000")
            .expect("memory store never fails");

        let partial = PartialColorTheme::load(&store);
        assert_eq!(partial.snow_color.as_deref(), Some("#ff8000"));
        assert!(partial.sky_top.is_none());
        assert!(partial.sky_bottom.is_none());
    }

    #[test]
    fn test_apply_sky_only_keeps_snow() {
        let theme = ColorTheme::default();
        let updated = theme.apply_sky_only(Some(hex("#111111")), None);

        assert_eq!(updated.sky_top, hex("#111111"));
        assert_eq!(updated.sky_bottom, theme.sky_bottom);
        assert_eq!(updated.snow_color, theme.snow_color);
    }

    #[test]
    fn test_decompose_snow_color() {
        let theme = ColorTheme::default().with(ThemeField::SnowColor, hex("#ff8000"));
        assert_eq!(theme.decompose_snow_color(), Rgb::new(255, 128, 0));
        assert_eq!(
            ColorTheme::default().decompose_snow_color(),
            Rgb::new(255, 255, 255)
        );
    }

    #[test]
    fn test_field_keys() {
        let keys: Vec<_> = ThemeField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, ["skyGradient1", "skyGradient2", "snowColor"]);
        assert!(ThemeField::SkyTop.is_sky());
        assert!(!ThemeField::SnowColor.is_sky());
    }
}
