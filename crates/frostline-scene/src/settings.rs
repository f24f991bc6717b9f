//! Settings form submission.
//!
//! Each submitted field is handled on its own: a malformed color is
//! rejected without blocking the other fields, a valid one is persisted.
//! Sky changes only need the gradient repainted. A snow color change needs
//! a full regeneration because the color is baked into every particle and
//! drift when they are created.

use frostline_common::{ColorError, HexColor, SceneResult};
use tracing::{info, warn};

use crate::prefs::PreferenceStore;
use crate::theme::{ColorTheme, ThemeField};

/// What the scene needs after a theme change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Refresh {
    /// Nothing changed.
    #[default]
    None,
    /// Repaint the sky gradient only.
    RepaintSky,
    /// Regenerate snowfall and drifts.
    Regenerate,
}

impl Refresh {
    /// Classifies the change from `old` to `new`.
    #[must_use]
    pub fn between(old: &ColorTheme, new: &ColorTheme) -> Self {
        ThemeField::ALL
            .into_iter()
            .filter(|&field| old.get(field) != new.get(field))
            .map(|field| if field.is_sky() { Self::RepaintSky } else { Self::Regenerate })
            .max()
            .unwrap_or_default()
    }
}

/// Raw values from the settings form. Empty or absent fields are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSubmission {
    /// New first gradient color.
    pub sky_top: Option<String>,
    /// New second gradient color.
    pub sky_bottom: Option<String>,
    /// New snow color.
    pub snow_color: Option<String>,
}

impl SettingsSubmission {
    fn field(&self, field: ThemeField) -> Option<&str> {
        let raw = match field {
            ThemeField::SkyTop => self.sky_top.as_deref(),
            ThemeField::SkyBottom => self.sky_bottom.as_deref(),
            ThemeField::SnowColor => self.snow_color.as_deref(),
        };
        raw.map(str::trim).filter(|value| !value.is_empty())
    }

    /// Whether no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ThemeField::ALL.iter().all(|&f| self.field(f).is_none())
    }
}

/// Result of applying a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsOutcome {
    /// Theme after the accepted fields were applied.
    pub theme: ColorTheme,
    /// What the scene needs to reflect `theme`.
    pub refresh: Refresh,
    /// Fields that failed validation, in form order.
    pub rejected: Vec<ColorError>,
}

/// Validates, persists and applies a settings submission.
///
/// Storage failures abort the submission; validation failures do not.
pub fn submit<P: PreferenceStore + ?Sized>(
    theme: &ColorTheme,
    submission: &SettingsSubmission,
    store: &mut P,
) -> SceneResult<SettingsOutcome> {
    let mut next = *theme;
    let mut rejected = Vec::new();

    for field in ThemeField::ALL {
        let Some(raw) = submission.field(field) else {
            continue;
        };
        match HexColor::parse(raw) {
            Ok(color) => {
                store.set(field.key(), &color.to_string())?;
                next = next.with(field, color);
            },
            Err(err) => {
                warn!(key = field.key(), %err, "Rejected settings value");
                rejected.push(err);
            },
        }
    }

    let refresh = Refresh::between(theme, &next);
    info!(?refresh, rejected = rejected.len(), "Settings applied");
    Ok(SettingsOutcome {
        theme: next,
        refresh,
        rejected,
    })
}
