//! Application driver.
//!
//! Loads configuration and preferences, resolves the theme, and runs one
//! command. Every successful render writes the scene descriptors next to
//! the output so a later sky-only change can repaint without regenerating.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use frostline_common::checked_count;
use frostline_scene::{
    submit, ColorTheme, PartialColorTheme, PreferenceStore, Refresh, Scene, SceneComposer,
};
use tracing::{info, warn};

use crate::cli::{Command, Opts, OutputFormat};
use crate::config::EngineConfig;
use crate::html::HtmlSurface;
use crate::prefs_store::TomlPreferenceStore;

/// Runs the command described by `opts` against the user's config and
/// preference files.
pub fn run(opts: Opts) -> Result<()> {
    let mut config = match &opts.config_path {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    apply_overrides(&mut config, &opts)?;
    config.validate()?;

    let mut store = TomlPreferenceStore::open_default().context("Failed to open preferences")?;
    execute(&opts.command, opts.format, &config, &mut store)?;
    Ok(())
}

/// Applies command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut EngineConfig, opts: &Opts) -> Result<()> {
    if let Some(output) = &opts.output {
        config.output_path.clone_from(output);
    }
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }
    if let Some(count) = opts.snow_count {
        config.snow.count = checked_count(count)?;
    }
    if let Some(count) = opts.dune_count {
        config.dunes.count = checked_count(count)?;
    }
    Ok(())
}

/// Runs one command and reports what was refreshed.
pub fn execute<P: PreferenceStore + ?Sized>(
    command: &Command,
    format: OutputFormat,
    config: &EngineConfig,
    store: &mut P,
) -> Result<Refresh> {
    let composer = SceneComposer::new(config.snow, config.dunes)?;
    let theme = ColorTheme::resolve(&PartialColorTheme::load(&*store), &ColorTheme::default());

    let (theme, refresh) = match command {
        Command::Render => (theme, Refresh::Regenerate),
        Command::Set(submission) => {
            let outcome = submit(&theme, submission, store)?;
            for rejected in &outcome.rejected {
                eprintln!("{rejected}");
            }
            (outcome.theme, outcome.refresh)
        },
        Command::Reset => {
            store.clear_theme()?;
            let defaults = ColorTheme::default();
            info!("Theme reset to defaults");
            (defaults, Refresh::between(&theme, &defaults))
        },
    };

    match refresh {
        Refresh::None => info!("Nothing to refresh"),
        Refresh::RepaintSky => match load_scene(config) {
            Some(previous) => {
                let mut surface = HtmlSurface::new();
                SceneComposer::realize(&mut surface, &previous);
                let scene = SceneComposer::repaint(&mut surface, previous, &theme);
                write_outputs(&surface, &scene, config, format)?;
            },
            None => {
                warn!("No previous scene to repaint, generating a new one");
                regenerate(&composer, &theme, config, format)?;
            },
        },
        Refresh::Regenerate => regenerate(&composer, &theme, config, format)?,
    }
    Ok(refresh)
}

/// Suffix of the scene descriptor file written next to the output.
pub const SCENE_SUFFIX: &str = ".scene.json";

/// Path of the scene descriptor file written alongside the output.
///
/// The output's extension is replaced by [`SCENE_SUFFIX`], so the two never
/// share a path whatever the output is called.
#[must_use]
pub fn scene_path(config: &EngineConfig) -> PathBuf {
    let stem = config
        .output_path
        .file_stem()
        .map_or_else(|| "frostline".to_string(), |s| s.to_string_lossy().into_owned());
    config.output_path.with_file_name(format!("{stem}{SCENE_SUFFIX}"))
}

fn regenerate(
    composer: &SceneComposer,
    theme: &ColorTheme,
    config: &EngineConfig,
    format: OutputFormat,
) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut surface = HtmlSurface::new();
    let scene = composer.build_scene(&mut surface, theme, &mut rng);
    write_outputs(&surface, &scene, config, format)
}

fn write_outputs(
    surface: &HtmlSurface,
    scene: &Scene,
    config: &EngineConfig,
    format: OutputFormat,
) -> Result<()> {
    let path = scene_path(config);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(scene)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    if format == OutputFormat::Html {
        surface
            .write_to(&config.output_path, &config.page_title)
            .with_context(|| format!("Failed to write {}", config.output_path.display()))?;
    }
    Ok(())
}

fn load_scene(config: &EngineConfig) -> Option<Scene> {
    let path = scene_path(config);
    let contents = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(scene) => Some(scene),
        Err(e) => {
            warn!("Ignoring unreadable scene file {}: {e}", path.display());
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostline_scene::{MemoryPreferences, SettingsSubmission};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> EngineConfig {
        EngineConfig {
            output_path: dir.path().join("scene.html"),
            seed: Some(5),
            ..EngineConfig::default()
        }
    }

    fn read_scene(config: &EngineConfig) -> Scene {
        let json = fs::read_to_string(scene_path(config)).expect("scene file");
        serde_json::from_str(&json).expect("scene json")
    }

    #[test]
    fn test_render_writes_html_and_scene() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_in(&dir);
        let mut store = MemoryPreferences::default();

        let refresh = execute(&Command::Render, OutputFormat::Html, &config, &mut store)
            .expect("render");

        assert_eq!(refresh, Refresh::Regenerate);
        let html = fs::read_to_string(&config.output_path).expect("html");
        assert_eq!(html.matches("class=\"snow\"").count(), 200);
        assert_eq!(read_scene(&config).dunes.len(), 8);
    }

    #[test]
    fn test_json_format_skips_html() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_in(&dir);
        let mut store = MemoryPreferences::default();

        execute(&Command::Render, OutputFormat::Json, &config, &mut store).expect("render");
        assert!(!config.output_path.exists());
        assert!(scene_path(&config).exists());
    }

    #[test]
    fn test_sky_change_repaints_existing_scene() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_in(&dir);
        let mut store = MemoryPreferences::default();
        execute(&Command::Render, OutputFormat::Html, &config, &mut store).expect("render");
        let before = read_scene(&config);

        let set = Command::Set(SettingsSubmission {
            sky_bottom: Some("#000000".to_string()),
            ..Default::default()
        });
        let refresh = execute(&set, OutputFormat::Html, &config, &mut store).expect("set");
        let after = read_scene(&config);

        assert_eq!(refresh, Refresh::RepaintSky);
        assert_eq!(after.particles, before.particles);
        assert_eq!(after.dunes, before.dunes);
        assert_eq!(after.theme.sky_bottom.to_string(), "#000000");
        let html = fs::read_to_string(&config.output_path).expect("html");
        assert!(html.contains("#000000 100%"));
    }

    #[test]
    fn test_snow_change_regenerates() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_in(&dir);
        let mut store = MemoryPreferences::default();

        let set = Command::Set(SettingsSubmission {
            snow_color: Some("#ff8000".to_string()),
            ..Default::default()
        });
        let refresh = execute(&set, OutputFormat::Html, &config, &mut store).expect("set");

        assert_eq!(refresh, Refresh::Regenerate);
        let scene = read_scene(&config);
        assert!(scene.dunes.iter().all(|d| d.fill.to_string() == "#ff8000"));
        assert_eq!(store.get("snowColor").as_deref(), Some("#ff8000"));
    }

    #[test]
    fn test_invalid_submission_changes_nothing() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_in(&dir);
        let mut store = MemoryPreferences::default();

        let set = Command::Set(SettingsSubmission {
            snow_color: Some("white".to_string()),
            ..Default::default()
        });
        let refresh = execute(&set, OutputFormat::Html, &config, &mut store).expect("set");

        assert_eq!(refresh, Refresh::None);
        assert!(store.is_empty());
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = config_in(&dir);
        let mut store = MemoryPreferences::default();
        store.set("snowColor", "#ff0000").expect("set");

        let refresh = execute(&Command::Reset, OutputFormat::Html, &config, &mut store)
            .expect("reset");

        assert_eq!(refresh, Refresh::Regenerate);
        assert!(store.is_empty());
        assert_eq!(read_scene(&config).theme, ColorTheme::default());
    }

    #[test]
    fn test_scene_path_never_matches_output() {
        let mut config = EngineConfig::default();
        assert_eq!(scene_path(&config), PathBuf::from("frostline.scene.json"));

        config.output_path = PathBuf::from("out/x.json");
        assert_eq!(scene_path(&config), PathBuf::from("out/x.scene.json"));
        config.output_path = PathBuf::from("x.scene.json");
        assert_ne!(scene_path(&config), config.output_path);
    }

    #[test]
    fn test_sky_change_repaints_with_json_named_output() {
        let dir = TempDir::new().expect("tempdir");
        let config = EngineConfig {
            output_path: dir.path().join("page.json"),
            seed: None,
            ..EngineConfig::default()
        };
        let mut store = MemoryPreferences::default();
        execute(&Command::Render, OutputFormat::Html, &config, &mut store).expect("render");
        let before = read_scene(&config);

        let set = Command::Set(SettingsSubmission {
            sky_top: Some("#101010".to_string()),
            ..Default::default()
        });
        execute(&set, OutputFormat::Html, &config, &mut store).expect("set");

        assert_eq!(read_scene(&config).particles, before.particles);
        let html = fs::read_to_string(&config.output_path).expect("html");
        assert!(html.contains("#101010 0%"));
    }

    #[test]
    fn test_overrides() {
        let mut config = EngineConfig::default();
        let opts = Opts {
            output: Some(PathBuf::from("x.html")),
            seed: Some(3),
            snow_count: Some(10),
            dune_count: Some(2),
            ..Opts::default()
        };
        apply_overrides(&mut config, &opts).expect("overrides");

        assert_eq!(config.output_path, PathBuf::from("x.html"));
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.snow.count, 10);
        assert_eq!(config.dunes.count, 2);
    }

    #[test]
    fn test_negative_count_override_rejected() {
        let mut config = EngineConfig::default();
        let opts = Opts {
            dune_count: Some(-3),
            ..Opts::default()
        };
        assert!(apply_overrides(&mut config, &opts).is_err());
    }

    #[test]
    fn test_inverted_range_fails_fast() {
        let dir = TempDir::new().expect("tempdir");
        let mut config = config_in(&dir);
        config.dunes.min_length = 300.0;
        config.dunes.max_length = 100.0;
        let mut store = MemoryPreferences::default();

        let err = execute(&Command::Render, OutputFormat::Html, &config, &mut store)
            .expect_err("inverted range");
        assert!(err.to_string().contains("max_length"));
        assert!(!config.output_path.exists());
    }
}
