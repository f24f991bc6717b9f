//! End-to-end scene rendering through the public API.

use std::fs;

use frostline_engine::{
    execute, scene_path, Command, EngineConfig, OutputFormat, TomlPreferenceStore,
};
use frostline_scene::{PreferenceStore, Scene, SettingsSubmission};
use tempfile::TempDir;

fn setup() -> (TempDir, EngineConfig, TomlPreferenceStore) {
    let dir = TempDir::new().expect("tempdir");
    let config = EngineConfig {
        output_path: dir.path().join("site").join("index.html"),
        seed: Some(2024),
        ..EngineConfig::default()
    };
    let store = TomlPreferenceStore::open(dir.path().join("settings.toml")).expect("open");
    (dir, config, store)
}

fn scene(config: &EngineConfig) -> Scene {
    let json = fs::read_to_string(scene_path(config)).expect("scene file");
    serde_json::from_str(&json).expect("scene json")
}

#[test]
fn seeded_render_is_reproducible() {
    let (_dir, config, mut store) = setup();

    execute(&Command::Render, OutputFormat::Html, &config, &mut store).expect("first");
    let first = fs::read_to_string(&config.output_path).expect("html");
    execute(&Command::Render, OutputFormat::Html, &config, &mut store).expect("second");
    let second = fs::read_to_string(&config.output_path).expect("html");

    assert_eq!(first, second);
    assert_eq!(first.matches("class=\"snow\"").count(), 200);
    assert_eq!(first.matches("<path ").count(), 8);
}

#[test]
fn saved_colors_survive_reopening_the_store() {
    let (dir, config, mut store) = setup();
    let set = Command::Set(SettingsSubmission {
        sky_top: Some("#123456".to_string()),
        snow_color: Some("#ABCDEF".to_string()),
        ..Default::default()
    });
    execute(&set, OutputFormat::Html, &config, &mut store).expect("set");

    let mut reopened = TomlPreferenceStore::open(dir.path().join("settings.toml")).expect("reopen");
    assert_eq!(reopened.get("skyGradient1").as_deref(), Some("#123456"));
    assert_eq!(reopened.get("snowColor").as_deref(), Some("#abcdef"));

    execute(&Command::Render, OutputFormat::Html, &config, &mut reopened).expect("render");
    let html = fs::read_to_string(&config.output_path).expect("html");
    assert!(html.contains("linear-gradient(0deg, #123456 0%, #020024 100%)"));
    assert!(html.contains("background-color: rgba(171, 205, 239,"));
    assert!(html.contains("fill=\"#abcdef\""));
}

#[test]
fn sky_change_keeps_layout() {
    let (_dir, config, mut store) = setup();
    execute(&Command::Render, OutputFormat::Html, &config, &mut store).expect("render");
    let before = scene(&config);

    let set = Command::Set(SettingsSubmission {
        sky_top: Some("#000000".to_string()),
        ..Default::default()
    });
    execute(&set, OutputFormat::Html, &config, &mut store).expect("set");
    let after = scene(&config);

    assert_eq!(before.particles, after.particles);
    assert_eq!(before.dunes, after.dunes);
    assert_ne!(before.theme, after.theme);
}
