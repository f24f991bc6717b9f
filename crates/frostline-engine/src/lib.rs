//! # Frostline Engine
//!
//! Everything around scene generation that touches the outside world:
//! - Config: generation parameters and output settings from TOML
//! - Preferences: theme colors persisted between runs
//! - HTML: the document surface scenes are realized onto
//! - CLI: argument parsing and the command driver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod cli;
pub mod config;
pub mod html;
pub mod prefs_store;

pub use app::{execute, run, scene_path};
pub use cli::{Command, Opts, OutputFormat};
pub use config::EngineConfig;
pub use html::HtmlSurface;
pub use prefs_store::TomlPreferenceStore;
