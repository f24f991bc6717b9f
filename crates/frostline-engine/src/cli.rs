//! Command-line argument parsing.
//!
//! Parses args manually (no external dependencies). Supports environment
//! variable overrides via the `FROSTLINE_*` prefix; explicit flags win.

use std::env;
use std::path::PathBuf;
use std::process;

use frostline_scene::SettingsSubmission;
use thiserror::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Frostline - procedural winter scene generator

USAGE:
    frostline [COMMAND] [OPTIONS]

COMMANDS:
    render               Generate a new scene (default)
    set                  Change theme colors, then refresh the scene
    reset                Forget saved theme colors

OPTIONS:
    --config=PATH        Config file (default: ~/.config/frostline/frostline.toml)
    --out=PATH           Output file (default: from config)
    --format=FORMAT      Output format: 'html' or 'json' (default: html)
    --seed=N             Seed the generator for a reproducible scene
    --snow-count=N       Override the number of snow particles
    --dune-count=N       Override the number of drifts
    --help, -h           Show this help message
    --version, -V        Show version

SET OPTIONS:
    --sky-top=HEX        First sky gradient color, e.g. #090979
    --sky-bottom=HEX     Second sky gradient color, e.g. #020024
    --snow=HEX           Snow color, e.g. #ffffff

ENVIRONMENT VARIABLES:
    FROSTLINE_CONFIG     Override --config
    FROSTLINE_SEED       Override --seed
    RUST_LOG             Log filter (default: frostline=info)
";

/// Subcommand to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate and write a fresh scene.
    Render,
    /// Apply a settings submission.
    Set(SettingsSubmission),
    /// Clear persisted theme colors.
    Reset,
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Standalone HTML page.
    #[default]
    Html,
    /// Scene descriptors as JSON.
    Json,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Subcommand.
    pub command: Command,
    /// Config file override.
    pub config_path: Option<PathBuf>,
    /// Output file override.
    pub output: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Seed override.
    pub seed: Option<u64>,
    /// Particle count override, validated later.
    pub snow_count: Option<i64>,
    /// Drift count override, validated later.
    pub dune_count: Option<i64>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            command: Command::Render,
            config_path: None,
            output: None,
            format: OutputFormat::default(),
            seed: None,
            snow_count: None,
            dune_count: None,
        }
    }
}

/// Argument parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `--help` was requested.
    #[error("help requested")]
    Help,
    /// `--version` was requested.
    #[error("version requested")]
    Version,
    /// A flag value could not be parsed.
    #[error("Invalid {flag} value: {value}")]
    InvalidValue {
        /// Flag name
        flag: String,
        /// Offending value
        value: String,
    },
    /// Unrecognized argument.
    #[error("Unknown argument: {0}")]
    UnknownArg(String),
    /// A color flag was given without the `set` command.
    #[error("{0} is only valid with the 'set' command")]
    SetOnly(String),
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            },
            Err(ParseError::Version) => {
                println!("frostline {VERSION}");
                process::exit(0);
            },
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            },
        }
    }

    /// Parses `args` with environment lookups through `get_env`.
    pub fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();
        let mut submission = SettingsSubmission::default();
        let mut color_flag = None;

        if let Some(val) = get_env("FROSTLINE_CONFIG") {
            opts.config_path = Some(PathBuf::from(val));
        }
        if let Some(val) = get_env("FROSTLINE_SEED") {
            opts.seed = Some(parse_value("FROSTLINE_SEED", &val)?);
        }

        let mut saw_command = false;
        for arg in args {
            let arg = arg.as_ref();
            let (flag, value) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (arg, None),
            };

            match (flag, value) {
                ("--help" | "-h", None) => return Err(ParseError::Help),
                ("--version" | "-V", None) => return Err(ParseError::Version),
                ("--config", Some(v)) => opts.config_path = Some(PathBuf::from(v)),
                ("--out", Some(v)) => opts.output = Some(PathBuf::from(v)),
                ("--format", Some(v)) => {
                    opts.format = match v {
                        "html" => OutputFormat::Html,
                        "json" => OutputFormat::Json,
                        _ => return Err(invalid(flag, v)),
                    };
                },
                ("--seed", Some(v)) => opts.seed = Some(parse_value(flag, v)?),
                ("--snow-count", Some(v)) => opts.snow_count = Some(parse_value(flag, v)?),
                ("--dune-count", Some(v)) => opts.dune_count = Some(parse_value(flag, v)?),
                ("--sky-top", Some(v)) => {
                    submission.sky_top = Some(v.to_string());
                    color_flag.get_or_insert_with(|| flag.to_string());
                },
                ("--sky-bottom", Some(v)) => {
                    submission.sky_bottom = Some(v.to_string());
                    color_flag.get_or_insert_with(|| flag.to_string());
                },
                ("--snow", Some(v)) => {
                    submission.snow_color = Some(v.to_string());
                    color_flag.get_or_insert_with(|| flag.to_string());
                },
                ("render", None) if !saw_command => {
                    saw_command = true;
                    opts.command = Command::Render;
                },
                ("set", None) if !saw_command => {
                    saw_command = true;
                    opts.command = Command::Set(SettingsSubmission::default());
                },
                ("reset", None) if !saw_command => {
                    saw_command = true;
                    opts.command = Command::Reset;
                },
                _ => return Err(ParseError::UnknownArg(arg.to_string())),
            }
        }

        match (&mut opts.command, color_flag) {
            (Command::Set(pending), _) => *pending = submission,
            (_, Some(flag)) => return Err(ParseError::SetOnly(flag)),
            (_, None) => {},
        }

        Ok(opts)
    }
}

fn invalid(flag: &str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| invalid(flag, value))
}
