//! # Frostline
//!
//! Renders a snowy night scene to a standalone HTML page and manages the
//! saved theme colors.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::Result;
use frostline_engine::{app, Opts};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("frostline=info".parse()?))
        .init();

    let opts = Opts::parse();
    info!(command = ?opts.command, "Frostline starting");
    app::run(opts)
}
