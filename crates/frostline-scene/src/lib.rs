//! # Frostline Scene
//!
//! Procedural winter scene generation for Frostline.
//!
//! This crate handles:
//! - Color theme resolution from persisted preferences
//! - Snowfall particle generation with depth layering
//! - Snowdrift ridge generation
//! - Composition onto a rendering surface
//! - Settings submission (validate, persist, decide what to refresh)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod composer;
pub mod dunes;
pub mod prefs;
pub mod rng;
pub mod settings;
pub mod snow;
pub mod surface;
pub mod theme;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::composer::*;
    pub use crate::dunes::*;
    pub use crate::prefs::*;
    pub use crate::rng::*;
    pub use crate::settings::*;
    pub use crate::snow::*;
    pub use crate::surface::*;
    pub use crate::theme::*;
}

pub use prelude::*;
