//! # Frostline Common
//!
//! Common types shared by the Frostline scene generator and its engine.
//!
//! This crate provides:
//! - `HexColor`, the validated `#rrggbb` color value, and its validator
//! - `Rgb`, the decoded channel triple fed into particle colors
//! - The error taxonomy (color and range errors)
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod color;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::*;
    pub use crate::error::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_exports_color_and_errors() {
        let color = HexColor::parse("#ff8000").expect("valid color");
        assert_eq!(color.to_rgb(), Rgb::new(255, 128, 0));

        let err: SceneError = ColorError::InvalidColor("blue".into()).into();
        assert!(matches!(err, SceneError::Color(_)));
    }
}
