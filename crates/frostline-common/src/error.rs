//! Error types for Frostline.

use thiserror::Error;

/// Top-level error type for Frostline operations.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Color validation errors
    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    /// Generator parameter errors
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A color string failed hex-format validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Not a `#` followed by six hex digits
    #[error("{0} is not a valid color! Format like this: #ffffff")]
    InvalidColor(String),
}

/// A generator was configured with parameters it cannot honor.
///
/// These are caller contract violations and are reported before any
/// generation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// Dune length range is empty
    #[error("Invalid dune length range: max_length {max} is less than min_length {min}")]
    InvertedLength {
        /// Configured minimum length
        min: f32,
        /// Configured maximum length
        max: f32,
    },

    /// Particles cannot be spread over zero depth layers
    #[error("Cannot assign {count} snow particles to zero layers")]
    ZeroLayers {
        /// Requested particle count
        count: u32,
    },

    /// Viewport width is zero, negative or not finite
    #[error("Invalid viewport width: {0}")]
    InvalidViewport(f32),

    /// A count was negative or too large to represent
    #[error("Invalid count: {0} (must be between 0 and {max})", max = u32::MAX)]
    InvalidCount(i64),
}

/// Converts a signed count coming from user input into a generator count.
pub fn checked_count(value: i64) -> Result<u32, RangeError> {
    u32::try_from(value).map_err(|_| RangeError::InvalidCount(value))
}

/// Result type alias for Frostline operations.
pub type SceneResult<T> = Result<T, SceneError>;
