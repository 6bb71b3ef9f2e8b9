//! Error types for layout and packing requests.
//!
//! Only configuration mistakes are reported as errors. Arithmetic edge
//! cases (zero-length normalization, two static particles colliding) are
//! resolved in place and never surface here.

use thiserror::Error;

/// Errors produced while laying out a hexagon group.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Only groups of 1 to 7 hexagons have a defined arrangement.
    #[error("unsupported hexagon count: {count} (supported: 1..=7)")]
    UnsupportedHexagonCount { count: usize },
}

/// Errors produced while preparing a circle packing run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackingError {
    /// The hexagon group used to seed the packing could not be built.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Nothing to pack.
    #[error("no circles to pack")]
    NoItems,

    /// A circle radius was zero, negative or not finite.
    #[error("invalid radius {radius} for item {index}")]
    InvalidRadius { index: usize, radius: f64 },

    /// A mass was negative or not finite.
    #[error("invalid mass {mass} for item {index}")]
    InvalidMass { index: usize, mass: f64 },
}
