//! Core 2-D bubble packing library.
//!
//! Main components:
//! - [`geometry`] — vectors, points, angles, lines and the boxed shapes
//!   (rectangles, circles, hexagons) behind the [`geometry::Shape`] trait.
//! - [`hex_grid`] — deterministic triangle / flower layouts of 1–7 hexagons.
//! - [`physics`] — particles, forces and the per-step physics engine.
//! - [`simulation`] — the offline, run-to-convergence driver.
//! - [`packing`] — circle packing built on top of the driver.
//! - [`config`] — configuration for the engine, driver and packing.
//! - [`error`] — error types for layout and packing requests.
//! - [`tolerance`] — shared floating point tolerances.
//! - [`types`] — shared type aliases and IDs.

pub mod config;
pub mod error;
pub mod geometry;
pub mod hex_grid;
pub mod packing;
pub mod physics;
pub mod simulation;
pub mod tolerance;
pub mod types;
