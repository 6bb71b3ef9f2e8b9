//! Named tolerances shared by every comparison in the crate.
//!
//! Shapes never carry their own epsilon; predicates take the tolerance
//! as an explicit argument and callers pass one of these constants.

/// Default tolerance for geometric comparisons (signed gaps, equality).
pub const EPSILON: f64 = 1e-10;

/// Speed below which a particle counts as being at rest.
pub const REST_SPEED_THRESHOLD: f64 = 1e-5;

/// Total kinetic energy below which a system counts as stable.
pub const KINETIC_ENERGY_THRESHOLD: f64 = 0.01;
