//! Tunables for the engine, the offline driver, hexagon layout and
//! circle packing.
//!
//! Every struct is `serde`-friendly and fills missing fields from its
//! [`Default`] impl, so a partial JSON/TOML document is a valid config.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2D;

/// Settings for [`crate::physics::PhysicsEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Constant acceleration; applied as `gravity * mass` each step.
    pub gravity: Vector2D,
    /// Bounce factor for wall hits and collision impulses.
    pub restitution_coefficient: f64,
    /// Collision resolution rounds per step.
    pub collision_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: Vector2D::ZERO,
            restitution_coefficient: 0.8,
            collision_iterations: 1,
        }
    }
}

/// Settings for [`crate::simulation::OfflineSimulation`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub fixed_delta_time_seconds: f64,
    /// The stability check is skipped until more steps than this have run.
    pub min_iterations: usize,
    /// Hard cap on the number of steps.
    pub max_iterations: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_delta_time_seconds: 1.0 / 60.0,
            min_iterations: 50,
            max_iterations: 250,
        }
    }
}

/// Rank-based scale factors for the non-target circles.
///
/// The k-th non-target circle (counting from 1) is scaled by the value
/// interpolated from `start` at k = 1 to `end` at k = circle count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableScaling {
    pub start: f64,
    pub end: f64,
}

impl Default for VariableScaling {
    fn default() -> Self {
        Self {
            start: 0.6,
            end: 1.1,
        }
    }
}

/// Settings for [`crate::packing`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Spring constant pulling every circle towards the frame center.
    pub central_attraction_strength: f64,
    pub time_step: f64,
    pub collision_iterations: usize,
    pub min_iterations: usize,
    pub max_iterations: usize,
    /// Inset applied to the left and right of the layout frame.
    pub frame_margin: f64,
    /// Scale factor for the target circle.
    pub scale_up: f64,
    /// Scale factor for the other circles, unless `variable_scaling` is set.
    pub scale_down: f64,
    pub variable_scaling: Option<VariableScaling>,
    /// Scale factor for the target circle when `variable_scaling` is set.
    pub variable_scale_up: f64,
    /// Extra rotation for groups of seven circles, in degrees.
    pub seven_group_rotation_degrees: Option<f64>,
    /// Maximum separation rounds used to clear overlaps left after the run.
    pub settle_rounds: usize,
    pub restitution_coefficient: f64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            central_attraction_strength: 8.0,
            time_step: 1.0 / 60.0,
            collision_iterations: 2,
            min_iterations: 50,
            max_iterations: 100,
            frame_margin: 8.0,
            scale_up: 1.3,
            scale_down: 0.8,
            variable_scaling: None,
            variable_scale_up: 1.4,
            seven_group_rotation_degrees: Some(30.0),
            settle_rounds: 1024,
            restitution_coefficient: 0.8,
        }
    }
}

impl PackingConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            gravity: Vector2D::ZERO,
            restitution_coefficient: self.restitution_coefficient,
            collision_iterations: self.collision_iterations,
        }
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            fixed_delta_time_seconds: self.time_step,
            min_iterations: self.min_iterations,
            max_iterations: self.max_iterations,
        }
    }

    /// Scale factor for the target circle.
    pub fn target_scale(&self) -> f64 {
        if self.variable_scaling.is_some() {
            self.variable_scale_up
        } else {
            self.scale_up
        }
    }
}

/// Settings for sizing the seed hexagon group of a bubble layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexGridConfig {
    /// Gap between neighbouring hexagons.
    pub extra_position_offset: f64,
    /// Circles per row used to size hexagons when there are more than 3.
    pub circles_per_row_many: f64,
    /// Circles per row used to size hexagons for 1 to 3 of them.
    pub circles_per_row_few: f64,
}

impl Default for HexGridConfig {
    fn default() -> Self {
        Self {
            extra_position_offset: 8.0,
            circles_per_row_many: 3.0,
            circles_per_row_few: 2.5,
        }
    }
}

impl HexGridConfig {
    /// Circumradius of each hexagon for `count` hexagons in a container
    /// `container_width` wide.
    pub fn circum_radius(&self, container_width: f64, count: usize) -> f64 {
        let per_row = if count > 3 {
            self.circles_per_row_many
        } else {
            self.circles_per_row_few
        };
        container_width / per_row / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: PackingConfig =
            serde_json::from_str(r#"{ "max_iterations": 40, "variable_scaling": {} }"#).unwrap();
        assert_eq!(cfg.max_iterations, 40);
        assert_eq!(cfg.collision_iterations, 2);
        assert_eq!(cfg.variable_scaling, Some(VariableScaling::default()));
        assert_relative_eq!(cfg.target_scale(), 1.4);
    }

    #[test]
    fn engine_config_round_trips_through_json() {
        let cfg = EngineConfig {
            gravity: Vector2D::new(0.0, 9.8),
            ..EngineConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn empty_document_is_the_default() {
        let cfg: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SimulationConfig::default());
    }

    #[test]
    fn packing_config_derives_engine_and_driver_settings() {
        let cfg = PackingConfig::default();
        assert_eq!(cfg.engine_config().collision_iterations, 2);
        assert_eq!(cfg.simulation_config().max_iterations, 100);
        assert_relative_eq!(cfg.target_scale(), 1.3);
    }

    #[test]
    fn hexagon_size_depends_on_count() {
        let cfg = HexGridConfig::default();
        assert_relative_eq!(cfg.circum_radius(300.0, 7), 50.0);
        assert_relative_eq!(cfg.circum_radius(300.0, 2), 60.0);
    }
}
