/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds the whole
 * per-run configuration: world bounds, rule factors and distances, speed
 * limits, boundary behavior, initializer settings and performance switches.
 * Parameters are validated once when a simulation is built and never change
 * afterwards.
 */

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryBehavior;
use crate::error::ConfigError;
use crate::init::InitConfig;
use crate::speed::SpeedLimits;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub x_bound: f64,
    pub y_bound: f64,
    pub margin: f64,
    pub avoid_factor: f64,
    pub cohesion_factor: f64,
    pub separation_factor: f64,
    pub alignment_factor: f64,
    pub cohesion_distance: f64,
    pub separation_distance: f64,
    pub alignment_distance: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub boundary_behavior: BoundaryBehavior,
    pub init: InitConfig,
    // Performance settings; results are identical either way
    pub enable_spatial_grid: bool,
    pub enable_parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        let max_speed = 1e-3;
        Self {
            num_boids: 1000,
            x_bound: 1.0,
            y_bound: 1.0,
            margin: 0.01,
            avoid_factor: 1e-2,
            cohesion_factor: 5e-3,
            separation_factor: 5e-2,
            alignment_factor: 5e-2,
            cohesion_distance: 0.05,
            separation_distance: 0.01,
            alignment_distance: 0.05,
            min_speed: max_speed * 0.5,
            max_speed,
            boundary_behavior: BoundaryBehavior::Avoid,
            init: InitConfig::default(),
            enable_spatial_grid: true,
            enable_parallel: false,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_boids == 0 {
            return Err(ConfigError::NoBoids);
        }

        let bounds_ok = [self.x_bound, self.y_bound]
            .iter()
            .all(|b| b.is_finite() && *b > 0.0);
        if !bounds_ok {
            return Err(ConfigError::InvalidBounds {
                x: self.x_bound,
                y: self.y_bound,
            });
        }

        for (name, value) in [
            ("separation_distance", self.separation_distance),
            ("alignment_distance", self.alignment_distance),
            ("cohesion_distance", self.cohesion_distance),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeDistance { name, value });
            }
        }

        if self.enable_spatial_grid && !(self.block_size() > 0.0) {
            return Err(ConfigError::DegenerateGrid);
        }

        self.speed_limits()?;
        self.init.validate()
    }

    /// Side length of a grid block: the largest interaction radius.
    pub fn block_size(&self) -> f64 {
        self.separation_distance
            .max(self.alignment_distance)
            .max(self.cohesion_distance)
    }

    /// Block budget per grid axis: about one block per boid overall, so tiny
    /// radii cannot blow up grid memory.
    pub fn max_blocks_per_axis(&self) -> usize {
        ((self.num_boids as f64).sqrt().ceil() as usize).max(1)
    }

    pub fn bounds(&self) -> DVec2 {
        DVec2::new(self.x_bound, self.y_bound)
    }

    pub fn speed_limits(&self) -> Result<SpeedLimits, ConfigError> {
        SpeedLimits::new(self.min_speed, self.max_speed)
    }

    // Get parameter ranges for the viewer's read-outs
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=100000
    }
}
