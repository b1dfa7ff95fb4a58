/*
 * BlockBoids - Module Definitions
 *
 * This file defines the module structure for the boid dynamics engine.
 * The engine advances a fixed population of point agents one tick at a time
 * under cohesion, separation and alignment, with block-indexed neighbor
 * discovery, wall avoidance or toroidal wrap, and speed limiting.
 */

// Re-export key components for easier access
pub use boundary::BoundaryBehavior;
pub use engine::Simulation;
pub use error::{ConfigError, SimulationError};
pub use flock::Flock;
pub use init::{InitConfig, InitType};
pub use params::SimulationParams;
pub use rules::FlockingRules;
pub use spatial_grid::SpatialGrid;
pub use speed::SpeedLimits;

// Vectors used throughout the public API
pub use glam::DVec2;

// Define modules
pub mod boundary;
pub mod engine;
pub mod error;
pub mod flock;
pub mod init;
pub mod params;
pub mod rng;
pub mod rules;
pub mod spatial_grid;
pub mod speed;
pub mod vector;
