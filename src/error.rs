/*
 * Error Module
 *
 * Errors raised while configuring or stepping the simulation. Configuration
 * problems are reported at construction; numeric problems are reported by the
 * step that hit them, and that step commits nothing.
 */

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown boundary behavior `{0}` (expected `avoid` or `wrap`)")]
    UnknownBoundaryBehavior(String),
    #[error("unknown init type `{0}` (expected `fixed_speed`, `fixed_velocity` or `angle_range`)")]
    UnknownInitType(String),
    #[error("init_direction must not be the zero vector")]
    ZeroInitDirection,
    #[error("angle_range needs a finite init_angle and a finite non-negative angle_width, got ({init_angle}, {angle_width})")]
    InvalidAngleRange { init_angle: f64, angle_width: f64 },
    #[error("min_speed must be positive, got {0}")]
    NonPositiveMinSpeed(f64),
    #[error("min_speed ({min}) must not exceed max_speed ({max})")]
    InvertedSpeedRange { min: f64, max: f64 },
    #[error("max_speed must be finite, got {0}")]
    NonFiniteMaxSpeed(f64),
    #[error("world bounds must be positive and finite, got ({x}, {y})")]
    InvalidBounds { x: f64, y: f64 },
    #[error("num_boids must be positive")]
    NoBoids,
    #[error("{name} must be non-negative, got {value}")]
    NegativeDistance { name: &'static str, value: f64 },
    #[error("position range for {axis} is empty: [{min}, {max}]")]
    EmptyPositionRange { axis: char, min: f64, max: f64 },
    #[error("spatial grid needs at least one positive interaction distance")]
    DegenerateGrid,
    #[error("flock arrays are misaligned: expected {expected} boids, got {positions} positions and {velocities} velocities")]
    FlockSizeMismatch {
        expected: usize,
        positions: usize,
        velocities: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("boid {boid} reached a zero or non-finite velocity before clamping at tick {tick}")]
    NumericDegeneracy { boid: usize, tick: u64 },
}
