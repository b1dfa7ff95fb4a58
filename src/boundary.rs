/*
 * Boundary Module
 *
 * What happens when a boid nears or crosses the edge of the world:
 * - Avoid: soft repulsion inside a margin along each wall
 * - Wrap: toroidal wraparound of positions
 * The behavior is fixed for the lifetime of a simulation.
 */

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryBehavior {
    #[default]
    Avoid,
    Wrap,
}

impl BoundaryBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryBehavior::Avoid => "avoid",
            BoundaryBehavior::Wrap => "wrap",
        }
    }

    /// Whether the block grid should treat its edges as toroidal.
    pub fn is_toroidal(&self) -> bool {
        matches!(self, BoundaryBehavior::Wrap)
    }
}

impl FromStr for BoundaryBehavior {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avoid" => Ok(BoundaryBehavior::Avoid),
            "wrap" => Ok(BoundaryBehavior::Wrap),
            other => Err(ConfigError::UnknownBoundaryBehavior(other.to_string())),
        }
    }
}

impl fmt::Display for BoundaryBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Soft walls: every boid closer than `margin` to a wall is turned away from
/// it by `turn_speed` along that axis. Opposite walls add up.
#[derive(Clone, Copy, Debug)]
pub struct WallAvoidance {
    pub bounds: DVec2,
    pub margin: f64,
    pub turn_speed: f64,
}

impl WallAvoidance {
    pub fn new(bounds: DVec2, margin: f64, avoid_factor: f64, max_speed: f64) -> Self {
        Self {
            bounds,
            margin,
            turn_speed: avoid_factor * max_speed,
        }
    }

    // Distances are absolute, so a boid far outside a wall is no longer pushed by it
    #[inline]
    pub fn delta(&self, position: DVec2) -> DVec2 {
        let mut turn = DVec2::ZERO;

        if position.x.abs() < self.margin {
            turn.x += self.turn_speed;
        }
        if (self.bounds.x - position.x).abs() < self.margin {
            turn.x -= self.turn_speed;
        }
        if position.y.abs() < self.margin {
            turn.y += self.turn_speed;
        }
        if (self.bounds.y - position.y).abs() < self.margin {
            turn.y -= self.turn_speed;
        }

        turn
    }
}

/// Reduce a position into `[0, bounds)` componentwise.
#[inline]
pub fn wrap_position(position: DVec2, bounds: DVec2) -> DVec2 {
    DVec2::new(wrap_axis(position.x, bounds.x), wrap_axis(position.y, bounds.y))
}

#[inline]
fn wrap_axis(value: f64, bound: f64) -> f64 {
    let wrapped = value.rem_euclid(bound);
    // rem_euclid rounds tiny negatives up to `bound` itself
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_behaviors_and_rejects_others() {
        assert_eq!("avoid".parse::<BoundaryBehavior>(), Ok(BoundaryBehavior::Avoid));
        assert_eq!("wrap".parse::<BoundaryBehavior>(), Ok(BoundaryBehavior::Wrap));
        assert_eq!(
            "bounce".parse::<BoundaryBehavior>(),
            Err(ConfigError::UnknownBoundaryBehavior("bounce".to_string()))
        );
    }

    #[test]
    fn avoidance_pushes_inward_near_each_wall() {
        let walls = WallAvoidance::new(DVec2::new(10.0, 10.0), 1.0, 0.5, 2.0);
        assert_eq!(walls.turn_speed, 1.0);

        assert_eq!(walls.delta(DVec2::new(0.5, 5.0)), DVec2::new(1.0, 0.0));
        assert_eq!(walls.delta(DVec2::new(9.5, 5.0)), DVec2::new(-1.0, 0.0));
        assert_eq!(walls.delta(DVec2::new(5.0, 0.5)), DVec2::new(0.0, 1.0));
        assert_eq!(walls.delta(DVec2::new(5.0, 9.5)), DVec2::new(0.0, -1.0));
        assert_eq!(walls.delta(DVec2::new(0.2, 9.9)), DVec2::new(1.0, -1.0));
        assert_eq!(walls.delta(DVec2::new(5.0, 5.0)), DVec2::ZERO);
    }

    #[test]
    fn opposite_walls_cancel_when_margin_covers_the_world() {
        let walls = WallAvoidance::new(DVec2::new(1.0, 1.0), 0.8, 1.0, 1.0);
        assert_eq!(walls.delta(DVec2::new(0.5, 0.5)), DVec2::ZERO);
    }

    #[test]
    fn wrap_keeps_positions_in_half_open_range() {
        let bounds = DVec2::new(2.0, 3.0);
        assert_eq!(wrap_position(DVec2::new(2.5, -0.5), bounds), DVec2::new(0.5, 2.5));
        assert_eq!(wrap_position(DVec2::new(2.0, 3.0), bounds), DVec2::ZERO);

        let tiny = wrap_position(DVec2::new(-1e-300, -1e-18), bounds);
        assert!(tiny.x >= 0.0 && tiny.x < bounds.x);
        assert!(tiny.y >= 0.0 && tiny.y < bounds.y);
    }
}
