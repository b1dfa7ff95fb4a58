/*
 * Speed Module
 *
 * Clamps each boid's post-update speed into [min_speed, max_speed].
 */

use glam::DVec2;

use crate::error::ConfigError;
use crate::vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedLimits {
    pub min_speed: f64,
    pub max_speed: f64,
}

impl SpeedLimits {
    pub fn new(min_speed: f64, max_speed: f64) -> Result<Self, ConfigError> {
        if !(min_speed > 0.0) {
            return Err(ConfigError::NonPositiveMinSpeed(min_speed));
        }
        if !max_speed.is_finite() {
            return Err(ConfigError::NonFiniteMaxSpeed(max_speed));
        }
        if min_speed > max_speed {
            return Err(ConfigError::InvertedSpeedRange {
                min: min_speed,
                max: max_speed,
            });
        }
        Ok(Self {
            min_speed,
            max_speed,
        })
    }

    /// Clamp a tentative velocity. `None` means the velocity has no direction
    /// to rescale along.
    #[inline]
    pub fn limit(&self, velocity: DVec2) -> Option<DVec2> {
        vector::clamp_magnitude(velocity, self.min_speed, self.max_speed)
    }
}
