/*
 * Initializer Module
 *
 * Produces the initial flock. Positions are uniform inside a rectangle; the
 * velocity scheme is picked by `init_type`:
 * - fixed_speed: random heading, fixed magnitude
 * - fixed_velocity: one shared direction, fixed magnitude
 * - angle_range: heading drawn from an angular window, fixed magnitude
 */

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flock::Flock;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "init_type", rename_all = "snake_case")]
pub enum InitType {
    FixedSpeed,
    FixedVelocity {
        init_direction: [f64; 2],
    },
    /// Angles are in degrees.
    AngleRange {
        init_angle: f64,
        angle_width: f64,
    },
}

impl InitType {
    /// Build from the flat option set a launcher would collect. Options that
    /// the named scheme doesn't use are ignored.
    pub fn from_options(
        init_type: &str,
        init_direction: [f64; 2],
        init_angle: f64,
        angle_width: f64,
    ) -> Result<Self, ConfigError> {
        match init_type {
            "fixed_speed" => Ok(InitType::FixedSpeed),
            "fixed_velocity" => Ok(InitType::FixedVelocity { init_direction }),
            "angle_range" => Ok(InitType::AngleRange {
                init_angle,
                angle_width,
            }),
            other => Err(ConfigError::UnknownInitType(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitType::FixedSpeed => "fixed_speed",
            InitType::FixedVelocity { .. } => "fixed_velocity",
            InitType::AngleRange { .. } => "angle_range",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitConfig {
    pub x_pos_min: f64,
    pub x_pos_max: f64,
    pub y_pos_min: f64,
    pub y_pos_max: f64,
    pub init_speed: f64,
    #[serde(flatten)]
    pub init_type: InitType,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            x_pos_min: 0.25,
            x_pos_max: 0.5,
            y_pos_min: 0.25,
            y_pos_max: 0.5,
            init_speed: 1e-3,
            init_type: InitType::FixedSpeed,
        }
    }
}

impl InitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range('x', self.x_pos_min, self.x_pos_max)?;
        check_range('y', self.y_pos_min, self.y_pos_max)?;
        if let InitType::FixedVelocity { init_direction } = self.init_type {
            let direction = DVec2::from_array(init_direction);
            if direction.length() == 0.0 || !direction.is_finite() {
                return Err(ConfigError::ZeroInitDirection);
            }
        }
        if let InitType::AngleRange {
            init_angle,
            angle_width,
        } = self.init_type
        {
            if !init_angle.is_finite() || !(angle_width >= 0.0) || !angle_width.is_finite() {
                return Err(ConfigError::InvalidAngleRange {
                    init_angle,
                    angle_width,
                });
            }
        }
        Ok(())
    }

    /// Sample `num_boids` positions and velocities.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        num_boids: usize,
        rng: &mut R,
    ) -> Result<Flock, ConfigError> {
        self.validate()?;

        let mut positions = Vec::with_capacity(num_boids);
        let mut velocities = Vec::with_capacity(num_boids);

        for _ in 0..num_boids {
            let x = rng.gen_range(self.x_pos_min..=self.x_pos_max);
            let y = rng.gen_range(self.y_pos_min..=self.y_pos_max);
            positions.push(DVec2::new(x, y));
            velocities.push(self.sample_velocity(rng));
        }

        Flock::new(positions, velocities)
    }

    fn sample_velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec2 {
        match self.init_type {
            InitType::FixedSpeed => {
                let theta = rng.gen_range(0.0..TAU);
                DVec2::from_angle(theta) * self.init_speed
            }
            InitType::FixedVelocity { init_direction } => {
                DVec2::from_array(init_direction).normalize() * self.init_speed
            }
            InitType::AngleRange {
                init_angle,
                angle_width,
            } => {
                let lo = (init_angle - angle_width).to_radians();
                let hi = (init_angle + angle_width).to_radians();
                let theta = rng.gen_range(lo..=hi);
                DVec2::from_angle(theta) * self.init_speed
            }
        }
    }
}

fn check_range(axis: char, min: f64, max: f64) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::EmptyPositionRange { axis, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn config(init_type: InitType) -> InitConfig {
        InitConfig {
            x_pos_min: 1.0,
            x_pos_max: 2.0,
            y_pos_min: -3.0,
            y_pos_max: -1.0,
            init_speed: 0.5,
            init_type,
        }
    }

    #[test]
    fn positions_stay_inside_the_sampling_rectangle() {
        let mut rng = create_rng(7);
        let flock = config(InitType::FixedSpeed).generate(500, &mut rng).unwrap();
        assert_eq!(flock.len(), 500);
        for p in flock.positions() {
            assert!((1.0..=2.0).contains(&p.x));
            assert!((-3.0..=-1.0).contains(&p.y));
        }
    }

    #[test]
    fn fixed_speed_has_constant_magnitude() {
        let mut rng = create_rng(1);
        let flock = config(InitType::FixedSpeed).generate(200, &mut rng).unwrap();
        for v in flock.velocities() {
            assert!((v.length() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn fixed_velocity_normalizes_direction() {
        let mut rng = create_rng(2);
        let init = config(InitType::FixedVelocity {
            init_direction: [3.0, 4.0],
        });
        let flock = init.generate(10, &mut rng).unwrap();
        for v in flock.velocities() {
            assert!((*v - DVec2::new(0.3, 0.4)).length() < 1e-12);
        }
    }

    #[test]
    fn fixed_velocity_rejects_zero_direction() {
        let mut rng = create_rng(3);
        let init = config(InitType::FixedVelocity {
            init_direction: [0.0, 0.0],
        });
        assert_eq!(init.generate(10, &mut rng), Err(ConfigError::ZeroInitDirection));
    }

    #[test]
    fn angle_range_headings_stay_in_window() {
        let mut rng = create_rng(4);
        let init = config(InitType::AngleRange {
            init_angle: 90.0,
            angle_width: 10.0,
        });
        let flock = init.generate(300, &mut rng).unwrap();
        for v in flock.velocities() {
            let heading = v.y.atan2(v.x).to_degrees();
            assert!(heading >= 80.0 - 1e-9 && heading <= 100.0 + 1e-9, "{heading}");
            assert!((v.length() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn angle_range_rejects_negative_or_non_finite_width() {
        let mut rng = create_rng(5);
        let init = config(InitType::AngleRange {
            init_angle: 30.0,
            angle_width: -1.0,
        });
        assert_eq!(
            init.generate(10, &mut rng),
            Err(ConfigError::InvalidAngleRange {
                init_angle: 30.0,
                angle_width: -1.0
            })
        );

        let init = config(InitType::AngleRange {
            init_angle: 30.0,
            angle_width: f64::NAN,
        });
        assert!(matches!(init.validate(), Err(ConfigError::InvalidAngleRange { .. })));

        let init = config(InitType::AngleRange {
            init_angle: f64::INFINITY,
            angle_width: 1.0,
        });
        assert!(matches!(init.validate(), Err(ConfigError::InvalidAngleRange { .. })));
    }

    #[test]
    fn zero_angle_width_gives_one_heading() {
        let init = config(InitType::AngleRange {
            init_angle: 0.0,
            angle_width: 0.0,
        });
        let flock = init.generate(5, &mut create_rng(6)).unwrap();
        for v in flock.velocities() {
            assert!((*v - DVec2::new(0.5, 0.0)).length() < 1e-12);
        }
    }

    #[test]
    fn unknown_init_type_is_a_config_error() {
        let err = InitType::from_options("spiral", [1.0, 0.0], 0.0, 0.0).unwrap_err();
        assert_eq!(err, ConfigError::UnknownInitType("spiral".to_string()));
        assert_eq!(
            InitType::from_options("angle_range", [0.0, 0.0], 45.0, 5.0),
            Ok(InitType::AngleRange {
                init_angle: 45.0,
                angle_width: 5.0
            })
        );
    }

    #[test]
    fn same_seed_same_flock() {
        let init = config(InitType::FixedSpeed);
        let a = init.generate(50, &mut create_rng(99)).unwrap();
        let b = init.generate(50, &mut create_rng(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_position_range_is_rejected() {
        let mut init = config(InitType::FixedSpeed);
        init.x_pos_min = 5.0;
        assert!(matches!(
            init.validate(),
            Err(ConfigError::EmptyPositionRange { axis: 'x', .. })
        ));
    }
}
