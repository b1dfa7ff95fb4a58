/*
 * Flock Module
 *
 * The full population as two index-aligned arrays: positions[i] pairs with
 * velocities[i]. A boid has no identity beyond its slot, and the population
 * size never changes after construction.
 */

use glam::DVec2;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct Flock {
    positions: Vec<DVec2>,
    velocities: Vec<DVec2>,
}

impl Flock {
    pub fn new(positions: Vec<DVec2>, velocities: Vec<DVec2>) -> Result<Self, ConfigError> {
        if positions.len() != velocities.len() {
            return Err(ConfigError::FlockSizeMismatch {
                expected: positions.len(),
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }
        Ok(Self {
            positions,
            velocities,
        })
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = ((f64, f64), (f64, f64))>) -> Self {
        let (positions, velocities) = pairs
            .into_iter()
            .map(|((px, py), (vx, vy))| (DVec2::new(px, py), DVec2::new(vx, vy)))
            .unzip();
        Self {
            positions,
            velocities,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &[DVec2] {
        &self.velocities
    }

    // Both arrays are replaced together so the alignment invariant holds
    pub(crate) fn commit(&mut self, positions: Vec<DVec2>, velocities: Vec<DVec2>) {
        debug_assert_eq!(positions.len(), self.positions.len());
        debug_assert_eq!(velocities.len(), self.velocities.len());
        self.positions = positions;
        self.velocities = velocities;
    }
}
