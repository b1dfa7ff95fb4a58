/*
 * Rules Module
 *
 * This module evaluates the three flocking rules for one boid against a set
 * of candidate neighbors:
 * 1. Separation: push away from every neighbor closer than separation_distance
 * 2. Cohesion: pull toward the centroid of neighbors in [separation, cohesion)
 * 3. Alignment: pull toward the mean velocity of neighbors in [separation, alignment)
 *
 * Candidates may be a superset of the true neighbors; the exact distance
 * bands filter them. A rule with no neighbor in its band contributes nothing.
 */

use glam::DVec2;

use crate::params::SimulationParams;
use crate::vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlockingRules {
    pub separation_factor: f64,
    pub cohesion_factor: f64,
    pub alignment_factor: f64,
    pub separation_distance: f64,
    pub cohesion_distance: f64,
    pub alignment_distance: f64,
}

impl FlockingRules {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            separation_factor: params.separation_factor,
            cohesion_factor: params.cohesion_factor,
            alignment_factor: params.alignment_factor,
            separation_distance: params.separation_distance,
            cohesion_distance: params.cohesion_distance,
            alignment_distance: params.alignment_distance,
        }
    }

    /// Velocity change for boid `i` from the rules alone.
    ///
    /// `candidates` must not contain `i`. Visiting candidates in the same
    /// order gives bit-identical results.
    pub fn steer(
        &self,
        i: usize,
        positions: &[DVec2],
        velocities: &[DVec2],
        candidates: impl IntoIterator<Item = usize>,
    ) -> DVec2 {
        let position = positions[i];
        let velocity = velocities[i];
        let reach = self
            .separation_distance
            .max(self.cohesion_distance)
            .max(self.alignment_distance);

        // Candidates within some band, with their distances
        let nearby: Vec<(usize, f64)> = candidates
            .into_iter()
            .map(|j| (j, position.distance(positions[j])))
            .filter(|&(_, d)| d < reach)
            .collect();

        let separation = vector::sum(
            in_band(&nearby, 0.0, self.separation_distance).map(|j| position - positions[j]),
        );
        // Neighbors in the separation band count for neither pull
        let centroid = vector::mean(
            in_band(&nearby, self.separation_distance, self.cohesion_distance)
                .map(|j| positions[j]),
        );
        let mean_velocity = vector::mean(
            in_band(&nearby, self.separation_distance, self.alignment_distance)
                .map(|j| velocities[j]),
        );

        let mut delta = DVec2::ZERO;
        if let Some(centroid) = centroid {
            delta += self.cohesion_factor * (centroid - position);
        }
        delta += self.separation_factor * separation;
        if let Some(mean_velocity) = mean_velocity {
            delta += self.alignment_factor * (mean_velocity - velocity);
        }

        delta
    }

    /// Candidates for boid `i` without a spatial index: everyone else.
    pub fn all_others(i: usize, n: usize) -> impl Iterator<Item = usize> {
        (0..n).filter(move |&j| j != i)
    }
}

// Indices whose distance lies in [lo, hi)
fn in_band(nearby: &[(usize, f64)], lo: f64, hi: f64) -> impl Iterator<Item = usize> + '_ {
    nearby
        .iter()
        .filter(move |&&(_, d)| d >= lo && d < hi)
        .map(|&(j, _)| j)
}
