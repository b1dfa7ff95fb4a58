/*
 * Engine Module
 *
 * The dynamics engine owns the flock and the spatial grid and advances the
 * whole population one tick per `update()` call:
 *
 * 1. Boundary pre-pass (wall avoidance deltas, or nothing under wrap)
 * 2. Per-boid rule deltas against a frozen snapshot of the tick's start
 * 3. Speed limiting of every tentative velocity
 * 4. Commit of positions and velocities (wrapped under wrap)
 * 5. Grid rebuild
 *
 * Steps 1-3 only read the flock, so they may run in parallel. Nothing is
 * written until every boid has been evaluated, and a failing tick leaves the
 * engine untouched.
 */

use glam::DVec2;
use rand::Rng;
use rayon::prelude::*;

use crate::boundary::{wrap_position, BoundaryBehavior, WallAvoidance};
use crate::error::{ConfigError, SimulationError};
use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::rng::create_rng;
use crate::rules::FlockingRules;
use crate::spatial_grid::SpatialGrid;
use crate::speed::SpeedLimits;

pub struct Simulation {
    params: SimulationParams,
    flock: Flock,
    grid: Option<SpatialGrid>,
    rules: FlockingRules,
    limits: SpeedLimits,
    walls: Option<WallAvoidance>,
    tick: u64,
}

impl Simulation {
    /// Build a simulation around an existing flock.
    pub fn new(params: SimulationParams, flock: Flock) -> Result<Self, ConfigError> {
        params.validate()?;

        if flock.len() != params.num_boids {
            return Err(ConfigError::FlockSizeMismatch {
                expected: params.num_boids,
                positions: flock.positions().len(),
                velocities: flock.velocities().len(),
            });
        }

        let limits = params.speed_limits()?;
        let rules = FlockingRules::from_params(&params);
        let walls = match params.boundary_behavior {
            BoundaryBehavior::Avoid => Some(WallAvoidance::new(
                params.bounds(),
                params.margin,
                params.avoid_factor,
                params.max_speed,
            )),
            BoundaryBehavior::Wrap => None,
        };

        let grid = params.enable_spatial_grid.then(|| {
            let mut grid = SpatialGrid::new(
                params.block_size(),
                params.bounds(),
                params.boundary_behavior.is_toroidal(),
                params.max_blocks_per_axis(),
            );
            grid.rebuild(flock.positions());
            grid
        });

        match &grid {
            Some(grid) => log::info!(
                "Initialized {} boids ({} boundary) on a {}x{} block grid, block size {}",
                flock.len(),
                params.boundary_behavior,
                grid.num_x,
                grid.num_y,
                grid.block_size
            ),
            None => log::info!(
                "Initialized {} boids ({} boundary) with all-pairs neighbor search",
                flock.len(),
                params.boundary_behavior
            ),
        }

        Ok(Self {
            params,
            flock,
            grid,
            rules,
            limits,
            walls,
            tick: 0,
        })
    }

    /// Build a simulation whose initial flock comes from the configured
    /// initializer.
    pub fn with_rng<R: Rng + ?Sized>(
        params: SimulationParams,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        log::debug!(
            "Generating {} boids with {} initialization",
            params.num_boids,
            params.init.init_type.name()
        );
        let flock = params.init.generate(params.num_boids, rng)?;
        Self::new(params, flock)
    }

    pub fn with_seed(params: SimulationParams, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(params, &mut create_rng(seed))
    }

    #[inline]
    pub fn positions(&self) -> &[DVec2] {
        self.flock.positions()
    }

    #[inline]
    pub fn velocities(&self) -> &[DVec2] {
        self.flock.velocities()
    }

    #[inline]
    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    #[inline]
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Number of ticks committed so far.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn grid(&self) -> Option<&SpatialGrid> {
        self.grid.as_ref()
    }

    /// Candidate neighbors of `boid`, ascending. With the grid enabled this
    /// is the block neighborhood; otherwise every other boid.
    pub fn relevant_indices(&self, boid: usize) -> Vec<usize> {
        match &self.grid {
            Some(grid) => grid.relevant_indices(boid),
            None => FlockingRules::all_others(boid, self.flock.len()).collect(),
        }
    }

    /// Rule-induced velocity change of every boid for the current state,
    /// boundary effects excluded.
    pub fn steering_deltas(&self) -> Vec<DVec2> {
        let n = self.flock.len();
        if self.params.enable_parallel {
            (0..n).into_par_iter().map(|i| self.steering_delta(i)).collect()
        } else {
            (0..n).map(|i| self.steering_delta(i)).collect()
        }
    }

    fn steering_delta(&self, i: usize) -> DVec2 {
        let positions = self.flock.positions();
        let velocities = self.flock.velocities();
        match &self.grid {
            Some(grid) => self
                .rules
                .steer(i, positions, velocities, grid.relevant_indices(i)),
            None => self.rules.steer(
                i,
                positions,
                velocities,
                FlockingRules::all_others(i, positions.len()),
            ),
        }
    }

    // Read phase for one boid: boundary + rules, then the speed limiter
    fn next_velocity(&self, i: usize) -> Result<DVec2, SimulationError> {
        let position = self.flock.positions()[i];
        let velocity = self.flock.velocities()[i];

        let mut delta = self.steering_delta(i);
        if let Some(walls) = &self.walls {
            delta += walls.delta(position);
        }

        self.limits
            .limit(velocity + delta)
            .ok_or(SimulationError::NumericDegeneracy {
                boid: i,
                tick: self.tick,
            })
    }

    /// Advance the flock by one tick.
    pub fn update(&mut self) -> Result<(), SimulationError> {
        let n = self.flock.len();

        let next: Result<Vec<DVec2>, SimulationError> = if self.params.enable_parallel {
            (0..n)
                .into_par_iter()
                .map(|i| self.next_velocity(i))
                .collect()
        } else {
            (0..n).map(|i| self.next_velocity(i)).collect()
        };

        let velocities = next.map_err(|err| {
            log::warn!("Rejected tick {}: {}", self.tick, err);
            err
        })?;

        let bounds = self.params.bounds();
        let wrap = self.params.boundary_behavior.is_toroidal();
        let positions: Vec<DVec2> = self
            .flock
            .positions()
            .iter()
            .zip(&velocities)
            .map(|(&p, &v)| if wrap { wrap_position(p + v, bounds) } else { p + v })
            .collect();

        self.flock.commit(positions, velocities);
        if let Some(grid) = &mut self.grid {
            grid.rebuild(self.flock.positions());
        }
        self.tick += 1;

        log::trace!("Committed tick {}", self.tick);
        Ok(())
    }

    /// Run `ticks` updates, stopping at the first error.
    pub fn run(&mut self, ticks: u64) -> Result<(), SimulationError> {
        for _ in 0..ticks {
            self.update()?;
        }
        log::debug!("Ran {} ticks, now at tick {}", ticks, self.tick);
        Ok(())
    }
}
