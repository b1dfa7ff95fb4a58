/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the world into square blocks whose side is the largest
 * interaction radius, so every boid within any rule's radius of another sits
 * in the same block or one of its 8 neighbors. Neighbor queries then cost
 * O(k) instead of O(n). Blocks are widened when the radius would need more
 * blocks per axis than the caller allows.
 *
 * - The block neighbor table depends only on geometry and is built once
 * - Block membership is rebuilt from scratch after every position update
 * - Under wrap the neighbor table is toroidal, under avoid it is clipped
 */

use glam::DVec2;

use crate::vector;

/// Hard ceiling on blocks per axis, whatever the population.
pub const MAX_BLOCKS_PER_AXIS: usize = 4096;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (1, -1),
    (0, 1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    pub block_size: f64,
    pub num_x: usize,
    pub num_y: usize,
    // Boid indices per block, ascending
    blocks: Vec<Vec<usize>>,
    // Block index of each boid
    boid_blocks: Vec<usize>,
    // Neighboring block indices per block (self excluded, deduplicated)
    neighbor_blocks: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// `radius` must be positive. Each axis gets at most `max_blocks_per_axis`
    /// blocks; when the radius would need more, blocks are widened instead.
    pub fn new(radius: f64, bounds: DVec2, toroidal: bool, max_blocks_per_axis: usize) -> Self {
        let max_per_axis = max_blocks_per_axis.clamp(1, MAX_BLOCKS_PER_AXIS);
        // Wider blocks still hold every neighbor within `radius`
        let block_size = radius.max(bounds.max_element() / max_per_axis as f64);
        let num_x = blocks_along(bounds.x, block_size, max_per_axis);
        let num_y = blocks_along(bounds.y, block_size, max_per_axis);
        let num_blocks = num_x * num_y;

        if block_size > radius {
            log::debug!(
                "Widened grid blocks from {} to {} to stay within {}x{} blocks",
                radius,
                block_size,
                num_x,
                num_y
            );
        }

        Self {
            block_size,
            num_x,
            num_y,
            blocks: vec![Vec::new(); num_blocks],
            boid_blocks: Vec::new(),
            neighbor_blocks: build_neighbor_table(num_x, num_y, toroidal),
        }
    }

    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.num_x * self.num_y
    }

    // Row-major: gx + num_x * gy
    #[inline]
    pub fn block_index(&self, gx: usize, gy: usize) -> usize {
        gx + self.num_x * gy
    }

    /// Block containing a position. Positions outside the world (possible
    /// under soft avoidance) are attributed to the nearest edge block.
    #[inline]
    pub fn block_of(&self, position: DVec2) -> usize {
        let max_cell = DVec2::new((self.num_x - 1) as f64, (self.num_y - 1) as f64);
        let cell = vector::clamp((position / self.block_size).floor(), DVec2::ZERO, max_cell);
        self.block_index(cell.x as usize, cell.y as usize)
    }

    /// Reassign every boid to its block.
    pub fn rebuild(&mut self, positions: &[DVec2]) {
        for block in &mut self.blocks {
            block.clear();
        }
        self.boid_blocks.clear();
        self.boid_blocks.reserve(positions.len());

        let mut occupied = 0usize;
        for (i, &position) in positions.iter().enumerate() {
            let block = self.block_of(position);
            if self.blocks[block].is_empty() {
                occupied += 1;
            }
            self.blocks[block].push(i);
            self.boid_blocks.push(block);
        }

        log::debug!(
            "Rebuilt grid: {} boids in {} of {} blocks",
            positions.len(),
            occupied,
            self.num_blocks()
        );
    }

    #[inline]
    pub fn block_members(&self, block: usize) -> &[usize] {
        &self.blocks[block]
    }

    #[inline]
    pub fn neighbor_blocks(&self, block: usize) -> &[usize] {
        &self.neighbor_blocks[block]
    }

    /// Candidate neighbors of `boid`: every other boid in its own block and
    /// the neighboring blocks, in ascending index order. A superset of the
    /// boids within the largest interaction radius.
    pub fn relevant_indices(&self, boid: usize) -> Vec<usize> {
        let home = self.boid_blocks[boid];
        let neighbors = &self.neighbor_blocks[home];

        let capacity = self.blocks[home].len()
            + neighbors.iter().map(|&b| self.blocks[b].len()).sum::<usize>();
        let mut result = Vec::with_capacity(capacity);

        result.extend(self.blocks[home].iter().copied().filter(|&j| j != boid));
        for &block in neighbors {
            result.extend_from_slice(&self.blocks[block]);
        }

        result.sort_unstable();
        result
    }
}

// Capped before the cast so huge ratios cannot overflow
fn blocks_along(extent: f64, block_size: f64, max_per_axis: usize) -> usize {
    let count = (extent / block_size).ceil().min(max_per_axis as f64);
    (count as usize).max(1)
}

fn build_neighbor_table(num_x: usize, num_y: usize, toroidal: bool) -> Vec<Vec<usize>> {
    let (nx, ny) = (num_x as isize, num_y as isize);
    let mut table = Vec::with_capacity(num_x * num_y);

    for gy in 0..ny {
        for gx in 0..nx {
            let home = (gx + nx * gy) as usize;
            let mut neighbors = Vec::with_capacity(NEIGHBOR_OFFSETS.len());

            for (dx, dy) in NEIGHBOR_OFFSETS {
                let (mut x, mut y) = (gx + dx, gy + dy);
                if toroidal {
                    x = x.rem_euclid(nx);
                    y = y.rem_euclid(ny);
                } else if x < 0 || y < 0 || x >= nx || y >= ny {
                    continue;
                }

                let index = (x + nx * y) as usize;
                // Small toroidal grids fold offsets back onto the home block
                if index != home && !neighbors.contains(&index) {
                    neighbors.push(index);
                }
            }

            neighbors.sort_unstable();
            table.push(neighbors);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(toroidal: bool) -> SpatialGrid {
        SpatialGrid::new(1.0, DVec2::new(4.0, 3.0), toroidal, 64)
    }

    #[test]
    fn dimensions_cover_the_world() {
        let g = SpatialGrid::new(0.3, DVec2::new(1.0, 0.5), false, 64);
        assert_eq!((g.num_x, g.num_y), (4, 2));
        assert_eq!(g.num_blocks(), 8);
    }

    #[test]
    fn tiny_radius_is_widened_to_the_block_cap() {
        let g = SpatialGrid::new(1e-300, DVec2::new(1.0, 0.5), false, 10);
        assert_eq!((g.num_x, g.num_y), (10, 5));
        assert!((g.block_size - 0.1).abs() < 1e-15);

        let g = SpatialGrid::new(1e-9, DVec2::new(1.0, 1e-3), true, usize::MAX);
        assert_eq!(g.num_x, MAX_BLOCKS_PER_AXIS);
        assert_eq!(g.num_y, 5);
    }

    #[test]
    fn widened_blocks_still_find_close_neighbors() {
        let positions = vec![
            DVec2::new(0.11, 0.11),
            DVec2::new(0.21, 0.11), // across a block edge
            DVec2::new(0.95, 0.95),
        ];
        let mut g = SpatialGrid::new(0.01, DVec2::new(1.0, 1.0), false, 10);
        g.rebuild(&positions);
        assert_eq!(g.relevant_indices(0), vec![1]);
        assert_eq!(g.relevant_indices(2), Vec::<usize>::new());
    }

    #[test]
    fn clipped_corner_has_three_neighbors() {
        let g = grid(false);
        assert_eq!(g.neighbor_blocks(g.block_index(0, 0)), &[1, 4, 5]);
        assert_eq!(g.neighbor_blocks(g.block_index(1, 1)).len(), 8);
    }

    #[test]
    fn toroidal_corner_wraps_to_far_edges() {
        let g = grid(true);
        let neighbors = g.neighbor_blocks(g.block_index(0, 0));
        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.contains(&g.block_index(3, 2)));
        assert!(neighbors.contains(&g.block_index(3, 0)));
        assert!(neighbors.contains(&g.block_index(0, 2)));
    }

    #[test]
    fn tiny_toroidal_grid_has_no_duplicate_or_self_neighbors() {
        let g = SpatialGrid::new(1.0, DVec2::new(2.0, 1.0), true, 64);
        assert_eq!(g.neighbor_blocks(0), &[1]);
        assert_eq!(g.neighbor_blocks(1), &[0]);
    }

    #[test]
    fn out_of_world_positions_land_in_edge_blocks() {
        let g = grid(false);
        assert_eq!(g.block_of(DVec2::new(-0.5, -7.0)), g.block_index(0, 0));
        assert_eq!(g.block_of(DVec2::new(4.0, 3.0)), g.block_index(3, 2));
        assert_eq!(g.block_of(DVec2::new(2.5, 1.5)), g.block_index(2, 1));
    }

    #[test]
    fn every_boid_is_in_exactly_one_block() {
        let positions: Vec<DVec2> = (0..40)
            .map(|i| DVec2::new((i as f64 * 0.37) % 4.0, (i as f64 * 0.61) % 3.0))
            .collect();
        let mut g = grid(false);
        g.rebuild(&positions);

        let mut seen = vec![0usize; positions.len()];
        for block in 0..g.num_blocks() {
            for &i in g.block_members(block) {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn relevant_indices_excludes_self_and_far_blocks() {
        let positions = vec![
            DVec2::new(0.5, 0.5), // block (0,0)
            DVec2::new(0.6, 0.4), // same block
            DVec2::new(1.5, 1.5), // diagonal neighbor
            DVec2::new(3.5, 2.5), // far corner
        ];
        let mut g = grid(false);
        g.rebuild(&positions);
        assert_eq!(g.relevant_indices(0), vec![1, 2]);
        assert_eq!(g.relevant_indices(3), Vec::<usize>::new());
    }

    #[test]
    fn rebuild_replaces_previous_membership() {
        let mut g = grid(false);
        g.rebuild(&[DVec2::new(0.5, 0.5), DVec2::new(3.5, 2.5)]);
        g.rebuild(&[DVec2::new(3.5, 2.5), DVec2::new(3.4, 2.4)]);
        assert!(g.block_members(0).is_empty());
        assert_eq!(g.block_members(g.block_index(3, 2)), &[0, 1]);
    }
}
