//! Street network generation using a branching self-avoiding walk
//!
//! Two branches leave the city center in opposite directions. Each branch lays `spacing` street
//! cells at a time; after every full run it may stop (optionally turning once) or keep going
//! straight while spawning side streets. A branch ends as soon as its next cell would leave the
//! grid or land on a cell that is already taken, so streets never overlap and the walk always
//! terminates. Branches are processed breadth-first from a FIFO frontier.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::city::types::{Cell, Direction};
use crate::config::CityConfig;
use crate::tilemap::Tilemap;

/// Walk parameters pulled out of the city config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreetParams {
    pub spacing: usize,
    pub bloom_factor: f64,
    pub stopping_factor: f64,
    pub blind_factor: f64,
}

impl From<&CityConfig> for StreetParams {
    fn from(config: &CityConfig) -> Self {
        Self {
            spacing: config.spacing,
            bloom_factor: config.bloom_factor,
            stopping_factor: config.stopping_factor,
            blind_factor: config.blind_factor,
        }
    }
}

/// A pending walk cursor in the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Branch {
    x: i64,
    y: i64,
    dir: Direction,
}

/// How a branch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BranchEnd {
    /// Next cell was outside the grid or already taken
    Blocked,
    /// Stopped voluntarily without turning
    DeadEnd,
    /// Stopped voluntarily and handed off to one turning branch
    Turned,
}

/// Counters collected while walking, for progress output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub branches: usize,
    pub blocked: usize,
    pub dead_ends: usize,
    pub turns: usize,
    pub street_cells: usize,
}

/// Generate the street skeleton on an empty `size × size` grid.
///
/// The center cell is always a street. When `spacing` exceeds the grid side no run of streets
/// can be laid and only the center remains.
pub fn generate_street_network(
    size: usize,
    params: &StreetParams,
    rng: &mut ChaCha8Rng,
) -> (Tilemap<Cell>, WalkStats) {
    let mut grid = Tilemap::new_with(size, size, Cell::Empty);
    let mut stats = WalkStats::default();

    let center = (size / 2) as i64;
    grid.set(center as usize, center as usize, Cell::Street);
    stats.street_cells = 1;

    if params.spacing > size {
        return (grid, stats);
    }

    let mut frontier = VecDeque::new();
    frontier.push_back(Branch { x: center, y: center, dir: Direction::North });
    frontier.push_back(Branch { x: center, y: center, dir: Direction::South });

    while let Some(branch) = frontier.pop_front() {
        stats.branches += 1;
        match walk_branch(&mut grid, branch, params, &mut frontier, &mut stats, rng) {
            BranchEnd::Blocked => stats.blocked += 1,
            BranchEnd::DeadEnd => stats.dead_ends += 1,
            BranchEnd::Turned => stats.turns += 1,
        }
    }

    (grid, stats)
}

/// Advance one branch until it blocks or decides to stop.
fn walk_branch(
    grid: &mut Tilemap<Cell>,
    mut branch: Branch,
    params: &StreetParams,
    frontier: &mut VecDeque<Branch>,
    stats: &mut WalkStats,
    rng: &mut ChaCha8Rng,
) -> BranchEnd {
    let (dx, dy) = branch.dir.delta();

    loop {
        for _ in 0..params.spacing {
            let nx = branch.x + dx;
            let ny = branch.y + dy;
            if grid.get_checked(nx, ny) != Some(&Cell::Empty) {
                return BranchEnd::Blocked;
            }
            grid.set(nx as usize, ny as usize, Cell::Street);
            stats.street_cells += 1;
            branch.x = nx;
            branch.y = ny;
        }

        if roll(rng, params.stopping_factor) {
            if roll(rng, params.blind_factor) {
                return BranchEnd::DeadEnd;
            }
            let dir = if rng.gen_bool(0.5) {
                branch.dir.turn_right()
            } else {
                branch.dir.turn_left()
            };
            frontier.push_back(Branch { dir, ..branch });
            return BranchEnd::Turned;
        }

        if roll(rng, params.bloom_factor) {
            frontier.push_back(Branch { dir: branch.dir.turn_left(), ..branch });
        }
        if roll(rng, params.bloom_factor) {
            frontier.push_back(Branch { dir: branch.dir.turn_right(), ..branch });
        }
    }
}

/// Draw a uniform sample and compare it against a probability.
fn roll(rng: &mut ChaCha8Rng, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn params(spacing: usize) -> StreetParams {
        StreetParams {
            spacing,
            bloom_factor: 1.0,
            stopping_factor: 0.0,
            blind_factor: 0.8,
        }
    }

    fn streets(grid: &Tilemap<Cell>) -> usize {
        grid.count(|c| *c == Cell::Street)
    }

    #[test]
    fn test_center_is_street() {
        for size in [1, 2, 3, 7, 10, 31] {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let (grid, _) = generate_street_network(size, &params(6), &mut rng);
            assert_eq!(grid.width, size);
            assert_eq!(grid.height, size);
            assert_eq!(*grid.get(size / 2, size / 2), Cell::Street);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let p = params(6);
        let (a, stats_a) = generate_street_network(40, &p, &mut ChaCha8Rng::seed_from_u64(42));
        let (b, stats_b) = generate_street_network(40, &p, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(stats_a, stats_b);
    }

    #[test]
    fn test_reference_scenario_lays_streets() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let (grid, stats) = generate_street_network(10, &params(6), &mut rng);
        let count = streets(&grid);
        assert!(count > 1);
        assert!(count <= 100);
        assert_eq!(count, stats.street_cells);
    }

    #[test]
    fn test_spacing_larger_than_grid_leaves_only_center() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (grid, stats) = generate_street_network(10, &params(11), &mut rng);
        assert_eq!(streets(&grid), 1);
        assert_eq!(stats.branches, 0);
    }

    #[test]
    fn test_single_cell_city() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (grid, stats) = generate_street_network(1, &params(1), &mut rng);
        assert_eq!(streets(&grid), 1);
        assert_eq!(stats.blocked, 2);
    }

    #[test]
    fn test_street_count_matches_writes() {
        // Every write lands on an empty cell, so the number of writes equals the number of
        // distinct street cells.
        for seed in 0..20 {
            let p = StreetParams {
                spacing: 3,
                bloom_factor: 0.7,
                stopping_factor: 0.3,
                blind_factor: 0.4,
            };
            let (grid, stats) = generate_street_network(25, &p, &mut ChaCha8Rng::seed_from_u64(seed));
            assert_eq!(streets(&grid), stats.street_cells);
            assert_eq!(stats.branches, stats.blocked + stats.dead_ends + stats.turns);
        }
    }

    #[test]
    fn test_no_bloom_gives_straight_line() {
        let p = StreetParams {
            spacing: 2,
            bloom_factor: 0.0,
            stopping_factor: 0.0,
            blind_factor: 0.0,
        };
        let (grid, stats) = generate_street_network(9, &p, &mut ChaCha8Rng::seed_from_u64(5));
        // Center column, full height of the grid
        assert_eq!(streets(&grid), 9);
        for x in 0..9 {
            assert_eq!(*grid.get(x, 4), Cell::Street);
        }
        assert_eq!(stats.branches, 2);
    }

    #[test]
    fn test_always_blind_stop_ends_after_one_run() {
        let p = StreetParams {
            spacing: 2,
            bloom_factor: 1.0,
            stopping_factor: 1.0,
            blind_factor: 1.0,
        };
        let (grid, stats) = generate_street_network(21, &p, &mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(streets(&grid), 5);
        assert_eq!(stats.dead_ends, 2);
    }

    fn always_turn() -> StreetParams {
        StreetParams {
            spacing: 2,
            bloom_factor: 1.0,
            stopping_factor: 1.0,
            blind_factor: 0.0,
        }
    }

    fn rows(grid: &Tilemap<Cell>) -> Vec<String> {
        (0..grid.height)
            .map(|x| {
                (0..grid.width)
                    .map(|y| if grid.get(x, y).is_street() { 'S' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_turn_hands_off_one_perpendicular_branch() {
        let p = always_turn();
        let (mut lefts, mut rights) = (0, 0);

        for seed in 0..32 {
            for dir in Direction::CYCLE {
                let mut grid = Tilemap::new_with(21, 21, Cell::Empty);
                grid.set(10, 10, Cell::Street);
                let mut frontier = VecDeque::new();
                let mut stats = WalkStats::default();
                let mut rng = ChaCha8Rng::seed_from_u64(seed);

                let start = Branch { x: 10, y: 10, dir };
                let end = walk_branch(&mut grid, start, &p, &mut frontier, &mut stats, &mut rng);
                assert_eq!(end, BranchEnd::Turned);
                assert_eq!(stats.street_cells, 2);
                assert_eq!(frontier.len(), 1, "a turn must not spawn side streets");

                let (dx, dy) = dir.delta();
                let next = frontier[0];
                assert_eq!((next.x, next.y), (10 + 2 * dx, 10 + 2 * dy));
                if next.dir == dir.turn_left() {
                    lefts += 1;
                } else if next.dir == dir.turn_right() {
                    rights += 1;
                } else {
                    panic!("{:?} turned to {:?}", dir, next.dir);
                }

                // First cell of the new branch lies beside the parent street, not on it
                let (tx, ty) = next.dir.delta();
                assert_eq!(grid.get_checked(next.x + tx, next.y + ty), Some(&Cell::Empty));
            }
        }

        assert!(lefts > 0 && rights > 0);
    }

    #[test]
    fn test_always_turning_walk() {
        let (grid, stats) = generate_street_network(21, &always_turn(), &mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(stats.dead_ends, 0);
        // Each turn adds exactly one branch to the two seeded at the center
        assert_eq!(stats.branches, 2 + stats.turns);
        assert_eq!(stats.turns, 15);
        assert_eq!(stats.blocked, 2);
        assert_eq!(streets(&grid), 33);
    }

    #[test]
    fn test_frontier_is_first_in_first_out() {
        let p = StreetParams {
            spacing: 2,
            bloom_factor: 0.6,
            stopping_factor: 0.3,
            blind_factor: 0.5,
        };
        let (grid, stats) = generate_street_network(7, &p, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(
            rows(&grid),
            [
                "...S.S.",
                "SSSSSSS",
                "...S.S.",
                "...SSS.",
                "...S.S.",
                "...SSS.",
                ".......",
            ]
        );
        assert_eq!(stats.branches, 8);
        assert_eq!(stats.blocked, 6);
        assert_eq!(stats.turns, 2);
    }
}
