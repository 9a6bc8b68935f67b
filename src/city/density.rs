//! Block densification: fill the land between streets with buildings

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::city::types::Cell;
use crate::tilemap::Tilemap;

/// Turn each empty cell into a building with probability `density`.
///
/// Cells are visited row by row and exactly one sample is drawn per empty cell, so the result
/// depends only on the grid and the seed. Returns the number of buildings placed.
pub fn densify_blocks(grid: &mut Tilemap<Cell>, density: f64, rng: &mut ChaCha8Rng) -> usize {
    let mut placed = 0;

    for x in 0..grid.width {
        for y in 0..grid.height {
            let cell = grid.get_mut(x, y);
            if *cell != Cell::Empty {
                continue;
            }
            if rng.gen::<f64>() < density {
                *cell = Cell::Building;
                placed += 1;
            }
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_streets_untouched() {
        let mut grid = Tilemap::new_with(5, 5, Cell::Street);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(densify_blocks(&mut grid, 1.0, &mut rng), 0);
        assert_eq!(grid.count(|c| *c == Cell::Street), 25);
    }

    #[test]
    fn test_full_and_zero_density() {
        let mut full = Tilemap::new_with(6, 6, Cell::Empty);
        densify_blocks(&mut full, 1.0, &mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(full.count(|c| *c == Cell::Building), 36);

        let mut none = Tilemap::new_with(6, 6, Cell::Empty);
        densify_blocks(&mut none, 0.0, &mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(none.count(|c| *c == Cell::Empty), 36);
    }

    #[test]
    fn test_density_fraction_close_to_target() {
        let mut grid = Tilemap::new_with(100, 100, Cell::Empty);
        let placed = densify_blocks(&mut grid, 0.9, &mut ChaCha8Rng::seed_from_u64(43));
        let fraction = placed as f64 / 10_000.0;
        assert!((fraction - 0.9).abs() < 0.03, "fraction {}", fraction);
    }
}
