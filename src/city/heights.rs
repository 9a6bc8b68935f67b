//! Building heights: a Gaussian falloff from the city center plus per-building jitter

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::city::types::Cell;
use crate::config::CityConfig;
use crate::tilemap::Tilemap;

/// Upper bound (exclusive) of the random jitter added to every building.
pub const HEIGHT_JITTER: f64 = 10.0;

/// Radial height profile of a city.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightField {
    pub min_height: f64,
    pub max_height: f64,
    /// Center of the falloff in grid coordinates
    pub center: (f64, f64),
    /// Spread of the falloff, in cells
    pub sigma: f64,
}

impl HeightField {
    pub fn from_config(config: &CityConfig) -> Self {
        let size = config.city_size as f64;
        Self {
            min_height: config.min_height,
            max_height: config.max_height,
            center: (size / 2.0, size / 2.0),
            sigma: size / 8.0,
        }
    }

    /// Height at a cell without jitter.
    pub fn base_height(&self, x: usize, y: usize) -> f64 {
        let dx = x as f64 - self.center.0;
        let dy = y as f64 - self.center.1;
        let d2 = dx * dx + dy * dy;
        let falloff = (-d2 / (2.0 * self.sigma * self.sigma)).exp();
        self.min_height + (self.max_height - self.min_height) * falloff
    }

    /// Height at a cell with fresh jitter. Two calls for the same cell give different results.
    pub fn sample(&self, x: usize, y: usize, rng: &mut ChaCha8Rng) -> f64 {
        self.base_height(x, y) + rng.gen_range(0.0..HEIGHT_JITTER)
    }
}

/// Sample one height per building cell, row by row. Other cells are 0.
pub fn building_heights(
    grid: &Tilemap<Cell>,
    field: &HeightField,
    rng: &mut ChaCha8Rng,
) -> Tilemap<f32> {
    let mut heights = Tilemap::new_with(grid.width, grid.height, 0.0f32);

    for x in 0..grid.width {
        for y in 0..grid.height {
            if *grid.get(x, y) == Cell::Building {
                heights.set(x, y, field.sample(x, y, rng) as f32);
            }
        }
    }

    heights
}
