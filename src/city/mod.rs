//! City layout generation
//!
//! The pipeline runs in fixed phases, each owning the grid in turn:
//!
//! 1. Street walk builds a new grid from the center out
//! 2. Densification fills empty land with buildings
//! 3. Classification reads the finished grid and produces road types
//!
//! Building heights are sampled later, once per building, when geometry is needed.

pub mod classify;
pub mod density;
pub mod heights;
pub mod streets;
pub mod types;

use crate::config::CityConfig;
use crate::error::CityError;
use crate::seeds::CitySeeds;
use crate::tilemap::Tilemap;

pub use classify::{classify_cell, classify_roads, count_road_types};
pub use density::densify_blocks;
pub use heights::{building_heights, HeightField, HEIGHT_JITTER};
pub use streets::{generate_street_network, StreetParams, WalkStats};
pub use types::{Cell, Direction, RoadType};

/// A generated city layout.
#[derive(Clone, Debug)]
pub struct City {
    pub config: CityConfig,
    pub seeds: CitySeeds,
    pub grid: Tilemap<Cell>,
    /// Road type of every street cell, `None` elsewhere
    pub roads: Tilemap<Option<RoadType>>,
    pub walk: WalkStats,
}

/// Cell counts of a generated city.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CityStats {
    pub streets: usize,
    pub buildings: usize,
    pub empty: usize,
    pub crossings: usize,
    pub vertical: usize,
    pub horizontal: usize,
    pub isolated: usize,
}

/// Generate a city from a config, drawing a random master seed if the config has none.
pub fn generate_city(config: &CityConfig) -> Result<City, CityError> {
    let master = config.random_seed.unwrap_or_else(rand::random);
    generate_city_with_seeds(config, CitySeeds::from_master(master))
}

/// Generate a city with explicit per-phase seeds.
pub fn generate_city_with_seeds(config: &CityConfig, seeds: CitySeeds) -> Result<City, CityError> {
    config.validate()?;

    let params = StreetParams::from(config);
    let (mut grid, walk) = generate_street_network(config.city_size, &params, &mut seeds.streets_rng());

    densify_blocks(&mut grid, config.city_density, &mut seeds.density_rng());

    let roads = classify_roads(&grid);

    Ok(City {
        config: config.clone(),
        seeds,
        grid,
        roads,
        walk,
    })
}

impl City {
    pub fn size(&self) -> usize {
        self.config.city_size
    }

    pub fn height_field(&self) -> HeightField {
        HeightField::from_config(&self.config)
    }

    /// Sample building heights from this city's height seed.
    pub fn building_heights(&self) -> Tilemap<f32> {
        building_heights(&self.grid, &self.height_field(), &mut self.seeds.heights_rng())
    }

    pub fn stats(&self) -> CityStats {
        let mut stats = CityStats::default();
        for (_, _, cell) in self.grid.iter() {
            match cell {
                Cell::Street => stats.streets += 1,
                Cell::Building => stats.buildings += 1,
                Cell::Empty => stats.empty += 1,
            }
        }
        for (_, _, road) in self.roads.iter() {
            match road {
                Some(RoadType::Crossing) => stats.crossings += 1,
                Some(RoadType::VerticalSegment) => stats.vertical += 1,
                Some(RoadType::HorizontalSegment) => stats.horizontal += 1,
                Some(RoadType::Isolated) => stats.isolated += 1,
                None => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_config(seed: u64) -> CityConfig {
        CityConfig {
            city_size: 10,
            spacing: 6,
            bloom_factor: 1.0,
            stopping_factor: 0.0,
            blind_factor: 0.8,
            random_seed: Some(seed),
            ..CityConfig::default()
        }
    }

    #[test]
    fn test_same_seed_same_city() {
        let a = generate_city(&reference_config(42)).unwrap();
        let b = generate_city(&reference_config(42)).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.roads, b.roads);
        assert_eq!(a.building_heights(), b.building_heights());
    }

    #[test]
    fn test_reference_city_shape() {
        let city = generate_city(&reference_config(42)).unwrap();
        let stats = city.stats();
        assert_eq!(city.grid.width, 10);
        assert_eq!(city.grid.height, 10);
        assert!(stats.streets > 1);
        assert_eq!(stats.streets + stats.buildings + stats.empty, 100);
        assert_eq!(*city.grid.get(5, 5), Cell::Street);
    }

    #[test]
    fn test_road_types_cover_streets_exactly() {
        let city = generate_city(&CityConfig {
            city_size: 40,
            spacing: 4,
            bloom_factor: 0.6,
            stopping_factor: 0.2,
            random_seed: Some(7),
            ..CityConfig::default()
        })
        .unwrap();
        let stats = city.stats();
        assert_eq!(
            stats.crossings + stats.vertical + stats.horizontal + stats.isolated,
            stats.streets
        );
        for (x, y, cell) in city.grid.iter() {
            assert_eq!(city.roads.get(x, y).is_some(), cell.is_street());
        }
    }

    #[test]
    fn test_density_fills_most_land() {
        let config = CityConfig {
            city_size: 60,
            city_density: 0.9,
            random_seed: Some(43),
            ..CityConfig::default()
        };
        let stats = generate_city(&config).unwrap().stats();
        let land = stats.buildings + stats.empty;
        let fraction = stats.buildings as f64 / land as f64;
        assert!((fraction - 0.9).abs() < 0.05, "fraction {}", fraction);
    }

    #[test]
    fn test_oversized_spacing_gives_single_street() {
        let config = CityConfig {
            spacing: 11,
            random_seed: Some(1),
            ..reference_config(1)
        };
        let stats = generate_city(&config).unwrap().stats();
        assert_eq!(stats.streets, 1);
        assert_eq!(stats.isolated, 1);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = CityConfig {
            blind_factor: 2.0,
            ..reference_config(1)
        };
        assert!(matches!(
            generate_city(&config),
            Err(CityError::InvalidConfiguration { field: "blind_factor", .. })
        ));
    }

    #[test]
    fn test_small_sizes_terminate() {
        for size in 1..=12 {
            for spacing in 1..=4 {
                let config = CityConfig {
                    city_size: size,
                    spacing,
                    random_seed: Some(size as u64 * 31 + spacing as u64),
                    ..CityConfig::default()
                };
                let city = generate_city(&config).unwrap();
                assert_eq!(*city.grid.get(size / 2, size / 2), Cell::Street);
            }
        }
    }
}
