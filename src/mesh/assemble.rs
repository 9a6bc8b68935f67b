//! Whole-city mesh assembly

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::city::{Cell, City};
use crate::mesh::{create_building, create_plane, create_street, BuildingStyle, Mesh};
use crate::tilemap::Tilemap;

/// World units per grid cell.
pub const CELL_SCALE: f32 = 10.0;
/// Thickness of the ground slab under the city.
pub const GROUND_THICKNESS: f32 = 1.0;

/// Build the ground, every building and every street of a city as one mesh.
///
/// `heights` must hold one sampled height per building cell (see [`City::building_heights`]).
/// Roof rises are drawn from the city's roof seed, one per building in row order.
pub fn assemble_city_mesh(city: &City, heights: &Tilemap<f32>, style: &BuildingStyle) -> Mesh {
    let extent = city.size() as f32 * CELL_SCALE;
    let mut mesh = create_plane(extent, extent, GROUND_THICKNESS);
    let mut roof_rng = city.seeds.roofs_rng();

    for x in 0..city.grid.width {
        for y in 0..city.grid.height {
            let min = [x as f32 * CELL_SCALE, y as f32 * CELL_SCALE];
            let max = [min[0] + CELL_SCALE, min[1] + CELL_SCALE];

            match city.grid.get(x, y) {
                Cell::Building => {
                    let height = *heights.get(x, y);
                    let rise = roof_rise(height, &mut roof_rng);
                    mesh.append(&create_building(min, max, height, rise, style));
                }
                Cell::Street => {
                    if let Some(road_type) = city.roads.get(x, y) {
                        mesh.append(&create_street(min, max, *road_type));
                    }
                }
                Cell::Empty => {}
            }
        }
    }

    mesh
}

/// Ridge rise of a roof, uniform in `[0, height / 10)`.
fn roof_rise(height: f32, rng: &mut ChaCha8Rng) -> f32 {
    rng.gen::<f32>() * height / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::generate_city;
    use crate::config::CityConfig;

    fn city(seed: u64) -> City {
        generate_city(&CityConfig {
            city_size: 12,
            random_seed: Some(seed),
            ..CityConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_mesh_spans_city() {
        let city = city(42);
        let heights = city.building_heights();
        let mesh = assemble_city_mesh(&city, &heights, &BuildingStyle::default());
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min[2], -GROUND_THICKNESS);
        assert!(bounds.max[2] >= city.config.min_height as f32);
        // Gutters and facade details hang slightly outside the footprint
        assert!(bounds.max[0] < 120.0 + 1.0);
        assert!(bounds.min[0] > -1.0);
    }

    #[test]
    fn test_mesh_is_deterministic() {
        let a = city(9);
        let b = city(9);
        let style = BuildingStyle::default();
        let mesh_a = assemble_city_mesh(&a, &a.building_heights(), &style);
        let mesh_b = assemble_city_mesh(&b, &b.building_heights(), &style);
        assert_eq!(mesh_a, mesh_b);
    }

    #[test]
    fn test_empty_city_is_ground_and_center() {
        let city = generate_city(&CityConfig {
            city_size: 3,
            spacing: 5,
            city_density: 0.0,
            random_seed: Some(1),
            ..CityConfig::default()
        })
        .unwrap();
        let mesh = assemble_city_mesh(&city, &city.building_heights(), &BuildingStyle::default());
        // Ground box plus the four corner slabs of the isolated center street
        assert_eq!(mesh.triangle_count(), 12 + 4 * 12);
    }

    #[test]
    fn test_roof_rise_range() {
        use rand::SeedableRng;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let r = roof_rise(30.0, &mut rng);
            assert!((0.0..3.0).contains(&r));
        }
        assert_eq!(roof_rise(0.0, &mut rng), 0.0);
    }
}
