//! Raster previews of a generated city
//!
//! Each grid cell becomes a square block of pixels. Rows of the grid run down the image and
//! columns run across, so `(x, y)` lands at pixel row `x` and pixel column `y`.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::city::{Cell, City, RoadType};
use crate::tilemap::Tilemap;

/// Target width of a preview image, in pixels.
pub const PREVIEW_SIZE: u32 = 600;

const OUTLINE: [u8; 3] = [0, 0, 0];

/// What a preview shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewLayer {
    /// Plain cell kinds; every street in one color
    Cells,
    /// Streets colored by road type
    Roads,
    /// Building heights on a spectral scale
    Heights,
}

impl PreviewLayer {
    pub fn label(&self) -> &'static str {
        match self {
            PreviewLayer::Cells => "Cells",
            PreviewLayer::Roads => "Road Types",
            PreviewLayer::Heights => "Heights",
        }
    }
}

/// Color of a cell, with road types distinguished.
pub fn cell_color(cell: Cell, road: Option<RoadType>) -> [u8; 3] {
    match (cell, road) {
        (Cell::Building, _) => [255, 165, 0],        // Orange
        (Cell::Empty, _) => [34, 139, 34],           // Green
        (Cell::Street, Some(RoadType::VerticalSegment)) => [70, 130, 180],
        (Cell::Street, Some(RoadType::HorizontalSegment)) => [186, 85, 211],
        (Cell::Street, Some(RoadType::Isolated)) => [90, 90, 90],
        (Cell::Street, _) => [128, 128, 128],        // Crossing
    }
}

/// Pixel size of one cell so the whole city fits in about [`PREVIEW_SIZE`] pixels.
pub fn preview_cell_size(city_size: usize) -> u32 {
    (PREVIEW_SIZE / city_size.max(1) as u32).max(1)
}

/// Render one preview layer. `heights` is only read for [`PreviewLayer::Heights`].
pub fn render_city(city: &City, heights: Option<&Tilemap<f32>>, layer: PreviewLayer, cell_px: u32) -> RgbImage {
    let cell_px = cell_px.max(1);
    let size = city.size() as u32 * cell_px;
    let mut img: RgbImage = ImageBuffer::new(size, size);

    let height_range = heights.map(building_height_range);
    let outline = cell_px >= 4;

    for (x, y, &cell) in city.grid.iter() {
        let road = *city.roads.get(x, y);
        let color = match (layer, heights, height_range) {
            (PreviewLayer::Cells, _, _) => cell_color(cell, None),
            (PreviewLayer::Heights, Some(h), Some((lo, hi))) if cell == Cell::Building => {
                let t = (*h.get(x, y) - lo) / (hi - lo).max(1e-3);
                spectral_colormap(t.clamp(0.0, 1.0))
            }
            _ => cell_color(cell, road),
        };

        let px0 = y as u32 * cell_px;
        let py0 = x as u32 * cell_px;
        for dy in 0..cell_px {
            for dx in 0..cell_px {
                let edge = dx == 0 || dy == 0 || dx == cell_px - 1 || dy == cell_px - 1;
                let c = if outline && edge { OUTLINE } else { color };
                img.put_pixel(px0 + dx, py0 + dy, Rgb(c));
            }
        }
    }

    img
}

/// Save a preview layer as PNG, sized like the on-screen preview.
pub fn export_city_png(
    city: &City,
    heights: Option<&Tilemap<f32>>,
    layer: PreviewLayer,
    path: &str,
) -> Result<(), image::ImageError> {
    render_city(city, heights, layer, preview_cell_size(city.size())).save(path)
}

/// Lowest and highest height over building cells.
fn building_height_range(heights: &Tilemap<f32>) -> (f32, f32) {
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for (_, _, &h) in heights.iter() {
        if h > 0.0 {
            lo = lo.min(h);
            hi = hi.max(h);
        }
    }
    if lo > hi { (0.0, 1.0) } else { (lo, hi) }
}

/// Spectral colormap (matplotlib style): dark blue -> green -> yellow -> red
pub fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 6] = [
        [0.37, 0.31, 0.64],  // Dark blue/purple (low)
        [0.20, 0.53, 0.74],  // Blue
        [0.40, 0.76, 0.65],  // Teal
        [0.90, 0.96, 0.60],  // Yellow-green
        [0.99, 0.68, 0.38],  // Light orange
        [0.62, 0.00, 0.26],  // Dark red (high)
    ];

    let t_scaled = t.clamp(0.0, 1.0) * 5.0;
    let idx = (t_scaled as usize).min(4);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::generate_city;
    use crate::config::CityConfig;

    fn small_city() -> City {
        generate_city(&CityConfig {
            city_size: 10,
            random_seed: Some(42),
            ..CityConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_cell_colors() {
        assert_eq!(cell_color(Cell::Building, None), [255, 165, 0]);
        assert_eq!(cell_color(Cell::Empty, None), [34, 139, 34]);
        assert_ne!(
            cell_color(Cell::Street, Some(RoadType::VerticalSegment)),
            cell_color(Cell::Street, Some(RoadType::HorizontalSegment))
        );
    }

    #[test]
    fn test_preview_cell_size() {
        assert_eq!(preview_cell_size(10), 60);
        assert_eq!(preview_cell_size(1000), 1);
        assert_eq!(preview_cell_size(0), 600);
    }

    #[test]
    fn test_render_places_center_street() {
        let city = small_city();
        let img = render_city(&city, None, PreviewLayer::Cells, 4);
        assert_eq!(img.dimensions(), (40, 40));
        // Inside of the center cell (5, 5), away from the outline
        assert_eq!(img.get_pixel(5 * 4 + 2, 5 * 4 + 2).0, [128, 128, 128]);
        assert_eq!(img.get_pixel(5 * 4, 5 * 4).0, OUTLINE);
    }

    #[test]
    fn test_heights_layer_colors_buildings() {
        let city = small_city();
        let heights = city.building_heights();
        let img = render_city(&city, Some(&heights), PreviewLayer::Heights, 1);
        for (x, y, &cell) in city.grid.iter() {
            let px = img.get_pixel(y as u32, x as u32).0;
            if cell == Cell::Building {
                assert_ne!(px, cell_color(Cell::Building, None));
            } else {
                assert_eq!(px, cell_color(cell, *city.roads.get(x, y)));
            }
        }
    }

    #[test]
    fn test_spectral_endpoints() {
        assert_eq!(spectral_colormap(0.0), [94, 79, 163]);
        assert_eq!(spectral_colormap(1.0), [158, 0, 66]);
    }
}
