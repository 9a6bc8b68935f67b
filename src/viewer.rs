use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::city::{generate_city, City};
use crate::config::CityConfig;
use crate::error::CityError;
use crate::export::{preview_cell_size, render_city, PreviewLayer};
use crate::tilemap::Tilemap;

/// Cached city data so switching layers does not regenerate
struct ViewedCity {
    city: City,
    heights: Tilemap<f32>,
}

/// Errors that stop the viewer.
#[derive(Debug)]
pub enum ViewerError {
    Window(minifb::Error),
    Generation(CityError),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::Window(e) => write!(f, "Window error: {}", e),
            ViewerError::Generation(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<minifb::Error> for ViewerError {
    fn from(e: minifb::Error) -> Self {
        ViewerError::Window(e)
    }
}

impl From<CityError> for ViewerError {
    fn from(e: CityError) -> Self {
        ViewerError::Generation(e)
    }
}

/// Run the interactive city viewer.
/// Press 1-3 to switch layers, R to regenerate with a new seed, Escape to exit.
pub fn run_viewer(config: &CityConfig) -> Result<(), ViewerError> {
    let cell_px = preview_cell_size(config.city_size);
    let side = config.city_size * cell_px as usize;

    let mut viewed = view_city(config)?;

    let mut window = Window::new(
        "City Generator - 1-3: Layers, R: Regenerate, Esc: Exit",
        side,
        side,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    let mut layer = PreviewLayer::Roads;
    let mut buffer = render_buffer(&viewed, layer, cell_px);

    println!("Viewer started. Controls:");
    println!("  1: Cells");
    println!("  2: Road Types");
    println!("  3: Heights");
    println!("  R: Regenerate");
    println!("  Esc: Exit");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut needs_redraw = false;

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            let next = CityConfig {
                random_seed: Some(rand::random()),
                ..config.clone()
            };
            viewed = view_city(&next)?;
            needs_redraw = true;
        }

        let new_layer = if window.is_key_pressed(Key::Key1, KeyRepeat::No) {
            Some(PreviewLayer::Cells)
        } else if window.is_key_pressed(Key::Key2, KeyRepeat::No) {
            Some(PreviewLayer::Roads)
        } else if window.is_key_pressed(Key::Key3, KeyRepeat::No) {
            Some(PreviewLayer::Heights)
        } else {
            None
        };

        if let Some(l) = new_layer {
            if l != layer {
                layer = l;
                println!("Layer: {}", layer.label());
                needs_redraw = true;
            }
        }

        if needs_redraw {
            buffer = render_buffer(&viewed, layer, cell_px);
        }

        window.update_with_buffer(&buffer, side, side)?;
    }

    Ok(())
}

fn view_city(config: &CityConfig) -> Result<ViewedCity, CityError> {
    let city = generate_city(config)?;
    println!("Generated city with seed: {}", city.seeds.master);
    let heights = city.building_heights();
    Ok(ViewedCity { city, heights })
}

/// Render a layer into a 0RGB framebuffer.
fn render_buffer(viewed: &ViewedCity, layer: PreviewLayer, cell_px: u32) -> Vec<u32> {
    let img = render_city(&viewed.city, Some(&viewed.heights), layer, cell_px);
    img.pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        })
        .collect()
}
