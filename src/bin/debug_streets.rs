//! Debug tool for comparing street walk parameters visually
//! Generates a grid of city previews with different bloom/stopping/blind settings

use city_generator::city::{self, City};
use city_generator::config::CityConfig;
use city_generator::export::{render_city, PreviewLayer};
use image::{ImageBuffer, Rgb, RgbImage};

const SIZE: usize = 64;
const SEED: u64 = 42;
const CELL_PX: u32 = 4;

fn main() {
    println!("Generating street comparison grid...");

    // (bloom, stopping, blind, spacing)
    let variants: [(f64, f64, f64, usize); 9] = [
        (1.0, 0.0, 0.8, 6),
        (0.5, 0.0, 0.8, 6),
        (0.2, 0.0, 0.8, 6),
        (1.0, 0.2, 0.8, 6),
        (1.0, 0.2, 0.0, 6),
        (1.0, 0.5, 0.5, 6),
        (1.0, 0.0, 0.8, 3),
        (0.6, 0.1, 0.5, 4),
        (1.0, 0.0, 0.8, 10),
    ];

    let mut images: Vec<(String, RgbImage)> = Vec::new();

    for &(bloom, stopping, blind, spacing) in &variants {
        let label = format!("B{} S{} L{} D{}", bloom, stopping, blind, spacing);
        let config = CityConfig {
            city_size: SIZE,
            bloom_factor: bloom,
            stopping_factor: stopping,
            blind_factor: blind,
            spacing,
            random_seed: Some(SEED),
            ..CityConfig::default()
        };

        match city::generate_city(&config) {
            Ok(city) => {
                report(&label, &city);
                images.push((label, render_city(&city, None, PreviewLayer::Roads, CELL_PX)));
            }
            Err(e) => eprintln!("  Skipping {}: {}", label, e),
        }
    }

    let grid = create_grid(&images, 3, 3);
    match grid.save("street_comparison.png") {
        Ok(()) => println!("Saved street_comparison.png"),
        Err(e) => eprintln!("Failed to save grid: {}", e),
    }
}

fn report(label: &str, city: &City) {
    let stats = city.stats();
    println!(
        "  {}: {} streets, {} branches, {} crossings",
        label, stats.streets, city.walk.branches, stats.crossings
    );
}

fn create_grid(images: &[(String, RgbImage)], cols: usize, rows: usize) -> RgbImage {
    if images.is_empty() {
        return ImageBuffer::new(1, 1);
    }

    let cell_width = images[0].1.width();
    let cell_height = images[0].1.height();
    let label_height = 20u32;
    let total_cell_height = cell_height + label_height;

    let mut grid: RgbImage = ImageBuffer::from_pixel(
        cell_width * cols as u32,
        total_cell_height * rows as u32,
        Rgb([40, 40, 40]),
    );

    for (idx, (name, img)) in images.iter().enumerate().take(cols * rows) {
        let x_offset = (idx % cols) as u32 * cell_width;
        let row_top = (idx / cols) as u32 * total_cell_height;

        for (x, y, pixel) in img.enumerate_pixels() {
            grid.put_pixel(x_offset + x, row_top + label_height + y, *pixel);
        }

        draw_text(&mut grid, x_offset + 5, row_top + 6, name);
    }

    grid
}

// 5x7 bitmaps for the characters used in labels
fn char_bitmap(c: char) -> [u8; 7] {
    match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'S' => [0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        _ => [0; 7],
    }
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str) {
    let white = Rgb([255, 255, 255]);

    for (i, c) in text.chars().enumerate() {
        let cx = x + i as u32 * 6;
        if cx + 5 >= img.width() {
            break;
        }

        for (row, &bits) in char_bitmap(c).iter().enumerate() {
            for col in 0..5 {
                if (bits >> (4 - col)) & 1 == 1 {
                    let (px, py) = (cx + col, y + row as u32);
                    if py < img.height() {
                        img.put_pixel(px, py, white);
                    }
                }
            }
        }
    }
}
