//! ASCII rendering and export of city grids

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::city::{Cell, City, RoadType};
use crate::error::CityError;

/// Character for a cell, with street shape shown for street cells.
pub fn cell_char(cell: Cell, road: Option<RoadType>) -> char {
    match (cell, road) {
        (Cell::Empty, _) => '.',
        (Cell::Building, _) => '#',
        (Cell::Street, Some(RoadType::Crossing)) => '+',
        (Cell::Street, Some(RoadType::VerticalSegment)) => '|',
        (Cell::Street, Some(RoadType::HorizontalSegment)) => '-',
        (Cell::Street, _) => 'o',
    }
}

/// Render the grid as text, one line per grid row.
pub fn render_city(city: &City) -> String {
    let size = city.size();
    let mut out = String::with_capacity(size * (size + 1));
    for x in 0..size {
        for y in 0..size {
            out.push(cell_char(*city.grid.get(x, y), *city.roads.get(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Write the ASCII map with a header and legend to a text file.
/// Any I/O failure is reported as `ExportFailure`.
pub fn export_ascii<P: AsRef<Path>>(city: &City, path: P) -> Result<(), CityError> {
    let path = path.as_ref();
    let result = File::create(path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_ascii(city, &mut writer)?;
        writer.flush()
    });
    result.map_err(|source| CityError::ExportFailure {
        path: path.to_path_buf(),
        source,
    })
}

fn write_ascii<W: Write>(city: &City, writer: &mut W) -> io::Result<()> {
    let stats = city.stats();

    writeln!(writer, "City map generated {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(writer, "Seed: {}  Size: {}x{}", city.seeds.master, city.size(), city.size())?;
    writeln!(
        writer,
        "Streets: {}  Buildings: {}  Open land: {}",
        stats.streets, stats.buildings, stats.empty
    )?;
    writeln!(writer)?;
    write!(writer, "{}", render_city(city))?;
    writeln!(writer)?;
    writeln!(writer, "Legend: # building  . open land  + crossing  | vertical  - horizontal  o isolated")
}
