//! Street geometry: raised curb slabs around the open carriageway of a cell

use crate::city::RoadType;
use crate::mesh::{create_box, Mesh};

/// Height of curb slabs above the ground plane.
pub const STREET_HEIGHT: f32 = 1.1;
/// Width of a curb slab inside a cell.
pub const CURB_WIDTH: f32 = 2.5;

/// Build the slabs for one street cell covering `min..max`.
///
/// A vertical segment runs along x, so its curbs line the two y edges; a horizontal segment runs
/// along y and gets curbs on the two x edges. Crossings and isolated cells get a slab in each
/// corner, leaving the carriageway open in both directions.
pub fn create_street(min: [f32; 2], max: [f32; 2], road_type: RoadType) -> Mesh {
    let [x0, y0] = min;
    let [x1, y1] = max;
    let c = CURB_WIDTH;
    let h = STREET_HEIGHT;

    let slabs = match road_type {
        RoadType::VerticalSegment => vec![
            create_box([x0, y0, 0.0], [x1, y0 + c, h]),
            create_box([x0, y1 - c, 0.0], [x1, y1, h]),
        ],
        RoadType::HorizontalSegment => vec![
            create_box([x0, y0, 0.0], [x0 + c, y1, h]),
            create_box([x1 - c, y0, 0.0], [x1, y1, h]),
        ],
        RoadType::Crossing | RoadType::Isolated => vec![
            create_box([x0, y0, 0.0], [x0 + c, y0 + c, h]),
            create_box([x0, y1 - c, 0.0], [x0 + c, y1, h]),
            create_box([x1 - c, y0, 0.0], [x1, y0 + c, h]),
            create_box([x1 - c, y1 - c, 0.0], [x1, y1, h]),
        ],
    };

    Mesh::concatenate(&slabs)
}
