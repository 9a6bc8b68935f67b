//! Road classification from the 4-neighborhood of each street cell
//!
//! Checks run in a fixed order: crossing, then vertical, then horizontal. A corner cell with one
//! vertical and one horizontal neighbor is therefore drawn as a vertical segment; existing
//! renders depend on that order, so keep it.

use crate::city::types::{Cell, RoadType};
use crate::tilemap::Tilemap;

/// Classify every street cell. Non-street cells map to `None`.
pub fn classify_roads(grid: &Tilemap<Cell>) -> Tilemap<Option<RoadType>> {
    grid.map(|x, y, cell| {
        if cell.is_street() {
            Some(classify_cell(grid, x, y))
        } else {
            None
        }
    })
}

/// Road type of a single street cell. Cells outside the grid count as non-street.
pub fn classify_cell(grid: &Tilemap<Cell>, x: usize, y: usize) -> RoadType {
    let (x, y) = (x as i64, y as i64);
    let is_street = |nx: i64, ny: i64| grid.get_checked(nx, ny).is_some_and(|c| c.is_street());

    let up = is_street(x - 1, y);
    let down = is_street(x + 1, y);
    let left = is_street(x, y - 1);
    let right = is_street(x, y + 1);

    if up && down && left && right {
        RoadType::Crossing
    } else if up || down {
        RoadType::VerticalSegment
    } else if left || right {
        RoadType::HorizontalSegment
    } else {
        RoadType::Isolated
    }
}

/// Number of street cells of each road type, in `RoadType::all()` order.
pub fn count_road_types(roads: &Tilemap<Option<RoadType>>) -> Vec<(RoadType, usize)> {
    RoadType::all()
        .iter()
        .map(|&kind| (kind, roads.count(|r| *r == Some(kind))))
        .collect()
}
