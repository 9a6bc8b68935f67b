//! City cell and road types
//!
//! Grid coordinates are `(x, y)` where `x` counts rows of the preview (drawn top to bottom) and
//! `y` counts columns (drawn left to right). The mesh uses the same axes scaled by ten.

/// What occupies a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Open land, drawn as park and skipped by the mesh
    #[default]
    Empty,
    Street,
    Building,
}

impl Cell {
    pub fn is_street(self) -> bool {
        self == Cell::Street
    }
}

/// Shape of a street cell, derived from which of its 4 neighbors are streets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoadType {
    /// All four neighbors are streets
    Crossing,
    /// A neighbor above or below is a street
    VerticalSegment,
    /// A neighbor to the left or right is a street
    HorizontalSegment,
    /// No street neighbors at all
    Isolated,
}

impl RoadType {
    pub fn all() -> &'static [RoadType] {
        &[
            RoadType::Crossing,
            RoadType::VerticalSegment,
            RoadType::HorizontalSegment,
            RoadType::Isolated,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoadType::Crossing => "Crossing",
            RoadType::VerticalSegment => "Vertical",
            RoadType::HorizontalSegment => "Horizontal",
            RoadType::Isolated => "Isolated",
        }
    }
}

/// Heading of a street branch. Turning left or right steps one place through this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    South,
    West,
    North,
    East,
}

impl Direction {
    /// Headings in turn order. A right turn steps forward one place.
    pub const CYCLE: [Direction; 4] = [Direction::South, Direction::West, Direction::North, Direction::East];

    /// Position of this heading in the turn cycle.
    pub fn index(self) -> usize {
        match self {
            Direction::South => 0,
            Direction::West => 1,
            Direction::North => 2,
            Direction::East => 3,
        }
    }

    /// Grid step `(dx, dy)` for one cell of travel.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
        }
    }

    pub fn turn_left(self) -> Direction {
        Self::CYCLE[(self.index() + 3) % 4]
    }

    pub fn turn_right(self) -> Direction {
        Self::CYCLE[(self.index() + 1) % 4]
    }

    pub fn opposite(self) -> Direction {
        Self::CYCLE[(self.index() + 2) % 4]
    }
}
