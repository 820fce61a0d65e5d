//! Grid coordinates and the arithmetic every other module builds on.
//!
//! Positions are integer tile coordinates. Pixel conversion exists for the
//! presentation layer only; nothing in the rules reads pixels.

use std::fmt;

use arrayvec::ArrayVec;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by the given deltas.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        manhattan_distance(self, other)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four axis-aligned step directions. Diagonals do not exist on this grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbour order used by [`adjacent_positions`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Screen-style deltas: `y` grows downwards.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Tile geometry: the bounds of a map plus the pixel size of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub tile_size: i32,
    pub dimensions: MapDimensions,
}

impl Grid {
    pub const fn new(tile_size: i32, dimensions: MapDimensions) -> Self {
        Self {
            tile_size,
            dimensions,
        }
    }

    /// Top-left pixel of a tile.
    pub fn grid_to_pixel(&self, position: Position) -> (i32, i32) {
        (position.x * self.tile_size, position.y * self.tile_size)
    }

    /// Tile containing a pixel. Uses floor division so negative pixels map to
    /// negative tiles instead of collapsing onto row/column zero.
    pub fn pixel_to_grid(&self, px: i32, py: i32) -> Position {
        Position::new(px.div_euclid(self.tile_size), py.div_euclid(self.tile_size))
    }

    /// Pixel at the centre of a tile, used for effect anchors.
    pub fn tile_center(&self, position: Position) -> (i32, i32) {
        let (px, py) = self.grid_to_pixel(position);
        (px + self.tile_size / 2, py + self.tile_size / 2)
    }

    pub fn is_valid_position(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn adjacent_positions(&self, position: Position) -> ArrayVec<Position, 4> {
        adjacent_positions(position, self.dimensions)
    }
}

pub fn manhattan_distance(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// In-bounds 4-neighbourhood of `position`, ordered up, down, left, right.
pub fn adjacent_positions(position: Position, bounds: MapDimensions) -> ArrayVec<Position, 4> {
    Direction::ALL
        .iter()
        .map(|direction| position.step(*direction))
        .filter(|candidate| bounds.contains(*candidate))
        .collect()
}
