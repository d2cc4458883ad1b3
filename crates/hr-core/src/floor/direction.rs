//! Grid coordinates, cardinal directions and world positions

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cardinal side of a room. North is +Y, East is +X.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in N, E, S, W order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit grid offset pointing out of this side
    pub const fn offset(self) -> GridPos {
        match self {
            Direction::North => GridPos::new(0, 1),
            Direction::East => GridPos::new(1, 0),
            Direction::South => GridPos::new(0, -1),
            Direction::West => GridPos::new(-1, 0),
        }
    }

    /// The direction whose unit offset equals `offset`, if any
    pub fn from_offset(offset: GridPos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.offset() == offset)
    }

    /// Single-letter tag used in map dumps
    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

/// Integer grid coordinate, also used for grid offsets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ZERO: GridPos = GridPos::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Neighbor one step through `direction`
    pub fn step(self, direction: Direction) -> GridPos {
        self + direction.offset()
    }

    pub fn neighbors(self) -> [(Direction, GridPos); 4] {
        Direction::ALL.map(|d| (d, self.step(d)))
    }

    /// Center of this cell in world units
    pub fn to_world(self, spacing: WorldPos) -> WorldPos {
        WorldPos::new(self.x as f32 * spacing.x, self.y as f32 * spacing.y)
    }
}

impl Add for GridPos {
    type Output = GridPos;

    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPos {
    type Output = GridPos;

    fn sub(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for GridPos {
    type Output = GridPos;

    fn neg(self) -> GridPos {
        GridPos::new(-self.x, -self.y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

/// Position in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const ZERO: WorldPos = WorldPos::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for WorldPos {
    type Output = WorldPos;

    fn add(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPos {
    type Output = WorldPos;

    fn sub(self, rhs: WorldPos) -> WorldPos {
        WorldPos::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for WorldPos {
    type Output = WorldPos;

    fn mul(self, rhs: f32) -> WorldPos {
        WorldPos::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
