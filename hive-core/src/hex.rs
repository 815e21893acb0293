//! Hex geometry with axial coordinates and a stacking height

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Axial hex coordinates plus height (`h == 0` is ground level)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
    pub h: i8,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r, h: 0 }
    }

    pub const fn with_height(q: i8, r: i8, h: i8) -> Self {
        Self { q, r, h }
    }

    /// Same column at ground level
    pub const fn grounded(self) -> Self {
        Self { q: self.q, r: self.r, h: 0 }
    }

    /// Neighbour in a direction (`Above` raises the height by one)
    pub fn neighbour(self, direction: Direction) -> Hex {
        self + direction.offset()
    }

    /// The six cardinal neighbours at the same height
    pub fn neighbours(self) -> [Hex; 6] {
        Direction::CARDINAL.map(|d| self.neighbour(d))
    }

    /// Hex distance between columns; height is ignored
    pub fn distance_to(self, other: Hex) -> i32 {
        let dq = self.q as i32 - other.q as i32;
        let dr = self.r as i32 - other.r as i32;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    /// Distance from the origin column
    pub fn distance_to_origin(self) -> i32 {
        self.distance_to(Hex::ORIGIN)
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::with_height(self.q + other.q, self.r + other.r, self.h + other.h)
    }
}

impl AddAssign for Hex {
    fn add_assign(&mut self, other: Hex) {
        *self = *self + other;
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::with_height(self.q - other.q, self.r - other.r, self.h - other.h)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.h)
    }
}

/// Neighbour directions. The discriminant doubles as the protocol code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    NorthEast = 0,
    East = 1,
    SouthEast = 2,
    SouthWest = 3,
    West = 4,
    NorthWest = 5,
    Above = 6,
}

/// Offsets indexed by direction code
pub const NEIGHBOUR_OFFSETS: [Hex; 7] = [
    Hex::with_height(1, -1, 0),  // NE
    Hex::with_height(1, 0, 0),   // E
    Hex::with_height(0, 1, 0),   // SE
    Hex::with_height(-1, 1, 0),  // SW
    Hex::with_height(-1, 0, 0),  // W
    Hex::with_height(0, -1, 0),  // NW
    Hex::with_height(0, 0, 1),   // Above
];

impl Direction {
    pub const NUM_DIRECTIONS: usize = 7;
    pub const NUM_CARDINAL: usize = 6;

    pub const CARDINAL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ALL: [Direction; 7] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Above,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }

    pub fn offset(self) -> Hex {
        NEIGHBOUR_OFFSETS[self.index()]
    }

    pub fn is_cardinal(self) -> bool {
        self != Direction::Above
    }

    /// Opposite cardinal direction; `Above` maps to itself
    pub fn opposite(self) -> Direction {
        self.rotate(3)
    }

    pub fn clockwise(self) -> Direction {
        self.rotate(1)
    }

    pub fn counter_clockwise(self) -> Direction {
        self.rotate(5)
    }

    fn rotate(self, steps: usize) -> Direction {
        if self == Direction::Above {
            return self;
        }
        Self::CARDINAL[(self.index() + steps) % Self::NUM_CARDINAL]
    }
}
