//! Planar compass directions used when attaching footprints to each other.

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// One of the four directions in the x/z plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosZ,
        Direction::NegZ,
    ];

    /// Unit cell offset.
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::PosX => IVec3::X,
            Direction::NegX => IVec3::NEG_X,
            Direction::PosZ => IVec3::Z,
            Direction::NegZ => IVec3::NEG_Z,
        }
    }

    pub fn scaled(self, n: i32) -> IVec3 {
        self.offset() * n
    }

    /// Perpendicular direction a quarter turn counter-clockwise (seen from +y).
    pub fn left(self) -> Direction {
        match self {
            Direction::PosX => Direction::PosZ,
            Direction::PosZ => Direction::NegX,
            Direction::NegX => Direction::NegZ,
            Direction::NegZ => Direction::PosX,
        }
    }

    pub fn right(self) -> Direction {
        self.left().opposite()
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// True for the two directions that move along the x axis.
    pub fn is_x_axis(self) -> bool {
        matches!(self, Direction::PosX | Direction::NegX)
    }
}
