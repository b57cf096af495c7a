//! Axis-aligned integer footprints.
//!
//! A `Footprint` covers every integer cell between its `min` and `max`
//! corners, both inclusive. Two footprints that share a face (for example
//! `a.max.x + 1 == b.min.x`) sit next to each other without overlapping.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box of integer cells with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub min: IVec3,
    pub max: IVec3,
}

impl Footprint {
    /// Build from two arbitrary opposite corners (normalised so min ≤ max).
    pub fn from_corners(a: IVec3, b: IVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build from a min corner and a per-axis size. Sizes below 1 are
    /// clamped to a single cell.
    pub fn from_min_size(min: IVec3, size: IVec3) -> Self {
        let size = size.max(IVec3::ONE);
        Self {
            min,
            max: min + size - IVec3::ONE,
        }
    }

    /// A single cell at `p`.
    pub fn unit(p: IVec3) -> Self {
        Self { min: p, max: p }
    }

    /// Number of cells along each axis.
    pub fn size(&self) -> IVec3 {
        self.max - self.min + IVec3::ONE
    }

    /// Floor area (x extent × z extent); height is ignored.
    pub fn area(&self) -> i64 {
        let s = self.size();
        s.x as i64 * s.z as i64
    }

    /// Geometric center in cell units (cell `n` spans `n..n+1`).
    pub fn center(&self) -> Vec3 {
        (self.min.as_vec3() + (self.max + IVec3::ONE).as_vec3()) * 0.5
    }

    /// Center of the bottom face.
    pub fn bottom_center(&self) -> Vec3 {
        let c = self.center();
        Vec3::new(c.x, self.min.y as f32, c.z)
    }

    pub fn translated(&self, delta: IVec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// True if the two footprints share at least one cell.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }

    /// True if the footprints are face-adjacent in the x/z plane: they do
    /// not overlap, their y ranges intersect, and they share an edge segment
    /// of at least one cell.
    pub fn touches(&self, other: &Footprint) -> bool {
        if self.overlaps(other) {
            return false;
        }
        let y_shared = self.min.y <= other.max.y && other.min.y <= self.max.y;
        if !y_shared {
            return false;
        }
        let x_shared = self.min.x <= other.max.x && other.min.x <= self.max.x;
        let z_shared = self.min.z <= other.max.z && other.min.z <= self.max.z;
        let x_adjacent = self.max.x + 1 == other.min.x || other.max.x + 1 == self.min.x;
        let z_adjacent = self.max.z + 1 == other.min.z || other.max.z + 1 == self.min.z;
        (x_adjacent && z_shared) || (z_adjacent && x_shared)
    }

    /// Smallest footprint containing both.
    pub fn union(&self, other: &Footprint) -> Footprint {
        Footprint {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}
