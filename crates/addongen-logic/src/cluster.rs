//! Ordered footprint clusters.
//!
//! A cluster is the unit produced by growth and consumed by placement. Members
//! are addressed by index; index 0 is always the seed footprint.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;

/// Ordered set of footprints, relative to an implicit local origin until placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    cells: Vec<Footprint>,
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: Vec<Footprint>) -> Self {
        Self { cells }
    }

    pub fn push(&mut self, cell: Footprint) {
        self.cells.push(cell);
    }

    pub fn cells(&self) -> &[Footprint] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Footprint> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Footprint> {
        self.cells.get(index)
    }

    pub fn seed(&self) -> Option<&Footprint> {
        self.cells.first()
    }

    /// Does `candidate` overlap any member?
    pub fn overlaps(&self, candidate: &Footprint) -> bool {
        self.cells.iter().any(|c| c.overlaps(candidate))
    }

    /// Sum of member floor areas. Members never overlap, so this is also the
    /// area of their union.
    pub fn total_area(&self) -> i64 {
        self.cells.iter().map(Footprint::area).sum()
    }

    /// Every member moved by the same delta, order preserved.
    pub fn translated(&self, delta: IVec3) -> Cluster {
        Cluster {
            cells: self.cells.iter().map(|c| c.translated(delta)).collect(),
        }
    }

    /// Bounding footprint of all members, `None` when empty.
    pub fn bounds(&self) -> Option<Footprint> {
        let mut it = self.cells.iter();
        let first = *it.next()?;
        Some(it.fold(first, |acc, c| acc.union(c)))
    }
}

impl std::ops::Index<usize> for Cluster {
    type Output = Footprint;

    fn index(&self, index: usize) -> &Footprint {
        &self.cells[index]
    }
}

impl<'a> IntoIterator for &'a Cluster {
    type Item = &'a Footprint;
    type IntoIter = std::slice::Iter<'a, Footprint>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
