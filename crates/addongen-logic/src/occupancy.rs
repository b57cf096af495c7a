//! Overlap queries against previously committed geometry.
//!
//! Placement only needs to ask "does this footprint hit anything already on
//! the map?". `OccupiedIndex` is that question; `SpatialHash` is the bucketed
//! implementation `Land` commits into. Plain slices also implement it, which
//! keeps tests and small callers simple.

use std::collections::HashMap;

use glam::IVec3;

use crate::cluster::Cluster;
use crate::footprint::Footprint;

/// Query surface over committed geometry.
pub trait OccupiedIndex {
    /// Does `footprint` overlap any committed footprint?
    fn overlaps(&self, footprint: &Footprint) -> bool;

    /// Does `footprint` overlap any footprint in `others`?
    fn overlaps_any(&self, footprint: &Footprint, others: &[Footprint]) -> bool {
        others.iter().any(|o| o.overlaps(footprint))
    }
}

impl OccupiedIndex for [Footprint] {
    fn overlaps(&self, footprint: &Footprint) -> bool {
        self.iter().any(|o| o.overlaps(footprint))
    }
}

impl OccupiedIndex for Vec<Footprint> {
    fn overlaps(&self, footprint: &Footprint) -> bool {
        self.as_slice().overlaps(footprint)
    }
}

impl OccupiedIndex for Cluster {
    fn overlaps(&self, footprint: &Footprint) -> bool {
        Cluster::overlaps(self, footprint)
    }
}

/// Default bucket edge length in cells.
pub const DEFAULT_BUCKET_SIZE: i32 = 16;

/// Bucketed index of committed footprints in the x/z plane.
///
/// Footprints live in an arena; each bucket stores the arena indices of the
/// footprints that reach into it.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    bucket_size: i32,
    footprints: Vec<Footprint>,
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl Default for SpatialHash {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_SIZE)
    }
}

impl SpatialHash {
    pub fn new(bucket_size: i32) -> Self {
        Self {
            bucket_size: bucket_size.max(1),
            footprints: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    pub fn bucket_size(&self) -> i32 {
        self.bucket_size
    }

    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Footprint> {
        self.footprints.iter()
    }

    /// Commit one footprint, returning its arena index.
    pub fn insert(&mut self, footprint: Footprint) -> usize {
        let index = self.footprints.len();
        self.footprints.push(footprint);
        let (lo, hi) = self.bucket_span(&footprint);
        for bx in lo.x..=hi.x {
            for bz in lo.z..=hi.z {
                self.buckets.entry((bx, bz)).or_default().push(index);
            }
        }
        index
    }

    /// Commit every member of a placed cluster.
    pub fn commit(&mut self, cluster: &Cluster) {
        for cell in cluster {
            self.insert(*cell);
        }
    }

    fn bucket_span(&self, footprint: &Footprint) -> (IVec3, IVec3) {
        let b = self.bucket_size;
        let lo = IVec3::new(
            footprint.min.x.div_euclid(b),
            0,
            footprint.min.z.div_euclid(b),
        );
        let hi = IVec3::new(
            footprint.max.x.div_euclid(b),
            0,
            footprint.max.z.div_euclid(b),
        );
        (lo, hi)
    }
}

impl OccupiedIndex for SpatialHash {
    fn overlaps(&self, footprint: &Footprint) -> bool {
        let (lo, hi) = self.bucket_span(footprint);
        for bx in lo.x..=hi.x {
            for bz in lo.z..=hi.z {
                let Some(indices) = self.buckets.get(&(bx, bz)) else {
                    continue;
                };
                if indices
                    .iter()
                    .any(|&i| self.footprints[i].overlaps(footprint))
                {
                    return true;
                }
            }
        }
        false
    }
}
