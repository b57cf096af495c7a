//! Cluster placement.
//!
//! Two phases turn a relative cluster into an absolute one:
//!
//! 1. **Radial scan**: pick a random heading and walk a discrete line out of
//!    the origin until every member, shifted by the current point, is clear of
//!    the occupied geometry.
//! 2. **Axial compaction**: from that offset, repeatedly try to pull the x
//!    and then the z component one cell at a time back toward zero while the
//!    cluster stays clear. Stops when a full pass moves neither axis.
//!
//! Only the x/z components of an offset are ever non-zero.

use std::f32::consts::TAU;

use glam::{IVec3, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::config::{validate_placement, PlacementConfig};
use crate::error::AddonError;
use crate::occupancy::OccupiedIndex;

/// Result of placing a cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Absolute footprints, same order as the input cluster.
    pub cluster: Cluster,
    /// Offset found by the radial scan.
    pub scan_offset: IVec3,
    /// Offset after compaction (the one applied to `cluster`).
    pub offset: IVec3,
    /// Heading of the radial scan in radians.
    pub angle: f32,
}

/// Discrete line walk in the x/z plane, Bresenham style.
///
/// Yields the origin first, then one point per step. Each step advances the
/// dominant axis by one cell and the minor axis by at most one.
#[derive(Debug, Clone)]
pub struct LineTracer {
    current: IVec3,
    major_x: bool,
    step_x: i32,
    step_z: i32,
    slope: f64,
    error: f64,
    started: bool,
}

impl LineTracer {
    /// Walk along `dir` (x → x, y → z). A zero vector walks along +x.
    pub fn new(dir: Vec2) -> Self {
        let (dx, dz) = (dir.x as f64, dir.y as f64);
        let major_x = dx.abs() >= dz.abs();
        let (major, minor) = if major_x { (dx, dz) } else { (dz, dx) };
        let slope = if major == 0.0 {
            0.0
        } else {
            (minor / major).abs()
        };
        Self {
            current: IVec3::ZERO,
            major_x,
            step_x: if dx < 0.0 { -1 } else { 1 },
            step_z: if dz < 0.0 { -1 } else { 1 },
            slope,
            error: 0.0,
            started: false,
        }
    }

    pub fn from_angle(angle: f32) -> Self {
        Self::new(Vec2::from_angle(angle))
    }
}

impl Iterator for LineTracer {
    type Item = IVec3;

    fn next(&mut self) -> Option<IVec3> {
        if !self.started {
            self.started = true;
            return Some(self.current);
        }
        self.error += self.slope;
        let minor_step = self.error >= 0.5;
        if minor_step {
            self.error -= 1.0;
        }
        if self.major_x {
            self.current.x += self.step_x;
            if minor_step {
                self.current.z += self.step_z;
            }
        } else {
            self.current.z += self.step_z;
            if minor_step {
                self.current.x += self.step_x;
            }
        }
        Some(self.current)
    }
}

/// Uniform heading in `[0, 2π)`.
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..TAU)
}

/// True if every member shifted by `offset` is clear of `occupied`.
pub fn fits<O: OccupiedIndex + ?Sized>(cluster: &Cluster, occupied: &O, offset: IVec3) -> bool {
    cluster
        .iter()
        .all(|cell| !occupied.overlaps(&cell.translated(offset)))
}

/// Phase 1: first point along the heading where the cluster fits.
///
/// Tries the origin plus `max_steps` points beyond it.
pub fn radial_scan<O: OccupiedIndex + ?Sized>(
    cluster: &Cluster,
    occupied: &O,
    angle: f32,
    max_steps: u32,
) -> Result<IVec3, AddonError> {
    for (step, offset) in LineTracer::from_angle(angle)
        .take(max_steps as usize + 1)
        .enumerate()
    {
        if fits(cluster, occupied, offset) {
            log::trace!("Radial scan hit free offset {} after {} steps", offset, step);
            return Ok(offset);
        }
    }
    Err(AddonError::PlacementExhausted {
        angle,
        steps: max_steps,
    })
}

const COMPACTION_AXES: [usize; 2] = [0, 2];

/// Phase 2: pull `start` toward the origin one axis at a time.
///
/// Every returned offset is reachable from `start` through collision-free
/// single-cell moves, and its distance to the origin never exceeds that of
/// `start`.
pub fn compact<O: OccupiedIndex + ?Sized>(
    cluster: &Cluster,
    occupied: &O,
    start: IVec3,
    step_cap: u32,
) -> IVec3 {
    let mut offset = start;
    let mut passes = 0u32;
    loop {
        let mut moved = false;
        for axis in COMPACTION_AXES {
            moved |= compact_axis(cluster, occupied, &mut offset, axis, step_cap);
        }
        passes += 1;
        if !moved {
            break;
        }
    }
    log::trace!("Compacted {} -> {} in {} passes", start, offset, passes);
    offset
}

/// One axis attempt. Returns true if the axis value changed.
fn compact_axis<O: OccupiedIndex + ?Sized>(
    cluster: &Cluster,
    occupied: &O,
    offset: &mut IVec3,
    axis: usize,
    step_cap: u32,
) -> bool {
    let original = offset[axis];
    let mut steps = 0u32;
    while offset[axis] != 0 {
        if steps == step_cap {
            // Runaway guard: give up on this axis entirely.
            offset[axis] = original;
            break;
        }
        let mut trial = *offset;
        trial[axis] -= trial[axis].signum();
        if !fits(cluster, occupied, trial) {
            break;
        }
        *offset = trial;
        steps += 1;
    }
    offset[axis] != original
}

/// Find an absolute, collision-free position for `cluster`.
pub fn place_cluster<O: OccupiedIndex + ?Sized, R: Rng + ?Sized>(
    cluster: &Cluster,
    occupied: &O,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<Placement, AddonError> {
    let errors = validate_placement(config);
    if !errors.is_empty() {
        return Err(AddonError::InvalidConfig(errors));
    }

    let angle = random_angle(rng);
    let scan_offset = radial_scan(cluster, occupied, angle, config.max_scan_steps)?;
    let offset = compact(cluster, occupied, scan_offset, config.compaction_step_cap);

    log::debug!(
        "Placed {} footprints: heading {:.3} rad, scan {} -> final {}",
        cluster.len(),
        angle,
        scan_offset,
        offset
    );

    Ok(Placement {
        cluster: cluster.translated(offset),
        scan_offset,
        offset,
        angle,
    })
}
