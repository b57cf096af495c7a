//! Invariant checks for generated and placed clusters.
//!
//! Pure functions that take footprints and return validation errors. Used by
//! the tests and by the headless harness to sweep many seeds.

use std::collections::VecDeque;

use crate::cluster::Cluster;
use crate::config::GrowthConfig;
use crate::occupancy::OccupiedIndex;

/// A cluster validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Per-footprint ────────────────────────────────────────────────────

/// Check the seed and every grown footprint came from their size ranges.
pub fn check_footprint_sizes(cluster: &Cluster, config: &GrowthConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, f) in cluster.iter().enumerate() {
        let (range, which) = if i == 0 {
            (&config.seed_size, "seed")
        } else {
            (&config.step_size, "step")
        };
        if !range.contains(f.size()) {
            errors.push(ValidationError {
                category: "footprint_size",
                severity: Severity::Error,
                message: format!(
                    "Footprint #{} size {} outside {} range {}..={}",
                    i,
                    f.size(),
                    which,
                    range.min,
                    range.max
                ),
            });
        }
    }
    errors
}

// ── B. Pairwise ─────────────────────────────────────────────────────────

/// No two members may share a cell.
pub fn check_self_overlap(cluster: &Cluster) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let cells = cluster.cells();
    for i in 0..cells.len() {
        for j in (i + 1)..cells.len() {
            if cells[i].overlaps(&cells[j]) {
                errors.push(ValidationError {
                    category: "self_overlap",
                    severity: Severity::Error,
                    message: format!("Footprints #{} and #{} overlap", i, j),
                });
            }
        }
    }
    errors
}

// ── C. Connectivity ─────────────────────────────────────────────────────

/// Every member must be reachable from the seed through shared edges.
pub fn check_connectivity(cluster: &Cluster) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let cells = cluster.cells();
    if cells.len() <= 1 {
        return errors;
    }

    let adj: Vec<Vec<usize>> = (0..cells.len())
        .map(|i| {
            (0..cells.len())
                .filter(|&j| j != i && cells[i].touches(&cells[j]))
                .collect()
        })
        .collect();

    let mut visited = vec![false; cells.len()];
    let mut queue = VecDeque::new();
    visited[0] = true;
    queue.push_back(0);

    while let Some(current) = queue.pop_front() {
        for &next in &adj[current] {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }

    let unreached: Vec<usize> = (0..cells.len()).filter(|&i| !visited[i]).collect();
    if !unreached.is_empty() {
        errors.push(ValidationError {
            category: "connectivity",
            severity: Severity::Error,
            message: format!(
                "{} of {} footprints unreachable from the seed (e.g. #{})",
                unreached.len(),
                cells.len(),
                unreached[0]
            ),
        });
    }
    errors
}

// ── D. Area ─────────────────────────────────────────────────────────────

/// Area must reach the target without overshooting by more than one step.
pub fn check_min_area(cluster: &Cluster, config: &GrowthConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let area = cluster.total_area();
    if area < config.min_area {
        errors.push(ValidationError {
            category: "area",
            severity: Severity::Error,
            message: format!("Cluster area {} below target {}", area, config.min_area),
        });
    }
    let max_step = config
        .seed_size
        .max_area()
        .max(config.step_size.max_area());
    if area >= config.min_area + max_step {
        errors.push(ValidationError {
            category: "area",
            severity: Severity::Error,
            message: format!(
                "Cluster area {} overshoots target {} by a full step or more",
                area, config.min_area
            ),
        });
    }
    errors
}

// ── E. Placement ────────────────────────────────────────────────────────

/// No placed member may overlap committed geometry.
pub fn check_against_occupied<O: OccupiedIndex + ?Sized>(
    cluster: &Cluster,
    occupied: &O,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, f) in cluster.iter().enumerate() {
        if occupied.overlaps(f) {
            errors.push(ValidationError {
                category: "placement",
                severity: Severity::Error,
                message: format!(
                    "Footprint #{} at {}..={} overlaps occupied geometry",
                    i, f.min, f.max
                ),
            });
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run every shape check (sizes, overlap, connectivity, area).
pub fn validate_cluster(cluster: &Cluster, config: &GrowthConfig) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_footprint_sizes(cluster, config));
    all.extend(check_self_overlap(cluster));
    all.extend(check_connectivity(cluster));
    all.extend(check_min_area(cluster, config));
    all
}

/// Shape checks plus the placement check against `occupied`.
pub fn validate_placed<O: OccupiedIndex + ?Sized>(
    cluster: &Cluster,
    config: &GrowthConfig,
    occupied: &O,
) -> Vec<ValidationError> {
    let mut all = validate_cluster(cluster, config);
    all.extend(check_against_occupied(cluster, occupied));
    all
}

/// Only the entries with `Severity::Error`.
pub fn errors_only(results: &[ValidationError]) -> Vec<&ValidationError> {
    results
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}
