//! Pure addon generation logic.
//!
//! An addon is a connected cluster of rectangular footprints that extends the
//! player's land. This crate grows such clusters, finds a collision-free spot
//! for them next to existing land, and validates the result. Functions take
//! plain data and an explicit random source, so every run is reproducible from
//! a seed and nothing here depends on an engine or runtime.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cluster`] | Ordered footprint collection (index 0 is the seed) |
//! | [`config`] | Growth/placement tuning, JSON-friendly, with validation |
//! | [`direction`] | Four planar compass directions with left/right turns |
//! | [`error`] | `AddonError` for exhausted searches and bad config |
//! | [`footprint`] | Integer axis-aligned boxes with inclusive corners |
//! | [`grower`] | Cluster growth by attaching footprints to member faces |
//! | [`land`] | Starting plot + committed addons, the full pipeline |
//! | [`occupancy`] | `OccupiedIndex` query trait and `SpatialHash` |
//! | [`placer`] | Radial scan + axial compaction placement |
//! | [`validation`] | Overlap, connectivity, area and placement checks |

pub mod cluster;
pub mod config;
pub mod direction;
pub mod error;
pub mod footprint;
pub mod grower;
pub mod land;
pub mod occupancy;
pub mod placer;
pub mod validation;
