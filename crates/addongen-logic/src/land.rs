//! The player's land: a starting plot plus every addon committed so far.
//!
//! `Land::expand` is the full pipeline for one addon: grow a cluster, place it
//! against everything already committed, then commit it. Nothing is committed
//! when any stage fails, so a failed expansion leaves the land untouched.
//!
//! ```
//! use addongen_logic::config::AddonConfig;
//! use addongen_logic::land::Land;
//! use rand::SeedableRng;
//!
//! let config = AddonConfig::default();
//! let mut land = Land::from_config(&config);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! land.expand_many(&config, 3, &mut rng).unwrap();
//! assert_eq!(land.addons().len(), 3);
//! ```

use glam::IVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{validate_config, AddonConfig};
use crate::error::AddonError;
use crate::footprint::Footprint;
use crate::grower::generate_cluster;
use crate::occupancy::SpatialHash;
use crate::placer::{place_cluster, Placement};

/// Starting plot plus committed addons, backed by a spatial hash.
#[derive(Debug, Clone)]
pub struct Land {
    plot: Footprint,
    occupied: SpatialHash,
    addons: Vec<Placement>,
}

/// Serializable view of a `Land`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandSnapshot {
    pub plot: Footprint,
    pub addons: Vec<Placement>,
    pub total_area: i64,
}

impl Land {
    /// Plot of `plot_size` centred on the origin, resting on y = 0.
    pub fn new(plot_size: IVec3, bucket_size: i32) -> Self {
        let min = IVec3::new(-(plot_size.x / 2), 0, -(plot_size.z / 2));
        let plot = Footprint::from_min_size(min, plot_size);
        let mut occupied = SpatialHash::new(bucket_size);
        occupied.insert(plot);
        Self {
            plot,
            occupied,
            addons: Vec::new(),
        }
    }

    pub fn from_config(config: &AddonConfig) -> Self {
        Self::new(config.start_plot_size, config.bucket_size)
    }

    pub fn plot(&self) -> &Footprint {
        &self.plot
    }

    pub fn occupied(&self) -> &SpatialHash {
        &self.occupied
    }

    pub fn addons(&self) -> &[Placement] {
        &self.addons
    }

    /// Plot area plus every addon's area.
    pub fn total_area(&self) -> i64 {
        self.plot.area()
            + self
                .addons
                .iter()
                .map(|a| a.cluster.total_area())
                .sum::<i64>()
    }

    /// Generate, place and commit one addon.
    pub fn expand<R: Rng + ?Sized>(
        &mut self,
        config: &AddonConfig,
        rng: &mut R,
    ) -> Result<&Placement, AddonError> {
        let errors = validate_config(config);
        if !errors.is_empty() {
            return Err(AddonError::InvalidConfig(errors));
        }

        let cluster = generate_cluster(&config.growth, rng)?;
        let placement = match place_cluster(&cluster, &self.occupied, &config.placement, rng) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Addon #{} could not be placed: {}", self.addons.len(), e);
                return Err(e);
            }
        };

        self.occupied.commit(&placement.cluster);
        log::info!(
            "Addon #{} committed: {} footprints, area {}, offset {}",
            self.addons.len(),
            placement.cluster.len(),
            placement.cluster.total_area(),
            placement.offset
        );
        self.addons.push(placement);
        Ok(&self.addons[self.addons.len() - 1])
    }

    /// Expand `count` times, stopping at the first failure. Returns how many
    /// addons were committed.
    pub fn expand_many<R: Rng + ?Sized>(
        &mut self,
        config: &AddonConfig,
        count: usize,
        rng: &mut R,
    ) -> Result<usize, AddonError> {
        for _ in 0..count {
            self.expand(config, rng)?;
        }
        Ok(count)
    }

    pub fn snapshot(&self) -> LandSnapshot {
        LandSnapshot {
            plot: self.plot,
            addons: self.addons.clone(),
            total_area: self.total_area(),
        }
    }
}
