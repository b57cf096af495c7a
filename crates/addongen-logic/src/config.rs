//! Generation and placement parameters.
//!
//! Every knob the grower and placer read lives here as plain serde data with
//! defaults matching the shipped game tuning. `validate_config` reports every
//! problem at once instead of stopping at the first one.
//!
//! ```
//! use addongen_logic::config::{validate_config, AddonConfig};
//!
//! let config = AddonConfig::default();
//! assert!(validate_config(&config).is_empty());
//! ```

use glam::IVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive per-axis size range. Each axis is sampled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: IVec3,
    pub max: IVec3,
}

impl SizeRange {
    pub fn new(min: IVec3, max: IVec3) -> Self {
        Self { min, max }
    }

    /// Uniform draw per axis from `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> IVec3 {
        IVec3::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
            rng.gen_range(self.min.z..=self.max.z),
        )
    }

    pub fn contains(&self, size: IVec3) -> bool {
        size.cmpge(self.min).all() && size.cmple(self.max).all()
    }

    /// Largest floor area a footprint drawn from this range can have.
    pub fn max_area(&self) -> i64 {
        self.max.x as i64 * self.max.z as i64
    }

    /// Smallest floor area a footprint drawn from this range can have.
    pub fn min_area(&self) -> i64 {
        self.min.x as i64 * self.min.z as i64
    }
}

/// Cluster growth tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Size range of the first footprint.
    pub seed_size: SizeRange,
    /// Size range of every footprint attached after the seed.
    pub step_size: SizeRange,
    /// Growth stops once the summed floor area reaches this.
    pub min_area: i64,
    /// Candidates tried per member and direction before moving on.
    pub attempts_per_direction: u32,
    /// Consecutive fruitless sweeps over every member before giving up.
    pub max_failed_sweeps: u32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            seed_size: SizeRange::new(IVec3::new(7, 1, 7), IVec3::new(10, 1, 10)),
            step_size: SizeRange::new(IVec3::new(4, 1, 4), IVec3::new(7, 1, 7)),
            min_area: 150,
            attempts_per_direction: 10,
            max_failed_sweeps: 16,
        }
    }
}

/// Cluster placement tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Steps per axis compaction attempt before it is abandoned.
    pub compaction_step_cap: u32,
    /// Radial scan gives up after this many line steps.
    pub max_scan_steps: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            compaction_step_cap: 20,
            max_scan_steps: 4096,
        }
    }
}

/// Everything `Land` needs to grow a player's plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    pub growth: GrowthConfig,
    pub placement: PlacementConfig,
    /// Size of the starting plot, centred on the origin.
    pub start_plot_size: IVec3,
    /// Bucket edge length of the occupied-cell hash.
    pub bucket_size: i32,
    /// Random seed (None = random).
    pub seed: Option<u64>,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            growth: GrowthConfig::default(),
            placement: PlacementConfig::default(),
            start_plot_size: IVec3::new(12, 1, 12),
            bucket_size: crate::occupancy::DEFAULT_BUCKET_SIZE,
            seed: None,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A size range has an axis below one cell.
    NonPositiveSize(&'static str),
    /// A size range has min > max on some axis.
    InvertedRange(&'static str),
    /// Target area must be positive.
    NonPositiveMinArea(i64),
    /// At least one attempt per direction is required.
    ZeroAttempts,
    /// At least one sweep is required.
    ZeroSweeps,
    /// The radial scan needs at least one step.
    ZeroScanSteps,
    /// Hash buckets must be at least one cell wide.
    NonPositiveBucketSize(i32),
    /// Starting plot has an axis below one cell.
    NonPositivePlot,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveSize(which) => {
                write!(f, "{} range has an axis below one cell", which)
            }
            ConfigError::InvertedRange(which) => write!(f, "{} range has min > max", which),
            ConfigError::NonPositiveMinArea(a) => write!(f, "min_area must be positive, got {}", a),
            ConfigError::ZeroAttempts => write!(f, "attempts_per_direction must be at least 1"),
            ConfigError::ZeroSweeps => write!(f, "max_failed_sweeps must be at least 1"),
            ConfigError::ZeroScanSteps => write!(f, "max_scan_steps must be at least 1"),
            ConfigError::NonPositiveBucketSize(b) => {
                write!(f, "bucket_size must be positive, got {}", b)
            }
            ConfigError::NonPositivePlot => write!(f, "start plot has an axis below one cell"),
        }
    }
}

fn check_range(range: &SizeRange, which: &'static str, errors: &mut Vec<ConfigError>) {
    if range.min.cmplt(IVec3::ONE).any() {
        errors.push(ConfigError::NonPositiveSize(which));
    }
    if range.min.cmpgt(range.max).any() {
        errors.push(ConfigError::InvertedRange(which));
    }
}

/// Size ranges that cannot be sampled (empty or below one cell).
pub fn validate_size_ranges(growth: &GrowthConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    check_range(&growth.seed_size, "seed_size", &mut errors);
    check_range(&growth.step_size, "step_size", &mut errors);
    errors
}

/// Placement settings the scan cannot run with.
pub fn validate_placement(placement: &PlacementConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if placement.max_scan_steps == 0 {
        errors.push(ConfigError::ZeroScanSteps);
    }
    errors
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &AddonConfig) -> Vec<ConfigError> {
    let growth = &config.growth;
    let mut errors = validate_size_ranges(growth);

    if growth.min_area <= 0 {
        errors.push(ConfigError::NonPositiveMinArea(growth.min_area));
    }
    if growth.attempts_per_direction == 0 {
        errors.push(ConfigError::ZeroAttempts);
    }
    if growth.max_failed_sweeps == 0 {
        errors.push(ConfigError::ZeroSweeps);
    }
    errors.extend(validate_placement(&config.placement));
    if config.bucket_size <= 0 {
        errors.push(ConfigError::NonPositiveBucketSize(config.bucket_size));
    }
    if config.start_plot_size.cmplt(IVec3::ONE).any() {
        errors.push(ConfigError::NonPositivePlot);
    }

    errors
}
