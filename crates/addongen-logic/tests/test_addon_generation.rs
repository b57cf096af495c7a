//! Integration tests for the full addon pipeline.
//!
//! Exercises: AddonConfig → generate_cluster → place_cluster → Land commit
//!
//! All tests are pure logic with seeded random sources.

use glam::IVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use addongen_logic::cluster::Cluster;
use addongen_logic::config::{validate_config, AddonConfig, GrowthConfig, PlacementConfig};
use addongen_logic::footprint::Footprint;
use addongen_logic::grower::generate_cluster;
use addongen_logic::land::Land;
use addongen_logic::occupancy::OccupiedIndex;
use addongen_logic::placer::{compact, place_cluster, radial_scan, random_angle};
use addongen_logic::validation::{errors_only, validate_cluster, validate_placed};

const BUNDLED_CONFIG: &str = include_str!("../../../data/addon_config.json");

// ── Helpers ────────────────────────────────────────────────────────────

fn manhattan(v: IVec3) -> i32 {
    v.x.abs() + v.z.abs()
}

/// Land with a few committed addons, used as a realistic occupied set.
fn crowded_land(seed: u64, addons: usize) -> Land {
    let config = AddonConfig::default();
    let mut land = Land::from_config(&config);
    let mut rng = StdRng::seed_from_u64(seed);
    land.expand_many(&config, addons, &mut rng).unwrap();
    land
}

// ── Growth ─────────────────────────────────────────────────────────────

#[test]
fn bundled_config_is_valid() {
    let config: AddonConfig = serde_json::from_str(BUNDLED_CONFIG).unwrap();
    assert!(validate_config(&config).is_empty());
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.growth.step_size.max, IVec3::new(7, 1, 7));
}

#[test]
fn generated_clusters_pass_shape_checks() {
    for min_area in [50, 150, 400, 900] {
        let config = GrowthConfig {
            min_area,
            ..GrowthConfig::default()
        };
        for seed in 0..25 {
            let mut rng = StdRng::seed_from_u64(seed);
            let cluster = generate_cluster(&config, &mut rng).unwrap();
            let errs = validate_cluster(&cluster, &config);
            assert!(
                errs.is_empty(),
                "seed {} min_area {}: {:?}",
                seed,
                min_area,
                errs
            );
        }
    }
}

#[test]
fn non_square_steps_allowed() {
    let config = GrowthConfig {
        min_area: 800,
        ..GrowthConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(6);
    let cluster = generate_cluster(&config, &mut rng).unwrap();
    assert!(cluster.iter().any(|f| f.size().x != f.size().z));
}

#[test]
fn different_seeds_produce_variation() {
    let config = GrowthConfig::default();
    let mut distinct = std::collections::HashSet::new();
    for seed in 0..20 {
        let cluster = generate_cluster(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
        distinct.insert(cluster.cells().to_vec());
    }
    assert!(distinct.len() >= 10, "only {} distinct clusters", distinct.len());
}

// ── Placement ──────────────────────────────────────────────────────────

#[test]
fn placement_never_collides_with_existing_land() {
    let land = crowded_land(3, 6);
    let committed: Vec<Footprint> = land.occupied().iter().copied().collect();
    let growth = GrowthConfig::default();

    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(1000 + seed);
        let cluster = generate_cluster(&growth, &mut rng).unwrap();
        let placement =
            place_cluster(&cluster, land.occupied(), &PlacementConfig::default(), &mut rng)
                .unwrap();

        assert_eq!(placement.cluster.len(), cluster.len());
        for (placed, original) in placement.cluster.iter().zip(cluster.iter()) {
            assert_eq!(*placed, original.translated(placement.offset));
            assert!(!committed.overlaps(placed));
        }
        let errs = validate_placed(&placement.cluster, &growth, &committed);
        assert!(errors_only(&errs).is_empty(), "seed {}: {:?}", seed, errs);
    }
}

#[test]
fn compaction_never_moves_away_from_origin() {
    let land = crowded_land(5, 5);
    let growth = GrowthConfig::default();
    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let cluster = generate_cluster(&growth, &mut rng).unwrap();
        let placement =
            place_cluster(&cluster, land.occupied(), &PlacementConfig::default(), &mut rng)
                .unwrap();
        assert!(manhattan(placement.offset) <= manhattan(placement.scan_offset));
        assert_eq!(placement.offset.y, 0);
    }
}

#[test]
fn placement_matches_phase_functions() {
    let land = crowded_land(9, 4);
    let cluster = generate_cluster(&GrowthConfig::default(), &mut StdRng::seed_from_u64(1))
        .unwrap();
    let config = PlacementConfig::default();

    let placement =
        place_cluster(&cluster, land.occupied(), &config, &mut StdRng::seed_from_u64(77))
            .unwrap();

    let angle = random_angle(&mut StdRng::seed_from_u64(77));
    let scan = radial_scan(&cluster, land.occupied(), angle, config.max_scan_steps).unwrap();
    let offset = compact(&cluster, land.occupied(), scan, config.compaction_step_cap);
    assert_eq!(placement.scan_offset, scan);
    assert_eq!(placement.offset, offset);
}

#[test]
fn empty_occupied_set_keeps_cluster() {
    let cluster = generate_cluster(&GrowthConfig::default(), &mut StdRng::seed_from_u64(2))
        .unwrap();
    let occupied: Vec<Footprint> = Vec::new();
    let placement = place_cluster(
        &cluster,
        &occupied,
        &PlacementConfig::default(),
        &mut StdRng::seed_from_u64(2),
    )
    .unwrap();
    assert_eq!(placement.cluster, cluster);
    assert_eq!(placement.offset, IVec3::ZERO);
}

#[test]
fn blocked_seed_box_is_cleared() {
    let seed = Footprint::from_min_size(IVec3::ZERO, IVec3::new(8, 1, 8));
    let cluster = Cluster::from_cells(vec![seed]);
    let occupied = vec![seed];
    let placement = place_cluster(
        &cluster,
        &occupied,
        &PlacementConfig::default(),
        &mut StdRng::seed_from_u64(31),
    )
    .unwrap();
    assert!(!placement.cluster[0].overlaps(&seed));
    assert_ne!(placement.offset, IVec3::ZERO);
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn deterministic_output() {
    let config = AddonConfig::default();
    let run = || {
        let mut land = Land::from_config(&config);
        let mut rng = StdRng::seed_from_u64(123);
        land.expand_many(&config, 5, &mut rng).unwrap();
        land.snapshot()
    };
    let a = run();
    let b = run();
    assert_eq!(a.addons, b.addons);
    assert_eq!(a.total_area, b.total_area);
}

// ── Land ───────────────────────────────────────────────────────────────

#[test]
fn land_addons_stay_disjoint_over_many_expansions() {
    let land = crowded_land(21, 12);
    let all: Vec<Footprint> = land.occupied().iter().copied().collect();
    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            assert!(!all[i].overlaps(&all[j]), "#{} overlaps #{}", i, j);
        }
    }
    let addon_area: i64 = land.addons().iter().map(|a| a.cluster.total_area()).sum();
    assert_eq!(land.total_area(), land.plot().area() + addon_area);
}

#[test]
fn addons_compact_near_the_plot() {
    // Compaction pulls addons in, so a handful of them should stay within a
    // modest radius of the starting plot.
    let land = crowded_land(8, 4);
    for addon in land.addons() {
        assert!(
            manhattan(addon.offset) < 200,
            "addon drifted to {}",
            addon.offset
        );
    }
}
