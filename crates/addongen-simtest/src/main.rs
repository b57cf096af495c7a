//! Addon Generation Headless Harness
//!
//! Sweeps many seeds through cluster growth, placement and land expansion,
//! checking every invariant along the way. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p addongen-simtest
//!   cargo run -p addongen-simtest -- --verbose --seeds 500
//!   cargo run -p addongen-simtest -- --config my_config.json --dump
//!
//! Set `RUST_LOG=debug` to see per-addon generation logs.

use addongen_logic::config::{validate_config, AddonConfig};
use addongen_logic::error::AddonError;
use addongen_logic::footprint::Footprint;
use addongen_logic::grower::generate_cluster;
use addongen_logic::land::{Land, LandSnapshot};
use addongen_logic::occupancy::OccupiedIndex;
use addongen_logic::placer::place_cluster;
use addongen_logic::validation::{errors_only, validate_cluster, validate_placed};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Bundled config (same JSON the game ships) ───────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/addon_config.json");

const DEFAULT_SEEDS: u64 = 200;
const LAND_ADDONS: usize = 12;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Args {
    verbose: bool,
    dump: bool,
    seeds: u64,
    config_path: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        verbose: false,
        dump: false,
        seeds: DEFAULT_SEEDS,
        config_path: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--dump" => args.dump = true,
            "--seeds" => match it.next().map(|s| s.parse::<u64>()) {
                Some(Ok(n)) if n > 0 => args.seeds = n,
                _ => log::warn!("--seeds expects a positive integer, using {}", args.seeds),
            },
            "--config" => args.config_path = it.next(),
            other => log::warn!("Ignoring unknown argument {}", other),
        }
    }
    args
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = parse_args();
    println!("=== Addon Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Config
    let config = match load_config(args.config_path.as_deref(), &mut results) {
        Some(c) => c,
        None => {
            report(&results, args.verbose);
            std::process::exit(1);
        }
    };
    let base_seed = config.seed.unwrap_or(0);

    // 2. Growth sweep
    results.extend(validate_growth(&config, base_seed, args.seeds, args.verbose));

    // 3. Placement sweep
    results.extend(validate_placement(&config, base_seed, args.seeds, args.verbose));

    // 4. Determinism
    results.extend(validate_determinism(&config, base_seed));

    // 5. Land expansion
    let land = validate_land(&config, base_seed, &mut results);

    if args.dump {
        if let Some(land) = &land {
            match serde_json::to_string_pretty(&land.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Could not serialize land: {}", e),
            }
        }
    }

    if !report(&results, args.verbose) {
        std::process::exit(1);
    }
}

/// Print the summary; returns true when everything passed.
fn report(results: &[TestResult], verbose: bool) -> bool {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    failed == 0
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn load_config(path: Option<&str>, results: &mut Vec<TestResult>) -> Option<AddonConfig> {
    println!("--- Config ---");
    let (source, text) = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(t) => (p.to_string(), t),
            Err(e) => {
                results.push(TestResult {
                    name: "config_read".into(),
                    passed: false,
                    detail: format!("{}: {}", p, e),
                });
                return None;
            }
        },
        None => ("bundled".to_string(), CONFIG_JSON.to_string()),
    };

    let config: AddonConfig = match serde_json::from_str(&text) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("JSON parse error in {}: {}", source, e),
            });
            return None;
        }
    };

    let errors = validate_config(&config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!("{} config valid", source)
        } else {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });
    if !errors.is_empty() {
        return None;
    }
    Some(config)
}

// ── 2. Growth ───────────────────────────────────────────────────────────

fn validate_growth(
    config: &AddonConfig,
    base_seed: u64,
    seeds: u64,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Growth ---");
    let mut results = Vec::new();

    let mut failures = 0u64;
    let mut shape_errors = 0usize;
    let mut min_members = usize::MAX;
    let mut max_members = 0usize;
    let mut max_area = 0i64;

    for s in 0..seeds {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(s));
        match generate_cluster(&config.growth, &mut rng) {
            Ok(cluster) => {
                let errs = validate_cluster(&cluster, &config.growth);
                if verbose {
                    for e in &errs {
                        println!("    seed {}: [{}] {}", s, e.category, e.message);
                    }
                }
                shape_errors += errors_only(&errs).len();
                min_members = min_members.min(cluster.len());
                max_members = max_members.max(cluster.len());
                max_area = max_area.max(cluster.total_area());
            }
            Err(e) => {
                failures += 1;
                log::warn!("seed {}: {}", s, e);
            }
        }
    }

    results.push(TestResult {
        name: "growth_completes".into(),
        passed: failures == 0,
        detail: format!("{}/{} seeds grew a cluster", seeds - failures, seeds),
    });
    results.push(TestResult {
        name: "growth_invariants".into(),
        passed: shape_errors == 0,
        detail: format!(
            "{} errors; {}–{} footprints, max area {} (target {})",
            shape_errors,
            if min_members == usize::MAX { 0 } else { min_members },
            max_members,
            max_area,
            config.growth.min_area
        ),
    });

    results
}

// ── 3. Placement ────────────────────────────────────────────────────────

fn validate_placement(
    config: &AddonConfig,
    base_seed: u64,
    seeds: u64,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Placement ---");
    let mut results = Vec::new();

    // Occupied set: a land with a few addons already committed.
    let mut land = Land::from_config(config);
    let mut rng = StdRng::seed_from_u64(base_seed);
    if let Err(e) = land.expand_many(config, 4, &mut rng) {
        results.push(TestResult {
            name: "placement_setup".into(),
            passed: false,
            detail: format!("could not build occupied land: {}", e),
        });
        return results;
    }
    let committed: Vec<Footprint> = land.occupied().iter().copied().collect();

    let mut collisions = 0usize;
    let mut regressions = 0usize;
    let mut exhausted = 0u64;
    let mut total_pull = 0i64;

    for s in 0..seeds {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(10_000 + s));
        let cluster = match generate_cluster(&config.growth, &mut rng) {
            Ok(c) => c,
            Err(_) => continue,
        };
        match place_cluster(&cluster, land.occupied(), &config.placement, &mut rng) {
            Ok(placement) => {
                let errs = validate_placed(&placement.cluster, &config.growth, &committed);
                if verbose {
                    for e in &errs {
                        println!(
                            "    seed {} offset {}: [{}] {}",
                            s, placement.offset, e.category, e.message
                        );
                    }
                }
                collisions += errs.iter().filter(|e| e.category == "placement").count();
                // Hash answers must agree with the brute-force list.
                collisions += placement
                    .cluster
                    .iter()
                    .filter(|f| land.occupied().overlaps(f) != committed.overlaps(f))
                    .count();
                let before = placement.scan_offset.x.abs() + placement.scan_offset.z.abs();
                let after = placement.offset.x.abs() + placement.offset.z.abs();
                if after > before {
                    regressions += 1;
                }
                total_pull += (before - after) as i64;
            }
            Err(e) => {
                exhausted += 1;
                log::warn!("seed {}: {}", s, e);
            }
        }
    }

    results.push(TestResult {
        name: "placement_no_collision".into(),
        passed: collisions == 0,
        detail: format!(
            "{} collisions against {} committed footprints",
            collisions,
            committed.len()
        ),
    });
    results.push(TestResult {
        name: "placement_compaction_monotone".into(),
        passed: regressions == 0,
        detail: format!(
            "{} regressions, average pull {:.2} cells",
            regressions,
            total_pull as f64 / seeds as f64
        ),
    });
    results.push(TestResult {
        name: "placement_scan_terminates".into(),
        passed: exhausted == 0,
        detail: format!("{} scans exhausted", exhausted),
    });

    results
}

// ── 4. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(config: &AddonConfig, base_seed: u64) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let run = || -> Result<LandSnapshot, AddonError> {
        let mut land = Land::from_config(config);
        let mut rng = StdRng::seed_from_u64(base_seed);
        land.expand_many(config, 5, &mut rng)?;
        Ok(land.snapshot())
    };
    let result = match (run(), run()) {
        (Ok(a), Ok(b)) => TestResult {
            name: "determinism_fixed_seed".into(),
            passed: a.addons == b.addons,
            detail: format!("{} addons reproduced", a.addons.len()),
        },
        (Err(e), _) | (_, Err(e)) => TestResult {
            name: "determinism_fixed_seed".into(),
            passed: false,
            detail: format!("expansion failed: {}", e),
        },
    };
    vec![result]
}

// ── 5. Land ─────────────────────────────────────────────────────────────

fn validate_land(
    config: &AddonConfig,
    base_seed: u64,
    results: &mut Vec<TestResult>,
) -> Option<Land> {
    println!("--- Land ---");
    let mut land = Land::from_config(config);
    let mut rng = StdRng::seed_from_u64(base_seed);

    if let Err(e) = land.expand_many(config, LAND_ADDONS, &mut rng) {
        results.push(TestResult {
            name: "land_expansion".into(),
            passed: false,
            detail: format!("stopped after {} addons: {}", land.addons().len(), e),
        });
        return None;
    }

    let all: Vec<Footprint> = land.occupied().iter().copied().collect();
    let mut overlaps = 0usize;
    for i in 0..all.len() {
        for j in (i + 1)..all.len() {
            if all[i].overlaps(&all[j]) {
                overlaps += 1;
            }
        }
    }

    results.push(TestResult {
        name: "land_expansion".into(),
        passed: land.addons().len() == LAND_ADDONS,
        detail: format!(
            "{} addons, total area {}",
            land.addons().len(),
            land.total_area()
        ),
    });
    results.push(TestResult {
        name: "land_disjoint".into(),
        passed: overlaps == 0,
        detail: format!(
            "{} overlapping pairs among {} footprints",
            overlaps,
            all.len()
        ),
    });

    Some(land)
}
