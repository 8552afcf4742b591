//! delhi — end-to-end siteplan demo.
//!
//! Generates a synthetic quick-commerce workload over the Delhi NCR box
//! (10,000 orders across 90 days, clustered around six real hotspots with
//! lunch/evening peak hours), then runs the full pipeline: demand grid →
//! candidate generation → 3-store optimization → single-site simulation,
//! and exports the heatmap and candidate CSVs.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use rand::distributions::{Distribution, WeightedIndex};
use rand_distr::Normal;

use siteplan_core::{EngineConfig, EngineRng, Order, OrderId, Store, StoreId};
use siteplan_engine::{LocationEngine, OptimizeOptions};
use siteplan_grid::BoundingRegion;
use siteplan_output::CsvExporter;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const ORDER_COUNT: u32 = 10_000;
const PERIOD_DAYS: i64 = 90;
const PERIOD_START: i64 = 1_700_000_000; // fixed reference epoch
const CELL_SIZE_DEG: f32 = 0.05; // ~5 km cells
const NEW_STORES: usize = 3;

// Delhi NCR bounding box.
const LAT: (f32, f32) = (28.4, 28.9);
const LON: (f32, f32) = (76.9, 77.4);

/// Hotspots with higher order density: (lat, lon, weight, name).
const HOTSPOTS: [(f32, f32, f32, &str); 6] = [
    (28.7041, 77.1025, 3.0, "Connaught Place"),
    (28.6139, 77.2090, 2.5, "Nehru Place"),
    (28.5355, 77.3910, 2.0, "Noida"),
    (28.4595, 77.0266, 2.5, "Gurgaon"),
    (28.6692, 77.4538, 1.8, "Ghaziabad"),
    (28.7196, 77.0369, 2.0, "Rohini"),
];

/// Hour-of-day weights: low nights, morning rise, lunch and evening peaks.
const HOUR_WEIGHTS: [f32; 24] = [
    0.5, 0.5, 0.5, 0.5, 0.5, 0.8, // 0–5
    1.0, 1.5, 2.0, 2.5, 3.0, 4.0, // 6–11
    4.5, 4.0, 3.5, 3.0, 2.5, 2.0, // 12–17
    2.5, 4.0, 4.5, 4.0, 3.0, 1.5, // 18–23
];

// ── Synthetic workload ────────────────────────────────────────────────────────

/// Generate the order history: 70 % of orders cluster around a
/// weight-sampled hotspot with Gaussian noise, the rest spread uniformly.
fn generate_orders(rng: &mut EngineRng) -> Result<Vec<Order>> {
    let hotspot_dist = WeightedIndex::new(HOTSPOTS.iter().map(|h| h.2))?;
    let hour_dist = WeightedIndex::new(HOUR_WEIGHTS)?;
    let noise = Normal::new(0.0f32, 0.02)?;

    let mut orders = Vec::with_capacity(ORDER_COUNT as usize);
    for id in 0..ORDER_COUNT {
        let (lat, lon) = if rng.gen_bool(0.7) {
            let h = HOTSPOTS[hotspot_dist.sample(rng.inner())];
            (h.0 + noise.sample(rng.inner()), h.1 + noise.sample(rng.inner()))
        } else {
            (rng.gen_range(LAT.0..LAT.1), rng.gen_range(LON.0..LON.1))
        };

        let day = rng.gen_range(0..PERIOD_DAYS);
        let hour = hour_dist.sample(rng.inner()) as i64;
        let minute = rng.gen_range(0..60i64);
        let timestamp = PERIOD_START + day * 86_400 + hour * 3_600 + minute * 60;

        let mut order = Order::new(OrderId(id), timestamp, lat, lon)
            .with_value(rng.gen_range(200.0..3_000.0f32));
        order.items_count = Some(rng.gen_range(1..=15u16));
        orders.push(order);
    }
    Ok(orders)
}

fn existing_stores() -> Vec<Store> {
    [
        ("CP Store", 28.6315, 77.2167),
        ("Noida Store", 28.5355, 77.3910),
        ("Gurgaon Store", 28.4595, 77.0266),
        ("Rohini Store", 28.7196, 77.0369),
        ("East Delhi Store", 28.6692, 77.4538),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(name, lat, lon))| Store::new(StoreId(i as u32), name, lat, lon))
    .collect()
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== delhi — siteplan store-placement demo ===");
    println!("Orders: {ORDER_COUNT}  |  Days: {PERIOD_DAYS}  |  Seed: {SEED}");
    println!();

    // 1. Synthetic inputs.  The workload gets its own child stream so adding
    // more generation stages later never shifts existing draws.
    let mut root = EngineRng::new(SEED);
    let mut rng = root.child(1);
    let orders = generate_orders(&mut rng)?;
    let stores = existing_stores();
    println!("Generated {} orders, {} existing stores", orders.len(), stores.len());

    // 2. Demand grid.
    let engine = LocationEngine::new(EngineConfig::default());
    let region = BoundingRegion::new(LAT.0, LAT.1, LON.0, LON.1)?;
    let period_end = PERIOD_START + PERIOD_DAYS * 86_400;

    let t0 = Instant::now();
    let snapshot = engine.build_demand_grid(
        &orders, &stores, region, CELL_SIZE_DEG, PERIOD_START, period_end,
    )?;
    println!(
        "Demand grid: {}×{} cells, {} non-empty, {} orders bucketed ({} outside region)",
        snapshot.spec.rows(),
        snapshot.spec.cols(),
        snapshot.non_empty().count(),
        snapshot.total_orders,
        snapshot.orders_outside_region,
    );

    // 3. Optimization, at the configured default delivery threshold.
    let options = OptimizeOptions::new(NEW_STORES, engine.config().default_delivery_time_minutes);
    let result = engine.optimize_locations(&snapshot, &stores, &options)?;
    println!(
        "Optimization ({}): {:.1}% coverage, avg delivery {:.1} min, {:?} in {:.3} s",
        result.method,
        result.total_coverage_percentage,
        result.avg_delivery_time_minutes,
        result.termination,
        t0.elapsed().as_secs_f64(),
    );
    println!();

    // 4. Candidate table.
    println!(
        "{:<6} {:<22} {:<8} {:<8} {:<10} {:<10}",
        "Rank", "Location", "Score", "Orders", "AvgMin", "ROI (mo)"
    );
    println!("{}", "-".repeat(68));
    for (rank, c) in result.candidates.iter().enumerate() {
        println!(
            "{:<6} {:<22} {:<8.1} {:<8} {:<10.1} {:<10}",
            rank + 1,
            c.pos.to_string(),
            c.score,
            c.estimated_orders_covered,
            c.avg_delivery_time_minutes,
            c.roi_estimate_months
                .map(|m| format!("{m:.1}"))
                .unwrap_or_else(|| "n/a".into()),
        );
    }
    println!();

    // 5. What-if: simulate the top candidate on its own.
    if let Some(top) = result.candidates.first() {
        let sim = engine.simulate_addition(&snapshot, &stores, top.pos);
        println!("Simulated addition at {}:", sim.site);
        println!("  orders covered        : {}", sim.orders_covered);
        println!(
            "  coverage              : {:.1}% → {:.1}%",
            sim.coverage_before_percentage, sim.coverage_after_percentage
        );
        println!(
            "  avg time improvement  : {:.2} min",
            sim.avg_delivery_time_improvement_minutes
        );
        println!("  est. monthly revenue  : {:.0}", sim.estimated_monthly_revenue);
        println!(
            "  est. ROI              : {}",
            sim.estimated_roi_months
                .map(|m| format!("{m:.1} months"))
                .unwrap_or_else(|| "not computable".into()),
        );
        println!();
    }

    // 6. CSV export.
    std::fs::create_dir_all("output/delhi")?;
    let mut exporter = CsvExporter::new(Path::new("output/delhi"))?;
    let cell_rows = exporter.write_cells(&snapshot)?;
    let cand_rows = exporter.write_candidates(&result)?;
    exporter.finish()?;
    println!("Exported output/delhi: demand_cells.csv ({cell_rows} rows), candidates.csv ({cand_rows} rows)");

    Ok(())
}
