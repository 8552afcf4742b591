//! The `LocationEngine` facade.
//!
//! One value owns the configuration and the travel-time capability; the
//! three public operations are otherwise stateless — snapshots in, results
//! out, nothing persisted and no ambient state touched.  Independent calls
//! may run concurrently on one shared engine.

use siteplan_cluster::generate_candidates;
use siteplan_core::{EngineConfig, GeoPoint, Order, Store, active_positions};
use siteplan_grid::{BoundingRegion, DemandSnapshot, GridResult, build_demand_snapshot};

use crate::error::{OptimizeError, OptimizeResult};
use crate::evaluate::{
    SimulationResult, attribute_to_added, coverage_area_km2, evaluate_sites,
    monthly_revenue_and_roi, simulate,
};
use crate::optimize::{
    Candidate, CoverageModel, METHOD, OptimizationResult, OptimizeOptions, Termination,
    greedy_select, improve_by_swaps,
};
use crate::travel::{HaversineEstimator, TravelTimeEstimator};

/// The store-placement engine: demand aggregation, site optimization, and
/// what-if simulation over plain input snapshots.
///
/// Generic over the travel-time source; [`new`](Self::new) wires in the
/// haversine fallback at the configured average speed.
pub struct LocationEngine<T: TravelTimeEstimator = HaversineEstimator> {
    config: EngineConfig,
    travel: T,
}

impl LocationEngine<HaversineEstimator> {
    /// Engine with the built-in haversine/average-speed estimator.
    pub fn new(config: EngineConfig) -> Self {
        let travel = HaversineEstimator::new(config.avg_speed_kmh);
        Self { config, travel }
    }
}

impl<T: TravelTimeEstimator> LocationEngine<T> {
    /// Engine with an injected travel-time provider (e.g. a routing API
    /// adapter).
    pub fn with_estimator(config: EngineConfig, travel: T) -> Self {
        Self { config, travel }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Operation 1: demand aggregation ───────────────────────────────────

    /// Build a scored demand snapshot from raw order and store snapshots.
    ///
    /// Fails only on degenerate geometry (`GridError::InvalidRegion`); an
    /// order-free period yields a valid all-empty snapshot.
    pub fn build_demand_grid(
        &self,
        orders: &[Order],
        stores: &[Store],
        region: BoundingRegion,
        cell_size_deg: f32,
        period_start_unix_secs: i64,
        period_end_unix_secs: i64,
    ) -> GridResult<DemandSnapshot> {
        build_demand_snapshot(
            orders,
            stores,
            region,
            cell_size_deg,
            period_start_unix_secs,
            period_end_unix_secs,
            &self.config,
        )
    }

    // ── Operation 2: site optimization ────────────────────────────────────

    /// Select `options.num_stores` new sites maximizing covered weighted
    /// demand within the delivery-time threshold.
    ///
    /// Pipeline: candidate generation (seeded weighted k-means) → greedy
    /// maximum coverage → pairwise-swap improvement → per-site evaluation.
    /// On cancellation the best partial solution comes back flagged
    /// [`Termination::Cancelled`].
    pub fn optimize_locations(
        &self,
        snapshot: &DemandSnapshot,
        stores: &[Store],
        options: &OptimizeOptions,
    ) -> OptimizeResult<OptimizationResult> {
        let pool = generate_candidates(snapshot, options.num_stores, &self.config);
        if options.num_stores > pool.len() {
            return Err(OptimizeError::Infeasible {
                requested: options.num_stores,
                available: pool.len(),
            });
        }

        let existing = if options.use_existing_stores {
            active_positions(stores)
        } else {
            Vec::new()
        };

        let model = CoverageModel::build(
            snapshot,
            &pool,
            &existing,
            &self.travel,
            options.max_delivery_time_minutes,
        );

        let (mut chosen, cancelled) = greedy_select(&model, options.num_stores, &options.cancel);
        let termination = if cancelled {
            Termination::Cancelled
        } else {
            improve_by_swaps(&model, &mut chosen, self.config.swap_passes, &options.cancel)
        };

        Ok(self.assemble_result(snapshot, &pool, &existing, &chosen, options, termination))
    }

    /// Evaluate the final selection and package it as an
    /// `OptimizationResult`.
    fn assemble_result(
        &self,
        snapshot: &DemandSnapshot,
        pool: &[GeoPoint],
        existing: &[GeoPoint],
        chosen: &[usize],
        options: &OptimizeOptions,
        termination: Termination,
    ) -> OptimizationResult {
        let threshold = options.max_delivery_time_minutes;
        let chosen_pos: Vec<GeoPoint> = chosen.iter().map(|&c| pool[c]).collect();

        // Whole-set metrics over existing + chosen.
        let mut all_sites = existing.to_vec();
        all_sites.extend_from_slice(&chosen_pos);
        let report = evaluate_sites(snapshot, &all_sites, &self.travel, threshold);

        // Per-candidate contribution: cells whose nearest in-threshold site
        // is that candidate.
        let stats = attribute_to_added(snapshot, existing, &chosen_pos, &self.travel, threshold);
        let area = coverage_area_km2(self.config.avg_speed_kmh, threshold);
        let period_days = snapshot.period_days();

        let mut ranked: Vec<(usize, Candidate)> = chosen
            .iter()
            .enumerate()
            .map(|(slot, &pool_idx)| {
                let s = stats.get(&slot).copied().unwrap_or_default();
                let (_, roi) = monthly_revenue_and_roi(
                    s.orders,
                    s.value_sum,
                    period_days,
                    &self.config.economics,
                );
                let candidate = Candidate {
                    pos: chosen_pos[slot],
                    score: s.weight,
                    coverage_area_km2: area,
                    estimated_orders_covered: s.orders,
                    avg_delivery_time_minutes: if s.weight > 0.0 {
                        s.time_wsum / s.weight
                    } else {
                        0.0
                    },
                    roi_estimate_months: roi,
                };
                (pool_idx, candidate)
            })
            .collect();

        // Descending contribution; candidate (pool) index breaks ties.
        ranked.sort_by(|a, b| b.1.score.total_cmp(&a.1.score).then(a.0.cmp(&b.0)));

        OptimizationResult {
            candidates: ranked.into_iter().map(|(_, c)| c).collect(),
            total_coverage_percentage: report.coverage_percentage,
            avg_delivery_time_minutes: report.avg_delivery_time_minutes,
            method: METHOD.to_string(),
            termination,
        }
    }

    // ── Operation 3: single-site simulation ───────────────────────────────

    /// What-if analysis: add one hypothetical store to the existing active
    /// configuration and report coverage delta, revenue, and ROI.  Uses the
    /// configured default delivery-time threshold.
    pub fn simulate_addition(
        &self,
        snapshot: &DemandSnapshot,
        stores: &[Store],
        site: GeoPoint,
    ) -> SimulationResult {
        let existing = active_positions(stores);
        simulate(
            snapshot,
            &existing,
            site,
            &self.travel,
            self.config.default_delivery_time_minutes,
            &self.config.economics,
        )
    }
}
