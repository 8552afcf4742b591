//! Coverage and ROI evaluation for selected or hypothetical site sets.
//!
//! Every function here is pure over (snapshot, sites, estimator, config) —
//! the same standalone evaluator backs both the optimizer's result assembly
//! and the single-site `simulate_addition` use case.

use rustc_hash::FxHashMap;

use siteplan_core::{Economics, GeoPoint};
use siteplan_grid::DemandSnapshot;

use crate::travel::TravelTimeEstimator;

// ── Whole-set coverage ────────────────────────────────────────────────────────

/// Aggregate coverage of one site set against one snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageReport {
    /// Covered weighted demand ÷ total weighted demand, percent in
    /// `[0, 100]`.  0 when the snapshot has no demand or no site covers
    /// anything.
    pub coverage_percentage: f32,

    /// Demand-weighted mean travel time to the nearest site over covered
    /// cells, minutes.  0 when nothing is covered.
    pub avg_delivery_time_minutes: f32,

    /// Plain order count of covered cells.
    pub covered_orders: u32,

    /// Summed demand score of covered cells.
    pub covered_weight: f32,
}

/// Evaluate a site set: a cell is covered when its nearest site is within
/// `threshold` minutes.  An empty site set covers nothing.
pub fn evaluate_sites<T: TravelTimeEstimator>(
    snapshot: &DemandSnapshot,
    sites: &[GeoPoint],
    estimator: &T,
    threshold: f32,
) -> CoverageReport {
    let mut covered_weight = 0.0f32;
    let mut covered_orders = 0u32;
    let mut time_wsum = 0.0f32;

    for cell in snapshot.non_empty() {
        let nearest = sites
            .iter()
            .map(|&s| estimator.minutes(cell.centroid, s))
            .fold(f32::INFINITY, f32::min);
        if nearest <= threshold {
            covered_weight += cell.demand_score;
            covered_orders += cell.orders_count;
            time_wsum += cell.demand_score * nearest;
        }
    }

    let total_weight = snapshot.total_weight();
    CoverageReport {
        coverage_percentage: if total_weight > 0.0 {
            covered_weight / total_weight * 100.0
        } else {
            0.0
        },
        avg_delivery_time_minutes: if covered_weight > 0.0 { time_wsum / covered_weight } else { 0.0 },
        covered_orders,
        covered_weight,
    }
}

// ── Per-site attribution ──────────────────────────────────────────────────────

/// Accumulated contribution of one added site.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct SiteStats {
    pub weight: f32,
    pub orders: u32,
    pub value_sum: f32,
    pub time_wsum: f32,
}

/// Assign every covered cell to its nearest in-threshold site and collect
/// stats for the *added* sites (existing stores absorb their share but are
/// not reported).
///
/// Ties resolve to the earlier site, with existing stores scanned first —
/// an added site is only credited demand it serves primarily.
pub(crate) fn attribute_to_added<T: TravelTimeEstimator>(
    snapshot: &DemandSnapshot,
    existing: &[GeoPoint],
    added: &[GeoPoint],
    estimator: &T,
    threshold: f32,
) -> FxHashMap<usize, SiteStats> {
    let mut stats: FxHashMap<usize, SiteStats> = FxHashMap::default();

    for cell in snapshot.non_empty() {
        let mut winner: Option<usize> = None; // index into existing ++ added
        let mut best_t = f32::INFINITY;
        for (i, &site) in existing.iter().chain(added.iter()).enumerate() {
            let t = estimator.minutes(cell.centroid, site);
            if t <= threshold && t < best_t {
                best_t = t;
                winner = Some(i);
            }
        }

        if let Some(i) = winner {
            if i >= existing.len() {
                let entry = stats.entry(i - existing.len()).or_default();
                entry.weight += cell.demand_score;
                entry.orders += cell.orders_count;
                entry.value_sum += cell.total_value;
                entry.time_wsum += cell.demand_score * best_t;
            }
        }
    }

    stats
}

// ── ROI model ─────────────────────────────────────────────────────────────────

/// Area reachable within `minutes` at `speed_kmh`, km².
pub(crate) fn coverage_area_km2(speed_kmh: f32, minutes: f32) -> f32 {
    let radius_km = speed_kmh * minutes / 60.0;
    std::f32::consts::PI * radius_km * radius_km
}

/// Monthly revenue estimate and months-to-recover-setup-cost.
///
/// Orders are scaled to a 30-day month using the snapshot period length (a
/// degenerate period is treated as one month).  Returns `None` for the ROI
/// when monthly profit is non-positive — the "not computable" sentinel.
pub(crate) fn monthly_revenue_and_roi(
    orders_covered: u32,
    value_sum: f32,
    period_days: f32,
    econ: &Economics,
) -> (f32, Option<f32>) {
    if orders_covered == 0 {
        return (0.0, None);
    }

    let monthly_orders = if period_days > 0.0 {
        orders_covered as f32 * 30.0 / period_days
    } else {
        orders_covered as f32
    };
    let avg_value = if value_sum > 0.0 {
        value_sum / orders_covered as f32
    } else {
        econ.avg_order_value_fallback
    };

    let revenue = monthly_orders * avg_value * econ.conversion_rate;
    let profit = revenue * econ.profit_margin;
    let roi = (profit > 0.0).then(|| econ.setup_cost / profit);
    (revenue, roi)
}

// ── Single-site simulation ────────────────────────────────────────────────────

/// Outcome of hypothetically adding one store to the existing
/// configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    pub site: GeoPoint,

    /// Orders (plain count) in the cells the new site would serve as their
    /// nearest in-threshold facility.
    pub orders_covered: u32,

    /// Baseline mean delivery time minus post-addition mean, minutes.
    /// 0 when the baseline covers nothing (no improvement to measure).
    pub avg_delivery_time_improvement_minutes: f32,

    /// `monthly orders × avg order value × conversion rate`.
    pub estimated_monthly_revenue: f32,

    /// Months to recover the setup cost; `None` when monthly profit is
    /// non-positive.
    pub estimated_roi_months: Option<f32>,

    pub coverage_before_percentage: f32,
    pub coverage_after_percentage: f32,
}

/// Evaluate the existing stores, then existing + `site`, and report the
/// delta along with the new site's revenue/ROI estimates.
pub(crate) fn simulate<T: TravelTimeEstimator>(
    snapshot: &DemandSnapshot,
    existing: &[GeoPoint],
    site: GeoPoint,
    estimator: &T,
    threshold: f32,
    econ: &Economics,
) -> SimulationResult {
    let before = evaluate_sites(snapshot, existing, estimator, threshold);

    let mut after_sites = existing.to_vec();
    after_sites.push(site);
    let after = evaluate_sites(snapshot, &after_sites, estimator, threshold);

    let added = [site];
    let stats = attribute_to_added(snapshot, existing, &added, estimator, threshold);
    let served = stats.get(&0).copied().unwrap_or_default();

    let improvement = if before.covered_weight > 0.0 {
        before.avg_delivery_time_minutes - after.avg_delivery_time_minutes
    } else {
        0.0
    };

    let (revenue, roi) =
        monthly_revenue_and_roi(served.orders, served.value_sum, snapshot.period_days(), econ);

    SimulationResult {
        site,
        orders_covered: served.orders,
        avg_delivery_time_improvement_minutes: improvement,
        estimated_monthly_revenue: revenue,
        estimated_roi_months: roi,
        coverage_before_percentage: before.coverage_percentage,
        coverage_after_percentage: after.coverage_percentage,
    }
}
