//! Greedy maximum-coverage site selection with pairwise-swap improvement.
//!
//! # Model
//!
//! A p-median-style maximum-coverage formulation: a cell is covered by a
//! site when the estimated travel time is within the request's threshold;
//! the objective is the summed demand score of covered cells.  Exact
//! p-median is NP-hard, so selection is greedy (which carries the standard
//! (1 − 1/e) approximation bound for submodular coverage) followed by a
//! bounded number of first-improvement pairwise-swap passes.
//!
//! # Anytime behavior
//!
//! The [`CancelToken`] is checked between greedy rounds and between swap
//! passes.  On cancellation the partial selection is returned as-is and the
//! result is flagged [`Termination::Cancelled`] — coverage achieved so far
//! is never discarded.

use siteplan_core::GeoPoint;
use siteplan_grid::DemandSnapshot;

use crate::cancel::CancelToken;
use crate::travel::TravelTimeEstimator;

/// Reported optimization method, in the result for observability.
pub(crate) const METHOD: &str = "weighted k-means + greedy max-coverage";

// ── Request & result types ────────────────────────────────────────────────────

/// Parameters of one `optimize_locations` run.
#[derive(Clone, Debug)]
pub struct OptimizeOptions {
    /// Number of new stores to place.  Must not exceed the candidate pool.
    pub num_stores: usize,

    /// Coverage threshold: a cell counts as covered when its estimated
    /// travel time to the nearest site is within this many minutes.
    pub max_delivery_time_minutes: f32,

    /// Treat existing active stores as already-placed "free" facilities.
    /// Their coverage is part of the baseline and of the reported totals,
    /// but they consume none of the `num_stores` budget.
    pub use_existing_stores: bool,

    /// Cooperative cancellation/timeout signal.
    pub cancel: CancelToken,
}

impl OptimizeOptions {
    /// Options with existing stores in play and no cancellation.
    pub fn new(num_stores: usize, max_delivery_time_minutes: f32) -> Self {
        Self {
            num_stores,
            max_delivery_time_minutes,
            use_existing_stores: true,
            cancel: CancelToken::new(),
        }
    }
}

/// How the search loop ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// A full swap pass found no strictly improving swap.
    Converged,
    /// The swap-pass cap was reached while still improving.
    PassLimit,
    /// The cancel token fired; the result is the best solution so far and
    /// may contain fewer than `num_stores` candidates.
    Cancelled,
}

/// One proposed store site, with its evaluated contribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub pos: GeoPoint,

    /// Summed demand score of the cells this site serves (cells whose
    /// nearest covering site it is).  The ranking key.
    pub score: f32,

    /// Area reachable within the delivery-time threshold at the configured
    /// average speed, km².
    pub coverage_area_km2: f32,

    /// Orders (plain count) in the cells this site serves.
    pub estimated_orders_covered: u32,

    /// Demand-weighted mean travel time from this site to its served
    /// cells, minutes.
    pub avg_delivery_time_minutes: f32,

    /// Months to recover the setup cost; `None` when monthly profit is
    /// non-positive (not computable).
    pub roi_estimate_months: Option<f32>,
}

/// Output of one optimization run.  Read-only; ownership is the caller's.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult {
    /// Selected sites, sorted by descending individual contribution
    /// (`score`), ties broken by candidate index.
    pub candidates: Vec<Candidate>,

    /// Covered weighted demand ÷ total weighted demand, in percent, for
    /// the full site set (including existing stores when requested).
    pub total_coverage_percentage: f32,

    /// Demand-weighted mean travel time over covered cells, minutes.
    pub avg_delivery_time_minutes: f32,

    /// Human-readable algorithm identifier.
    pub method: String,

    pub termination: Termination,
}

// ── Coverage model ────────────────────────────────────────────────────────────

/// Precomputed coverage geometry for one run: travel times from every
/// candidate to every non-empty cell, plus the baseline coverage provided
/// by existing stores.
///
/// Empty cells never appear here — they carry zero weight and only matter
/// for the coverage denominator, which the evaluator takes from the
/// snapshot directly.
pub(crate) struct CoverageModel {
    /// Demand score per non-empty cell.
    weights: Vec<f32>,
    /// `travel[c][i]` = minutes from candidate `c` to non-empty cell `i`.
    travel: Vec<Vec<f32>>,
    /// Cells covered by existing stores before any candidate is placed.
    baseline: Vec<bool>,
    threshold: f32,
}

impl CoverageModel {
    pub fn build<T: TravelTimeEstimator>(
        snapshot: &DemandSnapshot,
        pool: &[GeoPoint],
        existing: &[GeoPoint],
        estimator: &T,
        threshold: f32,
    ) -> Self {
        let centroids: Vec<GeoPoint> = snapshot.non_empty().map(|c| c.centroid).collect();
        let weights: Vec<f32> = snapshot.non_empty().map(|c| c.demand_score).collect();

        let travel: Vec<Vec<f32>> = pool
            .iter()
            .map(|&site| centroids.iter().map(|&c| estimator.minutes(c, site)).collect())
            .collect();

        let baseline: Vec<bool> = centroids
            .iter()
            .map(|&c| existing.iter().any(|&s| estimator.minutes(c, s) <= threshold))
            .collect();

        Self { weights, travel, baseline, threshold }
    }

    pub fn pool_len(&self) -> usize {
        self.travel.len()
    }

    /// Weighted demand a candidate would add on top of `covered`.
    fn gain(&self, cand: usize, covered: &[bool]) -> f32 {
        let mut g = 0.0;
        for (i, &t) in self.travel[cand].iter().enumerate() {
            if !covered[i] && t <= self.threshold {
                g += self.weights[i];
            }
        }
        g
    }

    /// Mark every cell the candidate reaches as covered.
    fn cover_with(&self, cand: usize, covered: &mut [bool]) {
        for (i, &t) in self.travel[cand].iter().enumerate() {
            if t <= self.threshold {
                covered[i] = true;
            }
        }
    }

    /// Total weighted demand covered by the baseline plus `chosen`.
    pub fn covered_weight(&self, chosen: &[usize]) -> f32 {
        let mut total = 0.0;
        for i in 0..self.weights.len() {
            let covered = self.baseline[i]
                || chosen.iter().any(|&c| self.travel[c][i] <= self.threshold);
            if covered {
                total += self.weights[i];
            }
        }
        total
    }
}

// ── Greedy selection ──────────────────────────────────────────────────────────

/// Pick up to `num_stores` candidates by greedy maximum coverage.
///
/// Each round takes the candidate with the largest uncovered-demand gain;
/// ties (including all-zero gains on an empty snapshot) resolve to the
/// lowest candidate index.  Returns the chosen pool indices and whether the
/// run was cancelled mid-way.
pub(crate) fn greedy_select(
    model: &CoverageModel,
    num_stores: usize,
    cancel: &CancelToken,
) -> (Vec<usize>, bool) {
    let pool = model.pool_len();
    let mut covered = model.baseline.clone();
    let mut in_use = vec![false; pool];
    let mut chosen = Vec::with_capacity(num_stores);

    for _ in 0..num_stores {
        if cancel.is_cancelled() {
            return (chosen, true);
        }

        let mut best: Option<usize> = None;
        let mut best_gain = f32::MIN;
        for c in 0..pool {
            if in_use[c] {
                continue;
            }
            let gain = model.gain(c, &covered);
            if gain > best_gain {
                best_gain = gain;
                best = Some(c);
            }
        }

        let Some(c) = best else { break };
        in_use[c] = true;
        model.cover_with(c, &mut covered);
        chosen.push(c);
    }

    (chosen, false)
}

// ── Pairwise-swap local search ────────────────────────────────────────────────

/// First-improvement swap search: replace a chosen site with an unchosen
/// candidate whenever that strictly increases total covered weight.
///
/// Scanning order is fixed (chosen slot outer, pool index inner), so the
/// search is deterministic.  Total coverage is monotonically non-decreasing
/// throughout, so the result can never be worse than pure greedy.
pub(crate) fn improve_by_swaps(
    model: &CoverageModel,
    chosen: &mut [usize],
    max_passes: u32,
    cancel: &CancelToken,
) -> Termination {
    let pool = model.pool_len();
    let mut in_use = vec![false; pool];
    for &c in chosen.iter() {
        in_use[c] = true;
    }
    let mut current = model.covered_weight(chosen);

    for _ in 0..max_passes {
        if cancel.is_cancelled() {
            return Termination::Cancelled;
        }

        let mut improved = false;
        for slot in 0..chosen.len() {
            let orig = chosen[slot];
            for c in 0..pool {
                if in_use[c] {
                    continue;
                }
                chosen[slot] = c;
                let w = model.covered_weight(chosen);
                if w > current {
                    current = w;
                    in_use[orig] = false;
                    in_use[c] = true;
                    improved = true;
                    break;
                }
                chosen[slot] = orig;
            }
        }

        if !improved {
            return Termination::Converged;
        }
    }

    Termination::PassLimit
}
