//! Candidate-pool policy: how many candidates to generate, and what to do
//! in the degenerate cases.

use siteplan_core::{EngineConfig, EngineRng, GeoPoint};
use siteplan_grid::DemandSnapshot;

use crate::kmeans::{WeightedPoint, weighted_kmeans};

/// Pool size: `factor × requested`, never below the requested count, capped
/// by the number of available source points.
pub fn candidate_pool_size(num_stores: usize, factor: u32, available: usize) -> usize {
    num_stores
        .saturating_mul(factor as usize)
        .max(num_stores)
        .min(available)
}

/// Generate the candidate pool for one optimization run.
///
/// - Normal path: weighted k-means over non-empty cell centroids, weights =
///   demand score, pool size `candidate_pool_factor × num_stores` capped by
///   the non-empty cell count.
/// - Fewer non-empty cells than the pool wants: one candidate per non-empty
///   cell, no clustering.
/// - All-empty snapshot: fall back to the raw grid-cell centroids so the
///   optimizer can still return (zero-score) sites instead of crashing.
///
/// Output order is deterministic for a fixed `config.seed`.
pub fn generate_candidates(
    snapshot: &DemandSnapshot,
    num_stores: usize,
    config: &EngineConfig,
) -> Vec<GeoPoint> {
    let points: Vec<WeightedPoint> = snapshot
        .non_empty()
        .map(|c| WeightedPoint { pos: c.centroid, weight: c.demand_score })
        .collect();

    if points.is_empty() {
        return snapshot.cells.iter().map(|c| c.centroid).collect();
    }

    let k = candidate_pool_size(num_stores, config.candidate_pool_factor, points.len());
    if points.len() <= k {
        return points.iter().map(|p| p.pos).collect();
    }

    let mut rng = EngineRng::new(config.seed);
    weighted_kmeans(&points, k, config.max_kmeans_iters, &mut rng)
}
