//! Weighted k-means over geographic points.
//!
//! # Determinism
//!
//! Both the k-means++ seeding draws and every tie-break (nearest-centroid
//! assignment, empty-cluster re-seeding) resolve to the lowest index, so a
//! fixed RNG seed produces the same centroids on every run.  Distances are
//! squared lat/lon degrees — only the ordering matters here, and the
//! ordering error vs. great-circle distance is negligible at city scale.

use siteplan_core::{EngineRng, GeoPoint};

/// A cell centroid with its demand weight.
#[derive(Copy, Clone, Debug)]
pub struct WeightedPoint {
    pub pos: GeoPoint,
    pub weight: f32,
}

/// Stop iterating once no centroid moved more than this many degrees.
const CONVERGENCE_EPS_DEG: f32 = 1e-6;

/// Run weighted k-means and return `k` centroids.
///
/// Callers must guarantee `1 <= k <= points.len()`; the degenerate
/// fewer-points-than-clusters case is handled upstream by returning the
/// points themselves.
pub fn weighted_kmeans(
    points: &[WeightedPoint],
    k: usize,
    max_iters: u32,
    rng: &mut EngineRng,
) -> Vec<GeoPoint> {
    debug_assert!(k >= 1 && k <= points.len());

    let mut centroids = kmeans_pp_init(points, k, rng);
    let mut assign = vec![0usize; points.len()];

    for _ in 0..max_iters {
        // Assignment step.
        for (slot, p) in assign.iter_mut().zip(points) {
            *slot = nearest_centroid(p.pos, &centroids);
        }

        // Update step: weighted mean per cluster.
        let mut sums = vec![[0.0f32; 3]; k]; // [Σw·lat, Σw·lon, Σw]
        for (p, &a) in points.iter().zip(&assign) {
            sums[a][0] += p.weight * p.pos.lat;
            sums[a][1] += p.weight * p.pos.lon;
            sums[a][2] += p.weight;
        }

        let mut max_shift = 0.0f32;
        for (ci, sum) in sums.iter().enumerate() {
            if sum[2] > 0.0 {
                let new = GeoPoint::new(sum[0] / sum[2], sum[1] / sum[2]);
                let shift = (new.lat - centroids[ci].lat)
                    .abs()
                    .max((new.lon - centroids[ci].lon).abs());
                max_shift = max_shift.max(shift);
                centroids[ci] = new;
            } else {
                // Empty cluster: re-seed to the point worst served by the
                // current centroids.  Its distance drops to zero afterwards,
                // so successive empty clusters pick distinct points.
                centroids[ci] = farthest_point(points, &centroids);
                max_shift = f32::MAX; // force another assignment pass
            }
        }

        if max_shift < CONVERGENCE_EPS_DEG {
            break;
        }
    }

    centroids
}

/// Index of the nearest centroid; ties resolve to the lowest index.
#[inline]
fn nearest_centroid(pos: GeoPoint, centroids: &[GeoPoint]) -> usize {
    let mut best = 0usize;
    let mut best_d = f32::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = pos.sq_deg(*c);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

/// The point with the largest weighted distance to its nearest centroid
/// (lowest index on ties).
fn farthest_point(points: &[WeightedPoint], centroids: &[GeoPoint]) -> GeoPoint {
    let mut best = points[0].pos;
    let mut best_d = f32::MIN;
    for p in points {
        let d = p.weight * p.pos.sq_deg(centroids[nearest_centroid(p.pos, centroids)]);
        if d > best_d {
            best_d = d;
            best = p.pos;
        }
    }
    best
}

/// k-means++ seeding: first centroid weight-sampled, the rest sampled
/// proportional to `weight · D²` where `D` is the distance to the nearest
/// already-chosen centroid.
fn kmeans_pp_init(points: &[WeightedPoint], k: usize, rng: &mut EngineRng) -> Vec<GeoPoint> {
    let mut centroids = Vec::with_capacity(k);

    let first = weighted_pick(points.iter().map(|p| p.weight), rng);
    centroids.push(points[first].pos);

    // d2[i] = squared distance from point i to its nearest chosen centroid.
    let mut d2: Vec<f32> = points.iter().map(|p| p.pos.sq_deg(centroids[0])).collect();

    while centroids.len() < k {
        let next = weighted_pick(points.iter().zip(&d2).map(|(p, &d)| p.weight * d), rng);
        let pos = points[next].pos;
        centroids.push(pos);
        for (slot, p) in d2.iter_mut().zip(points) {
            *slot = slot.min(p.pos.sq_deg(pos));
        }
    }

    centroids
}

/// Sample an index proportional to `weights` via one uniform draw over the
/// cumulative sum.  A zero total (all points coincide with centroids)
/// degrades to index 0, which is still deterministic.
fn weighted_pick(weights: impl Iterator<Item = f32>, rng: &mut EngineRng) -> usize {
    let cumulative: Vec<f32> = weights
        .scan(0.0f32, |acc, w| {
            *acc += w.max(0.0);
            Some(*acc)
        })
        .collect();

    let total = *cumulative.last().unwrap_or(&0.0);
    if total <= 0.0 {
        return 0;
    }
    let x = rng.gen_range(0.0..total);
    cumulative
        .iter()
        .position(|&c| c > x)
        .unwrap_or(cumulative.len() - 1)
}
