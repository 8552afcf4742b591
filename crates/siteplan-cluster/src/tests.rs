//! Unit tests for siteplan-cluster.

#[cfg(test)]
mod helpers {
    use siteplan_core::{EngineConfig, Order, OrderId};
    use siteplan_grid::{BoundingRegion, DemandSnapshot, build_demand_snapshot};

    pub const PERIOD: (i64, i64) = (1_700_000_000, 1_700_000_000 + 30 * 86_400);

    /// Snapshot over a 1°×1° box with 0.1° cells (10×10 grid) and the given
    /// order positions.
    pub fn snapshot(order_positions: &[(f32, f32)]) -> DemandSnapshot {
        let orders: Vec<Order> = order_positions
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| Order::new(OrderId(i as u32), PERIOD.0 + 3_600, lat, lon))
            .collect();
        build_demand_snapshot(
            &orders,
            &[],
            BoundingRegion::new(0.0, 1.0, 0.0, 1.0).unwrap(),
            0.1,
            PERIOD.0,
            PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap()
    }

    /// `n` orders at each of two opposite corners of the box, spread over
    /// the corner 5×5 cell blocks (~50 non-empty cells for n ≥ 25).
    pub fn two_corner_positions(n: usize) -> Vec<(f32, f32)> {
        let mut v = Vec::with_capacity(2 * n);
        for i in 0..n {
            let dlat = (i % 5) as f32 * 0.1;
            let dlon = ((i / 5) % 5) as f32 * 0.1;
            v.push((0.05 + dlat, 0.05 + dlon));
            v.push((0.95 - dlat, 0.95 - dlon));
        }
        v
    }
}

#[cfg(test)]
mod pool_size {
    use crate::candidate_pool_size;

    #[test]
    fn scales_and_caps() {
        assert_eq!(candidate_pool_size(3, 8, 1_000), 24);
        assert_eq!(candidate_pool_size(3, 8, 10), 10); // capped by availability
        assert_eq!(candidate_pool_size(5, 0, 100), 5); // never below requested
        assert_eq!(candidate_pool_size(0, 8, 100), 0);
    }
}

#[cfg(test)]
mod kmeans {
    use siteplan_core::EngineRng;

    use crate::{WeightedPoint, weighted_kmeans};

    fn points(coords: &[(f32, f32, f32)]) -> Vec<WeightedPoint> {
        coords
            .iter()
            .map(|&(lat, lon, w)| WeightedPoint {
                pos: siteplan_core::GeoPoint::new(lat, lon),
                weight: w,
            })
            .collect()
    }

    #[test]
    fn k1_is_weighted_mean() {
        let pts = points(&[(0.0, 0.0, 1.0), (1.0, 1.0, 3.0)]);
        let mut rng = EngineRng::new(7);
        let c = weighted_kmeans(&pts, 1, 50, &mut rng);
        assert_eq!(c.len(), 1);
        // Weighted mean: (0·1 + 1·3) / 4 = 0.75 on both axes.
        assert!((c[0].lat - 0.75).abs() < 1e-5, "got {}", c[0].lat);
        assert!((c[0].lon - 0.75).abs() < 1e-5);
    }

    #[test]
    fn separates_two_groups() {
        let pts = points(&[
            (0.0, 0.0, 1.0),
            (0.1, 0.1, 1.0),
            (0.9, 0.9, 1.0),
            (1.0, 1.0, 1.0),
        ]);
        let mut rng = EngineRng::new(7);
        let mut c = weighted_kmeans(&pts, 2, 50, &mut rng);
        c.sort_by(|a, b| a.lat.total_cmp(&b.lat));
        assert!((c[0].lat - 0.05).abs() < 1e-4, "low group centroid, got {}", c[0].lat);
        assert!((c[1].lat - 0.95).abs() < 1e-4, "high group centroid, got {}", c[1].lat);
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let pts = points(&[
            (0.1, 0.2, 1.0),
            (0.3, 0.8, 2.0),
            (0.7, 0.4, 1.5),
            (0.9, 0.9, 0.5),
            (0.5, 0.5, 3.0),
        ]);
        let a = weighted_kmeans(&pts, 2, 50, &mut EngineRng::new(42));
        let b = weighted_kmeans(&pts, 2, 50, &mut EngineRng::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn heavier_points_pull_the_centroid() {
        let pts = points(&[(0.0, 0.0, 10.0), (1.0, 1.0, 1.0)]);
        let c = weighted_kmeans(&pts, 1, 50, &mut EngineRng::new(1));
        assert!(c[0].lat < 0.5, "centroid should sit near the heavy point, got {}", c[0].lat);
    }
}

#[cfg(test)]
mod generate {
    use siteplan_core::EngineConfig;

    use super::helpers::{snapshot, two_corner_positions};
    use crate::generate_candidates;

    #[test]
    fn degenerate_returns_one_candidate_per_cell() {
        // Three orders in three distinct cells; pool wants 8×2 = 16.
        let snap = snapshot(&[(0.05, 0.05), (0.55, 0.55), (0.95, 0.95)]);
        let candidates = generate_candidates(&snap, 2, &EngineConfig::default());
        assert_eq!(candidates.len(), 3);
        let centroids: Vec<_> = snap.non_empty().map(|c| c.centroid).collect();
        assert_eq!(candidates, centroids);
    }

    #[test]
    fn all_empty_snapshot_falls_back_to_grid_centroids() {
        let snap = snapshot(&[]);
        let candidates = generate_candidates(&snap, 3, &EngineConfig::default());
        assert_eq!(candidates.len(), snap.cells.len());
    }

    #[test]
    fn clustered_pool_is_bounded_and_deterministic() {
        // 60 orders spread over ~18 non-empty cells; pool for 1 store = 8.
        let snap = snapshot(&two_corner_positions(30));
        let cfg = EngineConfig::default();
        let a = generate_candidates(&snap, 1, &cfg);
        let b = generate_candidates(&snap, 1, &cfg);
        assert_eq!(a, b, "same seed, same snapshot → same pool");
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn candidates_land_inside_the_demand_area() {
        let snap = snapshot(&two_corner_positions(30));
        for c in generate_candidates(&snap, 1, &EngineConfig::default()) {
            assert!(
                (0.0..=1.0).contains(&c.lat) && (0.0..=1.0).contains(&c.lon),
                "centroid {c} escaped the region"
            );
        }
    }
}
