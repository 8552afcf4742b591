//! Unit tests for siteplan-grid.
//!
//! All fixtures are hand-crafted over the Delhi-NCR box the original data
//! set used (28.4–28.9 N, 76.9–77.4 E, 0.05° cells → a 10×10 grid).

#[cfg(test)]
mod helpers {
    use siteplan_core::{Order, OrderId, Store, StoreId};

    use crate::BoundingRegion;

    pub const PERIOD: (i64, i64) = (1_700_000_000, 1_700_000_000 + 90 * 86_400);

    pub fn delhi_region() -> BoundingRegion {
        BoundingRegion::new(28.4, 28.9, 76.9, 77.4).unwrap()
    }

    /// An order placed mid-period at the given coordinates.
    pub fn order(id: u32, lat: f32, lon: f32) -> Order {
        Order::new(OrderId(id), PERIOD.0 + 86_400, lat, lon)
    }

    pub fn cp_store() -> Store {
        Store::new(StoreId(0), "CP Store", 28.6315, 77.2167)
    }
}

// ── Region & spec validation ──────────────────────────────────────────────────

#[cfg(test)]
mod region {
    use siteplan_core::GeoPoint;

    use crate::{BoundingRegion, GridError, GridSpec};

    #[test]
    fn degenerate_box_rejected() {
        for (a, b, c, d) in [
            (28.9, 28.4, 76.9, 77.4), // lat min > max
            (28.4, 28.4, 76.9, 77.4), // lat min == max
            (28.4, 28.9, 77.4, 76.9), // lon min > max
        ] {
            let r = BoundingRegion::new(a, b, c, d);
            assert!(matches!(r, Err(GridError::InvalidRegion { .. })), "{a} {b} {c} {d}");
        }
    }

    #[test]
    fn non_finite_bound_rejected() {
        assert!(BoundingRegion::new(f32::NAN, 28.9, 76.9, 77.4).is_err());
        assert!(BoundingRegion::new(28.4, f32::INFINITY, 76.9, 77.4).is_err());
    }

    #[test]
    fn bad_cell_size_rejected() {
        let region = super::helpers::delhi_region();
        assert!(GridSpec::new(region, 0.0).is_err());
        assert!(GridSpec::new(region, -0.05).is_err());
        assert!(GridSpec::new(region, f32::NAN).is_err());
    }

    #[test]
    fn half_degree_box_is_10x10() {
        // 0.5° / 0.05° must be exactly 10 cells per axis despite neither
        // value being exactly representable in binary.
        let spec = GridSpec::new(super::helpers::delhi_region(), 0.05).unwrap();
        assert_eq!(spec.rows(), 10);
        assert_eq!(spec.cols(), 10);
        assert_eq!(spec.cell_count(), 100);
    }

    #[test]
    fn non_divisible_extent_rounds_up() {
        let region = BoundingRegion::new(0.0, 1.0, 0.0, 1.0).unwrap();
        let spec = GridSpec::new(region, 0.3).unwrap();
        // 1.0 / 0.3 = 3.33… → 4 cells, last one extending past the edge.
        assert_eq!(spec.rows(), 4);
        assert_eq!(spec.cols(), 4);
    }

    #[test]
    fn cell_index_outside_region() {
        let spec = GridSpec::new(super::helpers::delhi_region(), 0.05).unwrap();
        assert!(spec.cell_index(GeoPoint::new(28.0, 77.0)).is_none());
        assert!(spec.cell_index(GeoPoint::new(28.5, 80.0)).is_none());
    }

    #[test]
    fn centroid_roundtrips_to_same_cell() {
        let spec = GridSpec::new(super::helpers::delhi_region(), 0.05).unwrap();
        for i in 0..spec.cell_count() as u32 {
            let id = siteplan_core::CellId(i);
            let c = spec.centroid(id);
            assert_eq!(spec.cell_index(c), Some(id), "cell {i} centroid {c}");
        }
    }
}

// ── Bucketing: partition invariant & boundary rule ────────────────────────────

#[cfg(test)]
mod bucketing {
    use siteplan_core::{EngineConfig, GeoPoint};

    use super::helpers::{PERIOD, delhi_region, order};
    use crate::{GridSpec, build_demand_snapshot};

    #[test]
    fn every_order_lands_in_exactly_one_cell() {
        // Lattice of 1 000 in-region orders.
        let orders: Vec<_> = (0..1_000)
            .map(|i| {
                let lat = 28.4 + (i % 40) as f32 * 0.012;
                let lon = 76.9 + (i / 40) as f32 * 0.019;
                order(i, lat, lon)
            })
            .collect();

        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();

        let sum: u32 = snap.cells.iter().map(|c| c.orders_count).sum();
        assert_eq!(sum, orders.len() as u32, "no order dropped or double-counted");
        assert_eq!(snap.total_orders, orders.len() as u32);
        assert_eq!(snap.orders_outside_region, 0);
    }

    #[test]
    fn boundary_order_is_assigned_once_deterministically() {
        let spec = GridSpec::new(delhi_region(), 0.05).unwrap();

        // Exactly on an interior cell edge: belongs to the cell whose low
        // edge it sits on.
        let edge = GeoPoint::new(28.4 + 0.05, 76.9 + 0.05);
        let id = spec.cell_index(edge).unwrap();
        let (row, col) = spec.row_col(id);
        assert_eq!((row, col), (1, 1));

        // Repeated lookups agree (total, tie-free function).
        for _ in 0..10 {
            assert_eq!(spec.cell_index(edge), Some(id));
        }
    }

    #[test]
    fn far_edges_close_the_tiling() {
        let spec = GridSpec::new(delhi_region(), 0.05).unwrap();
        let corner = GeoPoint::new(28.9, 77.4);
        let id = spec.cell_index(corner).unwrap();
        assert_eq!(spec.row_col(id), (9, 9), "region max corner clamps into the last cell");
    }

    #[test]
    fn out_of_period_orders_are_ignored() {
        // One order before the window, one exactly at its (exclusive) end.
        let mut orders = vec![order(0, 28.5, 77.0), order(1, 28.5, 77.0)];
        orders[0].timestamp_unix_secs = PERIOD.0 - 1;
        orders[1].timestamp_unix_secs = PERIOD.1;

        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(snap.total_orders, 0);
        assert!(!snap.has_demand());
    }

    #[test]
    fn outside_region_orders_are_counted_not_dropped() {
        let orders = vec![order(0, 28.5, 77.0), order(1, 10.0, 10.0)];
        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(snap.total_orders, 1);
        assert_eq!(snap.orders_outside_region, 1);
    }

    #[test]
    fn repeated_builds_are_identical() {
        let orders: Vec<_> = (0..500)
            .map(|i| order(i, 28.41 + (i % 31) as f32 * 0.015, 76.91 + (i % 17) as f32 * 0.023))
            .collect();
        let cfg = EngineConfig::default();
        let a = build_demand_snapshot(&orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1, &cfg)
            .unwrap();
        let b = build_demand_snapshot(&orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1, &cfg)
            .unwrap();
        assert_eq!(a.cells, b.cells, "identical inputs → bit-identical cells");
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scoring {
    use siteplan_core::{EngineConfig, Order, OrderId};

    use super::helpers::{PERIOD, cp_store, delhi_region, order};
    use crate::build_demand_snapshot;

    /// `n` orders at the given spot, one per minute.
    fn burst(start_id: u32, n: u32, lat: f32, lon: f32) -> Vec<Order> {
        (0..n).map(|i| {
            let mut o = order(start_id + i, lat, lon);
            o.timestamp_unix_secs += i as i64 * 60;
            o
        }).collect()
    }

    #[test]
    fn score_is_monotone_and_bounded() {
        let mut orders = burst(0, 30, 28.425, 76.925); // cell A: 30 orders
        orders.extend(burst(100, 5, 28.875, 77.375)); // cell B: 5 orders
        let cfg = EngineConfig::default();
        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1, &cfg,
        )
        .unwrap();

        let non_empty: Vec<_> = snap.non_empty().collect();
        assert_eq!(non_empty.len(), 2);
        let (a, b) = (non_empty[0], non_empty[1]);
        assert!(a.orders_count > b.orders_count);
        assert!(a.demand_score >= b.demand_score, "monotone in orders_count");
        for c in &snap.cells {
            assert!(c.demand_score >= 0.0 && c.demand_score <= cfg.max_score);
        }
        // 30 orders / normalization 10 = 3.0
        assert!((a.demand_score - 3.0).abs() < 1e-6);
    }

    #[test]
    fn score_caps_at_max() {
        let orders = burst(0, 500, 28.425, 76.925); // 500 / 10 = 50 → capped at 10
        let cfg = EngineConfig::default();
        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1, &cfg,
        )
        .unwrap();
        let cell = snap.non_empty().next().unwrap();
        assert_eq!(cell.demand_score, cfg.max_score);
    }

    #[test]
    fn values_sum_and_average_with_missing_as_zero() {
        let mut orders = burst(0, 3, 28.425, 76.925);
        orders[0].order_value = Some(300.0);
        orders[1].order_value = Some(600.0);
        // orders[2] has no value → contributes 0.
        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();
        let cell = snap.non_empty().next().unwrap();
        assert_eq!(cell.total_value, 900.0);
        assert_eq!(cell.avg_value, 300.0);
    }

    #[test]
    fn peak_hour_ties_break_low() {
        let base = PERIOD.0 - PERIOD.0.rem_euclid(86_400); // midnight UTC
        let mk = |id: u32, hour: i64| {
            Order::new(OrderId(id), base + 86_400 + hour * 3_600, 28.425, 76.925)
        };
        // Two orders at 09:00, two at 21:00 — tie breaks to 9.
        let orders = vec![mk(0, 9), mk(1, 9), mk(2, 21), mk(3, 21)];
        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(snap.non_empty().next().unwrap().peak_hour, Some(9));
    }

    #[test]
    fn empty_cells_have_no_peak_hour() {
        let snap = build_demand_snapshot(
            &[], &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(snap.cells.iter().all(|c| c.peak_hour.is_none()));
        assert!(snap.cells.iter().all(|c| c.demand_score == 0.0));
        assert!(!snap.has_demand());
    }

    #[test]
    fn nearest_store_absent_without_active_stores() {
        let mut inactive = cp_store();
        inactive.is_active = false;

        let orders = burst(0, 3, 28.63, 77.21);
        let snap = build_demand_snapshot(
            &orders, &[inactive], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(snap.cells.iter().all(|c| c.nearest_store_m.is_none()));
    }

    #[test]
    fn nearest_store_distance_is_plausible() {
        let store = cp_store(); // (28.6315, 77.2167)
        let orders = burst(0, 3, 28.63, 77.21);
        let snap = build_demand_snapshot(
            &orders, &[store.clone()], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();
        let cell = snap.non_empty().next().unwrap();
        let d = cell.nearest_store_m.unwrap();
        let expected = cell.centroid.distance_m(store.pos);
        assert!((d - expected).abs() < 1.0, "got {d}, expected {expected}");
    }
}

// ── Store index ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_index {
    use siteplan_core::{GeoPoint, Store, StoreId};

    use crate::StoreIndex;

    #[test]
    fn picks_the_nearer_store() {
        let stores = vec![
            Store::new(StoreId(0), "CP", 28.6315, 77.2167),
            Store::new(StoreId(1), "Noida", 28.5355, 77.3910),
        ];
        let idx = StoreIndex::from_stores(&stores);
        let (id, _) = idx.nearest_m(GeoPoint::new(28.63, 77.22)).unwrap();
        assert_eq!(id, StoreId(0));
        let (id, _) = idx.nearest_m(GeoPoint::new(28.54, 77.39)).unwrap();
        assert_eq!(id, StoreId(1));
    }

    #[test]
    fn empty_when_all_inactive() {
        let mut store = Store::new(StoreId(0), "CP", 28.6315, 77.2167);
        store.is_active = false;
        let idx = StoreIndex::from_stores(&[store]);
        assert!(idx.is_empty());
        assert!(idx.nearest_m(GeoPoint::new(28.6, 77.2)).is_none());
    }
}

// ── Concentrated-demand scenario ──────────────────────────────────────────────

#[cfg(test)]
mod concentration {
    use siteplan_core::EngineConfig;

    use super::helpers::{PERIOD, delhi_region, order};
    use crate::build_demand_snapshot;

    #[test]
    fn demand_stays_in_its_quadrant() {
        // 1 000 orders on a lattice inside the south-west quadrant
        // (lat < 28.65, lon < 77.15) of the 0.5° box.
        let orders: Vec<_> = (0..1_000)
            .map(|i| {
                let lat = 28.41 + (i % 25) as f32 * 0.009;
                let lon = 76.91 + ((i / 25) % 25) as f32 * 0.009;
                order(i, lat, lon)
            })
            .collect();

        let snap = build_demand_snapshot(
            &orders, &[], delhi_region(), 0.05, PERIOD.0, PERIOD.1,
            &EngineConfig::default(),
        )
        .unwrap();

        let non_empty: Vec<_> = snap.non_empty().collect();
        assert!(!non_empty.is_empty());
        let in_quadrant = non_empty
            .iter()
            .filter(|c| c.centroid.lat < 28.65 && c.centroid.lon < 77.15)
            .count();
        let share = in_quadrant as f32 / non_empty.len() as f32;
        assert!(share > 0.8, "expected >80% of non-empty cells in the quadrant, got {share}");
    }
}
