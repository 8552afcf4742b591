//! Per-cell statistics and demand-score normalization.
//!
//! Scoring is a pure function of (accumulators, store index, config):
//! identical inputs always yield identical cells, which is what makes
//! snapshots cacheable and the test suite byte-exact.

use siteplan_core::{CellId, EngineConfig};

use crate::grid::CellAccum;
use crate::region::GridSpec;
use crate::stores::StoreIndex;
use crate::DemandCell;

/// Score every cell of the grid.  One `DemandCell` per accumulator, in
/// cell-index order.
///
/// With the `parallel` feature the per-cell work (dominated by the
/// nearest-store query) is sharded across Rayon workers; collection
/// preserves index order, so output is identical to the sequential path.
pub(crate) fn score_cells(
    spec: &GridSpec,
    accums: &[CellAccum],
    stores: &StoreIndex,
    config: &EngineConfig,
) -> Vec<DemandCell> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        accums
            .par_iter()
            .enumerate()
            .map(|(i, acc)| score_one(spec, CellId(i as u32), acc, stores, config))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        accums
            .iter()
            .enumerate()
            .map(|(i, acc)| score_one(spec, CellId(i as u32), acc, stores, config))
            .collect()
    }
}

fn score_one(
    spec: &GridSpec,
    id: CellId,
    acc: &CellAccum,
    stores: &StoreIndex,
    config: &EngineConfig,
) -> DemandCell {
    let centroid = spec.centroid(id);

    let avg_value = if acc.orders > 0 { acc.total_value / acc.orders as f32 } else { 0.0 };

    // Bounded linear normalization: monotone in orders, capped at max_score.
    let demand_score = (acc.orders as f32 / config.score_normalization).min(config.max_score);

    DemandCell {
        id,
        centroid,
        orders_count: acc.orders,
        total_value: acc.total_value,
        avg_value,
        peak_hour: peak_hour(&acc.hours),
        demand_score,
        nearest_store_m: stores.nearest_m(centroid).map(|(_, m)| m),
    }
}

/// Hour with the most orders; ties break to the lowest hour.  `None` when
/// the histogram is empty.
pub(crate) fn peak_hour(hours: &[u32; 24]) -> Option<u8> {
    let mut best: Option<(u8, u32)> = None;
    for (h, &n) in hours.iter().enumerate() {
        if n > 0 && best.is_none_or(|(_, bn)| n > bn) {
            best = Some((h as u8, n));
        }
    }
    best.map(|(h, _)| h)
}
