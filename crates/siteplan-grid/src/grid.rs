//! Order bucketing and the `DemandSnapshot` aggregate.
//!
//! # Determinism
//!
//! Bucketing is two phases: a pure coordinate→cell mapping per order (this
//! is the embarrassingly parallel part, sharded under the `parallel`
//! feature), then a sequential accumulation in input order.  Both phases
//! are order-independent of thread scheduling, so sequential and parallel
//! builds produce bit-identical snapshots.

use siteplan_core::{CellId, EngineConfig, Order, Store};

use crate::region::{BoundingRegion, GridSpec};
use crate::score::score_cells;
use crate::stores::StoreIndex;
use crate::{DemandCell, GridResult};

// ── Per-cell accumulator ──────────────────────────────────────────────────────

/// Running statistics for one cell during bucketing.
#[derive(Clone)]
pub(crate) struct CellAccum {
    pub orders: u32,
    pub total_value: f32,
    pub hours: [u32; 24],
}

impl CellAccum {
    fn new() -> Self {
        Self { orders: 0, total_value: 0.0, hours: [0; 24] }
    }

    #[inline]
    fn add(&mut self, order: &Order) {
        self.orders += 1;
        self.total_value += order.value_or_zero();
        self.hours[order.hour_of_day() as usize] += 1;
    }
}

/// Where one order landed.
enum Slot {
    OutOfPeriod,
    OutsideRegion,
    Cell(CellId),
}

#[inline]
fn slot_for(spec: &GridSpec, order: &Order, period: (i64, i64)) -> Slot {
    let ts = order.timestamp_unix_secs;
    if ts < period.0 || ts >= period.1 {
        return Slot::OutOfPeriod;
    }
    match spec.cell_index(order.pos) {
        Some(id) => Slot::Cell(id),
        None => Slot::OutsideRegion,
    }
}

/// Bucket orders into per-cell accumulators.
///
/// Returns `(accumulators, bucketed_count, outside_region_count)`.
fn bucket(spec: &GridSpec, orders: &[Order], period: (i64, i64)) -> (Vec<CellAccum>, u32, u32) {
    // Phase 1: map each order to its slot.  Pure arithmetic per order.
    #[cfg(feature = "parallel")]
    let slots: Vec<Slot> = {
        use rayon::prelude::*;
        orders.par_iter().map(|o| slot_for(spec, o, period)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let slots: Vec<Slot> = orders.iter().map(|o| slot_for(spec, o, period)).collect();

    // Phase 2: accumulate sequentially in input order.
    let mut accums = vec![CellAccum::new(); spec.cell_count()];
    let mut bucketed = 0u32;
    let mut outside = 0u32;
    for (order, slot) in orders.iter().zip(&slots) {
        match slot {
            Slot::OutOfPeriod => {}
            Slot::OutsideRegion => outside += 1,
            Slot::Cell(id) => {
                accums[id.index()].add(order);
                bucketed += 1;
            }
        }
    }
    (accums, bucketed, outside)
}

// ── DemandSnapshot ────────────────────────────────────────────────────────────

/// One full aggregation run: every cell of the grid, scored, plus the
/// parameters that produced it.  Replaces (never updates) any prior
/// snapshot for the same region.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandSnapshot {
    pub spec: GridSpec,

    /// Period window the orders were filtered to, Unix seconds, half-open
    /// `[start, end)`.
    pub period_start_unix_secs: i64,
    pub period_end_unix_secs: i64,

    /// Orders bucketed into cells (in-period, in-region).
    pub total_orders: u32,

    /// In-period orders whose coordinates fell outside the region.  Counted
    /// so no order is ever silently dropped.
    pub orders_outside_region: u32,

    /// One entry per grid cell, indexed by `CellId`.  Empty cells are
    /// retained with zero counts.
    pub cells: Vec<DemandCell>,
}

impl DemandSnapshot {
    /// `false` when no orders landed in any cell — the non-fatal
    /// "insufficient data" condition: downstream optimization still runs
    /// and reports 0 % coverage.
    pub fn has_demand(&self) -> bool {
        self.total_orders > 0
    }

    /// Cells that received at least one order.
    pub fn non_empty(&self) -> impl Iterator<Item = &DemandCell> {
        self.cells.iter().filter(|c| !c.is_empty())
    }

    /// Total weighted demand — the coverage-percentage denominator.
    pub fn total_weight(&self) -> f32 {
        self.cells.iter().map(|c| c.demand_score).sum()
    }

    /// Period length in (fractional) days; 0 for a degenerate window.
    pub fn period_days(&self) -> f32 {
        let secs = self.period_end_unix_secs - self.period_start_unix_secs;
        (secs.max(0) as f32) / 86_400.0
    }
}

/// Build a scored demand snapshot from raw order and store snapshots.
///
/// This is the whole of pipeline stages 1–2: validate geometry, bucket
/// orders (O(1) each), then score every cell.  Fails only on degenerate
/// geometry; an empty period is a valid all-empty snapshot.
pub fn build_demand_snapshot(
    orders: &[Order],
    stores: &[Store],
    region: BoundingRegion,
    cell_size_deg: f32,
    period_start_unix_secs: i64,
    period_end_unix_secs: i64,
    config: &EngineConfig,
) -> GridResult<DemandSnapshot> {
    let spec = GridSpec::new(region, cell_size_deg)?;

    let period = (period_start_unix_secs, period_end_unix_secs);
    let (accums, bucketed, outside) = bucket(&spec, orders, period);

    let index = StoreIndex::from_stores(stores);
    let cells = score_cells(&spec, &accums, &index, config);

    Ok(DemandSnapshot {
        spec,
        period_start_unix_secs,
        period_end_unix_secs,
        total_orders: bucketed,
        orders_outside_region: outside,
        cells,
    })
}
