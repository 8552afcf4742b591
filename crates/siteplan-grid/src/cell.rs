//! The per-cell aggregate record.

use siteplan_core::{CellId, GeoPoint};

/// Aggregated demand for one grid cell over one period window.
///
/// Produced fresh on every aggregation run — never mutated in place.  Empty
/// cells are retained (they matter for coverage denominators) but are
/// excluded from candidate generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandCell {
    pub id: CellId,
    pub centroid: GeoPoint,

    /// Orders bucketed into this cell within the period.
    pub orders_count: u32,

    /// Sum of recorded order values; orders without a value contribute 0.
    pub total_value: f32,

    /// `total_value / orders_count`, or 0 for empty cells.
    pub avg_value: f32,

    /// Hour of day (0–23, UTC) with the most orders; ties break to the
    /// lowest hour.  `None` for empty cells.
    pub peak_hour: Option<u8>,

    /// `min(orders_count / score_normalization, max_score)` — bounded,
    /// monotone in `orders_count`.
    pub demand_score: f32,

    /// Haversine metres from the centroid to the nearest *active* store.
    /// `None` when no active stores exist; downstream coverage logic must
    /// treat that as uncovered.
    pub nearest_store_m: Option<f32>,
}

impl DemandCell {
    /// `true` if no orders fell in this cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders_count == 0
    }
}
