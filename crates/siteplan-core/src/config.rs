//! Engine configuration.
//!
//! A plain struct with documented defaults, typically loaded from a TOML/JSON
//! file by the application crate and passed in explicitly.  The engine never
//! reads ambient state — same config + same snapshots means same output.

/// Top-level engine configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Orders-per-cell count that maps to one unit of demand score:
    /// `demand_score = min(orders_count / score_normalization, max_score)`.
    pub score_normalization: f32,

    /// Upper bound of the demand score range.  Default: 10.0 (scores in
    /// `[0, 10]`).
    pub max_score: f32,

    /// Average rider speed used by the built-in haversine travel-time
    /// estimator.  Default: 25 km/h (urban two-wheeler, including stops).
    pub avg_speed_kmh: f32,

    /// Delivery-time threshold for `simulate_addition`, in minutes.
    /// `optimize_locations` takes its threshold per request instead.
    pub default_delivery_time_minutes: f32,

    /// Candidate pool size as a multiple of the requested store count.
    /// A larger pool gives the optimizer more freedom at the cost of a
    /// bigger travel matrix.  Default: 8 (pool of 8 per requested store,
    /// capped by the number of non-empty cells).
    pub candidate_pool_factor: u32,

    /// Lloyd-iteration cap for the weighted k-means candidate generator.
    pub max_kmeans_iters: u32,

    /// Maximum pairwise-swap improvement passes after greedy selection.
    /// Each pass is O(chosen × pool × cells); the search stops earlier as
    /// soon as a full pass finds no strictly improving swap.
    pub swap_passes: u32,

    /// Master RNG seed.  The same seed always produces identical candidates
    /// and therefore identical optimization results.
    pub seed: u64,

    /// Revenue/ROI model constants.
    pub economics: Economics,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_normalization: 10.0,
            max_score: 10.0,
            avg_speed_kmh: 25.0,
            default_delivery_time_minutes: 10.0,
            candidate_pool_factor: 8,
            max_kmeans_iters: 50,
            swap_passes: 4,
            seed: 42,
            economics: Economics::default(),
        }
    }
}

/// Constants for the revenue and ROI estimates.
///
/// These are business inputs, not engine outputs — defaults are placeholders
/// sized for an Indian quick-commerce deployment (₹).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Economics {
    /// Fraction of covered historical demand a new store is expected to
    /// actually capture per month.
    pub conversion_rate: f32,

    /// Average order value used when the covered cells carry no recorded
    /// order values.
    pub avg_order_value_fallback: f32,

    /// Profit as a fraction of revenue.
    pub profit_margin: f32,

    /// One-time cost of opening a store.  `roi_months = setup_cost /
    /// (monthly_revenue * profit_margin)`; non-positive profit yields no
    /// estimate rather than a nonsense number.
    pub setup_cost: f32,
}

impl Default for Economics {
    fn default() -> Self {
        Self {
            conversion_rate: 0.35,
            avg_order_value_fallback: 450.0,
            profit_margin: 0.18,
            setup_cost: 1_200_000.0,
        }
    }
}
