//! Travel-time estimation as an injected capability.
//!
//! # Pluggability
//!
//! The optimizer and evaluator compute travel times only through the
//! [`TravelTimeEstimator`] trait, so applications can swap in a real
//! routing provider (OSRM, isochrone service) without touching the engine.
//! The default [`HaversineEstimator`] — great-circle distance over a flat
//! average speed — is the built-in fallback when no provider is wired in.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync`; independent optimization runs may
//! execute concurrently and share one estimator.

use siteplan_core::GeoPoint;

/// Pluggable travel-time source: minutes between two coordinates.
pub trait TravelTimeEstimator: Send + Sync {
    /// Estimated one-way travel time in minutes from `from` to `to`.
    fn minutes(&self, from: GeoPoint, to: GeoPoint) -> f32;
}

/// Haversine distance divided by a configurable average speed.
///
/// Systematically optimistic in dense street grids (no detours, no
/// signals); the average-speed constant is where that slack is tuned.
#[derive(Copy, Clone, Debug)]
pub struct HaversineEstimator {
    pub speed_kmh: f32,
}

impl HaversineEstimator {
    pub fn new(speed_kmh: f32) -> Self {
        Self { speed_kmh }
    }
}

impl TravelTimeEstimator for HaversineEstimator {
    #[inline]
    fn minutes(&self, from: GeoPoint, to: GeoPoint) -> f32 {
        let km = from.distance_m(to) / 1_000.0;
        km / self.speed_kmh * 60.0
    }
}
